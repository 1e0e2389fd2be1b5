// Editor window - game frame on top, binding controls underneath

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use eframe::egui;
use ringbuf::traits::{Consumer, Producer};

use crate::bridge::command::{CommandId, PITCH_CLASS_NAMES};
use crate::bridge::event_queue::KeyEventQueue;
use crate::bridge::BridgeResult;
use crate::engine::GameEngine;
use crate::messaging::channels::{ControlProducer, NotificationConsumer};
use crate::messaging::command::ControlCommand;
use crate::messaging::notification::{Notification, NotificationCategory, NotificationLevel};
use crate::plugin::bindings::{BindingOwner, note_for_pitch_class};
use crate::plugin::processor::StartupMode;
use crate::video::frame::DisplayImage;
use crate::video::scheduler::FrameLoop;

const MAX_NOTIFICATIONS: usize = 10;
const NOTIFICATION_LIFETIME_MS: u64 = 5000;
const COMBO_PADDING: f32 = 8.0;
/// Poll interval for notifications when no frame is scheduled
const IDLE_REPAINT: Duration = Duration::from_millis(250);

pub struct EditorApp<E: GameEngine> {
    mode: StartupMode,
    frame_loop: Option<FrameLoop<E>>,
    texture: Option<egui::TextureHandle>,
    raster_size: egui::Vec2,
    bindings: BindingOwner,
    control_tx: ControlProducer,
    event_queue: Option<KeyEventQueue>,
    last_dropped: u64,
    notification_rx: NotificationConsumer,
    notification_queue: VecDeque<Notification>,
}

impl<E: GameEngine> EditorApp<E> {
    pub fn new(
        mode: StartupMode,
        mut frame_loop: Option<FrameLoop<E>>,
        raster_size: (usize, usize),
        bindings: BindingOwner,
        control_tx: ControlProducer,
        notification_rx: NotificationConsumer,
    ) -> Self {
        // The scheduler only ever starts in running mode
        let event_queue = frame_loop.as_mut().map(|frame_loop| {
            frame_loop.start(Instant::now());
            frame_loop.driver().queue().clone()
        });

        Self {
            mode,
            frame_loop,
            texture: None,
            raster_size: egui::vec2(raster_size.0 as f32, raster_size.1 as f32),
            bindings,
            control_tx,
            event_queue,
            last_dropped: 0,
            notification_rx,
            notification_queue: VecDeque::new(),
        }
    }

    fn push_notification(&mut self, notification: Notification) {
        push_capped(&mut self.notification_queue, notification);
    }

    fn update_notifications(&mut self) {
        while let Some(notification) = self.notification_rx.try_pop() {
            self.push_notification(notification);
        }
        for notification in self.bindings.process_pending() {
            self.push_notification(notification);
        }
    }

    /// Warns once per overflow burst of the key event queue
    fn check_queue_overflow(&mut self) {
        let Some(queue) = &self.event_queue else {
            return;
        };
        let dropped = queue.dropped_count();
        if dropped > self.last_dropped {
            let lost = dropped - self.last_dropped;
            self.last_dropped = dropped;
            log::warn!("Key event queue overflow: {} oldest events dropped", lost);
            self.push_notification(Notification::warning(
                NotificationCategory::Midi,
                format!("Too many notes: {} key events dropped", lost),
            ));
        }
    }

    fn run_frame(&mut self, ctx: &egui::Context) {
        let Some(frame_loop) = self.frame_loop.as_mut() else {
            ctx.request_repaint_after(IDLE_REPAINT);
            return;
        };

        let now = Instant::now();
        match frame_loop.tick(now) {
            Ok(Some(image)) => upload_frame(ctx, &mut self.texture, image),
            Ok(None) => {}
            Err(e) => {
                log::error!("Frame publication failed: {}", e);
                let notification = Notification::error(NotificationCategory::Engine, e.to_string());
                push_capped(&mut self.notification_queue, notification);
            }
        }

        let wait = frame_loop
            .scheduler()
            .time_until_next(Instant::now())
            .unwrap_or(IDLE_REPAINT);
        ctx.request_repaint_after(wait);
    }

    fn latest_notification(&self) -> Option<&Notification> {
        self.notification_queue
            .back()
            .filter(|n| n.is_recent(NOTIFICATION_LIFETIME_MS))
    }

    fn draw_frame(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(self.raster_size, egui::Sense::hover());

        if let Some(texture) = &self.texture {
            egui::Image::new(egui::load::SizedTexture::new(texture.id(), self.raster_size))
                .paint_at(ui, rect);
        } else {
            ui.painter().rect_filled(rect, 0.0, egui::Color32::BLACK);
        }

        if let Some(notification) = self.latest_notification() {
            ui.painter().text(
                rect.left_bottom() + egui::vec2(4.0, -4.0),
                egui::Align2::LEFT_BOTTOM,
                &notification.message,
                egui::FontId::proportional(12.0),
                level_color(notification.level),
            );
        }
    }

    fn draw_error(&self, ui: &mut egui::Ui, message: &str) {
        ui.allocate_ui(self.raster_size, |ui| {
            ui.add_space(COMBO_PADDING);
            ui.colored_label(egui::Color32::LIGHT_RED, message);
        });
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        let combo_width = self.raster_size.x / CommandId::ALL.len() as f32 - COMBO_PADDING;
        let snapshot = self.bindings.note_map().snapshot();
        let mut requests = Vec::new();

        ui.horizontal(|ui| {
            ui.add_space(COMBO_PADDING / 2.0);
            for command in CommandId::ALL {
                let current = snapshot.note_for(command);
                let selected = current.map(|note| note % 12);

                ui.vertical(|ui| {
                    ui.label(command.short_label());
                    let text = match current {
                        Some(note) => PITCH_CLASS_NAMES[(note % 12) as usize],
                        None => "-",
                    };
                    egui::ComboBox::from_id_salt(command.parameter_id())
                        .selected_text(text)
                        .width(combo_width)
                        .show_ui(ui, |ui| {
                            for (pitch_class, name) in PITCH_CLASS_NAMES.iter().enumerate() {
                                let pitch_class = pitch_class as u8;
                                if ui
                                    .selectable_label(selected == Some(pitch_class), *name)
                                    .clicked()
                                    && selected != Some(pitch_class)
                                {
                                    requests.push(
                                        note_for_pitch_class(current, command, pitch_class)
                                            .map(|note| ControlCommand::Rebind { command, note }),
                                    );
                                }
                            }
                        })
                        .response
                        .on_hover_text(match current {
                            Some(note) => format!("{}: note {}", command.label(), note),
                            None => format!("{}: unbound", command.label()),
                        })
                        .context_menu(|ui| {
                            if ui.button("Unbind").clicked() {
                                requests.push(Ok(ControlCommand::Unbind(command)));
                                ui.close_menu();
                            }
                            if ui.button("Log bindings").clicked() {
                                requests.push(Ok(ControlCommand::LogBindings));
                                ui.close_menu();
                            }
                        });
                });
            }
        });

        for request in requests {
            self.send_control(request);
        }
    }

    fn send_control(&mut self, request: BridgeResult<ControlCommand>) {
        match request {
            Ok(command) => {
                if let Err(dropped) = self.control_tx.try_push(command) {
                    log::warn!("Control channel full, {:?} dropped", dropped);
                }
            }
            Err(e) => {
                self.push_notification(Notification::error(NotificationCategory::Bindings, e.to_string()));
            }
        }
    }
}

/// Appends, keeping only the newest `MAX_NOTIFICATIONS`
fn push_capped(queue: &mut VecDeque<Notification>, notification: Notification) {
    queue.push_back(notification);
    while queue.len() > MAX_NOTIFICATIONS {
        queue.pop_front();
    }
}

fn upload_frame(ctx: &egui::Context, texture: &mut Option<egui::TextureHandle>, image: &DisplayImage) {
    let color_image = image.to_color_image();
    match texture {
        Some(handle) => handle.set(color_image, egui::TextureOptions::NEAREST),
        None => {
            *texture = Some(ctx.load_texture("game-frame", color_image, egui::TextureOptions::NEAREST));
        }
    }
}

fn level_color(level: NotificationLevel) -> egui::Color32 {
    match level {
        NotificationLevel::Info => egui::Color32::from_rgb(100, 150, 255),
        NotificationLevel::Warning => egui::Color32::from_rgb(255, 165, 0),
        NotificationLevel::Error => egui::Color32::RED,
    }
}

impl<E: GameEngine> eframe::App for EditorApp<E> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_notifications();
        self.check_queue_overflow();
        self.run_frame(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(ctx.style().visuals.window_fill()))
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing.y = 2.0;
                match self.mode.clone() {
                    StartupMode::Running => {
                        self.draw_frame(ui);
                        self.draw_controls(ui);
                    }
                    StartupMode::Error(message) => self.draw_error(ui, &message),
                }
            });
    }
}

impl<E: GameEngine> Drop for EditorApp<E> {
    fn drop(&mut self) {
        // Stop the timer before the buffers it reads are released
        if let Some(frame_loop) = self.frame_loop.as_mut() {
            frame_loop.stop();
        }
    }
}
