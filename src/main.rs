use doom_vst::audio::AudioEngine;
use doom_vst::config::BridgeConfig;
use doom_vst::engine::{SCREEN_HEIGHT, SCREEN_WIDTH};
use doom_vst::midi::input::MidiInput;
use doom_vst::plugin::{BindingOwner, CONTROLS_HEIGHT, PLUGIN_NAME, PluginInstance};
use doom_vst::ui::app::EditorApp;
use doom_vst::{create_control_channel, create_midi_channel, create_notification_channel};
use env_logger::Env;
use std::sync::{Arc, Mutex};

// UI edits arrive one click at a time, a small buffer is plenty
const CONTROL_RINGBUFFER_CAPACITY: usize = 64;
const NOTIFICATION_RINGBUFFER_CAPACITY: usize = 256;

fn load_config() -> BridgeConfig {
    match BridgeConfig::discover() {
        Ok(Some((path, config))) => {
            log::info!("Loaded configuration from {}", path.display());
            config
        }
        Ok(None) => {
            log::debug!("No configuration file found, using defaults");
            BridgeConfig::default()
        }
        Err(e) => {
            log::error!("{}, using defaults", e);
            BridgeConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("=== {} ===", PLUGIN_NAME);

    let config = load_config();

    let (midi_tx, midi_rx) = create_midi_channel(config.midi_channel_capacity);
    let (control_tx, control_rx) = create_control_channel(CONTROL_RINGBUFFER_CAPACITY);
    let (notification_tx, notification_rx) =
        create_notification_channel(NOTIFICATION_RINGBUFFER_CAPACITY);
    let notification_tx = Arc::new(Mutex::new(notification_tx));

    let PluginInstance {
        processor,
        frame_loop,
        note_map,
        parameters,
        asset_path: _,
    } = PluginInstance::new(&config);
    let mode = processor.mode().clone();
    let bindings = BindingOwner::new(note_map, parameters, control_rx);

    let _audio_engine = match AudioEngine::new(processor, midi_rx, notification_tx) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    let _midi_input = match MidiInput::new(config.midi_port.as_deref(), midi_tx) {
        Ok(input) => Some(input),
        Err(e) => {
            log::warn!("MIDI input unavailable: {}", e);
            None
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                SCREEN_WIDTH as f32,
                (SCREEN_HEIGHT + CONTROLS_HEIGHT) as f32,
            ])
            .with_resizable(false)
            .with_title(PLUGIN_NAME),
        ..Default::default()
    };

    let result = eframe::run_native(
        PLUGIN_NAME,
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(EditorApp::new(
                mode,
                frame_loop,
                (SCREEN_WIDTH, SCREEN_HEIGHT),
                bindings,
                control_tx,
                notification_rx,
            )))
        }),
    );

    if let Err(e) = result {
        log::error!("Editor window failed: {}", e);
    }
}
