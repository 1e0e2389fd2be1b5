// Bundled demo engine
//
// A small deterministic stand-in for the real game: it reacts to the same
// eight commands and renders into a native-size raster. The alpha byte of
// its raster is left at zero, like the real engine's.

use crate::bridge::command::{COMMAND_COUNT, CommandId};
use crate::engine::assets::WadHeader;
use crate::engine::{GameEngine, KeyPoll, SCREEN_HEIGHT, SCREEN_WIDTH};

const PLAYER_SIZE: i32 = 16;
const WALK_SPEED: i32 = 2;
const FLASH_FRAMES: u32 = 4;
const FLOOR_ROW: usize = SCREEN_HEIGHT * 3 / 4;

const PLAYER_COLOR: u32 = 0x00_40_c0_40;
const FLASH_COLOR: u32 = 0x00_ff_e0_60;
const FLOOR_COLOR: u32 = 0x00_30_20_10;
const MENU_COLOR: u32 = 0x00_20_20_20;
const MENU_BORDER: u32 = 0x00_b0_00_00;

pub struct DemoEngine {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    seed: u32,
    frame: u64,
    held: [bool; COMMAND_COUNT],
    tapped: [bool; COMMAND_COUNT],
    x: i32,
    y: i32,
    shots: u32,
    uses: u32,
    flash: u32,
    menu_open: bool,
}

impl DemoEngine {
    pub fn new(seed: u32) -> Self {
        let mut engine = Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            pixels: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            seed,
            frame: 0,
            held: [false; COMMAND_COUNT],
            tapped: [false; COMMAND_COUNT],
            x: (SCREEN_WIDTH as i32 - PLAYER_SIZE) / 2,
            y: FLOOR_ROW as i32 - PLAYER_SIZE,
            shots: 0,
            uses: 0,
            flash: 0,
            menu_open: false,
        };
        engine.render();
        engine
    }

    /// Seeds the scene from the game data header
    pub fn from_header(header: &WadHeader) -> Self {
        Self::new(header.lump_count ^ header.directory_offset.rotate_left(16))
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots
    }

    pub fn uses(&self) -> u32 {
        self.uses
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn player_position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_held(&self, command: CommandId) -> bool {
        self.held[command.index()]
    }

    fn apply_key(&mut self, pressed: bool, command: CommandId) {
        let slot = command.index();
        let was_held = self.held[slot];
        self.held[slot] = pressed;

        if !pressed || was_held {
            return;
        }
        self.tapped[slot] = true;

        match command {
            CommandId::Enter => self.menu_open = !self.menu_open,
            CommandId::Fire if !self.menu_open => {
                self.shots += 1;
                self.flash = FLASH_FRAMES;
            }
            CommandId::Use if !self.menu_open => self.uses += 1,
            _ => {}
        }
    }

    fn active(&self, command: CommandId) -> bool {
        self.held[command.index()] || self.tapped[command.index()]
    }

    fn step(&mut self) {
        if !self.menu_open {
            let speed = if self.active(CommandId::RunModifier) {
                WALK_SPEED * 2
            } else {
                WALK_SPEED
            };

            let mut dx = 0;
            let mut dy = 0;
            if self.active(CommandId::Left) {
                dx -= speed;
            }
            if self.active(CommandId::Right) {
                dx += speed;
            }
            if self.active(CommandId::Up) {
                dy -= speed;
            }
            if self.active(CommandId::Down) {
                dy += speed;
            }

            self.x = (self.x + dx).clamp(0, self.width as i32 - PLAYER_SIZE);
            self.y = (self.y + dy).clamp(0, FLOOR_ROW as i32 - PLAYER_SIZE);
        }

        self.flash = self.flash.saturating_sub(1);
        self.tapped = [false; COMMAND_COUNT];
        self.frame += 1;
    }

    fn render(&mut self) {
        let tint = self.seed & 0x00_3f_3f_3f;
        for row in 0..self.height {
            let color = if row >= FLOOR_ROW {
                FLOOR_COLOR
            } else {
                let shade = (row * 0x60 / FLOOR_ROW) as u32;
                (shade << 16 | shade << 8 | (0x40 + shade)) ^ tint
            };
            let start = row * self.width;
            self.pixels[start..start + self.width].fill(color);
        }

        let player = if self.flash > 0 {
            FLASH_COLOR
        } else {
            PLAYER_COLOR
        };
        self.fill_rect(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE, player);

        if self.menu_open {
            let (w, h) = (self.width as i32 / 2, self.height as i32 / 3);
            let (x, y) = ((self.width as i32 - w) / 2, (self.height as i32 - h) / 2);
            self.fill_rect(x - 2, y - 2, w + 4, h + 4, MENU_BORDER);
            self.fill_rect(x, y, w, h, MENU_COLOR);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.clamp(0, self.width as i32) as usize;
        let x1 = (x + w).clamp(0, self.width as i32) as usize;
        let y0 = y.clamp(0, self.height as i32) as usize;
        let y1 = (y + h).clamp(0, self.height as i32) as usize;
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(color);
        }
    }
}

impl GameEngine for DemoEngine {
    fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn tick(&mut self, input: &mut KeyPoll<'_>) {
        while let Some(event) = input.next_key_event() {
            self.apply_key(event.pressed, event.command);
        }
        self.step();
        self.render();
    }

    fn frame_buffer(&self) -> &[u32] {
        &self.pixels
    }
}
