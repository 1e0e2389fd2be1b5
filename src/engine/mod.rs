// Game engine boundary
//
// The engine is consumed through two calls: advance one frame, and read the
// current raster. Key input is pulled by the engine during its tick.

pub mod assets;
pub mod demo;
pub mod driver;

pub use assets::{WadHeader, locate_asset};
pub use demo::DemoEngine;
pub use driver::{FrameStats, SimulationDriver};

use crate::bridge::event_queue::KeyEvent;
use std::path::PathBuf;
use thiserror::Error;

/// Native raster width
pub const SCREEN_WIDTH: usize = 640;
/// Native raster height
pub const SCREEN_HEIGHT: usize = 400;
/// Logical simulation rate
pub const FRAMES_PER_SEC: u32 = 35;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No game data found in {dir} (looked for {names})")]
    AssetNotFound { dir: PathBuf, names: String },

    #[error("Invalid WAD file {path}: {reason}")]
    InvalidWad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Key events handed to the engine for one tick, oldest first
pub struct KeyPoll<'a> {
    events: &'a [KeyEvent],
    position: usize,
}

impl<'a> KeyPoll<'a> {
    pub fn new(events: &'a [KeyEvent]) -> Self {
        Self {
            events,
            position: 0,
        }
    }

    /// Next pending event, or `None` when this tick's input is exhausted
    pub fn next_key_event(&mut self) -> Option<KeyEvent> {
        let event = self.events.get(self.position).copied()?;
        self.position += 1;
        Some(event)
    }

    /// Events pulled so far
    pub fn consumed(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.events.len() - self.position
    }
}

/// A frame-stepped game engine
pub trait GameEngine: Send {
    /// Raster size in pixels (width, height)
    fn resolution(&self) -> (usize, usize);

    /// Advances the simulation by exactly one logical frame
    fn tick(&mut self, input: &mut KeyPoll<'_>);

    /// Current raster, row-major, `width * height` packed 32-bit pixels
    fn frame_buffer(&self) -> &[u32];
}

impl<E: GameEngine + ?Sized> GameEngine for Box<E> {
    fn resolution(&self) -> (usize, usize) {
        (**self).resolution()
    }

    fn tick(&mut self, input: &mut KeyPoll<'_>) {
        (**self).tick(input)
    }

    fn frame_buffer(&self) -> &[u32] {
        (**self).frame_buffer()
    }
}
