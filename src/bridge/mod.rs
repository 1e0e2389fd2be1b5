// Event bridge - MIDI notes → game key events

pub mod classifier;
pub mod command;
pub mod event_queue;
pub mod note_map;

pub use classifier::NoteClassifier;
pub use command::{CommandId, command_label};
pub use event_queue::{KeyEvent, KeyEventQueue};
pub use note_map::{NoteMap, NoteMapSnapshot};

use thiserror::Error;

/// Errors raised when editing bindings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Invalid MIDI note: {0} (expected 0-127)")]
    InvalidNote(u8),

    #[error("Invalid pitch class: {0} (expected 0-11)")]
    InvalidPitchClass(u8),
}

pub type BridgeResult<T> = Result<T, BridgeError>;
