// Host-visible parameters: one pitch class (0-11) per command

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::bridge::command::{COMMAND_COUNT, CommandId};
use crate::bridge::note_map::NoteMap;

pub const PARAMETER_MIN: u8 = 0;
pub const PARAMETER_MAX: u8 = 11;

/// Static description of one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterInfo {
    pub command: CommandId,
    pub id: &'static str,
    pub name: &'static str,
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl ParameterInfo {
    pub fn for_command(command: CommandId) -> Self {
        Self {
            command,
            id: command.parameter_id(),
            name: command.parameter_name(),
            min: PARAMETER_MIN,
            max: PARAMETER_MAX,
            default: command.default_note() % 12,
        }
    }
}

/// Shared parameter values; clones refer to the same storage
#[derive(Debug, Clone)]
pub struct NoteParameters {
    values: Arc<[AtomicU8; COMMAND_COUNT]>,
}

impl NoteParameters {
    pub fn new() -> Self {
        Self {
            values: Arc::new(std::array::from_fn(|i| {
                let default = CommandId::ALL[i].default_note() % 12;
                AtomicU8::new(default)
            })),
        }
    }

    pub fn get(&self, command: CommandId) -> u8 {
        self.values[command.index()].load(Ordering::Relaxed)
    }

    /// Stores `value` clamped into 0..=11 and returns what was stored
    pub fn set(&self, command: CommandId, value: u8) -> u8 {
        let value = value.min(PARAMETER_MAX);
        self.values[command.index()].store(value, Ordering::Relaxed);
        value
    }

    pub fn info(&self) -> [ParameterInfo; COMMAND_COUNT] {
        CommandId::ALL.map(ParameterInfo::for_command)
    }

    /// Mirrors the bound notes' pitch classes; unbound commands keep their value
    pub fn sync_from_map(&self, note_map: &NoteMap) {
        let snapshot = note_map.snapshot();
        for command in CommandId::ALL {
            if let Some(note) = snapshot.note_for(command) {
                self.set(command, note % 12);
            }
        }
    }
}

impl Default for NoteParameters {
    fn default() -> Self {
        Self::new()
    }
}
