// Note → command map shared between the UI and the audio callback
//
// The whole map lives in one AtomicU64: byte `i` holds the note bound to
// the command with index `i`, 0xFF meaning unbound. A lookup is a single
// load and a rebind a single read-modify-write, so the audio thread never
// blocks and never sees a half-applied rebind.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bridge::command::CommandId;
use crate::bridge::{BridgeError, BridgeResult};

const UNBOUND: u8 = 0xFF;
const SLOT_MASK: u64 = 0xFF;

/// Highest valid MIDI note number
pub const MAX_NOTE: u8 = 127;

/// Immutable copy of the map, for several lookups against the same state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteMapSnapshot(u64);

impl NoteMapSnapshot {
    /// A map with no note bound
    pub const fn empty() -> Self {
        Self(u64::MAX)
    }

    /// The startup bindings (48, 50, 52, 53, 60, 62, 64, 65)
    pub fn defaults() -> Self {
        CommandId::ALL
            .iter()
            .fold(Self::empty(), |map, cmd| map.with_slot(*cmd, cmd.default_note()))
    }

    #[inline]
    fn slot(self, command: CommandId) -> u8 {
        ((self.0 >> (command.index() * 8)) & SLOT_MASK) as u8
    }

    #[inline]
    fn with_slot(self, command: CommandId, note: u8) -> Self {
        let shift = command.index() * 8;
        Self((self.0 & !(SLOT_MASK << shift)) | ((note as u64) << shift))
    }

    /// Note currently bound to `command`
    pub fn note_for(self, command: CommandId) -> Option<u8> {
        match self.slot(command) {
            UNBOUND => None,
            note => Some(note),
        }
    }

    /// Command bound to `note`, if any. Pure, allocation-free.
    #[inline]
    pub fn resolve(self, note: u8) -> Option<CommandId> {
        if note > MAX_NOTE {
            return None;
        }
        CommandId::ALL
            .iter()
            .copied()
            .find(|cmd| self.slot(*cmd) == note)
    }

    /// Map after binding `note` to `command`, plus the command that lost `note`
    fn with_binding(self, note: u8, command: CommandId) -> (Self, Option<CommandId>) {
        let mut next = self;
        let mut displaced = None;
        for other in CommandId::ALL {
            if other != command && next.slot(other) == note {
                next = next.with_slot(other, UNBOUND);
                displaced = Some(other);
            }
        }
        (next.with_slot(command, note), displaced)
    }

    /// Populated bindings sorted by note
    pub fn bindings(self) -> Vec<(u8, CommandId)> {
        let mut bindings: Vec<(u8, CommandId)> = CommandId::ALL
            .iter()
            .filter_map(|cmd| self.note_for(*cmd).map(|note| (note, *cmd)))
            .collect();
        bindings.sort_by_key(|(note, _)| *note);
        bindings
    }
}

impl Default for NoteMapSnapshot {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Shared handle to the live note map
#[derive(Debug, Clone)]
pub struct NoteMap {
    inner: Arc<AtomicU64>,
}

impl NoteMap {
    pub fn new(initial: NoteMapSnapshot) -> Self {
        Self {
            inner: Arc::new(AtomicU64::new(initial.0)),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(NoteMapSnapshot::defaults())
    }

    #[inline]
    pub fn snapshot(&self) -> NoteMapSnapshot {
        NoteMapSnapshot(self.inner.load(Ordering::Acquire))
    }

    /// Called from the audio thread
    #[inline]
    pub fn resolve(&self, note: u8) -> Option<CommandId> {
        self.snapshot().resolve(note)
    }

    pub fn note_for(&self, command: CommandId) -> Option<u8> {
        self.snapshot().note_for(command)
    }

    /// Binds `note` to `command`.
    ///
    /// The command's previous note is released, and so is any other
    /// command holding `note`. Returns that displaced command.
    pub fn bind_note(&self, note: u8, command: CommandId) -> BridgeResult<Option<CommandId>> {
        if note > MAX_NOTE {
            return Err(BridgeError::InvalidNote(note));
        }

        let previous = self
            .inner
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                let (next, _) = NoteMapSnapshot(current).with_binding(note, command);
                Some(next.0)
            })
            .unwrap_or_else(|current| current);

        let (_, displaced) = NoteMapSnapshot(previous).with_binding(note, command);
        Ok(displaced)
    }

    /// Leaves `command` without a note
    pub fn unbind(&self, command: CommandId) {
        let _ = self
            .inner
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(NoteMapSnapshot(current).with_slot(command, UNBOUND).0)
            });
    }

    pub fn bindings(&self) -> Vec<(u8, CommandId)> {
        self.snapshot().bindings()
    }

    /// Dumps the current bindings, one `note:label` line each
    pub fn log_bindings(&self) {
        for (note, command) in self.bindings() {
            log::info!("{}:{}", note, command.label());
        }
    }
}

impl Default for NoteMap {
    fn default() -> Self {
        Self::with_defaults()
    }
}
