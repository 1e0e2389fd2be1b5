// Game commands - the fixed set of controls MIDI notes can trigger

/// One of the eight in-game controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
    Enter = 4,
    Fire = 5,
    Use = 6,
    RunModifier = 7,
}

/// Number of command slots
pub const COMMAND_COUNT: usize = 8;

// Engine key codes
const KEY_LEFTARROW: u8 = 0xac;
const KEY_UPARROW: u8 = 0xad;
const KEY_RIGHTARROW: u8 = 0xae;
const KEY_DOWNARROW: u8 = 0xaf;
const KEY_ENTER: u8 = 13;
const KEY_FIRE: u8 = 0xa3;
const KEY_USE: u8 = 0xa2;
const KEY_RSHIFT: u8 = 0x80 + 0x36;

impl CommandId {
    pub const ALL: [CommandId; COMMAND_COUNT] = [
        CommandId::Left,
        CommandId::Up,
        CommandId::Right,
        CommandId::Down,
        CommandId::Enter,
        CommandId::Fire,
        CommandId::Use,
        CommandId::RunModifier,
    ];

    /// Slot index (0..8), stable across runs
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            CommandId::Left => "Left Arrow",
            CommandId::Up => "Up Arrow",
            CommandId::Right => "Right Arrow",
            CommandId::Down => "Down Arrow",
            CommandId::Enter => "Enter",
            CommandId::Fire => "Fire",
            CommandId::Use => "Use",
            CommandId::RunModifier => "Right Shift",
        }
    }

    /// Caption used in the editor control strip
    pub fn short_label(self) -> &'static str {
        match self {
            CommandId::Left => "Left",
            CommandId::Up => "Up",
            CommandId::Right => "Right",
            CommandId::Down => "Down",
            CommandId::Enter => "Enter",
            CommandId::Fire => "Fire",
            CommandId::Use => "Use",
            CommandId::RunModifier => "R Shift",
        }
    }

    /// Key code understood by the engine's input layer
    pub fn key_code(self) -> u8 {
        match self {
            CommandId::Left => KEY_LEFTARROW,
            CommandId::Up => KEY_UPARROW,
            CommandId::Right => KEY_RIGHTARROW,
            CommandId::Down => KEY_DOWNARROW,
            CommandId::Enter => KEY_ENTER,
            CommandId::Fire => KEY_FIRE,
            CommandId::Use => KEY_USE,
            CommandId::RunModifier => KEY_RSHIFT,
        }
    }

    /// Note bound to this command at startup
    pub fn default_note(self) -> u8 {
        match self {
            CommandId::Left => 48,
            CommandId::Up => 50,
            CommandId::Right => 52,
            CommandId::Down => 53,
            CommandId::Enter => 60,
            CommandId::Fire => 62,
            CommandId::Use => 64,
            CommandId::RunModifier => 65,
        }
    }

    /// Host-facing parameter identifier
    pub fn parameter_id(self) -> &'static str {
        match self {
            CommandId::Left => "leftArrowNote",
            CommandId::Up => "upArrowNote",
            CommandId::Right => "rightArrowNote",
            CommandId::Down => "downArrowNote",
            CommandId::Enter => "enterNote",
            CommandId::Fire => "fireNote",
            CommandId::Use => "useNote",
            CommandId::RunModifier => "rshiftNote",
        }
    }

    /// Host-facing parameter name
    pub fn parameter_name(self) -> &'static str {
        match self {
            CommandId::Left => "Left Arrow Note",
            CommandId::Up => "Up Arrow Note",
            CommandId::Right => "Right Arrow Note",
            CommandId::Down => "Down Arrow Note",
            CommandId::Enter => "Enter Note",
            CommandId::Fire => "Fire Note",
            CommandId::Use => "Use Note",
            CommandId::RunModifier => "R Shift Note",
        }
    }
}

/// Returns the command label, the display side of the note map
pub fn command_label(id: CommandId) -> &'static str {
    id.label()
}

/// Pitch class names shown in the control strip combo boxes
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_index_roundtrip() {
        for (i, cmd) in CommandId::ALL.iter().enumerate() {
            assert_eq!(cmd.index(), i);
            assert_eq!(CommandId::from_index(i), Some(*cmd));
        }
        assert_eq!(CommandId::from_index(COMMAND_COUNT), None);
    }

    #[test]
    fn test_default_notes_are_distinct() {
        let notes: HashSet<u8> = CommandId::ALL.iter().map(|c| c.default_note()).collect();
        assert_eq!(notes.len(), COMMAND_COUNT);
    }

    #[test]
    fn test_key_codes_are_distinct() {
        let codes: HashSet<u8> = CommandId::ALL.iter().map(|c| c.key_code()).collect();
        assert_eq!(codes.len(), COMMAND_COUNT);
        assert_eq!(CommandId::RunModifier.key_code(), 0xb6);
    }

    #[test]
    fn test_labels() {
        assert_eq!(command_label(CommandId::Fire), "Fire");
        assert_eq!(command_label(CommandId::RunModifier), "Right Shift");
        assert_eq!(CommandId::RunModifier.short_label(), "R Shift");
        assert_eq!(CommandId::Left.parameter_id(), "leftArrowNote");
    }
}
