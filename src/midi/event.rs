// MIDI event parsing

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    /// Any other complete channel or system message
    Other { status: u8 },
}

impl MidiEvent {
    /// Parses a raw MIDI message. The channel nibble is ignored.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let status = *bytes.first()?;
        if status & 0x80 == 0 {
            // Data byte without status (running status is not supported)
            return None;
        }

        match status & 0xF0 {
            0x90 => {
                let (note, velocity) = Self::note_data(bytes)?;
                // Velocity 0 = Note Off
                if velocity == 0 {
                    Some(MidiEvent::NoteOff { note })
                } else {
                    Some(MidiEvent::NoteOn { note, velocity })
                }
            }
            0x80 => {
                let (note, _) = Self::note_data(bytes)?;
                Some(MidiEvent::NoteOff { note })
            }
            0xA0 | 0xB0 | 0xE0 if bytes.len() < 3 => None,
            0xC0 | 0xD0 if bytes.len() < 2 => None,
            _ => Some(MidiEvent::Other { status }),
        }
    }

    fn note_data(bytes: &[u8]) -> Option<(u8, u8)> {
        match bytes {
            [_, note, velocity, ..] => Some((note & 0x7F, velocity & 0x7F)),
            _ => None,
        }
    }

    /// Note number and polarity, for note-on/off messages only
    #[inline]
    pub fn as_note(&self) -> Option<(u8, bool)> {
        match *self {
            MidiEvent::NoteOn { note, .. } => Some((note, true)),
            MidiEvent::NoteOff { note } => Some((note, false)),
            MidiEvent::Other { .. } => None,
        }
    }

    pub fn is_note_on_or_off(&self) -> bool {
        self.as_note().is_some()
    }
}
