// Audio-side processor - what the host calls once per audio block

use crate::bridge::classifier::NoteClassifier;
use crate::midi::event::MidiEvent;
use crate::plugin::parameters::NoteParameters;

pub const PLUGIN_NAME: &str = "Doom VST";

/// Decided once at startup, never re-evaluated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Game data found, engine running
    Running,
    /// Game data missing or unusable; the message explains why
    Error(String),
}

impl StartupMode {
    pub fn is_running(&self) -> bool {
        matches!(self, StartupMode::Running)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            StartupMode::Running => None,
            StartupMode::Error(message) => Some(message),
        }
    }
}

pub struct BridgeProcessor {
    mode: StartupMode,
    classifier: NoteClassifier,
    parameters: NoteParameters,
}

impl BridgeProcessor {
    pub fn new(mode: StartupMode, classifier: NoteClassifier, parameters: NoteParameters) -> Self {
        Self {
            mode,
            classifier,
            parameters,
        }
    }

    /// Handles the MIDI of one audio block, in arrival order.
    ///
    /// Real-time safe. In error mode the events are consumed and discarded.
    /// Returns the number of key events enqueued.
    pub fn process_block<I>(&self, midi: I) -> usize
    where
        I: IntoIterator<Item = MidiEvent>,
    {
        if !self.mode.is_running() {
            midi.into_iter().for_each(drop);
            return 0;
        }

        midi.into_iter()
            .filter(|event| self.classifier.on_midi_message(event).is_some())
            .count()
    }

    pub fn mode(&self) -> &StartupMode {
        &self.mode
    }

    pub fn classifier(&self) -> &NoteClassifier {
        &self.classifier
    }

    pub fn parameters(&self) -> &NoteParameters {
        &self.parameters
    }

    pub fn accepts_midi(&self) -> bool {
        true
    }

    pub fn produces_midi(&self) -> bool {
        false
    }

    pub fn tail_length_seconds(&self) -> f64 {
        0.0
    }

    /// Nothing is persisted yet; the blob is always empty
    pub fn get_state(&self) -> Vec<u8> {
        Vec::new()
    }

    /// Accepts and ignores any saved blob
    pub fn set_state(&self, _data: &[u8]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::command::CommandId;
    use crate::bridge::event_queue::{KeyEvent, KeyEventQueue};
    use crate::bridge::note_map::NoteMap;

    fn processor(mode: StartupMode) -> BridgeProcessor {
        let classifier = NoteClassifier::new(NoteMap::with_defaults(), KeyEventQueue::new(32));
        BridgeProcessor::new(mode, classifier, NoteParameters::new())
    }

    #[test]
    fn test_process_block_in_order() {
        let p = processor(StartupMode::Running);
        let block = [
            MidiEvent::NoteOn { note: 62, velocity: 100 },
            MidiEvent::Other { status: 0xB0 },
            MidiEvent::NoteOn { note: 61, velocity: 100 },
            MidiEvent::NoteOff { note: 62 },
        ];

        assert_eq!(p.process_block(block), 2);
        assert_eq!(
            p.classifier().queue().drain_all(),
            vec![KeyEvent::press(CommandId::Fire), KeyEvent::release(CommandId::Fire)]
        );
    }

    #[test]
    fn test_error_mode_ignores_midi() {
        let p = processor(StartupMode::Error("missing".into()));
        let block = [MidiEvent::NoteOn { note: 62, velocity: 100 }];

        assert_eq!(p.process_block(block), 0);
        assert!(p.classifier().queue().is_empty());
        assert_eq!(p.mode().error_message(), Some("missing"));
    }

    #[test]
    fn test_state_roundtrip_is_noop() {
        let p = processor(StartupMode::Running);
        assert!(p.get_state().is_empty());
        p.set_state(&[1, 2, 3]);
        assert!(p.get_state().is_empty());
    }
}
