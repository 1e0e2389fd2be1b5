// Note classifier - runs inside the audio callback
//
// No allocation, no lock, no I/O: one atomic load for the lookup and one
// lock-free push.

use crate::bridge::event_queue::{KeyEvent, KeyEventQueue};
use crate::bridge::note_map::NoteMap;
use crate::midi::event::MidiEvent;

#[derive(Clone)]
pub struct NoteClassifier {
    note_map: NoteMap,
    queue: KeyEventQueue,
}

impl NoteClassifier {
    pub fn new(note_map: NoteMap, queue: KeyEventQueue) -> Self {
        Self { note_map, queue }
    }

    /// Turns a note-on/off on a mapped note into a queued key event.
    ///
    /// Returns the enqueued event; anything else is ignored.
    #[inline]
    pub fn on_midi_message(&self, event: &MidiEvent) -> Option<KeyEvent> {
        let (note, pressed) = event.as_note()?;
        let command = self.note_map.resolve(note)?;

        let key_event = KeyEvent { pressed, command };
        self.queue.push(key_event);
        Some(key_event)
    }

    /// Parses and classifies a raw MIDI message
    #[inline]
    pub fn on_raw_message(&self, bytes: &[u8]) -> Option<KeyEvent> {
        MidiEvent::from_bytes(bytes).and_then(|event| self.on_midi_message(&event))
    }

    pub fn note_map(&self) -> &NoteMap {
        &self.note_map
    }

    pub fn queue(&self) -> &KeyEventQueue {
        &self.queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::command::CommandId;

    fn classifier() -> NoteClassifier {
        NoteClassifier::new(NoteMap::with_defaults(), KeyEventQueue::new(16))
    }

    #[test]
    fn test_mapped_note_on_enqueues_press() {
        let c = classifier();
        let event = c.on_midi_message(&MidiEvent::NoteOn { note: 62, velocity: 90 });
        assert_eq!(event, Some(KeyEvent::press(CommandId::Fire)));
        assert_eq!(c.queue().drain_all(), vec![KeyEvent::press(CommandId::Fire)]);
    }

    #[test]
    fn test_mapped_note_off_enqueues_release() {
        let c = classifier();
        c.on_raw_message(&[0x80, 48, 0]);
        c.on_raw_message(&[0x90, 48, 0]);
        assert_eq!(
            c.queue().drain_all(),
            vec![KeyEvent::release(CommandId::Left), KeyEvent::release(CommandId::Left)]
        );
    }

    #[test]
    fn test_unmapped_note_ignored() {
        let c = classifier();
        assert!(c.on_midi_message(&MidiEvent::NoteOn { note: 61, velocity: 100 }).is_none());
        assert!(c.on_midi_message(&MidiEvent::NoteOff { note: 61 }).is_none());
        assert!(c.queue().is_empty());
    }

    #[test]
    fn test_non_note_messages_ignored() {
        let c = classifier();
        assert!(c.on_raw_message(&[0xB0, 62, 127]).is_none());
        assert!(c.on_raw_message(&[0xE0, 0x00, 0x40]).is_none());
        assert!(c.on_raw_message(&[]).is_none());
        assert!(c.queue().is_empty());
    }

    #[test]
    fn test_follows_rebind() {
        let c = classifier();
        c.note_map().bind_note(70, CommandId::Fire).unwrap();
        assert!(c.on_raw_message(&[0x90, 62, 100]).is_none());
        assert_eq!(
            c.on_raw_message(&[0x90, 70, 100]),
            Some(KeyEvent::press(CommandId::Fire))
        );
    }
}
