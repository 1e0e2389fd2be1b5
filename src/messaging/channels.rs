// Lock-free SPSC channels between the MIDI thread, the audio callback and the UI

use crate::messaging::command::ControlCommand;
use crate::messaging::notification::Notification;
use crate::midi::event::MidiEvent;
use ringbuf::{HeapRb, traits::Split};

pub type MidiProducer = ringbuf::HeapProd<MidiEvent>;
pub type MidiConsumer = ringbuf::HeapCons<MidiEvent>;

/// MIDI input thread → audio callback
pub fn create_midi_channel(capacity: usize) -> (MidiProducer, MidiConsumer) {
    HeapRb::<MidiEvent>::new(capacity.max(1)).split()
}

pub type ControlProducer = ringbuf::HeapProd<ControlCommand>;
pub type ControlConsumer = ringbuf::HeapCons<ControlCommand>;

/// Editor widgets → binding owner
pub fn create_control_channel(capacity: usize) -> (ControlProducer, ControlConsumer) {
    HeapRb::<ControlCommand>::new(capacity.max(1)).split()
}

pub type NotificationProducer = ringbuf::HeapProd<Notification>;
pub type NotificationConsumer = ringbuf::HeapCons<Notification>;

pub fn create_notification_channel(
    capacity: usize,
) -> (NotificationProducer, NotificationConsumer) {
    HeapRb::<Notification>::new(capacity.max(1)).split()
}
