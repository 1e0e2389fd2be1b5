// MIDI Input - receives events and forwards them to the audio callback

use crate::messaging::channels::MidiProducer;
use crate::midi::MidiError;
use crate::midi::event::MidiEvent;
use midir::{MidiInput as MidirInput, MidiInputConnection};
use ringbuf::traits::Producer;

const CLIENT_NAME: &str = "Doom VST MIDI Input";
const PORT_NAME: &str = "doom-vst-input";

pub struct MidiInput {
    _connection: Option<MidiInputConnection<()>>,
    port_name: Option<String>,
}

impl MidiInput {
    /// Opens `preferred_port` (or the first port) and starts forwarding.
    ///
    /// Having no MIDI port at all is not an error.
    pub fn new(preferred_port: Option<&str>, mut midi_tx: MidiProducer) -> Result<Self, MidiError> {
        let midi_in =
            MidirInput::new(CLIENT_NAME).map_err(|e| MidiError::Init(e.to_string()))?;

        let ports = midi_in.ports();
        if ports.is_empty() {
            log::warn!("No MIDI port detected, running without MIDI input");
            return Ok(Self {
                _connection: None,
                port_name: None,
            });
        }

        let names: Vec<String> = ports
            .iter()
            .map(|port| {
                midi_in
                    .port_name(port)
                    .unwrap_or_else(|_| "Unknown".to_string())
            })
            .collect();
        for (i, name) in names.iter().enumerate() {
            log::info!("MIDI port [{}] {}", i, name);
        }

        let index = match preferred_port {
            Some(wanted) => names.iter().position(|name| name == wanted).unwrap_or_else(|| {
                log::warn!("MIDI port '{}' not found, using '{}'", wanted, names[0]);
                0
            }),
            None => 0,
        };
        let port_name = names[index].clone();

        let connection = midi_in
            .connect(
                &ports[index],
                PORT_NAME,
                move |_timestamp, message, _| {
                    // Runs on the MIDI driver thread, not the audio thread
                    if let Some(event) = MidiEvent::from_bytes(message) {
                        if midi_tx.try_push(event).is_err() {
                            log::warn!("MIDI buffer full, event dropped");
                        }
                    }
                },
                (),
            )
            .map_err(|e| MidiError::Connect {
                port: port_name.clone(),
                message: e.to_string(),
            })?;

        log::info!("Connected to MIDI port: {}", port_name);

        Ok(Self {
            _connection: Some(connection),
            port_name: Some(port_name),
        })
    }

    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }
}
