// Binding owner - the single writer of the note map
//
// Editor widgets never touch the map directly: they send ControlCommands,
// applied here at the start of each editor update.

use ringbuf::traits::Consumer;

use crate::bridge::command::CommandId;
use crate::bridge::note_map::{MAX_NOTE, NoteMap};
use crate::bridge::{BridgeError, BridgeResult};
use crate::messaging::channels::ControlConsumer;
use crate::messaging::command::ControlCommand;
use crate::messaging::notification::{Notification, NotificationCategory};
use crate::plugin::parameters::{NoteParameters, PARAMETER_MAX};

/// Note a pitch-class selection maps to: the command's current octave
/// (its default note's octave when unbound) plus `pitch_class`.
pub fn note_for_pitch_class(
    current: Option<u8>,
    command: CommandId,
    pitch_class: u8,
) -> BridgeResult<u8> {
    if pitch_class > PARAMETER_MAX {
        return Err(BridgeError::InvalidPitchClass(pitch_class));
    }
    let reference = current.unwrap_or_else(|| command.default_note());
    let mut note = reference / 12 * 12 + pitch_class;
    if note > MAX_NOTE {
        note -= 12;
    }
    Ok(note)
}

pub struct BindingOwner {
    note_map: NoteMap,
    parameters: NoteParameters,
    control_rx: ControlConsumer,
}

impl BindingOwner {
    pub fn new(note_map: NoteMap, parameters: NoteParameters, control_rx: ControlConsumer) -> Self {
        Self {
            note_map,
            parameters,
            control_rx,
        }
    }

    /// Applies every queued command, returning what the user should see
    pub fn process_pending(&mut self) -> Vec<Notification> {
        let mut notifications = Vec::new();
        while let Some(command) = self.control_rx.try_pop() {
            if let Some(notification) = self.apply(command) {
                notifications.push(notification);
            }
        }
        notifications
    }

    pub fn apply(&self, command: ControlCommand) -> Option<Notification> {
        match command {
            ControlCommand::Rebind { command, note } => {
                match self.note_map.bind_note(note, command) {
                    Ok(displaced) => {
                        self.parameters.sync_from_map(&self.note_map);
                        log::info!("{}: note {}", command.label(), note);
                        let message = match displaced {
                            Some(other) => format!(
                                "{} bound to note {} ({} is now unbound)",
                                command.label(),
                                note,
                                other.label()
                            ),
                            None => format!("{} bound to note {}", command.label(), note),
                        };
                        Some(Notification::info(NotificationCategory::Bindings, message))
                    }
                    Err(e) => {
                        log::warn!("Rejected rebind of {}: {}", command.label(), e);
                        Some(Notification::error(NotificationCategory::Bindings, e.to_string()))
                    }
                }
            }
            ControlCommand::Unbind(command) => {
                self.note_map.unbind(command);
                log::info!("{}: unbound", command.label());
                Some(Notification::info(
                    NotificationCategory::Bindings,
                    format!("{} unbound", command.label()),
                ))
            }
            ControlCommand::LogBindings => {
                self.note_map.log_bindings();
                None
            }
        }
    }

    pub fn note_map(&self) -> &NoteMap {
        &self.note_map
    }

    pub fn parameters(&self) -> &NoteParameters {
        &self.parameters
    }
}
