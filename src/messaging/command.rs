// Control commands - UI → binding owner

use crate::bridge::command::CommandId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Bind `note` to `command`
    Rebind { command: CommandId, note: u8 },
    /// Leave `command` without a note
    Unbind(CommandId),
    /// Dump the current bindings to the log
    LogBindings,
}
