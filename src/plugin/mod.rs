// Plugin surface - processor, parameters, bindings and instance wiring

pub mod bindings;
pub mod instance;
pub mod parameters;
pub mod processor;

pub use bindings::{BindingOwner, note_for_pitch_class};
pub use instance::PluginInstance;
pub use parameters::{NoteParameters, ParameterInfo};
pub use processor::{BridgeProcessor, PLUGIN_NAME, StartupMode};

/// Height of the control strip under the game raster
pub const CONTROLS_HEIGHT: usize = 50;
