// Doom VST - Library exports for tests and benchmarks

pub mod audio;
pub mod bridge;
pub mod config;
pub mod engine;
pub mod messaging;
pub mod midi;
pub mod plugin;
pub mod ui;
pub mod video;

// Re-export commonly used types for convenience
pub use audio::engine::AudioEngine;
pub use bridge::{
    BridgeError, BridgeResult, CommandId, KeyEvent, KeyEventQueue, NoteClassifier, NoteMap,
    NoteMapSnapshot,
};
pub use config::BridgeConfig;
pub use engine::{DemoEngine, GameEngine, KeyPoll, SimulationDriver};
pub use messaging::channels::{
    create_control_channel, create_midi_channel, create_notification_channel,
};
pub use midi::event::MidiEvent;
pub use plugin::{BridgeProcessor, PluginInstance, StartupMode};
pub use video::{DisplayImage, FrameLoop, FramePublisher, RepaintScheduler, force_opaque};
