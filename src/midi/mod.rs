// MIDI - parsing and input port

pub mod event;
pub mod input;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MidiError {
    #[error("MIDI init error: {0}")]
    Init(String),

    #[error("MIDI connection to '{port}' failed: {message}")]
    Connect { port: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_error_names_port() {
        let err = MidiError::Connect {
            port: "Keystation".to_string(),
            message: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "MIDI connection to 'Keystation' failed: busy");
    }
}
