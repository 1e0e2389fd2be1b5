// Configuration - optional RON file, defaults otherwise

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::bridge::event_queue::DEFAULT_EVENT_QUEUE_CAPACITY;
use crate::engine::FRAMES_PER_SEC;
use crate::video::scheduler::MAX_FRAMES_PER_SEC;

/// File looked up in the working directory first
pub const LOCAL_CONFIG_FILE: &str = "doom_vst.ron";
const CONFIG_DIR_NAME: &str = "doom_vst";
const CONFIG_FILE_NAME: &str = "config.ron";

/// MIDI can burst ~1000 messages/s; 512 covers >500 ms of backlog
const DEFAULT_MIDI_CHANNEL_CAPACITY: usize = 512;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid config: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Directory searched for game data; the working directory if unset
    pub asset_dir: Option<PathBuf>,
    pub frames_per_sec: u32,
    pub event_queue_capacity: usize,
    pub midi_channel_capacity: usize,
    /// MIDI input port name; the first port if unset
    pub midi_port: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            asset_dir: None,
            frames_per_sec: FRAMES_PER_SEC,
            event_queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY,
            midi_channel_capacity: DEFAULT_MIDI_CHANNEL_CAPACITY,
            midi_port: None,
        }
    }
}

impl BridgeConfig {
    /// Parses a RON document; missing fields take their defaults
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config = ron::from_str::<Self>(source)?;
        Ok(config.normalized())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Config files in lookup order
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// Loads the first existing candidate.
    ///
    /// `Ok(None)` when there is no config file at all.
    pub fn discover() -> Result<Option<(PathBuf, Self)>, ConfigError> {
        for path in Self::candidate_paths() {
            if path.is_file() {
                let config = Self::load(&path)?;
                return Ok(Some((path, config)));
            }
        }
        Ok(None)
    }

    /// Resolved game data directory
    pub fn asset_dir(&self) -> PathBuf {
        self.asset_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn normalized(mut self) -> Self {
        self.frames_per_sec = self.frames_per_sec.clamp(1, MAX_FRAMES_PER_SEC);
        self.event_queue_capacity = self.event_queue_capacity.max(1);
        self.midi_channel_capacity = self.midi_channel_capacity.max(1);
        self
    }
}
