// Plugin instance - wires the bridge together and makes the startup decision
//
// Each instance owns its own queue and note map; nothing is global, so
// several instances can run side by side.

use std::path::{Path, PathBuf};

use crate::bridge::classifier::NoteClassifier;
use crate::bridge::event_queue::KeyEventQueue;
use crate::bridge::note_map::NoteMap;
use crate::config::BridgeConfig;
use crate::engine::assets::{WadHeader, asset_names, locate_asset};
use crate::engine::{DemoEngine, EngineError, EngineResult, GameEngine, SimulationDriver};
use crate::plugin::parameters::NoteParameters;
use crate::plugin::processor::{BridgeProcessor, StartupMode};
use crate::video::scheduler::FrameLoop;

/// Finds and validates the game data in `dir`
pub fn locate_game_data(dir: &Path) -> EngineResult<(PathBuf, WadHeader)> {
    let path = locate_asset(dir).ok_or_else(|| EngineError::AssetNotFound {
        dir: dir.to_path_buf(),
        names: asset_names(),
    })?;
    let header = WadHeader::read(&path)?;
    Ok((path, header))
}

/// Text shown in place of the game when startup failed
pub fn startup_error_message(error: &EngineError, dir: &Path) -> String {
    match error {
        EngineError::AssetNotFound { .. } => format!(
            "Could not find a Doom IWAD file in the current directory. Copy {} into the directory:\n\n{}\n\nand restart the plugin.",
            asset_names(),
            dir.display()
        ),
        other => format!("Could not start the game: {}\n\nFix the file and restart the plugin.", other),
    }
}

pub struct PluginInstance<E: GameEngine = DemoEngine> {
    pub processor: BridgeProcessor,
    /// Present only in running mode
    pub frame_loop: Option<FrameLoop<E>>,
    pub note_map: NoteMap,
    pub parameters: NoteParameters,
    pub asset_path: Option<PathBuf>,
}

impl PluginInstance<DemoEngine> {
    /// Instance backed by the bundled demo engine
    pub fn new(config: &BridgeConfig) -> Self {
        Self::with_engine(config, |_, header| Ok(DemoEngine::from_header(header)))
    }
}

impl<E: GameEngine> PluginInstance<E> {
    /// Builds an instance, creating the engine with `create_engine` only if
    /// game data was found.
    pub fn with_engine<F>(config: &BridgeConfig, create_engine: F) -> Self
    where
        F: FnOnce(&Path, &WadHeader) -> EngineResult<E>,
    {
        let note_map = NoteMap::with_defaults();
        let parameters = NoteParameters::new();
        let queue = KeyEventQueue::new(config.event_queue_capacity);
        let classifier = NoteClassifier::new(note_map.clone(), queue.clone());
        let asset_dir = config.asset_dir();

        let started = locate_game_data(&asset_dir)
            .and_then(|(path, header)| create_engine(&path, &header).map(|engine| (path, engine)));

        let (mode, frame_loop, asset_path) = match started {
            Ok((path, engine)) => {
                log::info!("Game data: {}", path.display());
                let driver = SimulationDriver::new(engine, queue);
                let frame_loop = FrameLoop::new(driver, config.frames_per_sec);
                (StartupMode::Running, Some(frame_loop), Some(path))
            }
            Err(e) => {
                log::error!("Startup failed: {}", e);
                (
                    StartupMode::Error(startup_error_message(&e, &asset_dir)),
                    None,
                    None,
                )
            }
        };

        note_map.log_bindings();

        Self {
            processor: BridgeProcessor::new(mode, classifier, parameters.clone()),
            frame_loop,
            note_map,
            parameters,
            asset_path,
        }
    }

    pub fn mode(&self) -> &StartupMode {
        self.processor.mode()
    }
}
