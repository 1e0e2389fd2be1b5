// Integration test: running vs. error mode, decided once at construction

use doom_vst::config::BridgeConfig;
use doom_vst::engine::{DemoEngine, GameEngine, KeyPoll};
use doom_vst::midi::event::MidiEvent;
use doom_vst::plugin::{PluginInstance, StartupMode};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Engine that only counts its ticks
struct CountingEngine {
    ticks: Arc<AtomicUsize>,
    pixels: Vec<u32>,
}

impl CountingEngine {
    fn new(ticks: Arc<AtomicUsize>) -> Self {
        Self {
            ticks,
            pixels: vec![0; 4],
        }
    }
}

impl GameEngine for CountingEngine {
    fn resolution(&self) -> (usize, usize) {
        (2, 2)
    }

    fn tick(&mut self, input: &mut KeyPoll<'_>) {
        while input.next_key_event().is_some() {}
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    fn frame_buffer(&self) -> &[u32] {
        &self.pixels
    }
}

fn write_wad(dir: &Path, name: &str, magic: &[u8; 4]) {
    let mut bytes = magic.to_vec();
    bytes.extend_from_slice(&0i32.to_le_bytes());
    bytes.extend_from_slice(&12i32.to_le_bytes());
    std::fs::write(dir.join(name), bytes).unwrap();
}

fn config_for(dir: &TempDir) -> BridgeConfig {
    BridgeConfig {
        asset_dir: Some(dir.path().to_path_buf()),
        ..BridgeConfig::default()
    }
}

#[test]
fn test_missing_data_enters_error_mode() {
    let dir = TempDir::new().unwrap();
    let ticks = Arc::new(AtomicUsize::new(0));
    let mut factory_called = false;

    let instance = PluginInstance::with_engine(&config_for(&dir), |_, _| {
        factory_called = true;
        Ok(CountingEngine::new(ticks.clone()))
    });

    assert!(!factory_called);
    assert!(instance.frame_loop.is_none());
    assert!(instance.asset_path.is_none());
    assert_eq!(ticks.load(Ordering::SeqCst), 0);

    let message = instance.mode().error_message().unwrap();
    assert!(message.contains("doom.wad or doom2.wad"));
    assert!(message.contains(&dir.path().display().to_string()));
}

#[test]
fn test_error_mode_ignores_midi() {
    let dir = TempDir::new().unwrap();
    let instance = PluginInstance::new(&config_for(&dir));

    let enqueued = instance
        .processor
        .process_block([MidiEvent::NoteOn { note: 62, velocity: 100 }]);

    assert_eq!(enqueued, 0);
    assert!(instance.processor.classifier().queue().is_empty());
}

#[test]
fn test_valid_iwad_starts_running() {
    let dir = TempDir::new().unwrap();
    write_wad(dir.path(), "doom.wad", b"IWAD");

    let instance = PluginInstance::new(&config_for(&dir));

    assert_eq!(*instance.mode(), StartupMode::Running);
    assert!(instance.frame_loop.is_some());
    assert_eq!(instance.asset_path, Some(dir.path().join("doom.wad")));
}

#[test]
fn test_second_asset_name_is_accepted() {
    let dir = TempDir::new().unwrap();
    write_wad(dir.path(), "doom2.wad", b"IWAD");

    let instance = PluginInstance::new(&config_for(&dir));

    assert!(instance.mode().is_running());
    assert_eq!(instance.asset_path, Some(dir.path().join("doom2.wad")));
}

#[test]
fn test_first_asset_name_wins() {
    let dir = TempDir::new().unwrap();
    write_wad(dir.path(), "doom.wad", b"IWAD");
    write_wad(dir.path(), "doom2.wad", b"IWAD");

    let instance = PluginInstance::new(&config_for(&dir));
    assert_eq!(instance.asset_path, Some(dir.path().join("doom.wad")));
}

#[test]
fn test_bad_magic_enters_error_mode() {
    let dir = TempDir::new().unwrap();
    write_wad(dir.path(), "doom.wad", b"JUNK");

    let instance = PluginInstance::<DemoEngine>::new(&config_for(&dir));

    assert!(!instance.mode().is_running());
    assert!(instance.frame_loop.is_none());
}

#[test]
fn test_truncated_file_enters_error_mode() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("doom.wad"), b"IWA").unwrap();

    let instance = PluginInstance::new(&config_for(&dir));
    assert!(!instance.mode().is_running());
}

#[test]
fn test_running_instance_ticks_engine() {
    let dir = TempDir::new().unwrap();
    write_wad(dir.path(), "doom.wad", b"IWAD");
    let ticks = Arc::new(AtomicUsize::new(0));

    let mut instance =
        PluginInstance::with_engine(&config_for(&dir), |_, _| Ok(CountingEngine::new(ticks.clone())));

    instance
        .processor
        .process_block([MidiEvent::NoteOn { note: 60, velocity: 1 }]);

    let frame_loop = instance.frame_loop.as_mut().unwrap();
    frame_loop.step().unwrap();
    frame_loop.step().unwrap();

    assert_eq!(ticks.load(Ordering::SeqCst), 2);
    assert_eq!(frame_loop.last_stats().unwrap().frame, 2);
    assert!(frame_loop.driver().queue().is_empty());
}
