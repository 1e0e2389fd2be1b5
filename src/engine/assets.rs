// Game data discovery and WAD header validation

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::engine::{EngineError, EngineResult};

/// Accepted game data files, in lookup order
pub const ASSET_FILE_NAMES: [&str; 2] = ["doom.wad", "doom2.wad"];

const HEADER_LEN: usize = 12;
const DIRECTORY_ENTRY_LEN: u64 = 16;

/// Returns the first accepted data file present in `dir`
pub fn locate_asset(dir: &Path) -> Option<PathBuf> {
    ASSET_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Accepted file names, joined for messages
pub fn asset_names() -> String {
    ASSET_FILE_NAMES.join(" or ")
}

/// WAD kind, from the header magic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WadKind {
    Iwad,
    Pwad,
}

/// Parsed 12-byte WAD header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadHeader {
    pub kind: WadKind,
    pub lump_count: u32,
    pub directory_offset: u32,
}

impl WadHeader {
    /// Reads and validates the header of the file at `path`
    pub fn read(path: &Path) -> EngineResult<Self> {
        let mut file = File::open(path)?;
        let file_len = file.metadata()?.len();

        let mut bytes = [0u8; HEADER_LEN];
        file.read_exact(&mut bytes).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => invalid(path, "file shorter than header"),
            _ => EngineError::Io(e),
        })?;

        let header = Self::parse(&bytes).map_err(|reason| invalid(path, reason))?;

        let directory_end = header.directory_offset as u64
            + header.lump_count as u64 * DIRECTORY_ENTRY_LEN;
        if directory_end > file_len {
            return Err(invalid(path, "lump directory extends past end of file"));
        }

        Ok(header)
    }

    /// Parses the raw header bytes
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self, &'static str> {
        let kind = match &bytes[0..4] {
            b"IWAD" => WadKind::Iwad,
            b"PWAD" => WadKind::Pwad,
            _ => return Err("bad magic"),
        };

        let lump_count = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let directory_offset = i32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);

        if lump_count < 0 {
            return Err("negative lump count");
        }
        if directory_offset < 0 {
            return Err("negative directory offset");
        }

        Ok(Self {
            kind,
            lump_count: lump_count as u32,
            directory_offset: directory_offset as u32,
        })
    }
}

fn invalid(path: &Path, reason: &str) -> EngineError {
    EngineError::InvalidWad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
