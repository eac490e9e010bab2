//! gg-save: Save/restore system for Goblin Graph
//!
//! Saves the player record and, while a run is in progress, the dungeon. A damaged
//! dungeon record is dropped on load and the player carries on from the village.

mod snapshot;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use gg_core::PlayerRecord;
use gg_core::dungeon::Dungeon;

pub use snapshot::{Adjacency, DungeonSnapshot, RoomIndex, RoomKey, SnapshotError};

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// Save file header for versioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    pub player_name: String,
    pub sigils: u32,
    /// Whether a dungeon run was saved
    pub in_dungeon: bool,
    /// Timestamp of save
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "GGRS";

    pub fn new(player: &PlayerRecord, in_dungeon: bool) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            player_name: player.name.clone(),
            sigils: player.sigils,
            in_dungeon,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete save file structure
///
/// The dungeon is kept as raw JSON until restore so a damaged record can be
/// dropped without losing the player. Files without a header are accepted.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<SaveHeader>,
    pub player: PlayerRecord,
    #[serde(default)]
    pub dungeon: Option<serde_json::Value>,
}

/// A restored session
#[derive(Debug)]
pub struct LoadedGame {
    pub player: PlayerRecord,
    pub dungeon: Option<Dungeon>,
    /// Why a stored dungeon was thrown away, if it was
    pub discarded: Option<SnapshotError>,
}

/// Save the player and the open dungeon (if any) to a file
pub fn save_game(
    player: &PlayerRecord,
    dungeon: Option<&Dungeon>,
    path: impl AsRef<Path>,
) -> Result<(), SaveError> {
    let dungeon = dungeon
        .map(|d| serde_json::to_value(DungeonSnapshot::from_dungeon(d)))
        .transpose()?;
    let save_file = SaveFile {
        header: Some(SaveHeader::new(player, dungeon.is_some())),
        player: player.clone(),
        dungeon,
    };

    let path = path.as_ref();
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &save_file)?;
    debug!(path = %path.display(), "game saved");
    Ok(())
}

/// Load a session from a file
pub fn load_game(path: impl AsRef<Path>) -> Result<LoadedGame, SaveError> {
    let save_file = read_save_file(path)?;
    if let Some(header) = &save_file.header {
        header.validate()?;
    }

    let (dungeon, discarded) = match save_file.dungeon {
        None | Some(serde_json::Value::Null) => (None, None),
        Some(value) => match DungeonSnapshot::from_value(value).and_then(|s| s.into_dungeon()) {
            Ok(dungeon) => (Some(dungeon), None),
            Err(err) => {
                warn!(error = %err, "discarding corrupt dungeon snapshot");
                (None, Some(err))
            }
        },
    };

    Ok(LoadedGame {
        player: save_file.player,
        dungeon,
        discarded,
    })
}

/// Load only the header from a save file
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let header = read_save_file(path)?.header.ok_or(SaveError::InvalidHeader)?;
    header.validate()?;
    Ok(header)
}

fn read_save_file(path: impl AsRef<Path>) -> Result<SaveFile, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Get the default save path
pub fn default_save_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("goblin-graph");
    path.push("savegame.json");
    path
}
