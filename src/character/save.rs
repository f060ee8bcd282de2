//! JSON save files, one per named slot.

use super::player::Player;
use crate::core::constants::{
    MAX_SAVE_SLOT_LEN, SAVE_FILE_EXTENSION, SAVE_FILE_PREFIX, SAVE_VERSION,
};
use crate::errors::SaveError;
use chrono::Utc;
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// On-disk record: the player's fields flattened at top level plus metadata.
///
/// Saves from the first schema are bare player objects with neither `version` nor
/// `saved_at`; both default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveRecord {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    saved_at: i64,
    #[serde(flatten)]
    player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInfo {
    pub slot: String,
    pub player_name: String,
    pub location: String,
    pub version: u32,
    pub saved_at: i64,
    pub is_corrupted: bool,
}

/// Reads and writes `save_<slot>.json` files inside one directory.
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Uses `save_dir`, creating it if needed.
    pub fn new<P: AsRef<Path>>(save_dir: P) -> Result<Self, SaveError> {
        let save_dir = save_dir.as_ref().to_path_buf();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    /// The platform config directory for the game.
    pub fn default_dir() -> Result<PathBuf, SaveError> {
        let project_dirs = ProjectDirs::from("", "", "aorte").ok_or(SaveError::NoSaveDir)?;
        Ok(project_dirs.config_dir().to_path_buf())
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn path_for(&self, slot: &str) -> PathBuf {
        self.save_dir.join(format!(
            "{}{}.{}",
            SAVE_FILE_PREFIX,
            slot.trim(),
            SAVE_FILE_EXTENSION
        ))
    }

    /// Writes the player to `slot`, replacing any previous save atomically.
    pub fn save(&self, player: &Player, slot: &str) -> Result<PathBuf, SaveError> {
        validate_slot(slot)?;
        let record = SaveRecord {
            version: SAVE_VERSION,
            saved_at: Utc::now().timestamp(),
            player: player.clone(),
        };
        let json = serde_json::to_string_pretty(&record)?;

        let path = self.path_for(slot);
        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp_path, json) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        info!("Saved {} to {}", player.name, path.display());
        Ok(path)
    }

    /// Loads the player stored in `slot`.
    pub fn load(&self, slot: &str) -> Result<Player, SaveError> {
        validate_slot(slot)?;
        let path = self.path_for(slot);
        let record = read_record(&path).map_err(|e| match e {
            SaveError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                SaveError::NotFound(slot.trim().to_string())
            }
            other => other,
        })?;

        if record.version < SAVE_VERSION {
            info!(
                "Upgrading save {} from schema {} to {}",
                slot, record.version, SAVE_VERSION
            );
        }
        let mut player = record.player;
        player.normalize();
        Ok(player)
    }

    pub fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.path_for(slot).exists()
    }

    pub fn delete(&self, slot: &str) -> Result<(), SaveError> {
        validate_slot(slot)?;
        let path = self.path_for(slot);
        if !path.exists() {
            return Err(SaveError::NotFound(slot.trim().to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// All saves in the directory, most recent first. Unreadable files are listed as corrupted.
    pub fn list(&self) -> Result<Vec<SaveInfo>, SaveError> {
        let mut saves = Vec::new();

        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            let Some(slot) = slot_from_path(&path) else {
                continue;
            };

            match read_record(&path) {
                Ok(record) => saves.push(SaveInfo {
                    slot,
                    player_name: record.player.name,
                    location: record.player.location,
                    version: record.version,
                    saved_at: record.saved_at,
                    is_corrupted: false,
                }),
                Err(e) => {
                    warn!("Unreadable save {}: {}", path.display(), e);
                    saves.push(SaveInfo {
                        slot,
                        player_name: "[CORRUPTED]".to_string(),
                        location: String::new(),
                        version: 0,
                        saved_at: 0,
                        is_corrupted: true,
                    });
                }
            }
        }

        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then(a.slot.cmp(&b.slot)));
        Ok(saves)
    }
}

fn read_record(path: &Path) -> Result<SaveRecord, SaveError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn slot_from_path(path: &Path) -> Option<String> {
    if path.extension().and_then(|s| s.to_str()) != Some(SAVE_FILE_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let slot = stem.strip_prefix(SAVE_FILE_PREFIX)?;
    if slot.is_empty() {
        None
    } else {
        Some(slot.to_string())
    }
}

/// Slot names become file names, so they are restricted to a safe character set.
pub fn validate_slot(slot: &str) -> Result<(), SaveError> {
    let trimmed = slot.trim();

    if trimmed.is_empty() {
        return Err(SaveError::InvalidSlot("name cannot be empty".to_string()));
    }

    if trimmed.chars().count() > MAX_SAVE_SLOT_LEN {
        return Err(SaveError::InvalidSlot(format!(
            "name must be {} characters or less",
            MAX_SAVE_SLOT_LEN
        )));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(SaveError::InvalidSlot(
            "name can only contain letters, numbers, spaces, hyphens, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}
