//! Error types for every fallible boundary of the game core.

use std::path::PathBuf;
use thiserror::Error;

/// Startup failures while loading the definition files. Always fatal.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{path} not found; the game cannot run")]
    Missing { path: PathBuf },

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is corrupted: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid definition for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Save/load failures. The player state is never touched when one of these is returned.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed save file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid save name: {0}")]
    InvalidSlot(String),

    #[error("no save named {0}")]
    NotFound(String),

    #[error("could not determine a save directory")]
    NoSaveDir,
}

/// Errors raised by the combat engine at its boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CombatError {
    #[error("unknown enemy: {0}")]
    UnknownEnemy(String),

    #[error("cannot start a fight inside {0}")]
    InSafeZone(String),

    #[error("the encounter has already ended")]
    EncounterOver,
}

/// Rejected player mutations (eating, selling, spending).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("{0} is not in your inventory")]
    NotCarried(String),

    #[error("{0} is not edible")]
    NotEdible(String),

    #[error("{0} is a quest item and cannot be sold")]
    QuestItem(String),

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("not enough silver: need {needed}, have {available}")]
    InsufficientSilver { needed: i32, available: i32 },
}

/// Rejected quest-board operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestError {
    #[error("unknown quest: {0}")]
    Unknown(String),

    #[error("quest already active: {0}")]
    AlreadyActive(String),

    #[error("quest already completed: {0}")]
    AlreadyCompleted(String),
}

/// Errors from session-level actions that wrap the lower layers.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error("{0} is not here")]
    NotHere(String),

    #[error("you are not in a safe zone")]
    NotInSafeZone,

    #[error("there is no {0} here")]
    NoSuchPlace(String),

    #[error("you are already inside {0}")]
    AlreadyInside(String),

    #[error("the adventure is over")]
    GameOver,

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that ends the binary with a non-zero exit status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}
