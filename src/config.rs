//! Command-line configuration and logger setup.

use crate::build_info::VERSION_LINE;
use crate::character::save::SaveManager;
use crate::core::constants::DEFAULT_DATA_DIR;
use clap::{Parser, Subcommand};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "aorte")]
#[command(about = "A turn-based text adventure")]
#[command(version = VERSION_LINE)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding items.json, enemies.json and quests.json
    #[arg(long, default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    /// Directory for save files (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub save_dir: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Start or resume an adventure
    Play,
    /// List save files, newest first
    ListSaves,
    /// Load the definition files and report what they contain
    Validate,
}

impl Cli {
    pub fn subcommand(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Play)
    }

    /// The save directory to use, falling back to the working directory when the platform
    /// has no config location.
    pub fn resolve_save_dir(&self) -> PathBuf {
        if let Some(dir) = &self.save_dir {
            return dir.clone();
        }
        match SaveManager::default_dir() {
            Ok(dir) => dir,
            Err(_) => {
                warn!("No platform config directory; saving to the current directory");
                PathBuf::from(".")
            }
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub fn level_for(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Initializes `env_logger`. `RUST_LOG`, when set, wins over the `-v` count.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(verbosity));
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.format_timestamp(None);
    // A logger may already be installed (tests); keep it.
    let _ = builder.try_init();
}
