//! Configuration types for the photo importer

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default source directory scanned for photos
pub const DEFAULT_SOURCE_DIR: &str = "/media/disk/DCIM/";

/// Default event gap threshold in hours
pub const DEFAULT_GAP_HOURS: f64 = 1.0;

/// Default number of most recent events listed or transferred
pub const DEFAULT_EVENT_COUNT: u32 = 5;

/// Configuration for the photo importer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source directory to scan for photos
    pub source_dir: PathBuf,

    /// Destination directory for copied or moved photos
    pub dest_dir: PathBuf,

    /// Gap in hours separating two events
    pub gap_hours: f64,

    /// File extensions treated as photos (case-insensitive)
    pub extensions: Vec<String>,

    /// Dry run mode - don't actually move/copy files
    pub dry_run: bool,

    /// Verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest_dir: PathBuf::from("."),
            gap_hours: DEFAULT_GAP_HOURS,
            extensions: vec!["jpg".into(), "txt".into()],
            dry_run: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(config)
    }

    /// Check the configuration for values the importer cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.gap_hours.is_finite() || self.gap_hours < 0.0 {
            return Err(Error::Config(format!(
                "gap_hours must be a non-negative number, got {}",
                self.gap_hours
            )));
        }
        if self.extensions.is_empty() {
            return Err(Error::Config(
                "extensions must list at least one file extension".to_string(),
            ));
        }
        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Photo Importer Configuration File
# This file uses TOML format (https://toml.io)

# Source directory to scan for photos
source_dir = "/media/disk/DCIM/"

# Destination directory for copied or moved photos
dest_dir = "."

# Gap in hours separating two events
# Photos further apart than this start a new event
gap_hours = 1.0

# File extensions treated as photos (case-insensitive)
extensions = ["jpg", "txt"]

# Dry run mode - show what would be done without actually doing it
dry_run = false

# Verbose output - show detailed processing information
verbose = false
"#
        .to_string()
    }
}
