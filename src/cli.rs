//! CLI argument parsing with clap

use crate::config::{Config, DEFAULT_EVENT_COUNT};
use crate::error::Result;
use crate::events::parse_event_expr;
use crate::transfer::FileOperation;
use clap::Parser;
use std::path::PathBuf;

/// Photo Importer - Event-based photo import tool
///
/// Scans a photo directory, groups the photos into events by the time
/// gaps between shots, then lists, copies or moves the photos of the
/// selected events.
#[derive(Parser, Debug)]
#[command(name = "photo-importer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Copy the selected events to the destination directory
    #[arg(short, long, conflicts_with = "move_files")]
    pub copy: bool,

    /// Move the selected events to the destination directory
    #[arg(short, long = "move")]
    pub move_files: bool,

    /// Gap in hours separating two events
    #[arg(short, long, value_name = "HOURS")]
    pub time: Option<f64>,

    /// Events to operate on, e.g. 1,2,5-7 (1 is the most recent)
    #[arg(short, long, value_name = "EXPR")]
    pub event: Option<String>,

    /// Operate on the most recent event only
    #[arg(short, long, conflicts_with = "event")]
    pub latest: bool,

    /// Source directory to scan for photos
    #[arg(short = 'd', long = "dir", env = "PHOTO_DIR")]
    pub source: Option<PathBuf>,

    /// Destination directory for copied or moved photos
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File extensions treated as photos
    #[arg(long = "ext", num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Dry run mode - show what would be done without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to this file in addition to stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub sample_config: bool,
}

/// What to do with the selected events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// List events without touching any file
    Display,
    /// Copy or move the events' photos
    Transfer(FileOperation),
}

impl Cli {
    /// The action selected by the flags, display being the default
    pub fn action(&self) -> Action {
        if self.copy {
            Action::Transfer(FileOperation::Copy)
        } else if self.move_files {
            Action::Transfer(FileOperation::Move)
        } else {
            Action::Display
        }
    }

    /// The events selected by -l or -e, defaulting to the five most
    /// recent ones
    pub fn selected_events(&self) -> Result<Vec<u32>> {
        if self.latest {
            return Ok(vec![1]);
        }
        match &self.event {
            Some(expr) => parse_event_expr(expr),
            None => Ok((1..=DEFAULT_EVENT_COUNT).collect()),
        }
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        // Override with CLI arguments if provided
        if let Some(ref source) = self.source {
            config.source_dir = source.clone();
        }
        if let Some(ref output) = self.output {
            config.dest_dir = output.clone();
        }
        if let Some(time) = self.time {
            config.gap_hours = time;
        }
        if let Some(ref extensions) = self.extensions {
            config.extensions = extensions.clone();
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}
