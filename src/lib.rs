//! Photo Importer - A CLI tool for event-based photo import
//!
//! This library provides functionality for importing photos grouped
//! into events with support for:
//! - Recursive photo collection filtered by extension
//! - Event segmentation by time gaps between shots
//! - Event selection expressions like `1,3-5`
//! - Copying or moving whole events with preserved timestamps
//! - Dry run mode

pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod events;
pub mod report;
pub mod segment;
pub mod transfer;

pub use cli::{Action, Cli};
pub use collect::{PhotoRecord, collect_photos};
pub use config::Config;
pub use error::{Error, Result};
pub use events::parse_event_expr;
pub use report::EventSummary;
pub use segment::{EventTimeline, SegmentedRecord, segment};
pub use transfer::{FileOperation, FileResult, TransferStatus, transfer_events};
