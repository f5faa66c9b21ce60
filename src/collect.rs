//! Photo collection from the source directory tree

use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A photo file found during collection, with its modification time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    /// Full path to the photo file
    pub path: PathBuf,
    /// File modification time
    pub timestamp: DateTime<Local>,
}

/// Recursively collect photo files under `root` whose extension matches
/// one of `extensions` (case-insensitive).
///
/// Timestamps come from the file modification time. Directories are
/// never collected even when their name carries a matching extension.
pub fn collect_photos(root: &Path, extensions: &[String]) -> Result<Vec<PhotoRecord>> {
    let mut records = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| Error::Collection {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if path.is_file()
            && let Some(ext) = path.extension().and_then(|e| e.to_str())
            && matches_extension(ext, extensions)
        {
            let metadata = entry.metadata().map_err(|e| Error::Collection {
                path: path.to_path_buf(),
                source: e,
            })?;
            let modified = metadata.modified()?;
            let timestamp: DateTime<Local> = modified.into();

            trace!(path = %path.display(), %timestamp, "Collected photo");
            records.push(PhotoRecord {
                path: path.to_path_buf(),
                timestamp,
            });
        }
    }

    debug!(
        count = records.len(),
        root = %root.display(),
        "Collection finished"
    );
    Ok(records)
}

fn matches_extension(ext: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}
