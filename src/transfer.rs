//! Copying and moving event photo groups

use crate::error::{Error, Result};
use crate::segment::EventTimeline;
use filetime::FileTime;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// How photos are written to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    /// Copy files to destination
    Copy,
    /// Move files to destination
    Move,
}

/// Outcome of a single photo transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// File was successfully transferred
    Success,
    /// Transfer failed
    Failed,
    /// Dry run - would have transferred
    DryRun,
}

/// Result record for one transferred photo
#[derive(Debug, Clone)]
pub struct FileResult {
    /// Source file path
    pub source: PathBuf,
    /// Destination file path
    pub destination: PathBuf,
    /// Event the photo belongs to
    pub event_id: u32,
    /// Transfer status
    pub status: TransferStatus,
    /// Error message (if failed)
    pub error: Option<String>,
}

/// Transfer the photos of the selected events into `dest_dir`.
///
/// A failing photo does not stop the batch; every photo yields a
/// `FileResult` and the caller decides how to report failures. Events
/// without photos are skipped with a warning.
pub fn transfer_events(
    timeline: &EventTimeline,
    events: &[u32],
    operation: FileOperation,
    dest_dir: &Path,
    dry_run: bool,
) -> Vec<FileResult> {
    let mut results = Vec::new();

    for &event_id in events {
        let group = timeline.event_group(event_id);
        if group.is_empty() {
            warn!(
                event = event_id,
                max_event = timeline.max_event_id(),
                "Requested event has no photos, skipping"
            );
            continue;
        }

        debug!(
            event = event_id,
            count = group.len(),
            ?operation,
            "Transferring event"
        );
        for record in group {
            results.push(transfer_photo(
                &record.photo.path,
                event_id,
                operation,
                dest_dir,
                dry_run,
            ));
        }
    }

    results
}

fn transfer_photo(
    source: &Path,
    event_id: u32,
    operation: FileOperation,
    dest_dir: &Path,
    dry_run: bool,
) -> FileResult {
    let destination = match destination_for(source, dest_dir) {
        Ok(destination) => destination,
        Err(e) => {
            error!(source = %source.display(), error = %e, "Transfer failed");
            return FileResult {
                source: source.to_path_buf(),
                destination: dest_dir.to_path_buf(),
                event_id,
                status: TransferStatus::Failed,
                error: Some(e.to_string()),
            };
        }
    };

    if dry_run {
        info!(
            source = %source.display(),
            destination = %destination.display(),
            ?operation,
            "Dry run, skipping file operation"
        );
        return FileResult {
            source: source.to_path_buf(),
            destination,
            event_id,
            status: TransferStatus::DryRun,
            error: None,
        };
    }

    match perform_file_operation(source, &destination, operation) {
        Ok(()) => FileResult {
            source: source.to_path_buf(),
            destination,
            event_id,
            status: TransferStatus::Success,
            error: None,
        },
        Err(e) => {
            error!(source = %source.display(), error = %e, "Transfer failed");
            FileResult {
                source: source.to_path_buf(),
                destination,
                event_id,
                status: TransferStatus::Failed,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Destination path for a photo, keeping its file name
fn destination_for(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = source.file_name().ok_or_else(|| Error::FileOperation {
        path: source.to_path_buf(),
        message: "source has no file name".to_string(),
    })?;
    Ok(dest_dir.join(name))
}

/// Perform the actual file operation (copy or move)
fn perform_file_operation(source: &Path, dest: &Path, operation: FileOperation) -> Result<()> {
    // Read the source mtime before the operation; a move removes the source
    let mtime = fs::metadata(source)
        .and_then(|m| m.modified())
        .ok()
        .map(FileTime::from_system_time);

    // Create parent directory
    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::FileOperation {
            path: dest.to_path_buf(),
            message: format!("Failed to create destination directory: {}", e),
        })?;
    }

    match operation {
        FileOperation::Copy => {
            copy_file(source, dest)?;
        }
        FileOperation::Move => {
            // Try rename first (faster for same filesystem)
            if fs::rename(source, dest).is_err() {
                // Fall back to copy + delete for cross-filesystem moves
                copy_file(source, dest)?;
                fs::remove_file(source).map_err(|e| Error::FileOperation {
                    path: source.to_path_buf(),
                    message: format!("Failed to remove source after copy: {}", e),
                })?;
            }
        }
    }

    // Preserve modification time
    if let Some(mtime) = mtime {
        let _ = filetime::set_file_mtime(dest, mtime);
    }

    Ok(())
}

/// Copy file with buffered I/O for efficiency
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    let src_file = File::open(source).map_err(|e| Error::FileOperation {
        path: source.to_path_buf(),
        message: format!("Failed to open source: {}", e),
    })?;
    let dest_file = File::create(dest).map_err(|e| Error::FileOperation {
        path: dest.to_path_buf(),
        message: format!("Failed to create destination: {}", e),
    })?;

    let mut reader = BufReader::with_capacity(256 * 1024, src_file);
    let mut writer = BufWriter::with_capacity(256 * 1024, dest_file);

    let mut buffer = vec![0u8; 256 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| Error::FileOperation {
            path: source.to_path_buf(),
            message: format!("Failed to read source: {}", e),
        })?;
        if bytes_read == 0 {
            break;
        }
        writer
            .write_all(&buffer[..bytes_read])
            .map_err(|e| Error::FileOperation {
                path: dest.to_path_buf(),
                message: format!("Failed to write destination: {}", e),
            })?;
    }

    writer.flush().map_err(|e| Error::FileOperation {
        path: dest.to_path_buf(),
        message: format!("Failed to write destination: {}", e),
    })?;
    Ok(())
}
