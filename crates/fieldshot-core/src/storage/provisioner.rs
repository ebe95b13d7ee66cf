use crate::{CaptureError, CoreResult};

use std::{collections::HashSet, fs, panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Ensure `path` exists as a writable directory, creating parents as needed.
///
/// Idempotent: an existing directory is success.
///
/// # Errors
///
/// Returns [`CaptureError::Storage`] if the directory cannot be created,
/// the path is occupied by something else, or the directory is read-only.
#[track_caller]
#[instrument]
pub fn ensure_directory(path: &Path) -> CoreResult<()> {
    let location = Location::caller();

    fs::create_dir_all(path).map_err(|e| CaptureError::Storage {
        reason: format!("Failed to create directory: {}", e),
        path: path.to_path_buf(),
        location: ErrorLocation::from(location),
    })?;

    let metadata = fs::metadata(path).map_err(|e| CaptureError::Storage {
        reason: format!("Failed to inspect directory: {}", e),
        path: path.to_path_buf(),
        location: ErrorLocation::from(location),
    })?;

    if !metadata.is_dir() {
        return Err(CaptureError::Storage {
            reason: "Path exists but is not a directory".to_string(),
            path: path.to_path_buf(),
            location: ErrorLocation::from(location),
        });
    }

    if metadata.permissions().readonly() {
        return Err(CaptureError::Storage {
            reason: "Directory is not writable".to_string(),
            path: path.to_path_buf(),
            location: ErrorLocation::from(location),
        });
    }

    debug!(path = ?path, "Directory ready");

    Ok(())
}

/// Snapshot the entry names of `dir`.
///
/// Names that are not valid UTF-8 are skipped; they can never match an
/// equipment label.
///
/// # Errors
///
/// Returns [`CaptureError::Storage`] if the directory cannot be read.
#[track_caller]
#[instrument]
pub fn list_file_names(dir: &Path) -> CoreResult<HashSet<String>> {
    let location = Location::caller();

    let entries = fs::read_dir(dir).map_err(|e| CaptureError::Storage {
        reason: format!("Failed to list directory: {}", e),
        path: dir.to_path_buf(),
        location: ErrorLocation::from(location),
    })?;

    let mut names = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| CaptureError::Storage {
            reason: format!("Failed to read directory entry: {}", e),
            path: dir.to_path_buf(),
            location: ErrorLocation::from(location),
        })?;

        match entry.file_name().into_string() {
            Ok(name) => {
                names.insert(name);
            }
            Err(raw) => debug!(name = ?raw, "Skipping non UTF-8 entry"),
        }
    }

    debug!(dir = ?dir, count = names.len(), "Directory listed");

    Ok(names)
}
