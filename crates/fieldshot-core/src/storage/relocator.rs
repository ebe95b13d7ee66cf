use crate::{CaptureError, CoreResult};

use std::{
    fs::{self, File, OpenOptions},
    io::{self, ErrorKind},
    panic::Location,
    path::Path,
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Move `source` to `dest` without ever overwriting an existing file.
///
/// The destination is claimed atomically: first by hard-linking, and when
/// links are unavailable (another device, unsupported filesystem) by an
/// exclusive-create copy. The source is removed once the destination holds
/// the data.
///
/// # Errors
///
/// - [`CaptureError::SourceMissing`] if `source` does not exist.
/// - [`CaptureError::DestinationExists`] if `dest` is already taken.
/// - [`CaptureError::Storage`] for any other I/O failure.
#[track_caller]
#[instrument]
pub fn relocate(source: &Path, dest: &Path) -> CoreResult<()> {
    let location = Location::caller();

    match fs::symlink_metadata(source) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => {
            return Err(CaptureError::Storage {
                reason: "Source is not a regular file".to_string(),
                path: source.to_path_buf(),
                location: ErrorLocation::from(location),
            });
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CaptureError::SourceMissing {
                path: source.to_path_buf(),
                location: ErrorLocation::from(location),
            });
        }
        Err(e) => {
            return Err(CaptureError::Storage {
                reason: format!("Failed to inspect source: {}", e),
                path: source.to_path_buf(),
                location: ErrorLocation::from(location),
            });
        }
    }

    match fs::hard_link(source, dest) {
        Ok(()) => debug!("Destination claimed by hard link"),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(CaptureError::DestinationExists {
                path: dest.to_path_buf(),
                location: ErrorLocation::from(location),
            });
        }
        Err(e) => {
            debug!(error = %e, "Hard link unavailable, copying instead");
            copy_exclusive(source, dest).map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    CaptureError::DestinationExists {
                        path: dest.to_path_buf(),
                        location: ErrorLocation::from(location),
                    }
                } else {
                    CaptureError::Storage {
                        reason: format!("Failed to copy capture: {}", e),
                        path: dest.to_path_buf(),
                        location: ErrorLocation::from(location),
                    }
                }
            })?;
        }
    }

    // The capture is already placed at this point; a leftover source only
    // wastes space.
    if let Err(e) = fs::remove_file(source) {
        warn!(source = ?source, error = %e, "Failed to remove temporary capture");
    }

    info!(source = ?source, dest = ?dest, "Capture relocated");

    Ok(())
}

pub(crate) fn copy_exclusive(source: &Path, dest: &Path) -> io::Result<()> {
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new().write(true).create_new(true).open(dest)?;

    let result = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());

    if let Err(e) = result {
        // Do not leave a truncated file occupying the name.
        drop(writer);
        if let Err(cleanup) = fs::remove_file(dest) {
            warn!(dest = ?dest, error = %cleanup, "Failed to remove partial copy");
        }
        return Err(e);
    }

    Ok(())
}
