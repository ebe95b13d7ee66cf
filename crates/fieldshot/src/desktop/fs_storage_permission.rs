use std::{fs, path::PathBuf};

use fieldshot_core::{PermissionStatus, StoragePermission};
use tracing::{debug, instrument};

/// Grants storage access when the pictures root can be written.
///
/// The root itself may not exist yet; its nearest existing ancestor is
/// checked instead, since that is where it would be created.
pub struct FsStoragePermission {
    root: PathBuf,
}

impl FsStoragePermission {
    /// Gate for captures under `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl StoragePermission for FsStoragePermission {
    #[instrument(skip(self), fields(root = ?self.root))]
    fn request(&mut self) -> PermissionStatus {
        let Some(existing) = self.root.ancestors().find(|p| p.exists()) else {
            debug!("No existing ancestor");
            return PermissionStatus::Denied;
        };

        match fs::metadata(existing) {
            Ok(metadata) if metadata.is_dir() && !metadata.permissions().readonly() => {
                PermissionStatus::Granted
            }
            Ok(_) => {
                debug!(checked = ?existing, "Not a writable directory");
                PermissionStatus::Denied
            }
            Err(e) => {
                debug!(checked = ?existing, error = %e, "Cannot inspect");
                PermissionStatus::Denied
            }
        }
    }
}
