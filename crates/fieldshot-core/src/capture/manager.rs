use crate::{
    CaptureError, CoreResult,
    capture::{
        CameraService, CaptureGuard, FlashMode, MediaIndex, PermissionStatus, StoragePermission,
        TemporaryCapture, ZoomLevel,
    },
    error::Resource,
    session::CaptureTarget,
    storage,
};

use std::{
    collections::HashSet,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{error, info, instrument, warn};

/// Relocation attempts per capture: the first try plus one retry after a
/// destination collision.
const MAX_PLACEMENT_ATTEMPTS: u32 = 2;

/// Orchestrates one capture: take photo, provision directory, name, move,
/// register.
///
/// # Thread Safety
///
/// CaptureManager is NOT meant to be shared between overlapping captures.
/// Every call to [`capture`](Self::capture) requires a [`CaptureGuard`],
/// which the caller obtains from a [`crate::CaptureGate`] shared with the
/// shutter input.
pub struct CaptureManager {
    camera: Box<dyn CameraService>,
    storage_permission: Box<dyn StoragePermission>,
    media_index: Box<dyn MediaIndex>,
    pictures_root: PathBuf,
}

impl CaptureManager {
    /// Create a manager storing project directories under `pictures_root`.
    #[instrument(skip(camera, storage_permission, media_index))]
    pub fn new(
        camera: Box<dyn CameraService>,
        storage_permission: Box<dyn StoragePermission>,
        media_index: Box<dyn MediaIndex>,
        pictures_root: PathBuf,
    ) -> Self {
        info!(pictures_root = ?pictures_root, "CaptureManager initialized");

        Self {
            camera,
            storage_permission,
            media_index,
            pictures_root,
        }
    }

    /// Ask the camera for permission.
    ///
    /// # Errors
    ///
    /// [`CaptureError::PermissionDenied`] if the camera refuses.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn request_camera_permission(&mut self) -> CoreResult<()> {
        match self.camera.request_permission() {
            PermissionStatus::Granted => Ok(()),
            PermissionStatus::Denied => {
                warn!("Camera permission denied");
                Err(CaptureError::PermissionDenied {
                    resource: Resource::Camera,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Turn the camera session on or off.
    pub fn set_active(&mut self, active: bool) {
        self.camera.set_active(active);
    }

    /// Pass a zoom level through to the camera.
    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        self.camera.set_zoom(zoom);
    }

    /// Take a photo and file it as the next `<equipment>(<n>).jpg` of the
    /// target project.
    ///
    /// Storage permission is checked before anything touches the disk. If
    /// the computed destination is taken by the time of the move, the name
    /// is recomputed from a fresh listing and the move retried once.
    ///
    /// # Errors
    ///
    /// - [`CaptureError::PermissionDenied`] if storage access is denied.
    /// - [`CaptureError::Camera`] if no photo could be taken.
    /// - Storage errors from provisioning, listing or relocation. The
    ///   temporary capture is left in place and its path logged.
    #[track_caller]
    #[instrument(skip(self, _guard, target), fields(project = %target.project(), equipment = %target.equipment()))]
    pub fn capture(
        &mut self,
        _guard: &CaptureGuard,
        target: &CaptureTarget,
        flash: FlashMode,
    ) -> CoreResult<PathBuf> {
        let location = Location::caller();

        if !self.storage_permission.request().is_granted() {
            warn!("Storage permission denied");
            return Err(CaptureError::PermissionDenied {
                resource: Resource::Storage,
                location: ErrorLocation::from(location),
            });
        }

        let temp = self.camera.take_photo(flash)?;

        let project_dir = target.project_dir(&self.pictures_root);
        if let Err(e) = storage::ensure_directory(&project_dir) {
            error!(
                source = ?temp.path(),
                project_dir = ?project_dir,
                error = %e,
                "Cannot provision project directory; capture left at source"
            );
            return Err(e);
        }

        let dest = place_capture(&temp, target, &project_dir, storage::list_file_names)?;

        if let Err(e) = self.media_index.register(&dest) {
            warn!(path = ?dest, error = %e, "Media index registration failed");
        }

        info!(path = ?dest, "Capture saved");

        Ok(dest)
    }
}

/// Name and move `temp` into `project_dir`, retrying once on collision.
///
/// `list` snapshots the directory before each attempt.
pub(crate) fn place_capture<L>(
    temp: &TemporaryCapture,
    target: &CaptureTarget,
    project_dir: &Path,
    mut list: L,
) -> CoreResult<PathBuf>
where
    L: FnMut(&Path) -> CoreResult<HashSet<String>>,
{
    let mut attempt = 1;

    loop {
        let dest = match list(project_dir) {
            Ok(names) => project_dir.join(target.next_file_name(&names)),
            Err(e) => {
                error!(
                    source = ?temp.path(),
                    project_dir = ?project_dir,
                    error = %e,
                    "Cannot list project directory; capture left at source"
                );
                return Err(e);
            }
        };

        match storage::relocate(temp.path(), &dest) {
            Ok(()) => return Ok(dest),
            Err(CaptureError::DestinationExists { .. }) if attempt < MAX_PLACEMENT_ATTEMPTS => {
                warn!(dest = ?dest, attempt, "Destination taken, recomputing name");
                attempt += 1;
            }
            Err(e) => {
                error!(
                    source = ?temp.path(),
                    dest = ?dest,
                    attempt,
                    error = %e,
                    "Failed to relocate capture; recover manually from source"
                );
                return Err(e);
            }
        }
    }
}
