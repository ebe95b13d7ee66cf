use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
    time::SystemTime,
};

use error_location::ErrorLocation;
use fieldshot_core::{
    CameraService, CaptureError, CoreResult, FlashMode, PermissionStatus, TemporaryCapture,
    ZoomLevel, storage,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const FRAME_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Camera stand-in fed by a tethered device or import tool.
///
/// Frames are dropped into an inbox directory; each shot takes the oldest
/// frame and moves it to a staging directory under a unique name, which is
/// the temporary capture handed to the pipeline.
pub struct StagedCamera {
    inbox: PathBuf,
    staging: PathBuf,
    active: bool,
    zoom: ZoomLevel,
}

impl StagedCamera {
    /// Camera reading frames from `inbox` and staging them in `staging`.
    pub fn new(inbox: PathBuf, staging: PathBuf) -> Self {
        Self {
            inbox,
            staging,
            active: false,
            zoom: ZoomLevel::default(),
        }
    }

    /// Oldest waiting frame, by modification time then name.
    fn oldest_frame(&self) -> std::io::Result<Option<PathBuf>> {
        let mut frames: Vec<(SystemTime, PathBuf)> = Vec::new();

        for entry in fs::read_dir(&self.inbox)? {
            let entry = entry?;
            let path = entry.path();
            if !is_frame(&path) {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            frames.push((modified, path));
        }

        Ok(frames.into_iter().min().map(|(_, path)| path))
    }
}

fn is_frame(path: &Path) -> bool {
    let visible = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| !n.starts_with('.'));
    let image = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| FRAME_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)));
    visible && image
}

impl CameraService for StagedCamera {
    #[instrument(skip(self), fields(inbox = ?self.inbox))]
    fn request_permission(&mut self) -> PermissionStatus {
        if fs::read_dir(&self.inbox).is_ok() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        info!(active, "Camera session toggled");
    }

    fn set_zoom(&mut self, zoom: ZoomLevel) {
        self.zoom = zoom;
        debug!(zoom = zoom.factor(), "Zoom selected");
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn take_photo(&mut self, flash: FlashMode) -> CoreResult<TemporaryCapture> {
        let location = Location::caller();
        let camera_error = |reason: String| CaptureError::Camera {
            reason,
            location: ErrorLocation::from(location),
        };

        if !self.active {
            return Err(camera_error("camera is not active".to_string()));
        }

        let frame = self
            .oldest_frame()
            .map_err(|e| camera_error(format!("cannot read inbox {:?}: {}", self.inbox, e)))?
            .ok_or_else(|| camera_error(format!("no frame waiting in {:?}", self.inbox)))?;

        fs::create_dir_all(&self.staging)
            .map_err(|e| camera_error(format!("cannot create staging directory: {}", e)))?;

        let temp_path = self.staging.join(format!("{}.jpg", Uuid::new_v4()));
        storage::relocate(&frame, &temp_path)
            .map_err(|e| camera_error(format!("cannot stage frame: {}", e.user_message())))?;

        debug!(
            frame = ?frame,
            temp = ?temp_path,
            zoom = self.zoom.factor(),
            %flash,
            "Frame staged"
        );

        Ok(TemporaryCapture::new(temp_path))
    }
}
