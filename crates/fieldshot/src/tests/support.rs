use std::{
    io::{self, Write},
    panic::Location,
    path::Path,
    sync::{Arc, Mutex},
};

use error_location::ErrorLocation;
use fieldshot_core::{
    CameraService, CaptureError, CoreResult, FlashMode, PermissionStatus, TemporaryCapture,
    ZoomLevel,
};

/// Writer whose contents the test can read back.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .0
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Write a small real JPEG frame.
#[allow(clippy::unwrap_used)]
pub(crate) fn write_jpeg(path: &Path) {
    image::RgbImage::from_pixel(32, 24, image::Rgb([200, 120, 40]))
        .save(path)
        .unwrap();
}

/// Names of the entries in `dir`, sorted.
#[allow(clippy::unwrap_used)]
pub(crate) fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Camera the user has refused access to.
pub(crate) struct DeniedCamera;

impl CameraService for DeniedCamera {
    fn request_permission(&mut self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    fn set_active(&mut self, _active: bool) {}

    fn set_zoom(&mut self, _zoom: ZoomLevel) {}

    fn take_photo(&mut self, _flash: FlashMode) -> CoreResult<TemporaryCapture> {
        Err(CaptureError::Camera {
            reason: "access denied".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
