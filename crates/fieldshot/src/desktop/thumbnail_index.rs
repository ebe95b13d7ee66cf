use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use fieldshot_core::{CaptureError, CoreResult, MediaIndex};
use image::ImageFormat;
use tracing::{debug, instrument};

/// Directory, inside each project directory, holding preview thumbnails.
pub const THUMBNAIL_DIR: &str = ".thumbnails";

/// Media index that publishes a PNG thumbnail next to each capture.
///
/// Viewers and the preview command pick up `<project>/.thumbnails/<file>.png`.
pub struct ThumbnailIndex {
    max_edge: u32,
}

impl ThumbnailIndex {
    /// Index producing thumbnails no larger than `max_edge` on either side.
    pub fn new(max_edge: u32) -> Self {
        Self { max_edge }
    }

    /// Where the thumbnail for `capture` is written.
    pub fn thumbnail_path(capture: &Path) -> Option<PathBuf> {
        let dir = capture.parent()?.join(THUMBNAIL_DIR);
        let name = capture.file_name()?.to_str()?;
        Some(dir.join(format!("{name}.png")))
    }
}

impl MediaIndex for ThumbnailIndex {
    #[track_caller]
    #[instrument(skip(self))]
    fn register(&mut self, path: &Path) -> CoreResult<()> {
        let location = Location::caller();
        let storage_error = |reason: String, at: &Path| CaptureError::Storage {
            reason,
            path: at.to_path_buf(),
            location: ErrorLocation::from(location),
        };

        let thumb_path = Self::thumbnail_path(path)
            .ok_or_else(|| storage_error("Capture path has no usable file name".to_string(), path))?;

        if let Some(dir) = thumb_path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| storage_error(format!("Failed to create thumbnail directory: {}", e), dir))?;
        }

        let image = image::open(path)
            .map_err(|e| storage_error(format!("Failed to decode capture: {}", e), path))?;

        image
            .thumbnail(self.max_edge, self.max_edge)
            .save_with_format(&thumb_path, ImageFormat::Png)
            .map_err(|e| storage_error(format!("Failed to write thumbnail: {}", e), &thumb_path))?;

        debug!(thumbnail = ?thumb_path, "Thumbnail registered");

        Ok(())
    }
}
