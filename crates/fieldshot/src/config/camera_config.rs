use crate::config::default_staging_dir;

use fieldshot_core::{FlashMode, ZoomLevel};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Capture device configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Directory the camera drops frames into.
    pub inbox_dir: PathBuf,

    /// Directory for temporary captures awaiting relocation.
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// Flash setting used for every shot.
    #[serde(default)]
    pub flash: FlashMode,

    /// Zoom level selected when capture mode starts.
    #[serde(default)]
    pub default_zoom: ZoomLevel,
}
