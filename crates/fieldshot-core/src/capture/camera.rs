use crate::CoreResult;

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Access allowed.
    Granted,
    /// Access refused.
    Denied,
}

impl PermissionStatus {
    /// `true` for [`PermissionStatus::Granted`].
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Flash setting passed through to the camera on each shot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashMode {
    /// Never fire the flash.
    #[default]
    Off,
    /// Always fire the flash.
    On,
    /// Let the device decide.
    Auto,
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashMode::Off => f.write_str("off"),
            FlashMode::On => f.write_str("on"),
            FlashMode::Auto => f.write_str("auto"),
        }
    }
}

impl FromStr for FlashMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(FlashMode::Off),
            "on" => Ok(FlashMode::On),
            "auto" => Ok(FlashMode::Auto),
            other => Err(format!("unknown flash mode '{other}' (expected off, on or auto)")),
        }
    }
}

/// Discrete zoom levels offered by the capture screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomLevel {
    /// 0.6x, the ultra-wide lens.
    #[serde(rename = "0.6")]
    UltraWide,
    /// 1x.
    #[default]
    #[serde(rename = "1")]
    X1,
    /// 2x.
    #[serde(rename = "2")]
    X2,
    /// 3x.
    #[serde(rename = "3")]
    X3,
}

impl ZoomLevel {
    /// Every selectable level, widest first.
    pub const ALL: [ZoomLevel; 4] = [
        ZoomLevel::UltraWide,
        ZoomLevel::X1,
        ZoomLevel::X2,
        ZoomLevel::X3,
    ];

    /// Numeric zoom factor handed to the device.
    pub fn factor(self) -> f32 {
        match self {
            ZoomLevel::UltraWide => 0.6,
            ZoomLevel::X1 => 1.0,
            ZoomLevel::X2 => 2.0,
            ZoomLevel::X3 => 3.0,
        }
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

impl FromStr for ZoomLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix(['x', 'X'])
            .unwrap_or(trimmed)
            .trim();

        let value: f32 = number
            .parse()
            .map_err(|_| format!("invalid zoom level '{trimmed}'"))?;

        Self::ALL
            .into_iter()
            .find(|level| (level.factor() - value).abs() < 0.01)
            .ok_or_else(|| format!("unsupported zoom level '{trimmed}' (expected 0.6, 1, 2 or 3)"))
    }
}

/// A file written by the camera at an ephemeral path.
///
/// Owned by the capture pipeline until it is relocated into the project
/// directory.
#[derive(Debug, PartialEq, Eq)]
pub struct TemporaryCapture {
    path: PathBuf,
}

impl TemporaryCapture {
    /// Wrap a freshly written capture file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the capture currently lives.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Device camera collaborator.
pub trait CameraService: Send {
    /// Ask for permission to use the camera.
    fn request_permission(&mut self) -> PermissionStatus;

    /// Turn the preview/capture session on or off.
    fn set_active(&mut self, active: bool);

    /// Select a zoom level for subsequent shots.
    fn set_zoom(&mut self, zoom: ZoomLevel);

    /// Take a photo and return the temporary file holding it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CaptureError::Camera`] if no photo could be taken.
    fn take_photo(&mut self, flash: FlashMode) -> CoreResult<TemporaryCapture>;
}
