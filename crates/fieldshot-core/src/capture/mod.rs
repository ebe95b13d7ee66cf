mod camera;
mod gate;
pub(crate) mod manager;
mod media_index;
mod permission;

pub use {
    camera::{CameraService, FlashMode, PermissionStatus, TemporaryCapture, ZoomLevel},
    gate::{CaptureGate, CaptureGuard},
    manager::CaptureManager,
    media_index::{MediaIndex, NoMediaIndex},
    permission::{AlwaysGranted, StoragePermission},
};
