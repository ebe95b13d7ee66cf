use crate::capture::PermissionStatus;

/// Runtime storage-write permission gate.
///
/// Checked before any directory or file operation.
pub trait StoragePermission: Send {
    /// Request (or re-check) write access to the pictures storage.
    fn request(&mut self) -> PermissionStatus;
}

/// Permission gate for platforms without a runtime storage permission.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysGranted;

impl StoragePermission for AlwaysGranted {
    fn request(&mut self) -> PermissionStatus {
        PermissionStatus::Granted
    }
}
