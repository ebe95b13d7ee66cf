//! Fieldshot Core Library
//!
//! Files equipment photos taken during an inspection as
//! `<pictures root>/<project>/<equipment>(<n>).jpg`, where `n` is one past
//! the highest index already on disk for that equipment.
//!
//! # Example
//!
//! ```no_run
//! use fieldshot_core::{
//!     AlwaysGranted, CaptureGate, CaptureManager, CoreResult, FlashMode, NoMediaIndex, Session,
//! };
//! # use fieldshot_core::{CameraService, PermissionStatus, TemporaryCapture, ZoomLevel};
//! # struct Camera;
//! # impl CameraService for Camera {
//! #     fn request_permission(&mut self) -> PermissionStatus { PermissionStatus::Granted }
//! #     fn set_active(&mut self, _: bool) {}
//! #     fn set_zoom(&mut self, _: ZoomLevel) {}
//! #     fn take_photo(&mut self, _: FlashMode) -> CoreResult<TemporaryCapture> {
//! #         Ok(TemporaryCapture::new("/tmp/capture.jpg"))
//! #     }
//! # }
//!
//! fn main() -> CoreResult<()> {
//!     let mut manager = CaptureManager::new(
//!         Box::new(Camera),
//!         Box::new(AlwaysGranted),
//!         Box::new(NoMediaIndex),
//!         "/home/tech/Pictures".into(),
//!     );
//!     let gate = CaptureGate::new();
//!
//!     let mut session = Session::new();
//!     session.set_project("Site A")?;
//!     session.set_equipment("Pump")?;
//!     let target = session.start()?;
//!
//!     if let Some(guard) = gate.try_acquire() {
//!         let path = manager.capture(&guard, &target, FlashMode::Off)?;
//!         session.record_capture(path)?;
//!     }
//!     Ok(())
//! }
//! ```

mod capture;
mod error;
pub mod naming;
pub mod storage;
mod session;

pub use {
    capture::{
        AlwaysGranted, CameraService, CaptureGate, CaptureGuard, CaptureManager, FlashMode,
        MediaIndex, NoMediaIndex, PermissionStatus, StoragePermission, TemporaryCapture,
        ZoomLevel,
    },
    error::{CaptureError, ErrorKind, Field, Problem, Resource, Result as CoreResult},
    session::{CaptureTarget, Mode, Session},
};

#[cfg(test)]
mod tests;
