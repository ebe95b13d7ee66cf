use fieldshot_core::{CaptureGuard, CoreResult, ZoomLevel};

use std::path::PathBuf;

use uuid::Uuid;

/// Commands delivered to the application loop.
///
/// User input arrives from the input handler; `CaptureCompleted` is sent
/// back by the capture task.
#[derive(Debug)]
pub enum AppCommand {
    /// Replace the project field.
    SetProject {
        /// Raw field text; trimmed when capture starts.
        text: String,
    },
    /// Replace the equipment field.
    SetEquipment {
        /// Raw field text; trimmed when capture starts.
        text: String,
    },
    /// Enter capture mode.
    Start,
    /// Select a zoom level.
    Zoom {
        /// Requested level.
        level: ZoomLevel,
    },
    /// Press the shutter.
    Shoot,
    /// Leave capture mode.
    Finish,
    /// Ask to reset every field.
    RequestReset,
    /// Confirm a pending reset.
    ConfirmReset,
    /// Dismiss a pending reset.
    CancelReset,
    /// Open the most recent capture in the system viewer.
    Preview,
    /// Show the current session state.
    Status,
    /// List the available commands.
    Help,
    /// Input that could not be parsed.
    InvalidInput {
        /// Why the input was rejected.
        reason: String,
    },
    /// A capture task finished.
    CaptureCompleted {
        /// Correlates log lines of one capture.
        capture_id: Uuid,
        /// Saved path or failure.
        result: CoreResult<PathBuf>,
        /// Held until the result is applied so the shutter stays disabled.
        guard: CaptureGuard,
    },
    /// Request application shutdown.
    Shutdown,
}
