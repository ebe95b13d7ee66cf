use std::{fmt, path::PathBuf};

use error_location::ErrorLocation;
use thiserror::Error;

/// Form field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The project name (becomes the target directory).
    Project,
    /// The equipment name (becomes the file name prefix).
    Equipment,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Project => f.write_str("project name"),
            Field::Equipment => f.write_str("equipment name"),
        }
    }
}

/// Protected resource a permission error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Camera capture device.
    Camera,
    /// Write access to the pictures storage.
    Storage,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Camera => f.write_str("camera"),
            Resource::Storage => f.write_str("storage"),
        }
    }
}

/// Why a form field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// Empty after trimming.
    Empty,
    /// Cannot be used as a single path component.
    NotAPathComponent,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Empty => f.write_str("must not be empty"),
            Problem::NotAPathComponent => {
                f.write_str("must not be \".\", \"..\" or contain path separators")
            }
        }
    }
}

/// Coarse classification of a [`CaptureError`], used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// User input must be corrected.
    Validation,
    /// Camera or storage access denied.
    Permission,
    /// Directory creation or file placement failed.
    Storage,
    /// The capture service failed.
    Camera,
    /// The operation is not allowed in the current session state.
    State,
}

/// Capture and session errors with source location tracking.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// A required form field is empty or unusable.
    #[error("Invalid {field}: {problem} {location}")]
    Validation {
        /// Field that failed validation.
        field: Field,
        /// What is wrong with the value.
        problem: Problem,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Access to a protected resource was denied.
    #[error("Permission denied: {resource} {location}")]
    PermissionDenied {
        /// Resource that was denied.
        resource: Resource,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Directory or file operation failed.
    #[error("Storage error at {path:?}: {reason} {location}")]
    Storage {
        /// Description of the failure.
        reason: String,
        /// Path the operation targeted.
        path: PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The file to relocate does not exist.
    #[error("Source file missing: {path:?} {location}")]
    SourceMissing {
        /// The missing source path.
        path: PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The relocation target is already taken.
    #[error("Destination already exists: {path:?} {location}")]
    DestinationExists {
        /// The occupied destination path.
        path: PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The camera service failed to produce a capture.
    #[error("Camera error: {reason} {location}")]
    Camera {
        /// Description of the camera failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Operation not allowed in the current session mode.
    #[error("Cannot {action} while in {mode} mode {location}")]
    InvalidTransition {
        /// The rejected operation.
        action: &'static str,
        /// Mode the session was in.
        mode: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Another capture has not finished yet.
    #[error("A capture is already in progress {location}")]
    CaptureInProgress {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl CaptureError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CaptureError::Validation { .. } => ErrorKind::Validation,
            CaptureError::PermissionDenied { .. } => ErrorKind::Permission,
            CaptureError::Storage { .. }
            | CaptureError::SourceMissing { .. }
            | CaptureError::DestinationExists { .. } => ErrorKind::Storage,
            CaptureError::Camera { .. } => ErrorKind::Camera,
            CaptureError::InvalidTransition { .. } | CaptureError::CaptureInProgress { .. } => {
                ErrorKind::State
            }
        }
    }

    /// Short message suitable for showing to the technician.
    ///
    /// Unlike `Display`, this omits source locations.
    pub fn user_message(&self) -> String {
        match self {
            CaptureError::Validation {
                field,
                problem: Problem::Empty,
                ..
            } => format!("Please enter the {field}"),
            CaptureError::Validation { field, problem, .. } => {
                format!("The {field} {problem}")
            }
            CaptureError::PermissionDenied { resource, .. } => {
                format!("Access to the {resource} was denied")
            }
            CaptureError::Storage { reason, path, .. } => {
                format!("Could not save to {}: {reason}", path.display())
            }
            CaptureError::SourceMissing { path, .. } => {
                format!("The captured file {} has disappeared", path.display())
            }
            CaptureError::DestinationExists { path, .. } => {
                format!("{} already exists", path.display())
            }
            CaptureError::Camera { reason, .. } => format!("Camera failure: {reason}"),
            CaptureError::InvalidTransition { action, mode, .. } => {
                format!("Cannot {action} in {mode} mode")
            }
            CaptureError::CaptureInProgress { .. } => {
                "Please wait for the current photo to be saved".to_string()
            }
        }
    }
}

/// Result type alias using [`CaptureError`].
pub type Result<T> = std::result::Result<T, CaptureError>;
