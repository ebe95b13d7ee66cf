//! In-memory state of the current inspection run.
//!
//! All mutation goes through the transitions below; a rejected transition
//! leaves every field untouched.

use crate::{
    CaptureError, CoreResult,
    error::{Field, Problem},
    session::{CaptureTarget, Mode},
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Project, equipment, mode and capture badge for the current app run.
///
/// `capture_count` is the number shown on the shutter badge. It is never
/// used to name files; the next index always comes from the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    project_name: String,
    equipment_name: String,
    mode: Mode,
    capture_count: u32,
    last_photo: Option<PathBuf>,
    reset_pending: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            equipment_name: String::new(),
            mode: Mode::Form,
            capture_count: 1,
            last_photo: None,
            reset_pending: false,
        }
    }
}

impl Session {
    /// Fresh session: empty names, form mode, count 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current project field value.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Current equipment field value.
    pub fn equipment_name(&self) -> &str {
        &self.equipment_name
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Badge counter, starting at 1.
    pub fn capture_count(&self) -> u32 {
        self.capture_count
    }

    /// Most recent capture, used for the preview thumbnail.
    pub fn last_photo(&self) -> Option<&Path> {
        self.last_photo.as_deref()
    }

    /// Whether a reset is awaiting confirmation.
    pub fn is_reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Target for captures, available only in capture mode.
    pub fn capture_target(&self) -> Option<CaptureTarget> {
        match self.mode {
            Mode::Capture => Some(CaptureTarget::new(
                self.project_name.as_str(),
                self.equipment_name.as_str(),
            )),
            Mode::Form => None,
        }
    }

    /// Update the project field from form input.
    ///
    /// # Errors
    ///
    /// [`CaptureError::InvalidTransition`] outside form mode.
    #[track_caller]
    pub fn set_project(&mut self, text: impl Into<String>) -> CoreResult<()> {
        self.require_mode(Mode::Form, "edit the project")?;
        self.project_name = text.into();
        Ok(())
    }

    /// Update the equipment field from form input.
    ///
    /// # Errors
    ///
    /// [`CaptureError::InvalidTransition`] outside form mode.
    #[track_caller]
    pub fn set_equipment(&mut self, text: impl Into<String>) -> CoreResult<()> {
        self.require_mode(Mode::Form, "edit the equipment")?;
        self.equipment_name = text.into();
        Ok(())
    }

    /// Check that [`start`](Self::start) would accept the form, without
    /// changing anything.
    ///
    /// Lets callers report a missing field before probing devices.
    ///
    /// # Errors
    ///
    /// The same errors as [`start`](Self::start).
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        self.checked_names().map(|_| ())
    }

    /// Enter capture mode.
    ///
    /// Both names are trimmed once here and stored trimmed; every capture
    /// of this run uses the trimmed values.
    ///
    /// # Errors
    ///
    /// - [`CaptureError::Validation`] naming the first missing or unusable
    ///   field (project checked first).
    /// - [`CaptureError::InvalidTransition`] if already capturing.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&mut self) -> CoreResult<CaptureTarget> {
        let (project, equipment) = self.checked_names()?;
        let (project, equipment) = (project.to_string(), equipment.to_string());

        self.project_name = project;
        self.equipment_name = equipment;
        self.capture_count = 1;
        self.last_photo = None;
        self.mode = Mode::Capture;

        info!(
            project = %self.project_name,
            equipment = %self.equipment_name,
            "Capture session started"
        );

        Ok(CaptureTarget::new(
            self.project_name.as_str(),
            self.equipment_name.as_str(),
        ))
    }

    /// Record a successful capture: bump the badge and update the preview.
    ///
    /// # Errors
    ///
    /// [`CaptureError::InvalidTransition`] outside capture mode.
    #[track_caller]
    pub fn record_capture(&mut self, path: impl Into<PathBuf>) -> CoreResult<()> {
        self.require_mode(Mode::Capture, "record a capture")?;
        self.capture_count = self.capture_count.saturating_add(1);
        self.last_photo = Some(path.into());
        debug!(capture_count = self.capture_count, "Capture recorded");
        Ok(())
    }

    /// Leave capture mode, keeping the project for the next equipment.
    ///
    /// # Errors
    ///
    /// [`CaptureError::InvalidTransition`] outside capture mode.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn finish(&mut self) -> CoreResult<()> {
        self.require_mode(Mode::Capture, "finish")?;
        self.equipment_name.clear();
        self.last_photo = None;
        self.capture_count = 1;
        self.mode = Mode::Form;
        info!(project = %self.project_name, "Capture session finished");
        Ok(())
    }

    /// First step of a reset: ask for confirmation. Allowed in any mode.
    pub fn request_reset(&mut self) {
        self.reset_pending = true;
        debug!("Reset requested");
    }

    /// Dismiss a pending reset. Nothing else changes.
    pub fn cancel_reset(&mut self) {
        self.reset_pending = false;
        debug!("Reset cancelled");
    }

    /// Second step of a reset: clear everything and return to the form.
    ///
    /// # Errors
    ///
    /// [`CaptureError::InvalidTransition`] if no reset was requested.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn confirm_reset(&mut self) -> CoreResult<()> {
        if !self.reset_pending {
            return Err(CaptureError::InvalidTransition {
                action: "confirm a reset that was not requested",
                mode: self.mode.as_str(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        *self = Self::default();
        info!("Session reset");
        Ok(())
    }

    /// Trimmed project and equipment names, if the form may start.
    #[track_caller]
    fn checked_names(&self) -> CoreResult<(&str, &str)> {
        self.require_mode(Mode::Form, "start")?;
        let project = validate_name(&self.project_name, Field::Project)?;
        let equipment = validate_name(&self.equipment_name, Field::Equipment)?;
        Ok((project, equipment))
    }

    #[track_caller]
    fn require_mode(&self, expected: Mode, action: &'static str) -> CoreResult<()> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(CaptureError::InvalidTransition {
                action,
                mode: self.mode.as_str(),
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

/// Trim `raw` and check it can serve as a single path component.
#[track_caller]
fn validate_name(raw: &str, field: Field) -> CoreResult<&str> {
    let name = raw.trim();

    let problem = if name.is_empty() {
        Some(Problem::Empty)
    } else if name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
    {
        Some(Problem::NotAPathComponent)
    } else {
        None
    };

    match problem {
        Some(problem) => Err(CaptureError::Validation {
            field,
            problem,
            location: ErrorLocation::from(Location::caller()),
        }),
        None => Ok(name),
    }
}
