//! Text presentation of the session for the terminal.
//!
//! Writes to an injected writer so the application loop can be driven and
//! observed in tests.

use crate::AppError;

use std::io::Write;

use fieldshot_core::{ErrorKind, Mode, Session, ZoomLevel};
use tracing::warn;

const HELP: &str = "\
Commands:
  project <name>     set the project name (form)
  equipment <name>   set the equipment name (form)
  start              start taking photos
  zoom <level>       select zoom: 0.6, 1, 2 or 3 (capture)
  shoot              take a photo (capture)
  finish             stop photographing this equipment
  reset              clear all fields (asks for confirmation)
  confirm / cancel   answer the reset question
  preview            open the last photo
  status             show the current state
  quit               exit";

/// Renders prompts, results and errors as lines of text.
pub struct Presenter {
    out: Box<dyn Write + Send>,
}

impl Presenter {
    /// Presenter writing to `out`.
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }

    /// Presenter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Print a plain message.
    pub fn info(&mut self, message: &str) {
        self.line(message);
    }

    /// Print an error in user terms.
    ///
    /// Storage failures get a retry hint; permission failures explain that
    /// capture stays unavailable.
    pub fn error(&mut self, error: &AppError) {
        let message = error.user_message();
        let kind = match error {
            AppError::Capture { source, .. } => Some(source.kind()),
            _ => None,
        };

        let text = match kind {
            Some(ErrorKind::Storage) => {
                format!("Error: {message}. The photo was not saved; press shoot to retry.")
            }
            Some(ErrorKind::Permission) => {
                format!("Error: {message}. Photos cannot be taken until access is granted.")
            }
            _ => format!("Error: {message}"),
        };
        self.line(&text);
    }

    /// Print the command list.
    pub fn help(&mut self) {
        self.line(HELP);
    }

    /// Ask the user to confirm a reset.
    pub fn confirm_reset(&mut self) {
        self.line("Reset all fields? Type 'confirm' or 'cancel'.");
    }

    /// Print a multi-line summary of the session.
    pub fn status(&mut self, session: &Session, zoom: ZoomLevel, capture_in_flight: bool) {
        let last = session
            .last_photo()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string());

        let text = format!(
            "Mode: {}\nProject: {}\nEquipment: {}\nPhoto #: {}\nZoom: {}\nLast photo: {}{}",
            session.mode(),
            session.project_name(),
            session.equipment_name(),
            session.capture_count(),
            zoom,
            last,
            if capture_in_flight {
                "\nSaving a photo..."
            } else {
                ""
            },
        );
        self.line(&text);
    }

    /// Print the prompt reflecting the current mode.
    pub fn prompt(&mut self, session: &Session, zoom: ZoomLevel) {
        let text = if session.is_reset_pending() {
            "[reset?] confirm/cancel >".to_string()
        } else {
            match session.mode() {
                Mode::Form => format!(
                    "[form] project='{}' equipment='{}' >",
                    session.project_name(),
                    session.equipment_name()
                ),
                Mode::Capture => format!(
                    "[{} / {}] #{} {} >",
                    session.project_name(),
                    session.equipment_name(),
                    session.capture_count(),
                    zoom
                ),
            }
        };
        self.line(&text);
    }

    fn line(&mut self, text: &str) {
        let result = writeln!(self.out, "{text}").and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}
