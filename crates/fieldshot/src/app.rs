use crate::{AppCommand, AppResult, Presenter, config::Config};

use std::{ops::ControlFlow, panic::Location, path::PathBuf, sync::Arc};

use error_location::ErrorLocation;
use fieldshot_core::{
    CaptureError, CaptureGate, CaptureGuard, CaptureManager, CoreResult, Mode, Session, ZoomLevel,
};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Main application state.
///
/// The only owner of the [`Session`]: every mutation happens in
/// [`handle_command`](Self::handle_command) on the application loop. The
/// capture pipeline runs on a blocking task and reports back through
/// `command_tx`.
pub struct App {
    pub(crate) session: Session,
    pub(crate) capture_manager: Arc<Mutex<CaptureManager>>,
    pub(crate) gate: CaptureGate,
    pub(crate) presenter: Presenter,
    pub(crate) config: Config,
    pub(crate) zoom: ZoomLevel,
    pub(crate) camera_granted: bool,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Assemble the application around a capture manager.
    pub fn new(
        capture_manager: CaptureManager,
        presenter: Presenter,
        config: Config,
        command_tx: mpsc::Sender<AppCommand>,
        command_rx: mpsc::Receiver<AppCommand>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        let zoom = config.camera.default_zoom;
        Self {
            session: Session::new(),
            capture_manager: Arc::new(Mutex::new(capture_manager)),
            gate: CaptureGate::new(),
            presenter,
            config,
            zoom,
            camera_granted: false,
            command_tx,
            command_rx,
            shutdown_tx,
        }
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Fieldshot starting");

        self.camera_granted = self.capture_manager.lock().await.request_camera_permission().is_ok();
        if !self.camera_granted {
            self.presenter.info(
                "Camera access is not available yet; you can fill in the form meanwhile.",
            );
        }
        self.presenter.prompt(&self.session, self.zoom);

        while let Some(cmd) = self.command_rx.recv().await {
            if self.handle_command(cmd).await.is_break() {
                break;
            }
            self.presenter.prompt(&self.session, self.zoom);
        }

        // Let an in-flight capture finish before the camera is released.
        let mut manager = self.capture_manager.lock().await;
        manager.set_active(false);
        drop(manager);

        let _ = self.shutdown_tx.send(true);
        info!("Fieldshot shut down successfully");

        Ok(())
    }

    /// Apply one command. Errors are presented, never propagated.
    pub(crate) async fn handle_command(&mut self, cmd: AppCommand) -> ControlFlow<()> {
        if matches!(cmd, AppCommand::Shutdown) {
            info!("Shutdown requested");
            return ControlFlow::Break(());
        }

        if let Err(e) = self.dispatch(cmd).await {
            warn!(error = ?e, "Command failed");
            self.presenter.error(&e);
        }

        ControlFlow::Continue(())
    }

    async fn dispatch(&mut self, cmd: AppCommand) -> AppResult<()> {
        if self.session.is_reset_pending() && blocked_by_reset_dialog(&cmd) {
            self.presenter.confirm_reset();
            return Ok(());
        }

        match cmd {
            AppCommand::SetProject { text } => self.session.set_project(text)?,
            AppCommand::SetEquipment { text } => self.session.set_equipment(text)?,
            AppCommand::Start => self.start().await?,
            AppCommand::Zoom { level } => self.set_zoom(level).await?,
            AppCommand::Shoot => self.shoot()?,
            AppCommand::Finish => self.finish().await?,
            AppCommand::RequestReset => {
                self.session.request_reset();
                self.presenter.confirm_reset();
            }
            AppCommand::ConfirmReset => self.confirm_reset().await?,
            AppCommand::CancelReset => {
                self.session.cancel_reset();
                self.presenter.info("Reset cancelled.");
            }
            AppCommand::Preview => self.preview(),
            AppCommand::Status => {
                self.presenter
                    .status(&self.session, self.zoom, self.gate.is_busy());
            }
            AppCommand::Help => self.presenter.help(),
            AppCommand::InvalidInput { reason } => self.presenter.info(&reason),
            AppCommand::CaptureCompleted {
                capture_id,
                result,
                guard,
            } => self.complete_capture(capture_id, result, guard)?,
            AppCommand::Shutdown => {}
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn start(&mut self) -> AppResult<()> {
        if self.session.mode() == Mode::Form {
            // A missing field is reported before any device problem.
            self.session.validate()?;
            self.config.validate_inbox()?;

            let mut manager = self.capture_manager.lock().await;
            if !self.camera_granted {
                manager.request_camera_permission()?;
                self.camera_granted = true;
            }
            drop(manager);
        }

        let target = self.session.start()?;

        let mut manager = self.capture_manager.lock().await;
        manager.set_zoom(self.zoom);
        manager.set_active(true);
        drop(manager);

        self.presenter.info(&format!(
            "Photographing '{}' for project '{}'. Type 'shoot' to take a photo.",
            target.equipment(),
            target.project()
        ));

        Ok(())
    }

    async fn set_zoom(&mut self, level: ZoomLevel) -> AppResult<()> {
        self.require_capture_mode("change the zoom")?;
        self.zoom = level;
        self.capture_manager.lock().await.set_zoom(level);
        Ok(())
    }

    /// Launch the capture pipeline, or ignore the tap if one is in flight.
    #[instrument(skip(self))]
    fn shoot(&mut self) -> AppResult<()> {
        let target = match self.session.capture_target() {
            Some(target) => target,
            None => {
                self.require_capture_mode("take a photo")?;
                return Ok(());
            }
        };

        let Some(guard) = self.gate.try_acquire() else {
            // The tap is dropped, not queued.
            return Err(CaptureError::CaptureInProgress {
                location: ErrorLocation::from(Location::caller()),
            }
            .into());
        };

        let capture_id = Uuid::new_v4();
        let manager = Arc::clone(&self.capture_manager);
        let command_tx = self.command_tx.clone();
        let flash = self.config.camera.flash;

        info!(capture_id = %capture_id, "Capture launched");

        tokio::task::spawn_blocking(move || {
            let result = {
                let mut manager = manager.blocking_lock();
                manager.capture(&guard, &target, flash)
            };

            let completed = AppCommand::CaptureCompleted {
                capture_id,
                result,
                guard,
            };
            if let Err(e) = command_tx.blocking_send(completed) {
                error!(capture_id = %capture_id, error = %e, "Failed to report capture result");
            }
        });

        Ok(())
    }

    fn complete_capture(
        &mut self,
        capture_id: Uuid,
        result: CoreResult<PathBuf>,
        guard: CaptureGuard,
    ) -> AppResult<()> {
        // The shutter reopens once the result has been applied.
        let _guard = guard;

        let path = match result {
            Ok(path) => path,
            Err(e) => {
                error!(capture_id = %capture_id, error = ?e, "Capture failed");
                return Err(e.into());
            }
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if self.session.mode() == Mode::Capture {
            self.session.record_capture(&path)?;
            self.presenter.info(&format!(
                "Saved {} (photo #{} is next)",
                name,
                self.session.capture_count()
            ));
        } else {
            self.presenter.info(&format!("Saved {}", name));
        }

        info!(capture_id = %capture_id, path = ?path, "Capture completed");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn finish(&mut self) -> AppResult<()> {
        self.session.finish()?;
        self.capture_manager.lock().await.set_active(false);
        self.presenter.info("Done. Enter the next equipment or reset.");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn confirm_reset(&mut self) -> AppResult<()> {
        let was_capturing = self.session.mode() == Mode::Capture;
        self.session.confirm_reset()?;
        if was_capturing {
            self.capture_manager.lock().await.set_active(false);
        }
        self.presenter.info("All fields cleared.");
        Ok(())
    }

    fn preview(&mut self) {
        let Some(path) = self.session.last_photo().map(|p| p.to_path_buf()) else {
            self.presenter.info("No photo taken yet.");
            return;
        };

        match open::that_detached(&path) {
            Ok(()) => info!(path = ?path, "Opened preview"),
            Err(e) => {
                warn!(path = ?path, error = %e, "Failed to open preview");
                self.presenter
                    .info(&format!("Last photo: {}", path.display()));
            }
        }
    }

    #[track_caller]
    fn require_capture_mode(&self, action: &'static str) -> AppResult<()> {
        if self.session.mode() == Mode::Capture {
            return Ok(());
        }
        Err(CaptureError::InvalidTransition {
            action,
            mode: self.session.mode().as_str(),
            location: ErrorLocation::from(Location::caller()),
        }
        .into())
    }
}

/// Commands the reset dialog does not let through.
fn blocked_by_reset_dialog(cmd: &AppCommand) -> bool {
    !matches!(
        cmd,
        AppCommand::ConfirmReset
            | AppCommand::CancelReset
            | AppCommand::RequestReset
            | AppCommand::CaptureCompleted { .. }
            | AppCommand::Status
            | AppCommand::Help
            | AppCommand::InvalidInput { .. }
            | AppCommand::Shutdown
    )
}
