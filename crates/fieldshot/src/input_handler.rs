//! Terminal input handler.
//!
//! Reads command lines from a blocking reader (stdin in production) and
//! forwards parsed [`AppCommand`]s to the application loop.

use crate::{AppCommand, AppError, AppResult};

use std::{io::BufRead, panic::Location, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Parse one input line.
///
/// Returns `Ok(None)` for blank lines. Field commands take the rest of the
/// line verbatim so names may contain spaces.
#[track_caller]
pub fn parse_command(line: &str) -> AppResult<Option<AppCommand>> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_end_matches(['\r', '\n'])),
        None => (line.trim_end(), ""),
    };

    let command = match word.to_lowercase().as_str() {
        "project" | "p" => AppCommand::SetProject {
            text: rest.to_string(),
        },
        "equipment" | "equip" | "e" => AppCommand::SetEquipment {
            text: rest.to_string(),
        },
        "start" => AppCommand::Start,
        "zoom" | "z" => {
            let level = rest.parse().map_err(|reason| AppError::InvalidCommand {
                reason,
                location: ErrorLocation::from(Location::caller()),
            })?;
            AppCommand::Zoom { level }
        }
        "shoot" | "snap" | "s" => AppCommand::Shoot,
        "finish" | "done" => AppCommand::Finish,
        "reset" => AppCommand::RequestReset,
        "confirm" | "yes" => AppCommand::ConfirmReset,
        "cancel" | "no" => AppCommand::CancelReset,
        "preview" => AppCommand::Preview,
        "status" => AppCommand::Status,
        "help" | "?" => AppCommand::Help,
        "quit" | "exit" => AppCommand::Shutdown,
        other => {
            return Err(AppError::InvalidCommand {
                reason: format!("Unknown command '{other}'. Type 'help' for the list."),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    Ok(Some(command))
}

/// Forwards terminal lines to the application as commands.
pub struct InputHandler {
    command_tx: mpsc::Sender<AppCommand>,
}

impl InputHandler {
    /// Create a handler sending to `command_tx`.
    pub fn new(command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { command_tx }
    }

    /// Run until shutdown is signalled or the reader reaches end of input.
    ///
    /// End of input is treated as a quit request.
    #[instrument(skip(self, reader, shutdown_rx))]
    pub async fn run<R>(&self, reader: R, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()>
    where
        R: BufRead + Send + 'static,
    {
        let (line_tx, mut line_rx) = mpsc::channel::<String>(32);

        // Single persistent blocking task forwarding lines. It stops when
        // input ends or when line_rx is dropped and the next send fails.
        let handle = tokio::task::spawn_blocking(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if line_tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read input");
                        break;
                    }
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Input handler shutting down");
                    break;
                }
                line = line_rx.recv() => {
                    let Some(line) = line else {
                        info!("End of input, requesting shutdown");
                        self.send(AppCommand::Shutdown).await?;
                        break;
                    };

                    let command = match parse_command(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => continue,
                        Err(e) => {
                            debug!(error = ?e, "Rejected input line");
                            AppCommand::InvalidInput { reason: e.user_message() }
                        }
                    };

                    let quitting = matches!(command, AppCommand::Shutdown);
                    self.send(command).await?;
                    if quitting {
                        break;
                    }
                }
            }
        }

        drop(line_rx);

        // Best-effort join: the blocking task may be stuck reading a line
        // that never comes. The runtime cleans it up on exit.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Input forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Input forwarder task panicked"),
            Err(_) => debug!("Input forwarder did not stop within timeout, will be cleaned up on exit"),
        }

        Ok(())
    }

    async fn send(&self, command: AppCommand) -> AppResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send command: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
