//! Fieldshot: sequentially named equipment photos for field inspections.

mod app;
mod app_command;
mod cli;
mod config;
mod desktop;
mod error;
mod input_handler;
mod presenter;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    input_handler::InputHandler,
    presenter::Presenter,
};

use crate::{
    cli::Args,
    config::{Config, DEFAULT_LOG_FILTER},
    desktop::{FsStoragePermission, StagedCamera, ThumbnailIndex},
};

use std::{io::BufReader, time::Duration};

use clap::Parser;
use fieldshot_core::CaptureManager;
use tokio::sync::{mpsc, watch};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Longest thumbnail edge in pixels.
const THUMBNAIL_EDGE: u32 = 256;

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> AppResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    args.apply_overrides(&mut config);
    Ok(config)
}

/// Application entry point.
fn main() {
    let args = Args::parse();

    // The log filter lives in the config, so the config is read first.
    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            init_tracing(DEFAULT_LOG_FILTER);
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.filter);

    let capture_manager = CaptureManager::new(
        Box::new(StagedCamera::new(
            config.camera.inbox_dir.clone(),
            config.camera.staging_dir.clone(),
        )),
        Box::new(FsStoragePermission::new(config.storage.pictures_root.clone())),
        Box::new(ThumbnailIndex::new(THUMBNAIL_EDGE)),
        config.storage.pictures_root.clone(),
    );

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let (command_tx, command_rx) = mpsc::channel(32);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    rt.block_on(async {
        let input_handler = InputHandler::new(command_tx.clone());

        let app = App::new(
            capture_manager,
            Presenter::stdout(),
            config,
            command_tx,
            command_rx,
            shutdown_tx,
        );

        tokio::join!(
            async {
                let stdin = BufReader::new(std::io::stdin());
                if let Err(e) = input_handler.run(stdin, shutdown_rx).await {
                    error!(error = ?e, "Input handler error");
                }
            },
            async {
                if let Err(e) = app.run().await {
                    error!(error = ?e, "App error");
                }
            }
        );
    });

    // A blocked stdin read must not keep the process alive.
    rt.shutdown_timeout(Duration::from_secs(1));
}
