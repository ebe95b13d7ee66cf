use crate::config::Config;

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for fieldshot.
#[derive(Parser, Debug)]
#[command(name = "fieldshot")]
#[command(about = "Sequentially named equipment photos for field inspections")]
#[command(version)]
pub struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, env = "FIELDSHOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding one folder per project
    #[arg(long, env = "FIELDSHOT_PICTURES_ROOT")]
    pub pictures_root: Option<PathBuf>,

    /// Directory the camera drops frames into
    #[arg(long, env = "FIELDSHOT_INBOX")]
    pub inbox: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(root) = &self.pictures_root {
            config.storage.pictures_root = root.clone();
        }
        if let Some(inbox) = &self.inbox {
            config.camera.inbox_dir = inbox.clone();
        }
    }
}
