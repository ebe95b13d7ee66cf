use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where captures are stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one directory per project.
    pub pictures_root: PathBuf,
}
