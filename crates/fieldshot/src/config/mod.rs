mod camera_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod storage_config;

pub(crate) use {
    camera_config::CameraConfig, config::Config, logging_config::LoggingConfig,
    storage_config::StorageConfig,
};

pub(crate) const DEFAULT_LOG_FILTER: &str = "fieldshot=info,fieldshot_core=info";
pub(crate) const STAGING_DIR_NAME: &str = "fieldshot-staging";

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

pub(crate) fn default_staging_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(STAGING_DIR_NAME)
}
