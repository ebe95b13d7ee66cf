use crate::{AppError, config::Config};

use std::{fs, path::PathBuf};

use fieldshot_core::{FlashMode, ZoomLevel};
use tempfile::TempDir;

/// WHAT: A saved config loads back with the same values
/// WHY: Settings must survive restarts
#[test]
#[allow(clippy::unwrap_used)]
fn given_saved_config_when_loading_then_values_preserved() {
    // Given: A config with non-default camera settings
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut config = Config::with_dirs(dir.path(), dir.path().join("Pictures"));
    config.camera.flash = FlashMode::Auto;
    config.camera.default_zoom = ZoomLevel::X2;

    // When: Saving then loading
    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();

    // Then: Same values, no temp file left behind
    assert_eq!(loaded.storage.pictures_root, dir.path().join("Pictures"));
    assert_eq!(loaded.camera.inbox_dir, dir.path().join("inbox"));
    assert_eq!(loaded.camera.flash, FlashMode::Auto);
    assert_eq!(loaded.camera.default_zoom, ZoomLevel::X2);
    assert!(!path.with_extension("toml.tmp").exists());
}

/// WHAT: Optional sections and fields fall back to defaults
/// WHY: Hand-written configs only need the required paths
#[test]
#[allow(clippy::unwrap_used)]
fn given_minimal_toml_when_loading_then_defaults_filled_in() {
    // Given: Only the required keys
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[storage]\npictures_root = \"/photos\"\n\n[camera]\ninbox_dir = \"/inbox\"\n",
    )
    .unwrap();

    // When: Loading
    let config = Config::load_from(&path).unwrap();

    // Then: Defaults applied
    assert_eq!(config.storage.pictures_root, PathBuf::from("/photos"));
    assert_eq!(config.camera.flash, FlashMode::Off);
    assert_eq!(config.camera.default_zoom, ZoomLevel::X1);
    assert_eq!(config.logging.filter, "fieldshot=info,fieldshot_core=info");
    assert!(config.camera.staging_dir.ends_with("fieldshot-staging"));
}

/// WHAT: Zoom and flash are read from their TOML spellings
/// WHY: Users write "0.6" and "auto" in the file
#[test]
#[allow(clippy::unwrap_used)]
fn given_zoom_and_flash_strings_when_loading_then_parsed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[storage]\npictures_root = \"/photos\"\n\n[camera]\ninbox_dir = \"/inbox\"\nflash = \"on\"\ndefault_zoom = \"0.6\"\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.camera.flash, FlashMode::On);
    assert_eq!(config.camera.default_zoom, ZoomLevel::UltraWide);
}

/// WHAT: Malformed TOML is reported as a config error
/// WHY: A broken file must not be silently replaced
#[test]
#[allow(clippy::unwrap_used)]
fn given_invalid_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[storage\npictures_root = ").unwrap();

    let result = Config::load_from(&path);

    assert!(matches!(result, Err(AppError::ConfigError { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "[storage\npictures_root = ");
}

/// WHAT: Inbox validation passes only for an existing directory
/// WHY: Capture mode needs a reachable camera inbox
#[test]
#[allow(clippy::unwrap_used)]
fn given_inbox_presence_when_validating_then_matches_filesystem() {
    // Given: A config whose inbox does not exist yet
    let dir = TempDir::new().unwrap();
    let config = Config::with_dirs(dir.path(), dir.path().join("Pictures"));

    // When/Then: Missing inbox rejected with a helpful message
    let err = config.validate_inbox().unwrap_err();
    assert!(err.user_message().contains("Camera inbox not found"));

    // When/Then: Accepted once created
    fs::create_dir_all(&config.camera.inbox_dir).unwrap();
    assert!(config.validate_inbox().is_ok());
}
