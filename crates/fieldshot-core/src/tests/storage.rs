use crate::{
    CaptureError, ErrorKind,
    storage::{copy_exclusive, ensure_directory, list_file_names, relocate},
};

use std::fs;

use tempfile::TempDir;

/// WHAT: Missing directories are created with their parents
/// WHY: The project directory is created lazily on first capture
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_directory_when_ensuring_then_created() {
    // Given: A path two levels below an empty temp dir
    let root = TempDir::new().unwrap();
    let dir = root.path().join("Pictures").join("Site A");

    // When: Ensuring the directory
    let result = ensure_directory(&dir);

    // Then: It exists
    assert!(result.is_ok());
    assert!(dir.is_dir());
}

/// WHAT: Ensuring an existing directory twice succeeds
/// WHY: Provisioning runs before every capture
#[test]
#[allow(clippy::unwrap_used)]
fn given_existing_directory_when_ensuring_twice_then_no_error() {
    // Given: A directory that was already provisioned
    let root = TempDir::new().unwrap();
    let dir = root.path().join("Site A");
    ensure_directory(&dir).unwrap();
    fs::write(dir.join("Pump(1).jpg"), b"jpeg").unwrap();

    // When: Ensuring it again
    let result = ensure_directory(&dir);

    // Then: Success, contents untouched
    assert!(result.is_ok());
    assert!(dir.join("Pump(1).jpg").is_file());
}

/// WHAT: A file squatting on the directory path is a storage error
/// WHY: Photos cannot be placed inside a regular file
#[test]
#[allow(clippy::unwrap_used)]
fn given_file_at_path_when_ensuring_then_storage_error() {
    // Given: A regular file named like the project
    let root = TempDir::new().unwrap();
    let path = root.path().join("Site A");
    fs::write(&path, b"not a directory").unwrap();

    // When: Ensuring the directory
    let result = ensure_directory(&path);

    // Then: Storage error
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}

/// WHAT: Listing returns every entry name
/// WHY: The naming policy needs a full snapshot, directories included
#[test]
#[allow(clippy::unwrap_used)]
fn given_populated_directory_when_listing_then_all_names_returned() {
    // Given: Two files and a subdirectory
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("Pump(1).jpg"), b"a").unwrap();
    fs::write(root.path().join("Valve(1).jpg"), b"b").unwrap();
    fs::create_dir(root.path().join("Pump(2).jpg")).unwrap();

    // When: Listing
    let names = list_file_names(root.path()).unwrap();

    // Then: All three names present
    assert_eq!(names.len(), 3);
    assert!(names.contains("Pump(1).jpg"));
    assert!(names.contains("Valve(1).jpg"));
    assert!(names.contains("Pump(2).jpg"));
}

/// WHAT: Listing a missing directory fails
/// WHY: Surfaces provisioning problems instead of naming from nothing
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_directory_when_listing_then_storage_error() {
    let root = TempDir::new().unwrap();

    let result = list_file_names(&root.path().join("absent"));

    assert!(matches!(result, Err(CaptureError::Storage { .. })));
}

/// WHAT: Relocation moves the file and removes the source
/// WHY: The temporary capture must not persist after relocation
#[test]
#[allow(clippy::unwrap_used)]
fn given_temp_capture_when_relocating_then_moved_not_copied() {
    // Given: A temporary capture and an empty destination
    let root = TempDir::new().unwrap();
    let source = root.path().join("capture.tmp");
    let dest = root.path().join("Pump(1).jpg");
    fs::write(&source, b"jpeg bytes").unwrap();

    // When: Relocating
    relocate(&source, &dest).unwrap();

    // Then: Data at destination, source gone
    assert!(!source.exists());
    assert_eq!(fs::read(&dest).unwrap(), b"jpeg bytes");
}

/// WHAT: Relocation never overwrites an existing file
/// WHY: Earlier captures must survive a naming race
#[test]
#[allow(clippy::unwrap_used)]
fn given_occupied_destination_when_relocating_then_destination_exists() {
    // Given: Destination already holds a capture
    let root = TempDir::new().unwrap();
    let source = root.path().join("capture.tmp");
    let dest = root.path().join("Pump(1).jpg");
    fs::write(&source, b"new").unwrap();
    fs::write(&dest, b"old").unwrap();

    // When: Relocating onto it
    let result = relocate(&source, &dest);

    // Then: Rejected, both files intact
    assert!(matches!(result, Err(CaptureError::DestinationExists { .. })));
    assert_eq!(fs::read(&dest).unwrap(), b"old");
    assert_eq!(fs::read(&source).unwrap(), b"new");
}

/// WHAT: A missing source is reported as such
/// WHY: Distinguishes a lost capture from a storage failure
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_source_when_relocating_then_source_missing() {
    // Given: No file at the source path
    let root = TempDir::new().unwrap();
    let source = root.path().join("gone.tmp");
    let dest = root.path().join("Pump(1).jpg");

    // When: Relocating
    let result = relocate(&source, &dest);

    // Then: SourceMissing, nothing created
    assert!(matches!(result, Err(CaptureError::SourceMissing { .. })));
    assert!(!dest.exists());
}

/// WHAT: Relocation into a missing directory fails without losing the source
/// WHY: The capture must remain recoverable after a failed move
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_destination_directory_when_relocating_then_source_kept() {
    // Given: Destination directory does not exist
    let root = TempDir::new().unwrap();
    let source = root.path().join("capture.tmp");
    let dest = root.path().join("absent").join("Pump(1).jpg");
    fs::write(&source, b"jpeg").unwrap();

    // When: Relocating
    let result = relocate(&source, &dest);

    // Then: Storage error, source untouched
    assert!(matches!(result, Err(CaptureError::Storage { .. })));
    assert!(source.is_file());
}

/// WHAT: A read-only directory is refused as a storage target
/// WHY: Captures would otherwise fail later, at move time
#[test]
#[cfg(unix)]
#[allow(clippy::unwrap_used)]
fn given_read_only_directory_when_ensuring_then_storage_error() {
    use std::os::unix::fs::PermissionsExt;

    // Given: An existing directory with no write bits
    let root = TempDir::new().unwrap();
    let dir = root.path().join("Site A");
    fs::create_dir(&dir).unwrap();
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

    // When: Ensuring the directory
    let result = ensure_directory(&dir);

    // Then: Storage error naming the directory
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
    assert!(matches!(
        result,
        Err(CaptureError::Storage { ref reason, ref path, .. })
            if path == &dir && reason.contains("not writable")
    ));
}

/// WHAT: A copy that fails part way leaves no file at the destination
/// WHY: A truncated file would hold the next index
#[test]
#[allow(clippy::unwrap_used)]
fn given_unreadable_source_when_copying_then_destination_removed() {
    // Given: A source that opens but cannot be read as a file
    let root = TempDir::new().unwrap();
    let source = root.path().join("not-a-file");
    fs::create_dir(&source).unwrap();
    let dest = root.path().join("Pump(1).jpg");

    // When: Copying exclusively
    let result = copy_exclusive(&source, &dest);

    // Then: Error, and the name is free again
    assert!(result.is_err());
    assert!(!dest.exists());
}
