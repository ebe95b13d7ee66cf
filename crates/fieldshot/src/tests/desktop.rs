use crate::{
    desktop::{FsStoragePermission, StagedCamera, ThumbnailIndex},
    tests::support::{entry_names, write_jpeg},
};

use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};

use fieldshot_core::{
    CameraService, CaptureError, FlashMode, MediaIndex, PermissionStatus, StoragePermission,
};
use tempfile::TempDir;

#[allow(clippy::unwrap_used)]
fn set_age(path: &Path, secs_ago: u64) {
    let modified = SystemTime::now() - Duration::from_secs(secs_ago);
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
}

/// WHAT: The oldest frame in the inbox is staged first
/// WHY: Shots must be taken in the order the device produced them
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_frames_when_taking_photo_then_oldest_staged() {
    // Given: b.jpg older than a.jpg, plus files that are not frames
    let dir = TempDir::new().unwrap();
    let inbox = dir.path().join("inbox");
    let staging = dir.path().join("staging");
    fs::create_dir_all(&inbox).unwrap();
    write_jpeg(&inbox.join("a.jpg"));
    write_jpeg(&inbox.join("b.JPG"));
    fs::write(inbox.join("notes.txt"), b"x").unwrap();
    fs::write(inbox.join(".hidden.jpg"), b"x").unwrap();
    set_age(&inbox.join("a.jpg"), 10);
    set_age(&inbox.join("b.JPG"), 60);

    let mut camera = StagedCamera::new(inbox.clone(), staging.clone());
    camera.set_active(true);

    // When: Taking a photo
    let capture = camera.take_photo(FlashMode::Off).unwrap();

    // Then: b.JPG moved into staging under a fresh name
    assert_eq!(capture.path().parent(), Some(staging.as_path()));
    assert!(capture.path().is_file());
    assert_eq!(entry_names(&inbox), vec![".hidden.jpg", "a.jpg", "notes.txt"]);
    assert_eq!(entry_names(&staging).len(), 1);
}

/// WHAT: An inactive camera refuses to shoot
/// WHY: Frames are only consumed during a capture session
#[test]
#[allow(clippy::unwrap_used)]
fn given_inactive_camera_when_taking_photo_then_camera_error() {
    let dir = TempDir::new().unwrap();
    write_jpeg(&dir.path().join("a.jpg"));
    let mut camera = StagedCamera::new(dir.path().to_path_buf(), dir.path().join("staging"));

    let result = camera.take_photo(FlashMode::On);

    assert!(matches!(result, Err(CaptureError::Camera { .. })));
    assert!(dir.path().join("a.jpg").is_file());
}

/// WHAT: An empty inbox is a camera error
/// WHY: The shutter cannot produce a photo from nothing
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_inbox_when_taking_photo_then_camera_error() {
    let dir = TempDir::new().unwrap();
    let mut camera = StagedCamera::new(dir.path().to_path_buf(), dir.path().join("staging"));
    camera.set_active(true);

    let err = camera.take_photo(FlashMode::Off).unwrap_err();

    assert!(err.user_message().contains("no frame waiting"));
}

/// WHAT: Camera permission follows inbox availability
/// WHY: No inbox means no device to read from
#[test]
#[allow(clippy::unwrap_used)]
fn given_inbox_presence_when_requesting_permission_then_status_matches() {
    let dir = TempDir::new().unwrap();
    let inbox = dir.path().join("inbox");
    let mut camera = StagedCamera::new(inbox.clone(), dir.path().join("staging"));

    assert_eq!(camera.request_permission(), PermissionStatus::Denied);

    fs::create_dir_all(&inbox).unwrap();
    assert_eq!(camera.request_permission(), PermissionStatus::Granted);
}

/// WHAT: Storage is granted for a root that does not exist yet
/// WHY: The root is created on the first capture
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_root_under_writable_dir_when_requesting_then_granted() {
    let dir = TempDir::new().unwrap();
    let mut permission = FsStoragePermission::new(dir.path().join("Pictures").join("Jobs"));

    assert_eq!(permission.request(), PermissionStatus::Granted);
}

/// WHAT: Storage is denied when the root is a regular file
/// WHY: Nothing can be created beneath a file
#[test]
#[allow(clippy::unwrap_used)]
fn given_file_at_root_when_requesting_then_denied() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Pictures");
    fs::write(&root, b"x").unwrap();
    let mut permission = FsStoragePermission::new(root);

    assert_eq!(permission.request(), PermissionStatus::Denied);
}

/// WHAT: Registering a capture writes a bounded PNG thumbnail
/// WHY: Viewers pick up new photos from the thumbnail directory
#[test]
#[allow(clippy::unwrap_used)]
fn given_jpeg_capture_when_registering_then_thumbnail_written() {
    // Given: A saved capture
    let dir = TempDir::new().unwrap();
    let capture = dir.path().join("Pump(1).jpg");
    write_jpeg(&capture);
    let mut index = ThumbnailIndex::new(8);

    // When: Registering
    index.register(&capture).unwrap();

    // Then: Thumbnail at the expected path, within bounds
    let thumb = ThumbnailIndex::thumbnail_path(&capture).unwrap();
    assert_eq!(thumb, dir.path().join(".thumbnails").join("Pump(1).jpg.png"));
    let image = image::open(&thumb).unwrap();
    assert!(image.width() <= 8 && image.height() <= 8);
}

/// WHAT: A capture that is not an image fails with a storage error
/// WHY: The caller logs it and keeps the photo
#[test]
#[allow(clippy::unwrap_used)]
fn given_garbage_capture_when_registering_then_storage_error() {
    let dir = TempDir::new().unwrap();
    let capture = dir.path().join("Pump(1).jpg");
    fs::write(&capture, b"definitely not a jpeg").unwrap();
    let mut index = ThumbnailIndex::new(8);

    let result = index.register(&capture);

    assert!(matches!(result, Err(CaptureError::Storage { .. })));
    assert!(capture.is_file());
}
