//! Desktop stand-ins for the device collaborators.

mod fs_storage_permission;
mod staged_camera;
mod thumbnail_index;

pub(crate) use {
    fs_storage_permission::FsStoragePermission, staged_camera::StagedCamera,
    thumbnail_index::ThumbnailIndex,
};
