//! Directory provisioning, listing and no-overwrite relocation.

mod provisioner;
mod relocator;

pub use {
    provisioner::{ensure_directory, list_file_names},
    relocator::relocate,
};

#[cfg(test)]
pub(crate) use relocator::copy_exclusive;
