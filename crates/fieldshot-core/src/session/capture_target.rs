use std::path::{Path, PathBuf};

use crate::naming;

/// Trimmed project/equipment pair a capture is filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
    project: String,
    equipment: String,
}

impl CaptureTarget {
    pub(crate) fn new(project: impl Into<String>, equipment: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            equipment: equipment.into(),
        }
    }

    /// Project name; the directory photos are stored in.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Equipment name; the file name prefix.
    pub fn equipment(&self) -> &str {
        &self.equipment
    }

    /// Directory for this project under `pictures_root`.
    pub fn project_dir(&self, pictures_root: &Path) -> PathBuf {
        pictures_root.join(&self.project)
    }

    /// Next free file name for this equipment among `existing` names.
    pub fn next_file_name<I, S>(&self, existing: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        naming::next_file_name(existing, &self.equipment)
    }
}
