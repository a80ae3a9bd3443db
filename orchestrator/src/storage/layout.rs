//! Project file layout

use std::path::PathBuf;

use crate::filesys::file::File;
use crate::models::project::PROJECT_FILE_NAME;

/// Default name of the settings file
pub const SETTINGS_FILE_NAME: &str = "devsync.json";

/// Files devsync reads from a project directory
#[derive(Debug, Clone)]
pub struct StorageLayout {
    /// Project root
    pub base_dir: PathBuf,
}

impl StorageLayout {
    /// Create a new storage layout
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the settings file path
    pub fn settings_file(&self) -> File {
        File::new(self.base_dir.join(SETTINGS_FILE_NAME))
    }

    /// Get the project descriptor path
    pub fn project_file(&self) -> File {
        File::new(self.base_dir.join(PROJECT_FILE_NAME))
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
