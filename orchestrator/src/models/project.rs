//! Project data

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::OrchestratorError;
use crate::storage::layout::StorageLayout;

/// Name of the project descriptor file inside the project directory
pub const PROJECT_FILE_NAME: &str = "project.json";

/// On-disk shape of the project descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProjectFile {
    id: String,

    #[serde(default, rename = "type")]
    project_type: Option<String>,
}

/// The project being built, deployed and synced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectData {
    /// Root directory of the project
    pub project_dir: PathBuf,

    /// Application identifier used to launch the app on a device
    pub project_id: String,

    /// Project flavour, reported through telemetry
    pub project_type: String,
}

impl ProjectData {
    pub fn new(
        project_dir: impl Into<PathBuf>,
        project_id: impl Into<String>,
        project_type: impl Into<String>,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            project_id: project_id.into(),
            project_type: project_type.into(),
        }
    }

    /// Load the project descriptor from `project_dir`
    pub async fn load(project_dir: &Path) -> Result<Self, OrchestratorError> {
        let file = StorageLayout::new(project_dir).project_file();
        if !file.exists().await {
            return Err(OrchestratorError::ProjectError(format!(
                "No {} found in {}",
                PROJECT_FILE_NAME,
                project_dir.display()
            )));
        }

        let descriptor: ProjectFile = file.read_json().await?;
        if descriptor.id.trim().is_empty() {
            return Err(OrchestratorError::ProjectError(
                "Project id cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            project_id: descriptor.id,
            project_type: descriptor
                .project_type
                .unwrap_or_else(|| "default".to_string()),
        })
    }
}
