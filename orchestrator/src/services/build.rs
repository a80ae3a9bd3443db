//! Platform build service

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::OrchestratorError;
use crate::filesys::dir::Dir;
use crate::models::build::BuildConfig;
use crate::models::device::Platform;
use crate::models::project::ProjectData;
use crate::services::command::{
    CommandTemplate, ShellCommand, KEY_STORE_ALIAS_PASSWORD_VAR, KEY_STORE_ALIAS_VAR,
    KEY_STORE_PASSWORD_VAR, KEY_STORE_PATH_VAR,
};

/// Builds platform artifacts
#[async_trait]
pub trait BuildService: Send + Sync {
    /// Build `platform` with the given configuration
    async fn build_platform(
        &self,
        platform: &Platform,
        config: &BuildConfig,
        project: &ProjectData,
    ) -> Result<(), OrchestratorError>;

    /// Path of the most recent build output for `platform` and `config`
    async fn last_output_path(
        &self,
        platform: &Platform,
        config: &BuildConfig,
        project: &ProjectData,
    ) -> Result<PathBuf, OrchestratorError>;
}

/// Build service running a configured shell command
pub struct CommandBuildService {
    build: CommandTemplate,
    output_dir: CommandTemplate,
}

impl CommandBuildService {
    pub fn new(build: CommandTemplate, output_dir: CommandTemplate) -> Self {
        Self { build, output_dir }
    }

    fn render(
        template: &CommandTemplate,
        platform: &Platform,
        config: &BuildConfig,
        project: &ProjectData,
    ) -> String {
        let project_dir = project.project_dir.display().to_string();
        let target = if config.build_for_device { "device" } else { "emulator" };
        template.render(&[
            ("platform", platform.as_str()),
            ("project_dir", project_dir.as_str()),
            ("configuration", config.configuration()),
            ("for_device", target),
            ("device", config.device.as_deref().unwrap_or("")),
            ("clean", if config.clean { "--clean" } else { "" }),
        ])
    }
}

#[async_trait]
impl BuildService for CommandBuildService {
    async fn build_platform(
        &self,
        platform: &Platform,
        config: &BuildConfig,
        project: &ProjectData,
    ) -> Result<(), OrchestratorError> {
        if self.build.is_empty() {
            return Err(OrchestratorError::ConfigError(
                "No build command configured".to_string(),
            ));
        }

        let command = Self::render(&self.build, platform, config, project);
        info!("Building {} ({})", platform, config.configuration());

        let outcome = ShellCommand::new(command, &project.project_dir)
            .var(KEY_STORE_ALIAS_VAR, config.key_store_alias.as_deref())
            .var(KEY_STORE_PATH_VAR, config.key_store_path.as_deref())
            .secret(KEY_STORE_ALIAS_PASSWORD_VAR, config.key_store_alias_password.as_ref())
            .secret(KEY_STORE_PASSWORD_VAR, config.key_store_password.as_ref())
            .run()
            .await
            .map_err(|e| OrchestratorError::BuildError(format!("Failed to run build: {}", e)))?;

        if !outcome.success {
            return Err(OrchestratorError::BuildError(format!(
                "Build for {} failed with {}",
                platform,
                outcome.describe()
            )));
        }

        Ok(())
    }

    async fn last_output_path(
        &self,
        platform: &Platform,
        config: &BuildConfig,
        project: &ProjectData,
    ) -> Result<PathBuf, OrchestratorError> {
        let relative = Self::render(&self.output_dir, platform, config, project);
        let dir = Dir::new(project.project_dir.join(relative));
        debug!("Resolving build output in {}", dir.path().display());

        if !dir.exists().await {
            return Err(OrchestratorError::BuildError(format!(
                "Build output directory {} does not exist",
                dir.path().display()
            )));
        }

        dir.latest_entry().await?.ok_or_else(|| {
            OrchestratorError::BuildError(format!(
                "No build output found for {} in {}",
                platform,
                dir.path().display()
            ))
        })
    }
}
