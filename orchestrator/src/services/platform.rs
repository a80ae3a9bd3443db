//! Platform deploy and launch service

use async_trait::async_trait;
use tracing::info;

use crate::errors::OrchestratorError;
use crate::models::deploy::{ReleaseDeploymentRequest, RunPlatformOptions};
use crate::models::device::Platform;
use crate::models::project::ProjectData;
use crate::services::command::{
    CommandTemplate, ShellCommand, KEY_STORE_ALIAS_PASSWORD_VAR, KEY_STORE_ALIAS_VAR,
    KEY_STORE_PASSWORD_VAR, KEY_STORE_PATH_VAR,
};

/// Deploys and starts applications on a platform
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Build and install the application for a platform
    async fn deploy_platform(&self, request: &ReleaseDeploymentRequest) -> Result<(), OrchestratorError>;

    /// Launch the deployed application
    async fn start_application(
        &self,
        platform: &Platform,
        options: &RunPlatformOptions,
        project_id: &str,
    ) -> Result<(), OrchestratorError>;

    /// Report the project type. Fire-and-forget.
    fn track_project_type(&self, project: &ProjectData);
}

/// Platform service running configured shell commands
pub struct CommandPlatformService {
    deploy: CommandTemplate,
    launch: CommandTemplate,
}

impl CommandPlatformService {
    pub fn new(deploy: CommandTemplate, launch: CommandTemplate) -> Self {
        Self { deploy, launch }
    }
}

#[async_trait]
impl PlatformService for CommandPlatformService {
    async fn deploy_platform(&self, request: &ReleaseDeploymentRequest) -> Result<(), OrchestratorError> {
        if self.deploy.is_empty() {
            return Err(OrchestratorError::ConfigError(
                "No deploy command configured".to_string(),
            ));
        }

        let options = &request.deploy_options;
        let project_dir = options.project_dir.display().to_string();
        let command = self.deploy.render(&[
            ("platform", request.platform.as_str()),
            ("project_dir", project_dir.as_str()),
            ("configuration", if options.release { "release" } else { "debug" }),
            ("device", options.device.as_deref().unwrap_or("")),
            ("clean", if options.clean { "--clean" } else { "" }),
            ("bundle", if request.app_files_updater_options.bundle { "--bundle" } else { "" }),
            ("project_id", request.project.project_id.as_str()),
        ]);

        info!("Deploying {} from {}", request.platform, project_dir);
        let outcome = ShellCommand::new(command, &options.project_dir)
            .caller_env(&request.env)
            .var(KEY_STORE_ALIAS_VAR, options.key_store_alias.as_deref())
            .var(KEY_STORE_PATH_VAR, options.key_store_path.as_deref())
            .secret(KEY_STORE_ALIAS_PASSWORD_VAR, options.key_store_alias_password.as_ref())
            .secret(KEY_STORE_PASSWORD_VAR, options.key_store_password.as_ref())
            .run()
            .await
            .map_err(|e| OrchestratorError::DeployError(format!("Failed to run deploy: {}", e)))?;

        if !outcome.success {
            return Err(OrchestratorError::DeployError(format!(
                "Deploy for {} failed with {}",
                request.platform,
                outcome.describe()
            )));
        }

        Ok(())
    }

    async fn start_application(
        &self,
        platform: &Platform,
        options: &RunPlatformOptions,
        project_id: &str,
    ) -> Result<(), OrchestratorError> {
        if self.launch.is_empty() {
            return Err(OrchestratorError::ConfigError(
                "No launch command configured".to_string(),
            ));
        }

        let command = self.launch.render(&[
            ("platform", platform.as_str()),
            ("device", options.device.as_deref().unwrap_or("")),
            ("emulator", if options.emulator { "--emulator" } else { "" }),
            ("justlaunch", if options.justlaunch { "--justlaunch" } else { "" }),
            ("project_id", project_id),
        ]);

        info!("Starting {} on {}", project_id, platform);
        let outcome = ShellCommand::new(command, &options.project_dir)
            .caller_env(&options.env)
            .run()
            .await
            .map_err(|e| OrchestratorError::LaunchError(format!("Failed to run launch: {}", e)))?;

        if !outcome.success {
            return Err(OrchestratorError::LaunchError(format!(
                "Launching {} on {} failed with {}",
                project_id,
                platform,
                outcome.describe()
            )));
        }

        Ok(())
    }

    fn track_project_type(&self, project: &ProjectData) {
        info!(
            target: "devsync::telemetry",
            project_type = %project.project_type,
            "Project type tracked"
        );
    }
}
