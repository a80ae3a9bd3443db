//! Release deployment requests

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use serde_json::Value;

use crate::app::options::{CommandOptions, DeployOptionsOverrides};
use crate::models::device::Platform;
use crate::models::project::ProjectData;

/// Options controlling how application files are prepared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppFilesUpdaterOptions {
    pub bundle: bool,
    pub release: bool,
}

/// Options for deploying a platform build
#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub project_dir: PathBuf,
    pub clean: bool,
    pub device: Option<String>,
    pub emulator: bool,
    pub release: bool,
    pub provision: Option<String>,
    pub team_id: Option<String>,
    pub platform_template: Option<String>,
    pub key_store_alias: Option<String>,
    pub key_store_path: Option<String>,
    pub key_store_alias_password: Option<SecretString>,
    pub key_store_password: Option<SecretString>,
}

impl DeployOptions {
    /// Release deploy defaults: `{ project_dir, clean: true }`
    pub fn defaults(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            clean: true,
            device: None,
            emulator: false,
            release: false,
            provision: None,
            team_id: None,
            platform_template: None,
            key_store_alias: None,
            key_store_path: None,
            key_store_alias_password: None,
            key_store_password: None,
        }
    }

    /// Apply caller overrides on top of `self`. Overrides win on collision.
    pub fn merge(self, overrides: &DeployOptionsOverrides) -> Self {
        Self {
            project_dir: overrides.project_dir.clone().unwrap_or(self.project_dir),
            clean: overrides.clean.unwrap_or(self.clean),
            device: overrides.device.clone().or(self.device),
            emulator: overrides.emulator.unwrap_or(self.emulator),
            release: overrides.release.unwrap_or(self.release),
            provision: overrides.provision.clone().or(self.provision),
            team_id: overrides.team_id.clone().or(self.team_id),
            platform_template: overrides.platform_template.clone().or(self.platform_template),
            key_store_alias: overrides.key_store_alias.clone().or(self.key_store_alias),
            key_store_path: overrides.key_store_path.clone().or(self.key_store_path),
            key_store_alias_password: overrides
                .key_store_alias_password
                .clone()
                .or(self.key_store_alias_password),
            key_store_password: overrides
                .key_store_password
                .clone()
                .or(self.key_store_password),
        }
    }
}

/// Options for launching the application after deployment
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlatformOptions {
    pub device: Option<String>,
    pub emulator: bool,
    pub justlaunch: bool,
    /// Working directory of the launch
    pub project_dir: PathBuf,
    pub env: BTreeMap<String, Value>,
}

impl From<&CommandOptions> for RunPlatformOptions {
    fn from(options: &CommandOptions) -> Self {
        Self {
            device: options.device.clone(),
            emulator: options.emulator,
            justlaunch: options.justlaunch,
            project_dir: options.path.clone(),
            env: options.env.clone(),
        }
    }
}

/// Everything the platform service needs to deploy one platform
#[derive(Debug, Clone)]
pub struct ReleaseDeploymentRequest {
    pub platform: Platform,
    pub app_files_updater_options: AppFilesUpdaterOptions,
    pub deploy_options: DeployOptions,
    pub project: Arc<ProjectData>,
    pub config: Arc<CommandOptions>,
    pub env: BTreeMap<String, Value>,
}

impl ReleaseDeploymentRequest {
    pub fn new(
        platform: Platform,
        deploy_options: DeployOptions,
        project: Arc<ProjectData>,
        config: Arc<CommandOptions>,
    ) -> Self {
        Self {
            platform,
            app_files_updater_options: AppFilesUpdaterOptions {
                bundle: config.bundle,
                release: config.release,
            },
            deploy_options,
            project,
            env: config.env.clone(),
            config,
        }
    }
}
