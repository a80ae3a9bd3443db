//! Settings file management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app::options::CommandOptions;
use crate::errors::OrchestratorError;
use crate::filesys::file::File;
use crate::logs::LogLevel;
use crate::models::device::{Device, Platform};
use crate::services::command::CommandTemplate;

/// devsync settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit JSON logs
    #[serde(default)]
    pub json_logs: bool,

    /// Directory for the log file; no file logging when absent
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Platforms used when none is requested
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,

    /// Devices to operate on
    #[serde(default)]
    pub devices: Vec<Device>,

    /// Default command options
    #[serde(default)]
    pub options: CommandOptions,

    /// Shell commands backing the build, deploy and sync services
    #[serde(default)]
    pub commands: CommandSettings,
}

fn default_platforms() -> Vec<Platform> {
    vec![Platform::Ios, Platform::Android]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            json_logs: false,
            log_dir: None,
            platforms: default_platforms(),
            devices: Vec::new(),
            options: CommandOptions::default(),
            commands: CommandSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file does not exist
    pub async fn load(file: &File) -> Result<Self, OrchestratorError> {
        if !file.exists().await {
            return Ok(Self::default());
        }

        file.read_json::<Settings>().await.map_err(|e| {
            OrchestratorError::ConfigError(format!(
                "Invalid settings file {}: {}",
                file.path().display(),
                e
            ))
        })
    }
}

/// Command templates. Placeholders are written as `{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSettings {
    /// Build a platform: `{platform}`, `{configuration}`, `{for_device}`,
    /// `{device}`, `{clean}`, `{project_dir}`
    #[serde(default)]
    pub build: CommandTemplate,

    /// Build output directory, relative to the project directory
    #[serde(default = "default_output_dir")]
    pub output_dir: CommandTemplate,

    /// Deploy a platform: `{platform}`, `{configuration}`, `{device}`,
    /// `{clean}`, `{bundle}`, `{project_id}`, `{project_dir}`
    #[serde(default)]
    pub deploy: CommandTemplate,

    /// Launch the application: `{platform}`, `{device}`, `{emulator}`,
    /// `{justlaunch}`, `{project_id}`
    #[serde(default)]
    pub launch: CommandTemplate,

    /// Push a build to a device: `{device}`, `{platform}`, `{artifact}`,
    /// `{watch}`, `{debug}`, `{project_dir}`
    #[serde(default)]
    pub sync: CommandTemplate,
}

fn default_output_dir() -> CommandTemplate {
    CommandTemplate::new("platforms/{platform}/build/{configuration}")
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            build: CommandTemplate::default(),
            output_dir: default_output_dir(),
            deploy: CommandTemplate::default(),
            launch: CommandTemplate::default(),
            sync: CommandTemplate::default(),
        }
    }
}
