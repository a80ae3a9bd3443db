//! Caller configuration for an orchestration request

use std::collections::BTreeMap;
use std::path::PathBuf;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Read an optional password. Passwords are never written back out.
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

/// Caller-supplied deploy option overrides.
///
/// Every `Some` field replaces the corresponding default when the deploy
/// options of a release run are assembled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployOptionsOverrides {
    pub project_dir: Option<PathBuf>,
    pub clean: Option<bool>,
    pub device: Option<String>,
    pub emulator: Option<bool>,
    pub release: Option<bool>,
    pub provision: Option<String>,
    pub team_id: Option<String>,
    pub platform_template: Option<String>,
    pub key_store_alias: Option<String>,
    pub key_store_path: Option<String>,
    #[serde(skip_serializing, deserialize_with = "deserialize_secret")]
    pub key_store_alias_password: Option<SecretString>,
    #[serde(skip_serializing, deserialize_with = "deserialize_secret")]
    pub key_store_password: Option<SecretString>,
}

/// Options of a single orchestration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandOptions {
    /// Project directory
    pub path: PathBuf,

    /// Keep watching the project for changes after the first sync
    pub watch: bool,

    /// Launch the application and detach
    pub justlaunch: bool,

    /// Build in release configuration and run the one-shot release flow
    pub release: bool,

    /// Rebuild from scratch
    pub clean: bool,

    /// Bundle the application code before syncing
    pub bundle: bool,

    /// Watch every project file, not only the application sources
    pub sync_all_files: bool,

    /// Target a specific device identifier
    pub device: Option<String>,

    /// Prefer an emulator
    pub emulator: bool,

    /// iOS signing team
    pub team_id: Option<String>,

    /// iOS provisioning profile
    pub provision: Option<String>,

    /// Android signing
    pub key_store_alias: Option<String>,
    pub key_store_path: Option<String>,
    #[serde(skip_serializing, deserialize_with = "deserialize_secret")]
    pub key_store_alias_password: Option<SecretString>,
    #[serde(skip_serializing, deserialize_with = "deserialize_secret")]
    pub key_store_password: Option<SecretString>,

    /// Environment passed to the build tooling
    pub env: BTreeMap<String, Value>,

    /// Overrides applied on top of the release deploy defaults
    #[serde(rename = "deploy_options")]
    pub deploy_overrides: DeployOptionsOverrides,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            watch: true,
            justlaunch: false,
            release: false,
            clean: false,
            bundle: false,
            sync_all_files: false,
            device: None,
            emulator: false,
            team_id: None,
            provision: None,
            key_store_alias: None,
            key_store_path: None,
            key_store_alias_password: None,
            key_store_password: None,
            env: BTreeMap::new(),
            deploy_overrides: DeployOptionsOverrides::default(),
        }
    }
}

impl CommandOptions {
    /// The process should stay attached after launch
    pub fn should_keep_process_alive(&self) -> bool {
        self.watch || !self.justlaunch
    }

    /// Analytics resources are released as soon as the command completes
    pub fn analytics_should_dispose(&self) -> bool {
        self.justlaunch || !self.watch
    }
}
