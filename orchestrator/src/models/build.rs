//! Build configuration

use std::path::PathBuf;

use secrecy::SecretString;

use crate::app::options::CommandOptions;
use crate::models::device::Device;

/// Configuration handed to the build service for one device
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Build for physical hardware rather than an emulator
    pub build_for_device: bool,
    pub project_dir: PathBuf,
    pub clean: bool,
    pub release: bool,
    pub device: Option<String>,
    pub team_id: Option<String>,
    pub provision: Option<String>,
    pub key_store_alias: Option<String>,
    pub key_store_path: Option<String>,
    pub key_store_alias_password: Option<SecretString>,
    pub key_store_password: Option<SecretString>,
}

impl BuildConfig {
    /// Build configuration for `device`, taken from the caller options
    pub fn for_device(device: &Device, options: &CommandOptions) -> Self {
        Self {
            build_for_device: !device.is_emulator,
            project_dir: options.path.clone(),
            clean: options.clean,
            release: options.release,
            device: options.device.clone(),
            team_id: options.team_id.clone(),
            provision: options.provision.clone(),
            key_store_alias: options.key_store_alias.clone(),
            key_store_path: options.key_store_path.clone(),
            key_store_alias_password: options.key_store_alias_password.clone(),
            key_store_password: options.key_store_password.clone(),
        }
    }

    /// Build configuration name
    pub fn configuration(&self) -> &'static str {
        if self.release {
            "release"
        } else {
            "debug"
        }
    }
}
