//! Command line arguments

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;

use crate::app::options::CommandOptions;
use crate::errors::OrchestratorError;
use crate::models::device::Platform;

/// Parsed `--key=value` and `--flag` arguments
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    values: HashMap<String, String>,
}

impl CliArgs {
    /// Parse arguments, skipping the program name
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = HashMap::new();

        for arg in args.into_iter().skip(1) {
            let arg = arg.as_ref();
            if let Some((key, value)) = arg.split_once('=') {
                let clean_key = key.trim_start_matches('-');
                values.insert(clean_key.to_string(), value.to_string());
            } else if arg.starts_with("--") {
                let clean_key = arg.trim_start_matches('-');
                values.insert(clean_key.to_string(), "true".to_string());
            }
        }

        Self { values }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn flag(&self, key: &str) -> Result<Option<bool>, OrchestratorError> {
        match self.get(key) {
            None => Ok(None),
            Some("true") | Some("1") | Some("yes") => Ok(Some(true)),
            Some("false") | Some("0") | Some("no") => Ok(Some(false)),
            Some(other) => Err(OrchestratorError::ConfigError(format!(
                "Invalid value for --{}: {}",
                key, other
            ))),
        }
    }

    /// Settings file override
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.get("settings").map(PathBuf::from)
    }

    /// Requested platform
    pub fn platform(&self) -> Result<Option<Platform>, OrchestratorError> {
        self.get("platform")
            .map(|p| p.parse().map_err(OrchestratorError::ConfigError))
            .transpose()
    }

    /// `--debug=<id>[,<id>...]` as a device debug map
    pub fn debug_map(&self) -> Option<HashMap<String, bool>> {
        self.get("debug").map(|ids| {
            ids.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| (id.to_string(), true))
                .collect()
        })
    }

    /// Apply command line overrides to the configured options.
    ///
    /// Flags that also exist as deploy options are recorded as deploy
    /// overrides, so they win over the release deploy defaults.
    pub fn apply(&self, options: &mut CommandOptions) -> Result<(), OrchestratorError> {
        if let Some(path) = self.get("path") {
            options.path = PathBuf::from(path);
        }
        if let Some(device) = self.get("device") {
            options.device = Some(device.to_string());
            options.deploy_overrides.device = Some(device.to_string());
        }
        if let Some(watch) = self.flag("watch")? {
            options.watch = watch;
        }
        if self.flag("no-watch")?.unwrap_or(false) {
            options.watch = false;
        }
        if let Some(justlaunch) = self.flag("justlaunch")? {
            options.justlaunch = justlaunch;
        }
        if let Some(release) = self.flag("release")? {
            options.release = release;
            options.deploy_overrides.release = Some(release);
        }
        if let Some(clean) = self.flag("clean")? {
            options.clean = clean;
            options.deploy_overrides.clean = Some(clean);
        }
        if let Some(bundle) = self.flag("bundle")? {
            options.bundle = bundle;
        }
        if let Some(emulator) = self.flag("emulator")? {
            options.emulator = emulator;
            options.deploy_overrides.emulator = Some(emulator);
        }
        if let Some(sync_all_files) = self.flag("sync-all-files")? {
            options.sync_all_files = sync_all_files;
        }
        self.apply_signing(options);
        if let Some(template) = self.get("platform-template") {
            options.deploy_overrides.platform_template = Some(template.to_string());
        }
        Ok(())
    }

    fn apply_signing(&self, options: &mut CommandOptions) {
        let overrides = &mut options.deploy_overrides;
        if let Some(team_id) = self.get("team-id") {
            options.team_id = Some(team_id.to_string());
            overrides.team_id = Some(team_id.to_string());
        }
        if let Some(provision) = self.get("provision") {
            options.provision = Some(provision.to_string());
            overrides.provision = Some(provision.to_string());
        }
        if let Some(alias) = self.get("key-store-alias") {
            options.key_store_alias = Some(alias.to_string());
            overrides.key_store_alias = Some(alias.to_string());
        }
        if let Some(path) = self.get("key-store-path") {
            options.key_store_path = Some(path.to_string());
            overrides.key_store_path = Some(path.to_string());
        }
        if let Some(password) = self.secret("key-store-alias-password") {
            options.key_store_alias_password = Some(password.clone());
            overrides.key_store_alias_password = Some(password);
        }
        if let Some(password) = self.secret("key-store-password") {
            options.key_store_password = Some(password.clone());
            overrides.key_store_password = Some(password);
        }
    }

    fn secret(&self, key: &str) -> Option<SecretString> {
        self.get(key).map(|value| SecretString::from(value.to_string()))
    }
}
