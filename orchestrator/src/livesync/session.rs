//! Live-sync session configuration

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::app::options::CommandOptions;
use crate::models::project::ProjectData;

/// Session-wide settings for one live-sync request. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSessionConfig {
    project_dir: PathBuf,
    skip_watcher: bool,
    watch_all_files: bool,
    clean: bool,
    bundle: bool,
    release: bool,
    env: BTreeMap<String, Value>,
}

impl SyncSessionConfig {
    pub fn new(project: &ProjectData, options: &CommandOptions) -> Self {
        Self {
            project_dir: project.project_dir.clone(),
            skip_watcher: !options.watch,
            watch_all_files: options.sync_all_files,
            clean: options.clean,
            bundle: options.bundle,
            release: options.release,
            env: options.env.clone(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Continuous watching is disabled
    pub fn skip_watcher(&self) -> bool {
        self.skip_watcher
    }

    pub fn watch_all_files(&self) -> bool {
        self.watch_all_files
    }

    pub fn clean(&self) -> bool {
        self.clean
    }

    pub fn bundle(&self) -> bool {
        self.bundle
    }

    pub fn release(&self) -> bool {
        self.release
    }

    pub fn env(&self) -> &BTreeMap<String, Value> {
        &self.env
    }
}
