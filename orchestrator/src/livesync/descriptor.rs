//! Per-device work descriptors

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::app::options::CommandOptions;
use crate::errors::OrchestratorError;
use crate::models::build::BuildConfig;
use crate::models::device::{Device, Platform};
use crate::models::project::ProjectData;
use crate::services::build::BuildService;

/// Deferred build of one device's artifact.
///
/// Holds everything it needs by value or behind `Arc`, so clones can run
/// concurrently with the actions of other devices.
#[derive(Clone)]
pub struct BuildAction {
    platform: Platform,
    config: BuildConfig,
    project: Arc<ProjectData>,
    build_service: Arc<dyn BuildService>,
}

impl BuildAction {
    /// Platform this action builds for
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Build configuration this action uses
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the platform, then return the path of the freshest output.
    ///
    /// Build service errors are returned unchanged.
    pub async fn run(&self) -> Result<PathBuf, OrchestratorError> {
        self.build_service
            .build_platform(&self.platform, &self.config, &self.project)
            .await?;
        self.build_service
            .last_output_path(&self.platform, &self.config, &self.project)
            .await
    }
}

impl fmt::Debug for BuildAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildAction")
            .field("platform", &self.platform)
            .field("config", &self.config)
            .field("project", &self.project.project_id)
            .finish_non_exhaustive()
    }
}

/// Work handed to the live-sync engine for one device
#[derive(Debug, Clone)]
pub struct DeviceWorkDescriptor {
    pub identifier: String,
    pub platform_specific_options: Arc<CommandOptions>,
    pub build_action: BuildAction,
    pub debugging_enabled: bool,
    pub debug_options: Arc<CommandOptions>,
}

/// Builds descriptors from the request-wide configuration
#[derive(Clone)]
pub struct DescriptorBuilder {
    options: Arc<CommandOptions>,
    project: Arc<ProjectData>,
    build_service: Arc<dyn BuildService>,
}

impl DescriptorBuilder {
    pub fn new(
        options: Arc<CommandOptions>,
        project: Arc<ProjectData>,
        build_service: Arc<dyn BuildService>,
    ) -> Self {
        Self {
            options,
            project,
            build_service,
        }
    }

    /// Descriptor for `device`. Nothing is built until the action runs.
    pub fn build(
        &self,
        device: &Device,
        debug_map: Option<&HashMap<String, bool>>,
    ) -> DeviceWorkDescriptor {
        let debugging_enabled = debug_map
            .and_then(|map| map.get(&device.identifier))
            .copied()
            .unwrap_or(false);

        debug!(
            "Descriptor for {} ({}, emulator: {}, debug: {})",
            device.identifier, device.platform, device.is_emulator, debugging_enabled
        );

        DeviceWorkDescriptor {
            identifier: device.identifier.clone(),
            platform_specific_options: self.options.clone(),
            build_action: BuildAction {
                platform: device.platform.clone(),
                config: BuildConfig::for_device(device, &self.options),
                project: self.project.clone(),
                build_service: self.build_service.clone(),
            },
            debugging_enabled,
            debug_options: self.options.clone(),
        }
    }
}
