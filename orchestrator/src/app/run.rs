//! Wires the process-backed collaborators and runs one request

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::options::CommandOptions;
use crate::errors::OrchestratorError;
use crate::livesync::orchestrator::{Collaborators, Orchestrator};
use crate::models::device::{Device, Platform};
use crate::models::project::ProjectData;
use crate::services::analytics::TracingAnalytics;
use crate::services::build::CommandBuildService;
use crate::services::device_ops::ProcessDisposeFlag;
use crate::services::livesync::CommandLiveSync;
use crate::services::platform::CommandPlatformService;
use crate::services::registry::PlatformsData;
use crate::storage::settings::Settings;

/// A single orchestration request
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub options: CommandOptions,
    pub platform: Option<Platform>,
    pub debug_map: Option<HashMap<String, bool>>,
}

/// Default collaborators, driven by the configured shell commands
pub fn collaborators(settings: &Settings) -> Collaborators {
    let commands = &settings.commands;
    Collaborators {
        build: Arc::new(CommandBuildService::new(
            commands.build.clone(),
            commands.output_dir.clone(),
        )),
        platform: Arc::new(CommandPlatformService::new(
            commands.deploy.clone(),
            commands.launch.clone(),
        )),
        device_operations: Arc::new(ProcessDisposeFlag::new()),
        live_sync: Arc::new(CommandLiveSync::new(commands.sync.clone())),
        analytics: Arc::new(TracingAnalytics::new()),
        registry: Arc::new(PlatformsData::new(settings.platforms.clone())),
    }
}

/// Devices matching the requested platform and device identifier
pub fn applicable_devices(
    devices: &[Device],
    platform: Option<&Platform>,
    device_id: Option<&str>,
) -> Vec<Device> {
    devices
        .iter()
        .filter(|d| platform.map_or(true, |p| d.platform == *p))
        .filter(|d| device_id.map_or(true, |id| d.identifier == id))
        .cloned()
        .collect()
}

/// Run one request with the process-backed collaborators
pub async fn run(settings: &Settings, request: RunRequest) -> Result<(), OrchestratorError> {
    let project = ProjectData::load(&request.options.path).await?;
    info!(
        "Project {} ({}) at {}",
        project.project_id,
        project.project_type,
        project.project_dir.display()
    );

    let devices = applicable_devices(
        &settings.devices,
        request.platform.as_ref(),
        request.options.device.as_deref(),
    );
    if devices.len() < settings.devices.len() {
        warn!(
            "{} configured device(s) do not match the request",
            settings.devices.len() - devices.len()
        );
    }

    let orchestrator = Orchestrator::new(request.options, project, collaborators(settings));
    orchestrator
        .execute(&devices, request.platform.as_ref(), request.debug_map.as_ref())
        .await
}
