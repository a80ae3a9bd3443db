//! Entry point for build, deploy and live-sync requests

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::app::options::CommandOptions;
use crate::errors::OrchestratorError;
use crate::livesync::descriptor::{DescriptorBuilder, DeviceWorkDescriptor};
use crate::livesync::release::{ReleaseFailure, ReleaseReport, ReleaseRunner};
use crate::livesync::session::SyncSessionConfig;
use crate::livesync::targets::select_platforms;
use crate::models::device::{Device, Platform};
use crate::models::project::ProjectData;
use crate::services::analytics::AnalyticsService;
use crate::services::build::BuildService;
use crate::services::device_ops::DeviceOperations;
use crate::services::livesync::LiveSyncService;
use crate::services::platform::PlatformService;
use crate::services::registry::PlatformRegistry;

/// Services the orchestrator delegates to
#[derive(Clone)]
pub struct Collaborators {
    pub build: Arc<dyn BuildService>,
    pub platform: Arc<dyn PlatformService>,
    pub device_operations: Arc<dyn DeviceOperations>,
    pub live_sync: Arc<dyn LiveSyncService>,
    pub analytics: Arc<dyn AnalyticsService>,
    pub registry: Arc<dyn PlatformRegistry>,
}

/// Routes a request to the release flow or to live sync
pub struct Orchestrator {
    options: Arc<CommandOptions>,
    project: Arc<ProjectData>,
    services: Collaborators,
}

impl Orchestrator {
    /// Create an orchestrator. Configures the analytics dispose policy.
    pub fn new(options: CommandOptions, project: ProjectData, services: Collaborators) -> Self {
        services
            .analytics
            .set_should_dispose(options.analytics_should_dispose());

        Self {
            options: Arc::new(options),
            project: Arc::new(project),
            services,
        }
    }

    pub fn options(&self) -> &CommandOptions {
        &self.options
    }

    pub fn project(&self) -> &ProjectData {
        &self.project
    }

    /// Platforms an operation applies to
    pub fn get_platforms_for_operation(&self, platform: Option<&Platform>) -> Vec<Platform> {
        select_platforms(self.services.registry.as_ref(), platform)
    }

    /// Run a request against `devices`.
    ///
    /// Fails before doing any work when `devices` is empty. Collaborator
    /// errors are returned unchanged.
    pub async fn execute(
        &self,
        devices: &[Device],
        platform: Option<&Platform>,
        debug_map: Option<&HashMap<String, bool>>,
    ) -> Result<(), OrchestratorError> {
        let span = info_span!("orchestration", run_id = %Uuid::new_v4());
        self.execute_impl(devices, platform, debug_map)
            .instrument(span)
            .await
    }

    async fn execute_impl(
        &self,
        devices: &[Device],
        platform: Option<&Platform>,
        debug_map: Option<&HashMap<String, bool>>,
    ) -> Result<(), OrchestratorError> {
        if devices.is_empty() {
            return Err(match platform {
                Some(_) => OrchestratorError::NoApplicableDevices,
                None => OrchestratorError::NoApplicableDevicesAndNoEmulatorFallback,
            });
        }

        // Must happen before anything is awaited: the device layer would
        // otherwise tear down while operations are still in flight.
        let working_with_ios_devices = platform.map_or(true, Platform::is_ios);
        if working_with_ios_devices && self.options.should_keep_process_alive() {
            debug!("Keeping iOS device operations alive");
            self.services.device_operations.set_should_dispose(false);
        }

        if self.options.release {
            return match self.run_in_release_mode(platform).await {
                Ok(report) => {
                    info!("Release run finished for {} platform(s)", report.runs.len());
                    Ok(())
                }
                Err(failure) => {
                    debug!("Release run stopped: {:?}", failure.report);
                    Err(failure.into())
                }
            };
        }

        let descriptors = self.build_descriptors(devices, debug_map);
        let session = SyncSessionConfig::new(&self.project, &self.options);

        info!(
            "Starting live sync on {} device(s), watch: {}",
            descriptors.len(),
            !session.skip_watcher()
        );
        self.services.live_sync.live_sync(descriptors, session).await
    }

    /// One-shot deploy and launch of every selected platform
    pub async fn run_in_release_mode(
        &self,
        platform: Option<&Platform>,
    ) -> Result<ReleaseReport, ReleaseFailure> {
        ReleaseRunner::new(
            self.services.platform.clone(),
            self.services.registry.clone(),
            self.options.clone(),
            self.project.clone(),
        )
        .run(platform)
        .await
    }

    fn build_descriptors(
        &self,
        devices: &[Device],
        debug_map: Option<&HashMap<String, bool>>,
    ) -> Vec<DeviceWorkDescriptor> {
        let builder = DescriptorBuilder::new(
            self.options.clone(),
            self.project.clone(),
            self.services.build.clone(),
        );

        devices
            .iter()
            .map(|device| builder.build(device, debug_map))
            .collect()
    }
}
