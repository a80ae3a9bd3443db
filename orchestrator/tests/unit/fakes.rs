//! Recording fakes of the orchestrator collaborators

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use devsync::app::options::CommandOptions;
use devsync::errors::OrchestratorError;
use devsync::livesync::{Collaborators, DeviceWorkDescriptor, Orchestrator, SyncSessionConfig};
use devsync::models::build::BuildConfig;
use devsync::models::deploy::{ReleaseDeploymentRequest, RunPlatformOptions};
use devsync::models::device::Platform;
use devsync::models::project::ProjectData;
use devsync::services::analytics::AnalyticsService;
use devsync::services::build::BuildService;
use devsync::services::device_ops::DeviceOperations;
use devsync::services::livesync::LiveSyncService;
use devsync::services::platform::PlatformService;
use devsync::services::registry::PlatformsData;

/// Ordered record of every collaborator call
#[derive(Default)]
pub struct CallLog {
    calls: Mutex<Vec<String>>,
}

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }
}

pub struct FakeBuild {
    log: Arc<CallLog>,
    pub fail_on: Option<Platform>,
}

#[async_trait]
impl BuildService for FakeBuild {
    async fn build_platform(
        &self,
        platform: &Platform,
        config: &BuildConfig,
        _project: &ProjectData,
    ) -> Result<(), OrchestratorError> {
        self.log.push(format!(
            "build:{}:{}",
            platform,
            if config.build_for_device { "device" } else { "emulator" }
        ));
        if self.fail_on.as_ref() == Some(platform) {
            return Err(OrchestratorError::BuildError(format!("{} toolchain missing", platform)));
        }
        Ok(())
    }

    async fn last_output_path(
        &self,
        platform: &Platform,
        config: &BuildConfig,
        _project: &ProjectData,
    ) -> Result<PathBuf, OrchestratorError> {
        self.log.push(format!("output:{}", platform));
        Ok(PathBuf::from(format!(
            "/out/{}/{}",
            platform,
            if config.build_for_device { "device" } else { "emulator" }
        )))
    }
}

pub struct FakePlatform {
    log: Arc<CallLog>,
    pub fail_deploy_on: Option<Platform>,
    pub fail_start_on: Option<Platform>,
    pub requests: Mutex<Vec<ReleaseDeploymentRequest>>,
    pub run_options: Mutex<Vec<RunPlatformOptions>>,
}

#[async_trait]
impl PlatformService for FakePlatform {
    async fn deploy_platform(&self, request: &ReleaseDeploymentRequest) -> Result<(), OrchestratorError> {
        self.log.push(format!("deploy:{}", request.platform));
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_deploy_on.as_ref() == Some(&request.platform) {
            return Err(OrchestratorError::DeployError(format!(
                "{} deploy rejected",
                request.platform
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
        self.log.push(format!("start:{}:{}", platform, project_id));
        self.run_options.lock().unwrap().push(options.clone());
        if self.fail_start_on.as_ref() == Some(platform) {
            return Err(OrchestratorError::LaunchError(format!("{} did not start", platform)));
        }
        Ok(())
    }

    fn track_project_type(&self, project: &ProjectData) {
        self.log.push(format!("track:{}", project.project_type));
    }
}

pub struct FakeDeviceOps {
    log: Arc<CallLog>,
}

impl DeviceOperations for FakeDeviceOps {
    fn set_should_dispose(&self, should_dispose: bool) {
        self.log.push(format!("dispose:{}", should_dispose));
    }
}

pub struct FakeAnalytics {
    log: Arc<CallLog>,
}

impl AnalyticsService for FakeAnalytics {
    fn set_should_dispose(&self, should_dispose: bool) {
        self.log.push(format!("analytics:{}", should_dispose));
    }
}

pub struct FakeLiveSync {
    log: Arc<CallLog>,
    pub fail: bool,
    pub sessions: Mutex<Vec<(Vec<DeviceWorkDescriptor>, SyncSessionConfig)>>,
}

#[async_trait]
impl LiveSyncService for FakeLiveSync {
    async fn live_sync(
        &self,
        descriptors: Vec<DeviceWorkDescriptor>,
        session: SyncSessionConfig,
    ) -> Result<(), OrchestratorError> {
        self.log.push(format!("live_sync:{}", descriptors.len()));
        self.sessions.lock().unwrap().push((descriptors, session));
        if self.fail {
            return Err(OrchestratorError::SyncError("device went away".to_string()));
        }
        Ok(())
    }
}

/// All fakes sharing one call log
pub struct Harness {
    pub log: Arc<CallLog>,
    pub build: Arc<FakeBuild>,
    pub platform: Arc<FakePlatform>,
    pub live_sync: Arc<FakeLiveSync>,
    pub platforms: Vec<Platform>,
}

impl Harness {
    pub fn new() -> Self {
        let log = Arc::new(CallLog::default());
        Self {
            build: Arc::new(FakeBuild {
                log: log.clone(),
                fail_on: None,
            }),
            platform: Arc::new(FakePlatform {
                log: log.clone(),
                fail_deploy_on: None,
                fail_start_on: None,
                requests: Mutex::new(Vec::new()),
                run_options: Mutex::new(Vec::new()),
            }),
            live_sync: Arc::new(FakeLiveSync {
                log: log.clone(),
                fail: false,
                sessions: Mutex::new(Vec::new()),
            }),
            platforms: vec![Platform::Ios, Platform::Android],
            log,
        }
    }

    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn failing_build(mut self, platform: Platform) -> Self {
        self.build = Arc::new(FakeBuild {
            log: self.log.clone(),
            fail_on: Some(platform),
        });
        self
    }

    pub fn failing_deploy(mut self, platform: Platform) -> Self {
        self.platform = Arc::new(FakePlatform {
            log: self.log.clone(),
            fail_deploy_on: Some(platform),
            fail_start_on: None,
            requests: Mutex::new(Vec::new()),
            run_options: Mutex::new(Vec::new()),
        });
        self
    }

    pub fn failing_start(mut self, platform: Platform) -> Self {
        self.platform = Arc::new(FakePlatform {
            log: self.log.clone(),
            fail_deploy_on: None,
            fail_start_on: Some(platform),
            requests: Mutex::new(Vec::new()),
            run_options: Mutex::new(Vec::new()),
        });
        self
    }

    pub fn failing_sync(mut self) -> Self {
        self.live_sync = Arc::new(FakeLiveSync {
            log: self.log.clone(),
            fail: true,
            sessions: Mutex::new(Vec::new()),
        });
        self
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            build: self.build.clone(),
            platform: self.platform.clone(),
            device_operations: Arc::new(FakeDeviceOps {
                log: self.log.clone(),
            }),
            live_sync: self.live_sync.clone(),
            analytics: Arc::new(FakeAnalytics {
                log: self.log.clone(),
            }),
            registry: Arc::new(PlatformsData::new(self.platforms.clone())),
        }
    }

    pub fn orchestrator(&self, options: CommandOptions) -> Orchestrator {
        Orchestrator::new(options, project(), self.collaborators())
    }

    /// Calls made after construction
    pub fn work_calls(&self) -> Vec<String> {
        self.log
            .calls()
            .into_iter()
            .filter(|c| !c.starts_with("analytics:"))
            .collect()
    }
}

pub fn project() -> ProjectData {
    ProjectData::new("/work/app", "org.example.app", "angular")
}
