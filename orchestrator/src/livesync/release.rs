//! One-shot release runs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::app::options::CommandOptions;
use crate::errors::OrchestratorError;
use crate::livesync::fsm::{ReleaseEvent, ReleaseFsm, ReleaseState};
use crate::livesync::targets::select_platforms;
use crate::models::deploy::{DeployOptions, ReleaseDeploymentRequest, RunPlatformOptions};
use crate::models::device::Platform;
use crate::models::project::ProjectData;
use crate::services::platform::PlatformService;
use crate::services::registry::PlatformRegistry;

/// Record of one platform in a release run
#[derive(Debug, Clone, Serialize)]
pub struct PlatformRun {
    pub platform: Platform,
    pub state: ReleaseState,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl PlatformRun {
    fn pending(platform: Platform) -> Self {
        Self {
            platform,
            state: ReleaseState::NotStarted,
            started_at: None,
            finished_at: None,
            error: None,
        }
    }
}

/// Outcome of a release run, one entry per selected platform
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
    pub state: ReleaseState,
    pub runs: Vec<PlatformRun>,
}

impl ReleaseReport {
    /// Entry for `platform`
    pub fn run(&self, platform: &Platform) -> Option<&PlatformRun> {
        self.runs.iter().find(|run| &run.platform == platform)
    }
}

/// A release run stopped by a failing platform
#[derive(Error, Debug)]
#[error("{error}")]
pub struct ReleaseFailure {
    /// The collaborator error, unchanged
    pub error: OrchestratorError,
    /// Progress up to and including the failing platform
    pub report: ReleaseReport,
}

impl From<ReleaseFailure> for OrchestratorError {
    fn from(failure: ReleaseFailure) -> Self {
        failure.error
    }
}

/// Deploys and launches every selected platform, one after the other
pub struct ReleaseRunner {
    platform_service: Arc<dyn PlatformService>,
    registry: Arc<dyn PlatformRegistry>,
    options: Arc<CommandOptions>,
    project: Arc<ProjectData>,
}

impl ReleaseRunner {
    pub fn new(
        platform_service: Arc<dyn PlatformService>,
        registry: Arc<dyn PlatformRegistry>,
        options: Arc<CommandOptions>,
        project: Arc<ProjectData>,
    ) -> Self {
        Self {
            platform_service,
            registry,
            options,
            project,
        }
    }

    /// Run the release flow. The first deploy or launch failure aborts the
    /// remaining platforms; its error is returned unchanged along with the
    /// partial report.
    pub async fn run(&self, platform: Option<&Platform>) -> Result<ReleaseReport, ReleaseFailure> {
        let platforms = select_platforms(self.registry.as_ref(), platform);
        info!("Running in release mode for {} platform(s)", platforms.len());

        let mut run_options = RunPlatformOptions::from(self.options.as_ref());
        run_options.project_dir = self.project.project_dir.clone();
        let deploy_options = DeployOptions::defaults(&self.project.project_dir)
            .merge(&self.options.deploy_overrides);

        let mut fsm = ReleaseFsm::new();
        let mut runs: Vec<PlatformRun> = platforms
            .iter()
            .cloned()
            .map(PlatformRun::pending)
            .collect();

        for (index, current) in platforms.iter().enumerate() {
            advance(&mut fsm, ReleaseEvent::Deploy(current.clone()), &runs)?;
            runs[index].state = fsm.state().clone();
            runs[index].started_at = Some(Utc::now());

            let request = ReleaseDeploymentRequest::new(
                current.clone(),
                deploy_options.clone(),
                self.project.clone(),
                self.options.clone(),
            );

            if let Err(e) = self.platform_service.deploy_platform(&request).await {
                error!("Deploying {} failed: {}", current, e);
                return Err(fail(&mut fsm, runs, index, e));
            }
            advance(&mut fsm, ReleaseEvent::Deployed, &runs)?;
            runs[index].state = fsm.state().clone();

            if let Err(e) = self
                .platform_service
                .start_application(current, &run_options, &self.project.project_id)
                .await
            {
                error!("Starting {} on {} failed: {}", self.project.project_id, current, e);
                return Err(fail(&mut fsm, runs, index, e));
            }
            advance(&mut fsm, ReleaseEvent::Launched, &runs)?;
            runs[index].state = fsm.state().clone();

            self.platform_service.track_project_type(&self.project);

            runs[index].finished_at = Some(Utc::now());
            info!("Release of {} on {} complete", self.project.project_id, current);
        }

        advance(&mut fsm, ReleaseEvent::Finish, &runs)?;
        Ok(report(&fsm, runs))
    }
}

fn advance(
    fsm: &mut ReleaseFsm,
    event: ReleaseEvent,
    runs: &[PlatformRun],
) -> Result<(), ReleaseFailure> {
    match fsm.process(event) {
        Ok(()) => Ok(()),
        Err(e) => Err(ReleaseFailure {
            error: OrchestratorError::Internal(e),
            report: report(fsm, runs.to_vec()),
        }),
    }
}

/// Record `error` against the platform at `index` and end the run
fn fail(
    fsm: &mut ReleaseFsm,
    mut runs: Vec<PlatformRun>,
    index: usize,
    error: OrchestratorError,
) -> ReleaseFailure {
    if let Err(e) = fsm.process(ReleaseEvent::Fail(error.to_string())) {
        warn!("{}", e);
    }
    if let Some(run) = runs.get_mut(index) {
        run.state = fsm.state().clone();
        run.error = fsm.error().map(str::to_string);
        run.finished_at = Some(Utc::now());
    }
    ReleaseFailure {
        report: report(fsm, runs),
        error,
    }
}

/// Completed platforms are always the first entries
fn report(fsm: &ReleaseFsm, mut runs: Vec<PlatformRun>) -> ReleaseReport {
    for run in runs.iter_mut().take(fsm.completed().len()) {
        run.state = ReleaseState::Done;
    }
    ReleaseReport {
        state: fsm.state().clone(),
        runs,
    }
}
