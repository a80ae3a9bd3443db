//! Live-sync engine

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{error, info, warn};

use crate::errors::OrchestratorError;
use crate::livesync::descriptor::DeviceWorkDescriptor;
use crate::livesync::session::SyncSessionConfig;
use crate::services::command::{CommandTemplate, ShellCommand};

/// Pushes builds and file changes to running devices
#[async_trait]
pub trait LiveSyncService: Send + Sync {
    async fn live_sync(
        &self,
        descriptors: Vec<DeviceWorkDescriptor>,
        session: SyncSessionConfig,
    ) -> Result<(), OrchestratorError>;
}

/// Live-sync engine delegating the transport to a shell command.
///
/// Device builds run concurrently. A device whose build or sync fails is
/// logged and skipped; the request only fails when no device succeeded.
pub struct CommandLiveSync {
    sync: CommandTemplate,
}

impl CommandLiveSync {
    pub fn new(sync: CommandTemplate) -> Self {
        Self { sync }
    }

    async fn sync_device(
        &self,
        descriptor: &DeviceWorkDescriptor,
        session: &SyncSessionConfig,
    ) -> Result<(), OrchestratorError> {
        let artifact = descriptor.build_action.run().await?;
        let artifact = artifact.display().to_string();
        let project_dir = session.project_dir().display().to_string();

        let command = self.sync.render(&[
            ("device", descriptor.identifier.as_str()),
            ("platform", descriptor.build_action.platform().as_str()),
            ("artifact", artifact.as_str()),
            ("project_dir", project_dir.as_str()),
            ("watch", if session.skip_watcher() { "" } else { "--watch" }),
            ("debug", if descriptor.debugging_enabled { "--debug" } else { "" }),
        ]);

        info!("Syncing {} to {}", artifact, descriptor.identifier);
        // Sync keeps running while watching, so stderr is not buffered
        let outcome = ShellCommand::new(command, session.project_dir())
            .caller_env(session.env())
            .inherit_stderr()
            .run()
            .await
            .map_err(|e| OrchestratorError::SyncError(format!("Failed to run sync: {}", e)))?;

        if !outcome.success {
            return Err(OrchestratorError::SyncError(format!(
                "Sync to {} failed with {}",
                descriptor.identifier,
                outcome.describe()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl LiveSyncService for CommandLiveSync {
    async fn live_sync(
        &self,
        descriptors: Vec<DeviceWorkDescriptor>,
        session: SyncSessionConfig,
    ) -> Result<(), OrchestratorError> {
        if self.sync.is_empty() {
            return Err(OrchestratorError::ConfigError(
                "No sync command configured".to_string(),
            ));
        }
        if descriptors.is_empty() {
            warn!("Live sync requested without devices");
            return Ok(());
        }

        let results = join_all(
            descriptors
                .iter()
                .map(|descriptor| self.sync_device(descriptor, &session)),
        )
        .await;

        let mut failed = 0;
        for (descriptor, result) in descriptors.iter().zip(&results) {
            if let Err(e) = result {
                failed += 1;
                error!("Device {} failed: {}", descriptor.identifier, e);
            }
        }

        if failed == descriptors.len() {
            return Err(OrchestratorError::SyncError(format!(
                "Live sync failed on all {} device(s)",
                failed
            )));
        }

        info!(
            "Live sync finished on {} of {} device(s)",
            descriptors.len() - failed,
            descriptors.len()
        );
        Ok(())
    }
}
