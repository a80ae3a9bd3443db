//! Error types for the orchestrator

use thiserror::Error;

/// Main error type for devsync
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Unable to find applicable devices to execute operation. Ensure connected devices are trusted and try again.")]
    NoApplicableDevices,

    #[error("Unable to find applicable devices to execute operation and unable to start emulator when platform is not specified.")]
    NoApplicableDevicesAndNoEmulatorFallback,

    #[error("Build error: {0}")]
    BuildError(String),

    #[error("Deployment error: {0}")]
    DeployError(String),

    #[error("Launch error: {0}")]
    LaunchError(String),

    #[error("Sync error: {0}")]
    SyncError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Project error: {0}")]
    ProjectError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrchestratorError {
    /// No device matched the request and no work was attempted
    pub fn is_guard_failure(&self) -> bool {
        matches!(
            self,
            OrchestratorError::NoApplicableDevices
                | OrchestratorError::NoApplicableDevicesAndNoEmulatorFallback
        )
    }

    /// Process exit code: 2 for guard failures, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.is_guard_failure() {
            2
        } else {
            1
        }
    }
}
