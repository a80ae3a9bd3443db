//! Build, deploy and live-sync orchestration

pub mod descriptor;
pub mod fsm;
pub mod orchestrator;
pub mod release;
pub mod session;
pub mod targets;

pub use descriptor::{BuildAction, DescriptorBuilder, DeviceWorkDescriptor};
pub use orchestrator::{Collaborators, Orchestrator};
pub use release::{PlatformRun, ReleaseFailure, ReleaseReport, ReleaseRunner};
pub use session::SyncSessionConfig;
