//! Collaborators the orchestrator delegates to

pub mod analytics;
pub mod build;
pub mod command;
pub mod device_ops;
pub mod livesync;
pub mod platform;
pub mod registry;
