//! devsync library
//!
//! Orchestrates builds, release deployments and live sync across a set of
//! devices.

pub mod app;
pub mod errors;
pub mod filesys;
pub mod livesync;
pub mod logs;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use errors::OrchestratorError;
pub use livesync::{Collaborators, Orchestrator};
