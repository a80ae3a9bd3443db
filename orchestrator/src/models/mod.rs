//! Data models

pub mod build;
pub mod deploy;
pub mod device;
pub mod project;
