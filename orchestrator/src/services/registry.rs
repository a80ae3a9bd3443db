//! Known platforms

use crate::models::device::Platform;

/// Enumerates every platform the process knows about
pub trait PlatformRegistry: Send + Sync {
    /// Known platforms in a stable order
    fn available_platforms(&self) -> Vec<Platform>;
}

/// Fixed list of platforms
#[derive(Debug, Clone)]
pub struct PlatformsData {
    platforms: Vec<Platform>,
}

impl PlatformsData {
    pub fn new(platforms: Vec<Platform>) -> Self {
        let mut unique: Vec<Platform> = Vec::with_capacity(platforms.len());
        for platform in platforms {
            if !unique.contains(&platform) {
                unique.push(platform);
            }
        }
        Self { platforms: unique }
    }
}

impl Default for PlatformsData {
    fn default() -> Self {
        Self::new(vec![Platform::Ios, Platform::Android])
    }
}

impl PlatformRegistry for PlatformsData {
    fn available_platforms(&self) -> Vec<Platform> {
        self.platforms.clone()
    }
}
