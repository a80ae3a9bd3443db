//! Platform selection

use crate::models::device::Platform;
use crate::services::registry::PlatformRegistry;

/// Platforms an operation applies to.
///
/// An explicit platform is returned as-is without validation; otherwise every
/// platform the registry knows, in registry order.
pub fn select_platforms(registry: &dyn PlatformRegistry, explicit: Option<&Platform>) -> Vec<Platform> {
    match explicit {
        Some(platform) => vec![platform.clone()],
        None => registry.available_platforms(),
    }
}
