//! Analytics collaborator

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Analytics transport
pub trait AnalyticsService: Send + Sync {
    /// Release analytics resources as soon as the command finishes
    fn set_should_dispose(&self, should_dispose: bool);
}

/// Analytics that only emits tracing events
#[derive(Debug, Default)]
pub struct TracingAnalytics {
    should_dispose: AtomicBool,
}

impl TracingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_dispose(&self) -> bool {
        self.should_dispose.load(Ordering::SeqCst)
    }
}

impl AnalyticsService for TracingAnalytics {
    fn set_should_dispose(&self, should_dispose: bool) {
        self.should_dispose.store(should_dispose, Ordering::SeqCst);
        debug!(target: "devsync::telemetry", should_dispose, "Analytics dispose policy set");
    }
}
