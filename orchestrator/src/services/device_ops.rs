//! Device operation layer controls

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Process-wide device operation layer
pub trait DeviceOperations: Send + Sync {
    /// Whether the layer tears itself down once its operations complete.
    /// Idempotent.
    fn set_should_dispose(&self, should_dispose: bool);
}

/// Dispose toggle backed by an atomic flag
#[derive(Debug)]
pub struct ProcessDisposeFlag {
    should_dispose: AtomicBool,
}

impl ProcessDisposeFlag {
    pub fn new() -> Self {
        Self {
            should_dispose: AtomicBool::new(true),
        }
    }

    pub fn should_dispose(&self) -> bool {
        self.should_dispose.load(Ordering::SeqCst)
    }
}

impl Default for ProcessDisposeFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceOperations for ProcessDisposeFlag {
    fn set_should_dispose(&self, should_dispose: bool) {
        let previous = self.should_dispose.swap(should_dispose, Ordering::SeqCst);
        if previous != should_dispose {
            debug!("iOS device operations dispose flag set to {}", should_dispose);
        }
    }
}
