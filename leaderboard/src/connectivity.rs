//! Online/offline signal consumed by the panel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Source of the current connectivity state.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Shared, settable connectivity flag. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct OnlineStatus(Arc<AtomicBool>);

impl OnlineStatus {
    #[must_use]
    pub fn new(online: bool) -> Self {
        Self(Arc::new(AtomicBool::new(online)))
    }

    pub fn set_online(&self, online: bool) {
        self.0.store(online, Ordering::Relaxed);
    }
}

impl Default for OnlineStatus {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for OnlineStatus {
    fn is_online(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
