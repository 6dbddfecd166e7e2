//! Workspace container size tracking.

use std::time::Instant;

use stormdeck_core::{ResizePolicy, Size};

/// Decides when a container size change is passed on to the layout.
///
/// Time is supplied by the caller so hosts can drive it from their own
/// event loop clock.
#[derive(Debug, Clone)]
pub struct ResizeWatcher {
    policy: ResizePolicy,
    applied: Option<Size<f32>>,
    pending: Option<(Size<f32>, Instant)>,
}

impl ResizeWatcher {
    pub fn new(policy: ResizePolicy) -> Self {
        Self {
            policy,
            applied: None,
            pending: None,
        }
    }

    /// Record an observed size. Returns the size to apply now, if any.
    pub fn observe(&mut self, size: Size<f32>, now: Instant) -> Option<Size<f32>> {
        match self.policy {
            ResizePolicy::Immediate => self.settle(size),
            ResizePolicy::Debounced(_) => {
                self.pending = Some((size, now));
                None
            }
        }
    }

    /// Release a debounced size once it has been stable long enough.
    pub fn poll(&mut self, now: Instant) -> Option<Size<f32>> {
        let ResizePolicy::Debounced(delay) = self.policy else {
            return None;
        };
        let (size, at) = self.pending?;
        if now.saturating_duration_since(at) < delay {
            return None;
        }
        self.pending = None;
        self.settle(size)
    }

    pub fn applied(&self) -> Option<Size<f32>> {
        self.applied
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn settle(&mut self, size: Size<f32>) -> Option<Size<f32>> {
        if self.applied == Some(size) {
            return None;
        }
        self.applied = Some(size);
        Some(size)
    }
}
