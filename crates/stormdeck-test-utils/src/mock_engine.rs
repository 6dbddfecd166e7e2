//! Mock animation engine that records calls instead of animating.

use std::sync::Arc;

use parking_lot::Mutex;
use stormdeck_core::Size;
use stormdeck_pane::{AnimationConfig, AnimationEngine, EngineFactory};

/// Records an engine operation for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Build {
        instance: usize,
        container_id: String,
    },
    Create {
        instance: usize,
    },
    RefreshExtents {
        instance: usize,
        size: Size<u32>,
    },
    Destroy {
        instance: usize,
    },
}

type CallLog = Arc<Mutex<Vec<EngineCall>>>;

/// Engine instance handed out by [`MockEngineFactory`].
pub struct MockEngine {
    instance: usize,
    calls: CallLog,
}

impl MockEngine {
    pub fn instance(&self) -> usize {
        self.instance
    }
}

impl AnimationEngine for MockEngine {
    fn create(&mut self) {
        self.calls.lock().push(EngineCall::Create {
            instance: self.instance,
        });
    }

    fn refresh_extents(&mut self, size: Size<u32>) {
        self.calls.lock().push(EngineCall::RefreshExtents {
            instance: self.instance,
            size,
        });
    }

    fn destroy(&mut self) {
        self.calls.lock().push(EngineCall::Destroy {
            instance: self.instance,
        });
    }
}

/// Factory whose engines all log into one shared call list.
///
/// Methods take `&self`; the log lives behind a `parking_lot::Mutex` so the
/// factory can be shared as `Arc<dyn EngineFactory>`.
#[derive(Default)]
pub struct MockEngineFactory {
    calls: CallLog,
    configs: Mutex<Vec<AnimationConfig>>,
    next_instance: Mutex<usize>,
}

impl MockEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    /// Configurations passed to `build`, in order.
    pub fn built_configs(&self) -> Vec<AnimationConfig> {
        self.configs.lock().clone()
    }

    pub fn count_builds(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Build { .. }))
    }

    pub fn count_creates(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Create { .. }))
    }

    pub fn count_refreshes(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::RefreshExtents { .. }))
    }

    pub fn count_destroys(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Destroy { .. }))
    }

    /// Instances built and not yet destroyed.
    pub fn live_instances(&self) -> Vec<usize> {
        let calls = self.calls.lock();
        let mut live = Vec::new();
        for call in calls.iter() {
            match call {
                EngineCall::Build { instance, .. } => live.push(*instance),
                EngineCall::Destroy { instance } => live.retain(|i| i != instance),
                _ => {}
            }
        }
        live
    }

    /// Clear recorded calls.
    pub fn clear(&self) {
        self.calls.lock().clear();
        self.configs.lock().clear();
    }

    fn count(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }
}

impl EngineFactory for MockEngineFactory {
    fn build(&self, config: &AnimationConfig) -> Box<dyn AnimationEngine> {
        let instance = {
            let mut next = self.next_instance.lock();
            let id = *next;
            *next += 1;
            id
        };

        self.calls.lock().push(EngineCall::Build {
            instance,
            container_id: config.container_id.clone(),
        });
        self.configs.lock().push(config.clone());

        Box::new(MockEngine {
            instance,
            calls: Arc::clone(&self.calls),
        })
    }
}
