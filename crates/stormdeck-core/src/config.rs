use std::time::Duration;

use crate::logging::DEFAULT_FILTER;

/// Configuration for a Stormdeck workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    /// Height of each stack's tab strip, in pixels.
    pub header_height: f32,
    /// Number of stacks placed side by side when windows are created in bulk.
    pub panes_per_row: usize,
    /// How container size changes reach the layout tree.
    pub resize: ResizePolicy,
    /// Which drop zones are offered while a tab is dragged.
    pub drop_policy: DropPolicyKind,
    /// Directives used when the host asks the workspace to set up logging.
    pub log_filter: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        WorkspaceConfig {
            header_height: 20.0,
            panes_per_row: 2,
            resize: ResizePolicy::Immediate,
            drop_policy: DropPolicyKind::BodyOnly,
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl WorkspaceConfig {
    pub fn with_header_height(mut self, height: f32) -> Self {
        self.header_height = height.max(0.0);
        self
    }

    pub fn with_panes_per_row(mut self, count: usize) -> Self {
        self.panes_per_row = count.max(1);
        self
    }

    pub fn with_resize(mut self, resize: ResizePolicy) -> Self {
        self.resize = resize;
        self
    }

    pub fn with_drop_policy(mut self, policy: DropPolicyKind) -> Self {
        self.drop_policy = policy;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Propagate every size change as soon as it is observed.
    #[default]
    Immediate,
    /// Propagate only once the size has been stable for the given duration.
    Debounced(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPolicyKind {
    /// Highlight the nearest edge, allowing a drop to open a new split.
    NearestEdge,
    /// Ignore the tab strip and only ever drop into an existing stack body.
    #[default]
    BodyOnly,
}
