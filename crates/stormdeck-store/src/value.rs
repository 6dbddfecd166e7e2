use stormdeck_core::{LayoutHandle, PaneId};

/// A value in the shared store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreValue {
    #[default]
    Null,
    Count(u64),
    Pane(PaneId),
    /// Serialized (JSON) pane configuration. Not validated by the store.
    Config(String),
    Layout(LayoutHandle),
}

impl StoreValue {
    pub fn config(raw: impl Into<String>) -> Self {
        StoreValue::Config(raw.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StoreValue::Null)
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            StoreValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_pane(&self) -> Option<&PaneId> {
        match self {
            StoreValue::Pane(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_config(&self) -> Option<&str> {
        match self {
            StoreValue::Config(raw) => Some(raw),
            _ => None,
        }
    }

    pub fn as_layout(&self) -> Option<LayoutHandle> {
        match self {
            StoreValue::Layout(handle) => Some(*handle),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            StoreValue::Null => "null",
            StoreValue::Count(_) => "count",
            StoreValue::Pane(_) => "pane",
            StoreValue::Config(_) => "config",
            StoreValue::Layout(_) => "layout",
        }
    }
}

impl From<PaneId> for StoreValue {
    fn from(id: PaneId) -> Self {
        StoreValue::Pane(id)
    }
}

impl From<Option<PaneId>> for StoreValue {
    fn from(id: Option<PaneId>) -> Self {
        id.map_or(StoreValue::Null, StoreValue::Pane)
    }
}
