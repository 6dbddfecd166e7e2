//! Change notifications delivered to store subscribers.

use stormdeck_core::WorkspaceId;

use crate::key::StoreKey;

/// Identifies one subscriber queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

impl SubscriptionId {
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Which keys a subscriber wants to hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFilter {
    All,
    Key(StoreKey),
    /// Every configuration slot.
    Slots,
    /// Every workspace-management key of one workspace.
    Workspace(WorkspaceId),
}

impl KeyFilter {
    pub fn matches(&self, key: &StoreKey) -> bool {
        match self {
            KeyFilter::All => true,
            KeyFilter::Key(k) => k == key,
            KeyFilter::Slots => key.is_slot(),
            KeyFilter::Workspace(ws) => key.workspace() == Some(ws),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Set,
    Removed,
}

/// A single change to a key, as seen by one subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub key: StoreKey,
    pub kind: ChangeKind,
    /// Version of the entry after the change. Removals report the last version.
    pub version: u32,
}

impl StoreEvent {
    pub fn is_removed(&self) -> bool {
        matches!(self.kind, ChangeKind::Removed)
    }
}
