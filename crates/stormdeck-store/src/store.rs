//! The key/value store itself.

use indexmap::IndexMap;
use stormdeck_core::SlotIndex;

use crate::error::{StoreError, StoreResult};
use crate::event::{ChangeKind, KeyFilter, StoreEvent, SubscriptionId};
use crate::key::StoreKey;
use crate::value::StoreValue;
use crate::versioned::Versioned;

/// A write request, for hosts that prefer dispatching actions over calling
/// setters directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    Set(StoreKey, StoreValue),
    Remove(StoreKey),
}

struct Subscription {
    filter: KeyFilter,
    pending: Vec<StoreEvent>,
}

/// Key/value state with per-subscriber change queues.
///
/// Last write wins per key. A write that leaves the value unchanged is a
/// no-op: no version bump, no notification.
#[derive(Default)]
pub struct ConfigStore {
    entries: IndexMap<StoreKey, Versioned<StoreValue>>,
    subscriptions: IndexMap<SubscriptionId, Subscription>,
    next_subscription: u64,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &StoreKey) -> Option<&StoreValue> {
        self.entries.get(key).map(Versioned::get)
    }

    /// The value under `key`, with a missing key read as [`StoreValue::Null`].
    pub fn get_or_null(&self, key: &StoreKey) -> StoreValue {
        self.get(key).cloned().unwrap_or_default()
    }

    pub fn version(&self, key: &StoreKey) -> Option<u32> {
        self.entries.get(key).map(Versioned::version)
    }

    pub fn contains(&self, key: &StoreKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Write a value. Returns `true` if subscribers were notified.
    pub fn set(&mut self, key: StoreKey, value: StoreValue) -> bool {
        let version = match self.entries.get_mut(&key) {
            Some(entry) => {
                if !entry.set(value) {
                    tracing::trace!(key = %key, "store write unchanged");
                    return false;
                }
                entry.version()
            }
            None => {
                self.entries.insert(key.clone(), Versioned::new(value));
                0
            }
        };

        tracing::trace!(key = %key, version, "store write");
        self.notify(key, ChangeKind::Set, version);
        true
    }

    pub fn remove(&mut self, key: &StoreKey) -> Option<StoreValue> {
        let entry = self.entries.shift_remove(key)?;
        let version = entry.version();
        self.notify(key.clone(), ChangeKind::Removed, version);
        Some(entry.into_inner())
    }

    /// Apply a dispatched action.
    pub fn dispatch(&mut self, action: StoreAction) -> bool {
        match action {
            StoreAction::Set(key, value) => self.set(key, value),
            StoreAction::Remove(key) => self.remove(&key).is_some(),
        }
    }

    /// Read-modify-write of a single key. Returns the value that was written.
    pub fn update<F>(&mut self, key: StoreKey, f: F) -> StoreValue
    where
        F: FnOnce(&StoreValue) -> StoreValue,
    {
        let next = f(&self.get_or_null(&key));
        self.set(key, next.clone());
        next
    }

    /// Write `new` only if the current value equals `expected`.
    ///
    /// A missing key compares equal to [`StoreValue::Null`].
    pub fn compare_and_swap(
        &mut self,
        key: StoreKey,
        expected: &StoreValue,
        new: StoreValue,
    ) -> StoreResult<()> {
        let found = self.get_or_null(&key);
        if &found != expected {
            return Err(StoreError::Conflict {
                key: key.to_string(),
                expected: expected.clone(),
                found,
            });
        }
        self.set(key, new);
        Ok(())
    }

    /// Read a counter. A missing or null key reads as zero.
    pub fn count(&self, key: &StoreKey) -> StoreResult<u64> {
        match self.get(key) {
            None | Some(StoreValue::Null) => Ok(0),
            Some(StoreValue::Count(n)) => Ok(*n),
            Some(_) => Err(StoreError::TypeMismatch {
                key: key.to_string(),
                expected: "count",
            }),
        }
    }

    /// Configuration slots currently tracked, in ascending order.
    ///
    /// Slots cleared to null are still tracked.
    pub fn slot_keys(&self) -> Vec<SlotIndex> {
        let mut slots: Vec<SlotIndex> = self.entries.keys().filter_map(slot_of).collect();
        slots.sort_unstable();
        slots
    }

    pub fn slot_count(&self) -> usize {
        self.entries.keys().filter(|k| k.is_slot()).count()
    }

    pub fn keys(&self) -> impl Iterator<Item = &StoreKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn subscribe(&mut self, filter: KeyFilter) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(
            id,
            Subscription {
                filter,
                pending: Vec::new(),
            },
        );
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.shift_remove(&id).is_some()
    }

    /// Drain the pending changes of one subscriber.
    ///
    /// An unknown subscription yields nothing.
    pub fn poll(&mut self, id: SubscriptionId) -> Vec<StoreEvent> {
        self.subscriptions
            .get_mut(&id)
            .map(|sub| std::mem::take(&mut sub.pending))
            .unwrap_or_default()
    }

    /// Like [`ConfigStore::poll`] but reports unknown subscriptions.
    pub fn try_poll(&mut self, id: SubscriptionId) -> StoreResult<Vec<StoreEvent>> {
        self.subscriptions
            .get_mut(&id)
            .map(|sub| std::mem::take(&mut sub.pending))
            .ok_or(StoreError::UnknownSubscription(id.as_u64()))
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn notify(&mut self, key: StoreKey, kind: ChangeKind, version: u32) {
        for sub in self.subscriptions.values_mut() {
            if sub.filter.matches(&key) {
                sub.pending.push(StoreEvent {
                    key: key.clone(),
                    kind,
                    version,
                });
            }
        }
    }
}

fn slot_of(key: &StoreKey) -> Option<SlotIndex> {
    match key {
        StoreKey::Slot(slot) => Some(*slot),
        _ => None,
    }
}
