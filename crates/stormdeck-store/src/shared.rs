//! Shared handles injected into workspace components.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use stormdeck_core::SlotIndex;

use crate::error::StoreResult;
use crate::event::{KeyFilter, StoreEvent, SubscriptionId};
use crate::key::StoreKey;
use crate::store::{ConfigStore, StoreAction};
use crate::value::StoreValue;

/// Cloneable handle to a [`ConfigStore`].
///
/// Every operation takes the lock for its own duration only, so a single
/// call such as [`SharedStore::compare_and_swap`] is atomic with respect to
/// other holders of the handle.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<ConfigStore>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, ConfigStore> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ConfigStore> {
        self.inner.write()
    }

    pub fn get(&self, key: &StoreKey) -> Option<StoreValue> {
        self.inner.read().get(key).cloned()
    }

    pub fn get_or_null(&self, key: &StoreKey) -> StoreValue {
        self.inner.read().get_or_null(key)
    }

    pub fn set(&self, key: StoreKey, value: StoreValue) -> bool {
        self.inner.write().set(key, value)
    }

    pub fn remove(&self, key: &StoreKey) -> Option<StoreValue> {
        self.inner.write().remove(key)
    }

    pub fn dispatch(&self, action: StoreAction) -> bool {
        self.inner.write().dispatch(action)
    }

    pub fn update<F>(&self, key: StoreKey, f: F) -> StoreValue
    where
        F: FnOnce(&StoreValue) -> StoreValue,
    {
        self.inner.write().update(key, f)
    }

    pub fn compare_and_swap(
        &self,
        key: StoreKey,
        expected: &StoreValue,
        new: StoreValue,
    ) -> StoreResult<()> {
        self.inner.write().compare_and_swap(key, expected, new)
    }

    pub fn count(&self, key: &StoreKey) -> StoreResult<u64> {
        self.inner.read().count(key)
    }

    pub fn slot_count(&self) -> usize {
        self.inner.read().slot_count()
    }

    pub fn slot_keys(&self) -> Vec<SlotIndex> {
        self.inner.read().slot_keys()
    }

    pub fn subscribe(&self, filter: KeyFilter) -> SubscriptionId {
        self.inner.write().subscribe(filter)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.write().unsubscribe(id)
    }

    pub fn poll(&self, id: SubscriptionId) -> Vec<StoreEvent> {
        self.inner.write().poll(id)
    }

    /// Narrow this handle to a single configuration slot.
    pub fn slot_view(&self, slot: SlotIndex) -> SlotView {
        let subscription = self.subscribe(KeyFilter::Key(StoreKey::Slot(slot)));
        SlotView {
            store: self.clone(),
            slot,
            subscription,
        }
    }
}

impl From<ConfigStore> for SharedStore {
    fn from(store: ConfigStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }
}

/// Read access to one configuration slot plus its change feed.
///
/// This is all a pane needs from the store. The subscription is released
/// when the view is dropped.
pub struct SlotView {
    store: SharedStore,
    slot: SlotIndex,
    subscription: SubscriptionId,
}

impl SlotView {
    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    /// Current raw configuration. `None` when unset or null.
    pub fn read(&self) -> Option<String> {
        self.store
            .get(&StoreKey::Slot(self.slot))
            .and_then(|v| v.as_config().map(str::to_owned))
    }

    /// Whether the slot changed since the last call.
    pub fn take_changed(&self) -> bool {
        !self.store.poll(self.subscription).is_empty()
    }
}

impl Drop for SlotView {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
