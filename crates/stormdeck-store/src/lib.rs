//! Stormdeck Store
//!
//! Process-wide key/value state shared by the workspace controller and its
//! panes. Keys are typed ([`StoreKey`]) but render to the string form hosts
//! already know (`ws-selected`, `ws-numWindowsCreated`, `0`, `window-0`).
//!
//! Writers call [`ConfigStore::set`] (or [`ConfigStore::dispatch`]); readers
//! subscribe with a [`KeyFilter`] and drain their queue with
//! [`ConfigStore::poll`]. Writes that do not change a value are dropped, so
//! subscribers never see echo notifications.
//!
//! ```
//! use stormdeck_store::{ConfigStore, KeyFilter, StoreKey, StoreValue};
//! use stormdeck_core::SlotIndex;
//!
//! let mut store = ConfigStore::new();
//! let sub = store.subscribe(KeyFilter::Slots);
//!
//! store.set(StoreKey::Slot(SlotIndex::new(0)), StoreValue::config("{}"));
//! assert_eq!(store.poll(sub).len(), 1);
//! ```

pub mod error;
pub mod event;
pub mod key;
pub mod shared;
pub mod store;
pub mod value;
pub mod versioned;

pub use error::{StoreError, StoreResult};
pub use event::{ChangeKind, KeyFilter, StoreEvent, SubscriptionId};
pub use key::StoreKey;
pub use shared::{SharedStore, SlotView};
pub use store::{ConfigStore, StoreAction};
pub use value::StoreValue;
pub use versioned::Versioned;
