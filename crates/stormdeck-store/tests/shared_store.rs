//! Shared store behaviour across handles and threads.

use std::thread;

use stormdeck_core::{SlotIndex, WorkspaceId};
use stormdeck_store::*;

fn counter_key() -> StoreKey {
    StoreKey::WindowsCreated(WorkspaceId::new("ws").unwrap())
}

#[test]
fn concurrent_cas_increments_are_never_lost() {
    let store = SharedStore::new();
    store.set(counter_key(), StoreValue::Count(0));

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    loop {
                        let seen = store.count(&counter_key()).unwrap();
                        let swapped = store.compare_and_swap(
                            counter_key(),
                            &StoreValue::Count(seen),
                            StoreValue::Count(seen + 1),
                        );
                        if swapped.is_ok() {
                            break;
                        }
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(store.count(&counter_key()).unwrap(), 800);
}

#[test]
fn update_is_a_single_read_modify_write() {
    let store = SharedStore::new();
    for _ in 0..3 {
        store.update(counter_key(), |v| StoreValue::Count(v.as_count().unwrap_or(0) + 1));
    }
    assert_eq!(store.count(&counter_key()).unwrap(), 3);
}

#[test]
fn workspace_filter_ignores_slots() {
    let store = SharedStore::new();
    let ws = WorkspaceId::new("ws").unwrap();
    let sub = store.subscribe(KeyFilter::Workspace(ws.clone()));

    store.set(StoreKey::Slot(SlotIndex::new(0)), StoreValue::config("{}"));
    store.set(StoreKey::Selected(ws), StoreValue::Null);

    let events = store.poll(sub);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].key.to_string(), "ws-selected");
}
