//! Workspace controller behaviour with a recording engine.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use serde_json::json;
use stormdeck::prelude::*;
use stormdeck_layout::Placement;
use stormdeck_test_utils::{MockEngineFactory, fixtures};

fn setup() -> (WorkspaceController, Arc<MockEngineFactory>) {
    let factory = Arc::new(MockEngineFactory::new());
    let ctl = WorkspaceController::new(SharedStore::new(), factory.clone()).unwrap();
    (ctl, factory)
}

fn record_selections(ctl: &mut WorkspaceController) -> Arc<Mutex<Vec<PaneId>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    ctl.on_selection_changed(move |pane| sink.lock().push(pane.clone()));
    seen
}

fn ws() -> WorkspaceId {
    WorkspaceId::new("ws").unwrap()
}

fn node(ctl: &WorkspaceController, id: &str) -> NodeId {
    ctl.pane(&PaneId::new(id)).unwrap().node
}

fn stack_of(ctl: &WorkspaceController, id: &str) -> NodeId {
    ctl.tree().parent_stack(node(ctl, id)).unwrap()
}

#[test]
fn test_end_to_end_selection() {
    let (mut ctl, _) = setup();
    let seen = record_selections(&mut ctl);

    ctl.set_container("ws").unwrap().create_windows(1).unwrap();
    assert_eq!(ctl.num_windows_created().unwrap(), 1);
    assert!(ctl.pane(&PaneId::new("ws-0")).is_some());
    assert_eq!(ctl.get_selected(), None);

    ctl.select(Some(0)).unwrap();
    assert!(!ctl.handle_selection_changed(&PaneId::new("ws-0")).unwrap());

    assert_eq!(ctl.get_selected(), Some(PaneId::new("ws-0")));
    assert_eq!(*seen.lock(), vec![PaneId::new("ws-0")]);
}

#[test]
fn test_selection_is_idempotent() {
    let (mut ctl, _) = setup();
    let seen = record_selections(&mut ctl);
    ctl.set_container("ws").unwrap().create_windows(2).unwrap();

    let pane = PaneId::new("ws-1");
    assert!(ctl.handle_selection_changed(&pane).unwrap());
    assert!(!ctl.handle_selection_changed(&pane).unwrap());

    assert_eq!(seen.lock().len(), 1);
    assert_eq!(ctl.store().read().version(&StoreKey::Selected(ws())), Some(0));

    let events: Vec<_> = ctl.drain_events().collect();
    assert_eq!(events, vec![WorkspaceEvent::SelectionChanged { pane }]);
}

#[test]
fn test_selecting_unknown_pane_fails() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap().create_windows(1).unwrap();

    assert!(matches!(
        ctl.handle_selection_changed(&PaneId::new("ws-9")),
        Err(WorkspaceError::UnknownPane(_))
    ));
    assert_eq!(ctl.get_selected(), None);
}

#[test]
fn test_creation_counter_is_monotonic() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap().create_windows(3).unwrap();
    assert_eq!(ctl.num_windows_created().unwrap(), 3);

    ctl.invoke_menu_action(&PaneId::new("ws-1"), MenuAction::Remove)
        .unwrap();
    assert_eq!(ctl.num_windows_created().unwrap(), 3);

    let stack = stack_of(&ctl, "ws-0");
    let id = ctl.add_pane(stack, PaneDescriptor::new("animation")).unwrap();
    assert_eq!(id, PaneId::new("ws-3"));
    assert_eq!(ctl.num_windows_created().unwrap(), 4);
}

#[test]
fn test_moves_do_not_count_as_creations() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap().create_windows(2).unwrap();

    let target = stack_of(&ctl, "ws-1");
    let pane = node(&ctl, "ws-0");
    ctl.tree_mut()
        .move_pane(pane, Placement::Into { stack: target, index: None })
        .unwrap();
    ctl.process_events().unwrap();

    assert_eq!(ctl.num_windows_created().unwrap(), 2);
}

#[test]
fn test_push_fills_dense_slots() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap();

    for (expected, layer) in [(1, "a"), (2, "b"), (3, "c")] {
        ctl.push(&json!({ "layers": [layer] })).unwrap();
        assert_eq!(ctl.get_num_windows(), expected);
    }

    let store = ctl.store();
    for (slot, layer) in [(0, "a"), (1, "b"), (2, "c")] {
        let raw = store.get(&StoreKey::Slot(SlotIndex::new(slot))).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw.as_config().unwrap()).unwrap();
        assert_eq!(value["layers"][0], layer);
    }
}

#[test]
fn test_unset_keeps_slot_and_pane() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws")
        .unwrap()
        .push(&json!({ "time": 0 }))
        .unwrap()
        .create_windows(1)
        .unwrap();

    ctl.unset(Some(0)).unwrap();
    assert_eq!(ctl.get_num_windows(), 1);
    assert!(
        ctl.store()
            .get(&StoreKey::Slot(SlotIndex::new(0)))
            .unwrap()
            .is_null()
    );
    assert!(ctl.pane(&PaneId::new("ws-0")).is_some());
}

#[test]
fn test_slot_configuration_reaches_pane() {
    let (mut ctl, factory) = setup();
    ctl.set_container("ws").unwrap().create_windows(2).unwrap();
    assert_eq!(factory.count_builds(), 0);

    ctl.set(Some(1), &json!({ "time": { "start": -3, "end": 0 } }))
        .unwrap();
    assert_eq!(factory.count_builds(), 1);

    let config = &factory.built_configs()[0];
    assert_eq!(config.container_id, "ws-1-map");
    assert_eq!(config.legend_container_id, "ws-1-map-legend");
    assert!(ctl.pane(&PaneId::new("ws-1")).unwrap().widget().has_engine());
}

#[test]
fn test_malformed_configuration_is_tolerated() {
    let (mut ctl, factory) = setup();
    ctl.set_container("ws").unwrap();
    ctl.push(&fixtures::radar_object()).unwrap();
    ctl.create_windows(1).unwrap();
    assert_eq!(factory.count_builds(), 1);

    ctl.store().set(
        StoreKey::Slot(SlotIndex::new(0)),
        StoreValue::config(fixtures::MALFORMED),
    );
    ctl.process_events().unwrap();

    assert_eq!(factory.count_builds(), 1);
    assert_eq!(factory.count_destroys(), 0);
    assert!(ctl.pane(&PaneId::new("ws-0")).unwrap().widget().has_engine());

    ctl.store().set(
        StoreKey::Slot(SlotIndex::new(0)),
        StoreValue::config(fixtures::with_layer("satellite")),
    );
    ctl.process_events().unwrap();
    assert_eq!(factory.count_builds(), 2);
    assert_eq!(factory.live_instances(), vec![1]);
}

#[test]
fn test_first_resize_only_measures() {
    let (mut ctl, factory) = setup();
    ctl.set_container("ws").unwrap();
    ctl.push(&fixtures::radar_object())
        .unwrap()
        .push(&fixtures::radar_object())
        .unwrap()
        .create_windows(2)
        .unwrap();
    let now = Instant::now();

    assert_eq!(ctl.resize(Size::new(800.0, 600.0), now).unwrap(), 0);
    assert_eq!(factory.count_refreshes(), 0);

    assert_eq!(ctl.resize(Size::new(600.0, 600.0), now).unwrap(), 2);
    assert_eq!(factory.count_refreshes(), 2);

    assert_eq!(ctl.resize(Size::new(600.0, 600.0), now).unwrap(), 0);
    assert_eq!(factory.count_refreshes(), 2);
}

#[test]
fn test_debounced_resize() {
    let factory = Arc::new(MockEngineFactory::new());
    let config = WorkspaceConfig::default()
        .with_resize(ResizePolicy::Debounced(std::time::Duration::from_millis(50)));
    let mut ctl = WorkspaceController::with_config(SharedStore::new(), factory, config).unwrap();
    ctl.set_container("ws").unwrap().create_windows(1).unwrap();

    let start = Instant::now();
    ctl.resize(Size::new(800.0, 600.0), start).unwrap();
    assert_eq!(ctl.tree().size(), Size::default());

    ctl.poll_resize(start + std::time::Duration::from_millis(60))
        .unwrap();
    assert_eq!(ctl.tree().size(), Size::new(800.0, 600.0));
}

#[test]
fn test_drop_prunes_empty_row() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap().create_windows(3).unwrap();
    ctl.resize(Size::new(800.0, 600.0), Instant::now()).unwrap();
    assert_eq!(ctl.tree().rows().len(), 2);

    // ws-2 sits alone in the bottom row; drop it onto ws-1's body.
    ctl.begin_tab_drag(&PaneId::new("ws-2"), Vec2::new(50.0, 310.0))
        .unwrap();
    assert!(ctl.drag_tab_to(Vec2::new(600.0, 150.0)).is_some());
    assert!(ctl.end_tab_drag().unwrap());

    assert_eq!(ctl.tree().rows().len(), 1);
    assert_eq!(stack_of(&ctl, "ws-2"), stack_of(&ctl, "ws-1"));
    assert_eq!(ctl.tree().pane_count(ctl.tree().rows()[0]), 3);
}

#[test]
fn test_drop_keeps_populated_rows() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap().create_windows(4).unwrap();

    let target = stack_of(&ctl, "ws-0");
    let pane = node(&ctl, "ws-2");
    ctl.tree_mut()
        .move_pane(pane, Placement::Into { stack: target, index: None })
        .unwrap();
    ctl.process_events().unwrap();

    // ws-3 still holds the bottom row.
    assert_eq!(ctl.tree().rows().len(), 2);
    assert_eq!(ctl.handle_item_dropped().unwrap(), 0);
}

#[test]
fn test_restored_selection_is_applied_on_creation() {
    let (mut ctl, _) = setup();
    let seen = record_selections(&mut ctl);
    ctl.set_container("ws").unwrap();
    ctl.store()
        .set(StoreKey::Selected(ws()), StoreValue::Pane(PaneId::new("ws-1")));

    ctl.create_windows(2).unwrap();

    assert_eq!(ctl.tree().selected_pane(), Some(node(&ctl, "ws-1")));
    assert_eq!(ctl.get_selected(), Some(PaneId::new("ws-1")));
    assert!(seen.lock().is_empty());
}

#[test]
fn test_removing_selected_pane_selects_another() {
    let (mut ctl, factory) = setup();
    let seen = record_selections(&mut ctl);
    ctl.set_container("ws").unwrap();
    ctl.push(&fixtures::radar_object())
        .unwrap()
        .create_windows(2)
        .unwrap()
        .select(Some(0))
        .unwrap();
    ctl.drain_events().for_each(drop);

    ctl.invoke_menu_action(&PaneId::new("ws-0"), MenuAction::Remove)
        .unwrap();

    assert!(ctl.pane(&PaneId::new("ws-0")).is_none());
    assert!(ctl.menu(&PaneId::new("ws-0")).is_none());
    assert!(
        ctl.store()
            .get(&StoreKey::Window(SlotIndex::new(0)))
            .is_none()
    );
    assert_eq!(factory.count_destroys(), 1);

    assert_eq!(ctl.get_selected(), Some(PaneId::new("ws-1")));
    assert_eq!(
        *seen.lock(),
        vec![PaneId::new("ws-0"), PaneId::new("ws-1")]
    );

    let events: Vec<_> = ctl.drain_events().collect();
    assert_eq!(
        events,
        vec![
            WorkspaceEvent::PaneRemoved {
                pane: PaneId::new("ws-0"),
                slot: SlotIndex::new(0)
            },
            WorkspaceEvent::SelectionChanged {
                pane: PaneId::new("ws-1")
            },
        ]
    );
}

#[test]
fn test_select_without_pane_is_noop() {
    let (mut ctl, _) = setup();
    let seen = record_selections(&mut ctl);
    ctl.set_container("ws").unwrap().create_windows(1).unwrap();

    ctl.select(Some(5)).unwrap();
    assert_eq!(ctl.get_selected(), None);
    assert!(seen.lock().is_empty());
}

#[test]
fn test_duplicate_pane_is_rejected() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap().create_windows(1).unwrap();

    let stack = stack_of(&ctl, "ws-0");
    let result = ctl.add_pane(
        stack,
        PaneDescriptor::new("animation").with_slot(SlotIndex::new(0)),
    );
    assert!(matches!(result, Err(WorkspaceError::DuplicatePane(id)) if id.as_str() == "ws-0"));
    assert_eq!(ctl.tree().pane_count(ctl.tree().root()), 1);
    assert_eq!(ctl.tree().children(stack).len(), 1);
}

#[test]
fn test_tab_pointer_down_selects_pane() {
    let (mut ctl, _) = setup();
    let seen = record_selections(&mut ctl);
    ctl.set_container("ws").unwrap().create_windows(2).unwrap();

    ctl.on_tab_pointer_down(&PaneId::new("ws-1")).unwrap();
    ctl.on_tab_pointer_down(&PaneId::new("ws-1")).unwrap();

    assert_eq!(ctl.get_selected(), Some(PaneId::new("ws-1")));
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn test_newest_pane_in_stack_can_be_selected() {
    let (mut ctl, _) = setup();
    let seen = record_selections(&mut ctl);
    ctl.set_container("ws").unwrap().create_windows(1).unwrap();

    let stack = stack_of(&ctl, "ws-0");
    let id = ctl.add_pane(stack, PaneDescriptor::new("animation")).unwrap();
    assert_eq!(id, PaneId::new("ws-1"));
    assert_eq!(ctl.get_selected(), None);

    ctl.select(Some(1)).unwrap();
    assert_eq!(ctl.get_selected(), Some(id.clone()));

    ctl.on_tab_pointer_down(&PaneId::new("ws-0")).unwrap();
    assert_eq!(ctl.get_selected(), Some(PaneId::new("ws-0")));
    assert_eq!(*seen.lock(), vec![id, PaneId::new("ws-0")]);
}

#[test]
fn test_reinitialized_container_keeps_creating_panes() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap().create_windows(1).unwrap();

    ctl.set_container("ws").unwrap().create_windows(1).unwrap();
    assert_eq!(ctl.num_windows_created().unwrap(), 1);
    assert!(ctl.pane(&PaneId::new("ws-0")).is_some());
    assert!(ctl.pane(&PaneId::new("ws-1")).is_some());
    assert_eq!(ctl.tree().pane_count(ctl.tree().root()), 2);
    assert_eq!(ctl.pane_ids().count(), 2);
}

#[test]
fn test_rejected_pane_leaves_layout_consistent() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap().create_windows(1).unwrap();
    let rows_before = ctl.tree().rows().len();

    let row = ctl.tree_mut().add_row().unwrap();
    let stack = ctl.tree_mut().add_stack(row).unwrap();
    let rejected = ctl
        .tree_mut()
        .add_pane(
            stack,
            PaneDescriptor::new("animation").with_slot(SlotIndex::new(0)),
        )
        .unwrap();
    let first_stack = stack_of(&ctl, "ws-0");
    let accepted = ctl
        .tree_mut()
        .add_pane(
            first_stack,
            PaneDescriptor::new("animation").with_slot(SlotIndex::new(7)),
        )
        .unwrap();

    let result = ctl.process_events();
    assert!(matches!(result, Err(WorkspaceError::DuplicatePane(id)) if id.as_str() == "ws-0"));

    assert!(!ctl.tree().contains(rejected));
    assert!(!ctl.tree().contains(stack));
    assert_eq!(ctl.tree().rows().len(), rows_before);
    assert!(!ctl.tree().has_pending_events());

    // Events behind the failure were still handled.
    assert_eq!(ctl.pane_for_node(accepted), Some(&PaneId::new("ws-7")));
    assert_eq!(ctl.menu(&PaneId::new("ws-7")).unwrap().listener_count(), 1);
    assert_eq!(ctl.tree().pane_count(ctl.tree().root()), 2);
}

#[test]
fn test_tab_menu_attaches_once() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap().create_windows(2).unwrap();
    let pane = PaneId::new("ws-0");

    // Moving re-renders the tab.
    let target = stack_of(&ctl, "ws-1");
    let node = node(&ctl, "ws-0");
    ctl.tree_mut()
        .move_pane(node, Placement::Into { stack: target, index: None })
        .unwrap();
    ctl.process_events().unwrap();

    ctl.open_tab_menu(&pane).unwrap();
    let actions = ctl.open_tab_menu(&pane).unwrap();
    assert_eq!(actions.len(), 5);

    let menu = ctl.menu(&pane).unwrap();
    assert_eq!(menu.listener_count(), 1);
    assert!(menu.is_open());
}

#[test]
fn test_menu_actions_emit_host_events() {
    let (mut ctl, factory) = setup();
    ctl.set_container("ws").unwrap();
    ctl.push(&fixtures::radar_object())
        .unwrap()
        .create_windows(1)
        .unwrap();
    let pane = PaneId::new("ws-0");

    ctl.invoke_menu_action(&pane, MenuAction::ToggleFullscreen)
        .unwrap();
    ctl.invoke_menu_action(&pane, MenuAction::RotateSlider)
        .unwrap();
    ctl.invoke_menu_action(&pane, MenuAction::Favorite).unwrap();
    ctl.invoke_menu_action(&pane, MenuAction::Share).unwrap();

    let entry = ctl.pane(&pane).unwrap();
    assert!(entry.flags.contains(PaneFlags::FULLSCREEN | PaneFlags::SLIDER_VERTICAL));
    assert!(entry.widget().is_slider_vertical());
    assert_eq!(factory.live_instances().len(), 1);

    let built = factory.built_configs();
    assert_eq!(built.len(), 2);
    assert!(!built[0].time_slider_vertical);
    assert!(built[1].time_slider_vertical);

    let events: Vec<_> = ctl.drain_events().collect();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        WorkspaceEvent::FullscreenToggled {
            pane: pane.clone(),
            fullscreen: true
        }
    );
    assert_eq!(
        events[1],
        WorkspaceEvent::SliderRotated {
            pane: pane.clone(),
            vertical: true
        }
    );
    match &events[2] {
        WorkspaceEvent::FavoriteRequested { config, .. } => {
            let value: serde_json::Value = serde_json::from_str(config.as_deref().unwrap()).unwrap();
            assert_eq!(value["layers"][0], "radar");
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert!(matches!(events[3], WorkspaceEvent::ShareRequested { .. }));
}

#[test]
fn test_layout_handle_is_published() {
    let (mut ctl, _) = setup();
    ctl.set_container("ws").unwrap();

    let handle = ctl
        .store()
        .get(&StoreKey::Layout(ws()))
        .and_then(|v| v.as_layout());
    assert_eq!(handle, Some(ctl.tree().handle()));
}
