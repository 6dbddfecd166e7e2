//! Tab drag and drop against a laid-out tree.
//!
//! Workspace is 800x600 with one row holding two stacks side by side, so the
//! right stack's content area is (400, 20, 400, 580).

use stormdeck_core::Size;
use stormdeck_core::math::Vec2;
use stormdeck_layout::{
    BodyOnlyPolicy, DropSegment, LayoutRect, LayoutTree, NodeId, PaneDescriptor, TreeError,
    TreeEvent,
};

struct Fixture {
    tree: LayoutTree,
    row: NodeId,
    left: NodeId,
    right: NodeId,
    a: NodeId,
    b: NodeId,
}

fn fixture() -> Fixture {
    let mut tree = LayoutTree::new().unwrap();
    let row = tree.add_row().unwrap();
    let left = tree.add_stack(row).unwrap();
    let right = tree.add_stack(row).unwrap();
    let a = tree.add_pane(left, PaneDescriptor::new("a")).unwrap();
    let b = tree.add_pane(left, PaneDescriptor::new("b")).unwrap();
    tree.add_pane(right, PaneDescriptor::new("c")).unwrap();
    tree.update_size(Size::new(800.0, 600.0)).unwrap();
    tree.drain_events().for_each(drop);

    Fixture {
        tree,
        row,
        left,
        right,
        a,
        b,
    }
}

#[test]
fn test_drag_below_threshold_offers_nothing() {
    let mut f = fixture();
    f.tree.begin_drag(f.a, Vec2::new(100.0, 10.0)).unwrap();

    assert!(f.tree.drag_to(Vec2::new(102.0, 12.0)).is_none());
    assert!(!f.tree.is_dragging());
    assert_eq!(f.tree.end_drag().unwrap(), None);
    assert_eq!(f.tree.parent_stack(f.a).unwrap(), f.left);
}

#[test]
fn test_end_drag_without_session() {
    let mut f = fixture();
    assert_eq!(f.tree.end_drag(), Err(TreeError::NoActiveDrag));
}

#[test]
fn test_drop_into_body_joins_stack() {
    let mut f = fixture();
    f.tree.begin_drag(f.a, Vec2::new(100.0, 10.0)).unwrap();

    let offered = f.tree.drag_to(Vec2::new(600.0, 310.0)).unwrap();
    assert_eq!(offered.stack, f.right);
    assert_eq!(offered.segment, DropSegment::Body);
    assert_eq!(offered.area, LayoutRect::new(400.0, 20.0, 400.0, 580.0));

    assert_eq!(f.tree.end_drag().unwrap(), Some(f.right));
    assert_eq!(f.tree.parent_stack(f.a).unwrap(), f.right);
    assert_eq!(f.tree.active_pane(f.right), Some(f.a));
    assert_eq!(f.tree.active_pane(f.left), Some(f.b));

    let events: Vec<_> = f.tree.drain_events().collect();
    assert_eq!(
        events,
        vec![
            TreeEvent::TabCreated { pane: f.a },
            TreeEvent::ItemDropped {
                pane: f.a,
                stack: f.right
            },
        ]
    );
}

#[test]
fn test_drop_on_right_edge_splits_row() {
    let mut f = fixture();
    f.tree.begin_drag(f.a, Vec2::new(100.0, 10.0)).unwrap();

    let offered = f.tree.drag_to(Vec2::new(780.0, 310.0)).unwrap();
    assert_eq!(offered.segment, DropSegment::Right);

    let target = f.tree.end_drag().unwrap().unwrap();
    assert_eq!(f.tree.children(f.row), &[f.left, f.right, target]);
    assert_eq!(f.tree.pane_count(target), 1);

    let new_rect = f.tree.layout(target).unwrap();
    let right_rect = f.tree.layout(f.right).unwrap();
    assert!(new_rect.x > right_rect.x);
    assert!(new_rect.width > 0.0);
    assert_eq!(new_rect.height, 600.0);
}

#[test]
fn test_drop_on_top_edge_opens_row() {
    let mut f = fixture();
    f.tree.begin_drag(f.a, Vec2::new(100.0, 10.0)).unwrap();

    let offered = f.tree.drag_to(Vec2::new(600.0, 40.0)).unwrap();
    assert_eq!(offered.segment, DropSegment::Top);

    let target = f.tree.end_drag().unwrap().unwrap();
    let rows = f.tree.rows().to_vec();
    assert_eq!(rows.len(), 2);
    assert_eq!(f.tree.children(rows[0]), &[target]);
    assert_eq!(rows[1], f.row);

    let top = f.tree.layout(rows[0]).unwrap();
    assert_eq!(top, LayoutRect::new(0.0, 0.0, 800.0, 300.0));
}

#[test]
fn test_body_only_policy_never_splits() {
    let mut f = fixture();
    f.tree.set_drop_policy(Box::new(BodyOnlyPolicy));
    f.tree.begin_drag(f.a, Vec2::new(100.0, 10.0)).unwrap();

    let offered = f.tree.drag_to(Vec2::new(780.0, 310.0)).unwrap();
    assert_eq!(offered.hovered, DropSegment::Right);
    assert_eq!(offered.segment, DropSegment::Body);

    assert_eq!(f.tree.end_drag().unwrap(), Some(f.right));
    assert_eq!(f.tree.children(f.row), &[f.left, f.right]);
    assert_eq!(f.tree.rows().len(), 1);
}

#[test]
fn test_body_only_policy_ignores_tab_strip() {
    let mut f = fixture();
    f.tree.set_drop_policy(Box::new(BodyOnlyPolicy));
    f.tree.begin_drag(f.a, Vec2::new(100.0, 10.0)).unwrap();

    assert!(f.tree.drag_to(Vec2::new(600.0, 10.0)).is_none());
    assert!(f.tree.is_dragging());
    assert_eq!(f.tree.end_drag().unwrap(), None);
}

#[test]
fn test_dragging_last_pane_out_removes_source_stack() {
    let mut f = fixture();
    f.tree.remove(f.b).unwrap();
    f.tree.drain_events().for_each(drop);

    f.tree.begin_drag(f.a, Vec2::new(100.0, 10.0)).unwrap();
    f.tree.drag_to(Vec2::new(600.0, 310.0));
    f.tree.end_drag().unwrap();

    assert!(!f.tree.contains(f.left));
    assert_eq!(f.tree.children(f.row), &[f.right]);
    assert_eq!(
        f.tree.layout(f.right),
        Some(LayoutRect::new(0.0, 0.0, 800.0, 600.0))
    );

    let events: Vec<_> = f.tree.drain_events().collect();
    assert!(events.contains(&TreeEvent::StackDestroyed { stack: f.left }));
}

#[test]
fn test_cancel_drag_leaves_tree_alone() {
    let mut f = fixture();
    f.tree.begin_drag(f.a, Vec2::new(100.0, 10.0)).unwrap();
    f.tree.drag_to(Vec2::new(600.0, 310.0));
    f.tree.cancel_drag();

    assert!(f.tree.drag_session().is_none());
    assert_eq!(f.tree.parent_stack(f.a).unwrap(), f.left);
    assert!(!f.tree.has_pending_events());
}
