//! Layout tree with Taffy layout integration.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use stormdeck_core::math::Vec2;
use stormdeck_core::{LayoutHandle, Size};
use taffy::{AvailableSpace, Dimension, Display, FlexDirection, Style, TaffyTree};

use crate::drag::DragSession;
use crate::drop_zone::{
    DropHighlight, DropSegment, DropZonePolicy, NearestEdgePolicy, SegmentArea, stack_segments,
};
use crate::error::{TreeError, TreeResult};
use crate::event::{TreeEvent, TreeEventBuffer};
use crate::types::{LayoutRect, NodeId, NodeKind, PaneDescriptor, Placement};

/// Height of a stack's tab strip unless configured otherwise.
pub const DEFAULT_HEADER_HEIGHT: f32 = 20.0;

static NEXT_TREE_HANDLE: AtomicU64 = AtomicU64::new(1);

/// A node in the layout tree.
#[derive(Debug)]
pub struct TreeNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Absolute rectangle from the last layout pass.
    pub layout: LayoutRect,
    /// Ids attached with [`LayoutTree::add_id`].
    pub ids: Vec<String>,
    /// Panes share their stack's body and have no layout node of their own.
    taffy_node: Option<taffy::NodeId>,
}

/// The workspace tree: root column, rows, stacks and panes.
pub struct LayoutTree {
    taffy: TaffyTree<()>,
    nodes: IndexMap<NodeId, TreeNode>,
    root: NodeId,
    next_id: usize,
    handle: LayoutHandle,
    /// The stack that currently holds the selection.
    selected: Option<NodeId>,
    /// The last `(stack, pane)` reported through `SelectionChanged`.
    ///
    /// Kept apart from `selected`, which [`LayoutTree::set_selection_target`]
    /// moves silently.
    announced: Option<(NodeId, Option<NodeId>)>,
    header_height: f32,
    size: Size<f32>,
    events: TreeEventBuffer,
    drag: Option<DragSession>,
    drop_policy: Box<dyn DropZonePolicy>,
}

impl LayoutTree {
    /// Create an empty tree with the nearest-edge drop policy.
    pub fn new() -> TreeResult<Self> {
        let mut taffy = TaffyTree::new();
        let root_taffy = taffy.new_leaf(root_style(Size::default()))?;

        let root = NodeId(0);
        let mut nodes = IndexMap::new();
        nodes.insert(
            root,
            TreeNode {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
                layout: LayoutRect::default(),
                ids: Vec::new(),
                taffy_node: Some(root_taffy),
            },
        );

        Ok(Self {
            taffy,
            nodes,
            root,
            next_id: 1,
            handle: LayoutHandle::from_raw(NEXT_TREE_HANDLE.fetch_add(1, Ordering::Relaxed)),
            selected: None,
            announced: None,
            header_height: DEFAULT_HEADER_HEIGHT,
            size: Size::default(),
            events: TreeEventBuffer::new(),
            drag: None,
            drop_policy: Box::new(NearestEdgePolicy::default()),
        })
    }

    /// Set the height of the tab header strip at the top of every stack.
    ///
    /// Negative heights are clamped to zero.
    pub fn with_header_height(mut self, height: f32) -> Self {
        self.header_height = height.max(0.0);
        self
    }

    /// Replace the drop-zone policy used while dragging tabs.
    pub fn set_drop_policy(&mut self, policy: Box<dyn DropZonePolicy>) {
        self.drop_policy = policy;
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Append a row at the bottom of the workspace.
    pub fn add_row(&mut self) -> TreeResult<NodeId> {
        let index = self.rows().len();
        self.insert_row(index)
    }

    /// Insert an empty row at `index` among the top-level rows.
    ///
    /// An index past the end appends.
    pub fn insert_row(&mut self, index: usize) -> TreeResult<NodeId> {
        let row = self.insert_node(NodeKind::Row, self.root, Some(index), Some(row_style()))?;
        tracing::debug!(?row, index, "row created");
        self.relayout()?;
        Ok(row)
    }

    /// Append an empty stack to a row.
    pub fn add_stack(&mut self, row: NodeId) -> TreeResult<NodeId> {
        let index = self.node(row)?.children.len();
        self.insert_stack(row, index)
    }

    /// Insert an empty stack at `index` within `row`.
    ///
    /// Emits `StackCreated`. Fails if `row` is not a row.
    pub fn insert_stack(&mut self, row: NodeId, index: usize) -> TreeResult<NodeId> {
        if !self.node(row)?.kind.is_row() {
            return Err(TreeError::NotARow(row));
        }
        let stack = self.insert_node(
            NodeKind::Stack { active: None },
            row,
            Some(index),
            Some(stack_style()),
        )?;
        tracing::debug!(?stack, ?row, "stack created");
        self.events.push(TreeEvent::StackCreated { stack });
        self.relayout()?;
        Ok(stack)
    }

    /// Append a pane to a stack and bring it to the front.
    ///
    /// Emits `ItemCreated` followed by `TabCreated`.
    pub fn add_pane(&mut self, stack: NodeId, descriptor: PaneDescriptor) -> TreeResult<NodeId> {
        if !self.node(stack)?.kind.is_stack() {
            return Err(TreeError::NotAStack(stack));
        }
        let pane = self.insert_node(NodeKind::Pane(descriptor), stack, None, None)?;
        self.set_active(stack, Some(pane))?;
        tracing::debug!(?pane, ?stack, "pane created");

        self.events.push(TreeEvent::ItemCreated { pane });
        self.events.push(TreeEvent::TabCreated { pane });
        self.relayout()?;
        Ok(pane)
    }

    /// Remove a node and everything below it.
    ///
    /// A stack left without panes is removed as well. Rows are left in place
    /// even when empty.
    pub fn remove(&mut self, node: NodeId) -> TreeResult<()> {
        if node == self.root {
            return Err(TreeError::CannotRemoveRoot);
        }
        let parent = self.node(node)?.parent;
        let index = self.detach(node)?;
        self.destroy_subtree(node)?;

        if let Some(parent) = parent {
            self.after_child_removed(parent, node, index)?;
        }
        self.relayout()
    }

    /// Move a pane to a new place in the tree.
    ///
    /// Emits `TabCreated` for the pane's new tab, then `ItemDropped`.
    /// Returns the stack the pane ended up in.
    pub fn move_pane(&mut self, pane: NodeId, placement: Placement) -> TreeResult<NodeId> {
        if !self.node(pane)?.kind.is_pane() {
            return Err(TreeError::NotAPane(pane));
        }
        let source = self.parent_stack(pane)?;
        let was_selected = self.selected == Some(source) && self.active_pane(source) == Some(pane);
        let was_announced = self.announced == Some((source, Some(pane)));

        let target = match placement {
            Placement::Into { stack, .. } => {
                if !self.node(stack)?.kind.is_stack() {
                    return Err(TreeError::NotAStack(stack));
                }
                stack
            }
            Placement::NewStack { row, index } => self.insert_stack(row, index)?,
            Placement::NewRow { index } => {
                let row = self.insert_row(index)?;
                self.add_stack(row)?
            }
        };
        let insert_at = match placement {
            Placement::Into { index, .. } => index,
            _ => None,
        };

        let removed_at = self.detach(pane)?;
        self.attach(pane, target, insert_at)?;
        self.set_active(target, Some(pane))?;
        if source != target {
            self.after_child_removed(source, pane, removed_at)?;
        }
        if was_selected {
            self.selected = Some(target);
        }
        if was_announced {
            self.announced = Some((target, Some(pane)));
        }

        tracing::debug!(?pane, ?source, ?target, "pane moved");
        self.events.push(TreeEvent::TabCreated { pane });
        self.events.push(TreeEvent::ItemDropped {
            pane,
            stack: target,
        });
        self.relayout()?;
        Ok(target)
    }

    // ------------------------------------------------------------------
    // Ids and selection
    // ------------------------------------------------------------------

    /// Attach an external id to a node. Ids are unique across the tree.
    pub fn add_id(&mut self, node: NodeId, id: impl Into<String>) -> TreeResult<()> {
        let id = id.into();
        if let Some(owner) = self.find_by_id(&id) {
            if owner == node {
                return Ok(());
            }
            return Err(TreeError::DuplicateId { id, owner });
        }
        self.node_mut(node)?.ids.push(id);
        Ok(())
    }

    /// Look a node up by an id attached with [`add_id`](Self::add_id).
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.ids.iter().any(|i| i == id))
            .map(|(node_id, _)| *node_id)
    }

    /// Ids attached to a node, in the order they were added.
    pub fn ids(&self, node: NodeId) -> &[String] {
        self.nodes.get(&node).map_or(&[], |n| n.ids.as_slice())
    }

    /// Select a pane (bringing it to the front of its stack) or a stack.
    ///
    /// Emits `SelectionChanged` only when the `(stack, pane)` pair differs
    /// from the last one this method reported. Silent changes made through
    /// [`set_active_pane`](Self::set_active_pane) or
    /// [`set_selection_target`](Self::set_selection_target) do not count, so
    /// selecting a freshly created pane always emits. Returns whether an
    /// event was emitted.
    pub fn select(&mut self, node: NodeId) -> TreeResult<bool> {
        let (stack, pane) = match &self.node(node)?.kind {
            NodeKind::Pane(_) => (self.parent_stack(node)?, Some(node)),
            NodeKind::Stack { active } => (node, *active),
            _ => return Err(TreeError::NotAStack(node)),
        };

        if pane.is_some() {
            self.set_active(stack, pane)?;
        }

        let changed = self.announced != Some((stack, pane));
        self.selected = Some(stack);
        self.announced = Some((stack, pane));
        if changed {
            tracing::debug!(?stack, ?pane, "selection changed");
            self.events.push(TreeEvent::SelectionChanged { stack, pane });
        }
        Ok(changed)
    }

    /// Bring a pane to the front of its stack without touching the selection.
    pub fn set_active_pane(&mut self, pane: NodeId) -> TreeResult<()> {
        let stack = self.parent_stack(pane)?;
        self.set_active(stack, Some(pane))
    }

    /// Make a stack the selection target without emitting an event.
    ///
    /// This does not count as a reported selection: a later
    /// [`select`](Self::select) of the same pane still emits.
    pub fn set_selection_target(&mut self, stack: NodeId) -> TreeResult<()> {
        if !self.node(stack)?.kind.is_stack() {
            return Err(TreeError::NotAStack(stack));
        }
        self.selected = Some(stack);
        Ok(())
    }

    /// The stack holding the selection, whether it was set by
    /// [`select`](Self::select) or silently.
    pub fn selected_stack(&self) -> Option<NodeId> {
        self.selected
    }

    /// The pane in front of the selected stack.
    pub fn selected_pane(&self) -> Option<NodeId> {
        self.selected.and_then(|stack| self.active_pane(stack))
    }

    /// The pane in front of a stack. `None` for empty stacks and non-stacks.
    pub fn active_pane(&self, stack: NodeId) -> Option<NodeId> {
        match self.nodes.get(&stack).map(|n| &n.kind) {
            Some(NodeKind::Stack { active }) => *active,
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Lay the tree out for a new container size.
    pub fn update_size(&mut self, size: Size<f32>) -> TreeResult<()> {
        self.size = size;
        let root = self.taffy_node(self.root)?;
        self.taffy.set_style(root, root_style(size))?;
        self.taffy.compute_layout(
            root,
            taffy::Size {
                width: AvailableSpace::Definite(size.width),
                height: AvailableSpace::Definite(size.height),
            },
        )?;
        self.cache_layouts()
    }

    /// The size last passed to [`update_size`](Self::update_size).
    pub fn size(&self) -> Size<f32> {
        self.size
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    /// Absolute rectangle of a node after the last layout pass.
    ///
    /// Panes report their stack's body, below the header strip.
    pub fn layout(&self, node: NodeId) -> Option<LayoutRect> {
        self.nodes.get(&node).map(|n| n.layout)
    }

    /// Rectangle of a pane's body, below its stack's tab strip.
    pub fn pane_body(&self, pane: NodeId) -> Option<LayoutRect> {
        self.nodes
            .get(&pane)
            .filter(|n| n.kind.is_pane())
            .map(|n| n.layout)
    }

    /// Hover and highlight areas of a stack.
    pub fn drop_segments(&self, stack: NodeId) -> TreeResult<Vec<SegmentArea>> {
        let node = self.node(stack)?;
        if !node.kind.is_stack() {
            return Err(TreeError::NotAStack(stack));
        }
        Ok(stack_segments(node.layout, self.header_height))
    }

    // ------------------------------------------------------------------
    // Tab dragging
    // ------------------------------------------------------------------

    /// Start a tab drag for `pane` at `pointer`.
    ///
    /// Replaces any drag already in progress. Fails if `pane` is not a pane.
    pub fn begin_drag(&mut self, pane: NodeId, pointer: Vec2) -> TreeResult<()> {
        if !self.node(pane)?.kind.is_pane() {
            return Err(TreeError::NotAPane(pane));
        }
        self.drag = Some(DragSession::new(pane, pointer));
        Ok(())
    }

    /// Track the pointer. Returns the drop currently offered, if any.
    pub fn drag_to(&mut self, pointer: Vec2) -> Option<DropHighlight> {
        let active = match self.drag.as_mut() {
            Some(session) => session.update(pointer),
            None => return None,
        };
        if !active {
            return None;
        }

        let highlight = self.drop_highlight_at(pointer);
        if let Some(session) = self.drag.as_mut() {
            session.highlight = highlight;
        }
        highlight
    }

    /// Finish the drag, applying the offered drop.
    ///
    /// Returns the stack that received the pane, or `None` when nothing was
    /// offered at release.
    pub fn end_drag(&mut self) -> TreeResult<Option<NodeId>> {
        let session = self.drag.take().ok_or(TreeError::NoActiveDrag)?;
        let Some(highlight) = session.highlight.filter(|_| session.is_active) else {
            tracing::trace!(pane = ?session.pane, "drag released without a drop target");
            return Ok(None);
        };

        let placement = self.placement_for(&highlight)?;
        self.move_pane(session.pane, placement).map(Some)
    }

    /// Drop the current drag session without moving anything.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Whether a drag session exists, active or not.
    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(|s| s.is_active)
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Process-unique handle identifying this tree to other components.
    pub fn handle(&self) -> LayoutHandle {
        self.handle
    }

    /// The full node record, including its cached layout.
    pub fn get(&self, node: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(&node).map(|n| &n.kind)
    }

    /// The descriptor a pane was created with. `None` for other nodes.
    pub fn descriptor(&self, pane: NodeId) -> Option<&PaneDescriptor> {
        match self.kind(pane) {
            Some(NodeKind::Pane(descriptor)) => Some(descriptor),
            _ => None,
        }
    }

    /// The node's parent. `None` for the root and unknown nodes.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    /// Children in layout order. Empty for panes and unknown nodes.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(&node).map_or(&[], |n| n.children.as_slice())
    }

    /// Top-level rows, top to bottom.
    pub fn rows(&self) -> &[NodeId] {
        self.children(self.root)
    }

    /// The stack a pane lives in.
    ///
    /// Fails with `NotAPane` for anything that is not a pane.
    pub fn parent_stack(&self, pane: NodeId) -> TreeResult<NodeId> {
        let node = self.node(pane)?;
        if !node.kind.is_pane() {
            return Err(TreeError::NotAPane(pane));
        }
        let parent = node.parent.ok_or(TreeError::NodeNotFound(pane))?;
        if !self.node(parent)?.kind.is_stack() {
            return Err(TreeError::NotAStack(parent));
        }
        Ok(parent)
    }

    /// Number of panes at or below `node`.
    pub fn pane_count(&self, node: NodeId) -> usize {
        let Some(n) = self.nodes.get(&node) else {
            return 0;
        };
        if n.kind.is_pane() {
            return 1;
        }
        n.children.iter().map(|&c| self.pane_count(c)).sum()
    }

    /// All panes in reading order.
    pub fn panes(&self) -> Vec<NodeId> {
        self.preorder().filter(|id| self.kind(*id).is_some_and(NodeKind::is_pane)).collect()
    }

    /// All stacks in reading order.
    pub fn stacks(&self) -> Vec<NodeId> {
        self.preorder().filter(|id| self.kind(*id).is_some_and(NodeKind::is_stack)).collect()
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Take the queued lifecycle events in the order they happened.
    pub fn drain_events(&mut self) -> impl Iterator<Item = TreeEvent> + '_ {
        self.events.drain()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn node(&self, node: NodeId) -> TreeResult<&TreeNode> {
        self.nodes.get(&node).ok_or(TreeError::NodeNotFound(node))
    }

    fn node_mut(&mut self, node: NodeId) -> TreeResult<&mut TreeNode> {
        self.nodes.get_mut(&node).ok_or(TreeError::NodeNotFound(node))
    }

    fn taffy_node(&self, node: NodeId) -> TreeResult<taffy::NodeId> {
        self.node(node)?
            .taffy_node
            .ok_or(TreeError::Layout(format!("node {:?} has no layout node", node)))
    }

    fn preorder(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut pending = vec![self.root];
        std::iter::from_fn(move || {
            let next = pending.pop()?;
            pending.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    fn insert_node(
        &mut self,
        kind: NodeKind,
        parent: NodeId,
        index: Option<usize>,
        style: Option<Style>,
    ) -> TreeResult<NodeId> {
        let taffy_node = style.map(|s| self.taffy.new_leaf(s)).transpose()?;
        let id = NodeId(self.next_id);
        self.next_id += 1;

        self.nodes.insert(
            id,
            TreeNode {
                kind,
                parent: None,
                children: Vec::new(),
                layout: LayoutRect::default(),
                ids: Vec::new(),
                taffy_node,
            },
        );
        self.attach(id, parent, index)?;
        Ok(id)
    }

    fn attach(&mut self, node: NodeId, parent: NodeId, index: Option<usize>) -> TreeResult<()> {
        let child_taffy = self.node(node)?.taffy_node;
        let parent_node = self.node_mut(parent)?;
        let index = index
            .unwrap_or(parent_node.children.len())
            .min(parent_node.children.len());
        parent_node.children.insert(index, node);
        let parent_taffy = parent_node.taffy_node;

        if let (Some(parent_taffy), Some(child_taffy)) = (parent_taffy, child_taffy) {
            self.taffy
                .insert_child_at_index(parent_taffy, index, child_taffy)?;
        }
        self.node_mut(node)?.parent = Some(parent);
        Ok(())
    }

    /// Unlink a node from its parent. Returns its former index.
    fn detach(&mut self, node: NodeId) -> TreeResult<usize> {
        let (parent, child_taffy) = {
            let n = self.node(node)?;
            (n.parent, n.taffy_node)
        };
        let Some(parent) = parent else {
            return Ok(0);
        };

        let parent_node = self.node_mut(parent)?;
        let index = parent_node
            .children
            .iter()
            .position(|&c| c == node)
            .ok_or(TreeError::NodeNotFound(node))?;
        parent_node.children.remove(index);
        let parent_taffy = parent_node.taffy_node;

        if let (Some(parent_taffy), Some(child_taffy)) = (parent_taffy, child_taffy) {
            self.taffy.remove_child(parent_taffy, child_taffy)?;
        }
        self.node_mut(node)?.parent = None;
        Ok(index)
    }

    fn destroy_subtree(&mut self, node: NodeId) -> TreeResult<()> {
        let children = self.node(node)?.children.clone();
        for child in children {
            self.destroy_subtree(child)?;
        }

        let removed = self
            .nodes
            .shift_remove(&node)
            .ok_or(TreeError::NodeNotFound(node))?;
        if let Some(taffy_node) = removed.taffy_node {
            self.taffy.remove(taffy_node)?;
        }
        if self.selected == Some(node) {
            self.selected = None;
        }
        if self
            .announced
            .is_some_and(|(stack, pane)| stack == node || pane == Some(node))
        {
            self.announced = None;
        }
        if self.drag.as_ref().is_some_and(|d| d.pane == node) {
            self.drag = None;
        }

        match removed.kind {
            NodeKind::Pane(descriptor) => {
                tracing::debug!(pane = ?node, ids = ?removed.ids, "pane destroyed");
                self.events.push(TreeEvent::ItemDestroyed {
                    pane: node,
                    ids: removed.ids,
                    slot: descriptor.slot,
                });
            }
            NodeKind::Stack { .. } => {
                self.events.push(TreeEvent::StackDestroyed { stack: node });
            }
            _ => {}
        }
        Ok(())
    }

    /// Stack cleanup after a child left: empty stacks go, otherwise a
    /// neighbour of the departed pane comes to the front.
    fn after_child_removed(&mut self, parent: NodeId, removed: NodeId, index: usize) -> TreeResult<()> {
        let (is_stack, remaining, active) = {
            let node = self.node(parent)?;
            let active = match node.kind {
                NodeKind::Stack { active } => active,
                _ => None,
            };
            (node.kind.is_stack(), node.children.clone(), active)
        };
        if !is_stack {
            return Ok(());
        }

        if remaining.is_empty() {
            tracing::debug!(stack = ?parent, "removing empty stack");
            self.detach(parent)?;
            return self.destroy_subtree(parent);
        }

        if active == Some(removed) {
            let next = remaining[index.saturating_sub(1).min(remaining.len() - 1)];
            self.set_active(parent, Some(next))?;
        }
        Ok(())
    }

    fn set_active(&mut self, stack: NodeId, pane: Option<NodeId>) -> TreeResult<()> {
        match &mut self.node_mut(stack)?.kind {
            NodeKind::Stack { active } => {
                *active = pane;
                Ok(())
            }
            _ => Err(TreeError::NotAStack(stack)),
        }
    }

    fn placement_for(&self, highlight: &DropHighlight) -> TreeResult<Placement> {
        let stack = highlight.stack;
        let placement = match highlight.segment {
            DropSegment::Header | DropSegment::Body => Placement::Into { stack, index: None },
            DropSegment::Left | DropSegment::Right => {
                let row = self.node(stack)?.parent.ok_or(TreeError::NodeNotFound(stack))?;
                let at = self.index_in_parent(stack)?;
                let index = if highlight.segment.is_before() { at } else { at + 1 };
                Placement::NewStack { row, index }
            }
            DropSegment::Top | DropSegment::Bottom => {
                let row = self.node(stack)?.parent.ok_or(TreeError::NodeNotFound(stack))?;
                let at = self.index_in_parent(row)?;
                let index = if highlight.segment.is_before() { at } else { at + 1 };
                Placement::NewRow { index }
            }
        };
        Ok(placement)
    }

    fn index_in_parent(&self, node: NodeId) -> TreeResult<usize> {
        let parent = self.node(node)?.parent.ok_or(TreeError::NodeNotFound(node))?;
        self.children(parent)
            .iter()
            .position(|&c| c == node)
            .ok_or(TreeError::NodeNotFound(node))
    }

    fn drop_highlight_at(&self, pointer: Vec2) -> Option<DropHighlight> {
        self.stacks().into_iter().find_map(|stack| {
            let rect = self.layout(stack)?;
            if !rect.contains(pointer) {
                return None;
            }
            let areas = stack_segments(rect, self.header_height);
            self.drop_policy.highlight(stack, &areas, pointer)
        })
    }

    /// Re-run layout after a structural change, once a size is known.
    fn relayout(&mut self) -> TreeResult<()> {
        if self.size.width > 0.0 && self.size.height > 0.0 {
            self.update_size(self.size)?;
        }
        Ok(())
    }

    /// Copy Taffy results into absolute node rectangles.
    fn cache_layouts(&mut self) -> TreeResult<()> {
        let mut pending = vec![(self.root, LayoutRect::default())];
        while let Some((id, parent_rect)) = pending.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let rect = match node.taffy_node {
                Some(taffy_node) => {
                    let layout = self.taffy.layout(taffy_node)?;
                    LayoutRect::new(
                        parent_rect.x + layout.location.x,
                        parent_rect.y + layout.location.y,
                        layout.size.width,
                        layout.size.height,
                    )
                }
                None => body_of(parent_rect, self.header_height),
            };
            let children = node.children.clone();
            if let Some(node) = self.nodes.get_mut(&id) {
                node.layout = rect;
            }
            pending.extend(children.into_iter().map(|child| (child, rect)));
        }
        Ok(())
    }
}

fn body_of(stack: LayoutRect, header_height: f32) -> LayoutRect {
    let header = header_height.min(stack.height).max(0.0);
    LayoutRect::new(stack.x, stack.y + header, stack.width, stack.height - header)
}

fn root_style(size: Size<f32>) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        size: taffy::Size {
            width: Dimension::Length(size.width),
            height: Dimension::Length(size.height),
        },
        ..Default::default()
    }
}

fn row_style() -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        flex_grow: 1.0,
        flex_shrink: 1.0,
        flex_basis: Dimension::Length(0.0),
        ..Default::default()
    }
}

fn stack_style() -> Style {
    Style {
        display: Display::Flex,
        flex_grow: 1.0,
        flex_shrink: 1.0,
        flex_basis: Dimension::Length(0.0),
        ..Default::default()
    }
}
