//! The workspace controller.
//!
//! Reconciles three models that change independently: the layout tree, the
//! shared store and the pane widgets. The tree reports lifecycle changes as
//! events; [`WorkspaceController::process_events`] drains them, updates the
//! store and keeps the widget index in step.

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use serde::Serialize;
use stormdeck_core::alloc::HashMap;
use stormdeck_core::math::Vec2;
use stormdeck_core::profiling::{profile_function, profile_scope};
use stormdeck_core::{PaneId, Size, SlotIndex, WorkspaceConfig, WorkspaceId};
use stormdeck_layout::{
    LayoutTree, NodeId, PaneDescriptor, TreeError, TreeEvent, policy_for,
};
use stormdeck_pane::{EngineFactory, PaneWidget};
use stormdeck_store::{SharedStore, StoreError, StoreKey, StoreValue};

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::event::{WorkspaceEvent, WorkspaceEventBuffer};
use crate::menu::{MenuAction, PaneFlags, TabMenu};
use crate::resize::ResizeWatcher;

/// Component name used for panes created by [`WorkspaceController::create_windows`].
pub const ANIMATION_COMPONENT: &str = "animation";

type SelectionCallback = Box<dyn FnMut(&PaneId) + Send>;

/// What the controller knows about a live pane.
///
/// The visual node belongs to the tree; this is only an index entry.
pub struct PaneEntry {
    pub node: NodeId,
    pub slot: SlotIndex,
    pub container_element_id: String,
    pub flags: PaneFlags,
    widget: PaneWidget,
}

impl PaneEntry {
    /// The adapter rendering this pane.
    pub fn widget(&self) -> &PaneWidget {
        &self.widget
    }
}

pub struct WorkspaceController {
    config: WorkspaceConfig,
    store: SharedStore,
    tree: LayoutTree,
    factory: Arc<dyn EngineFactory>,
    workspace: Option<WorkspaceId>,
    panes: IndexMap<PaneId, PaneEntry>,
    by_node: HashMap<NodeId, PaneId>,
    menus: HashMap<PaneId, TabMenu>,
    resize: ResizeWatcher,
    on_selection: SelectionCallback,
    events: WorkspaceEventBuffer,
}

impl WorkspaceController {
    /// Create a controller over `store` with the default [`WorkspaceConfig`].
    ///
    /// Nothing is laid out until [`set_container`](Self::set_container) binds a
    /// workspace id.
    pub fn new(store: SharedStore, factory: Arc<dyn EngineFactory>) -> WorkspaceResult<Self> {
        Self::with_config(store, factory, WorkspaceConfig::default())
    }

    /// Create a controller with an explicit configuration.
    ///
    /// The configured drop policy is installed on the tree and the resize
    /// policy decides how container sizes reach the panes.
    pub fn with_config(
        store: SharedStore,
        factory: Arc<dyn EngineFactory>,
        config: WorkspaceConfig,
    ) -> WorkspaceResult<Self> {
        let mut tree = LayoutTree::new()?.with_header_height(config.header_height);
        tree.set_drop_policy(policy_for(config.drop_policy));

        Ok(Self {
            resize: ResizeWatcher::new(config.resize),
            config,
            store,
            tree,
            factory,
            workspace: None,
            panes: IndexMap::new(),
            by_node: HashMap::new(),
            menus: HashMap::new(),
            on_selection: Box::new(|_| {}),
            events: WorkspaceEventBuffer::new(),
        })
    }

    /// Install the global log subscriber using the configured filter.
    ///
    /// Returns `false` if one was already installed.
    pub fn init_logging(&self) -> bool {
        stormdeck_core::logging::init_with_filter(&self.config.log_filter)
    }

    // ------------------------------------------------------------------
    // Host surface
    // ------------------------------------------------------------------

    /// Bind the controller to a workspace container.
    ///
    /// Resets the creation counter to zero and publishes the layout handle.
    /// Calling it again with the same id overwrites rather than failing.
    pub fn set_container(&mut self, id: &str) -> WorkspaceResult<&mut Self> {
        let workspace = WorkspaceId::new(id)?;
        self.store
            .set(StoreKey::WindowsCreated(workspace.clone()), StoreValue::Count(0));
        self.store.set(
            StoreKey::Layout(workspace.clone()),
            StoreValue::Layout(self.tree.handle()),
        );
        tracing::debug!(workspace = %workspace, "workspace initialized");
        self.workspace = Some(workspace);
        Ok(self)
    }

    /// Lay out `count` new panes, `panes_per_row` stacks to a row.
    pub fn create_windows(&mut self, count: usize) -> WorkspaceResult<&mut Self> {
        self.workspace()?;
        let per_row = self.config.panes_per_row.max(1);

        let mut row = None;
        for i in 0..count {
            let target_row = match row {
                Some(row) if i % per_row != 0 => row,
                _ => self.tree.add_row()?,
            };
            row = Some(target_row);

            let stack = self.tree.add_stack(target_row)?;
            let descriptor =
                PaneDescriptor::new(ANIMATION_COMPONENT).with_title(format!("Window {}", i + 1));
            self.tree.add_pane(stack, descriptor)?;
        }
        self.process_events()?;
        Ok(self)
    }

    /// Add a pane to an existing stack. Returns the id it was given.
    pub fn add_pane(&mut self, stack: NodeId, descriptor: PaneDescriptor) -> WorkspaceResult<PaneId> {
        self.workspace()?;
        let node = self.tree.add_pane(stack, descriptor)?;
        self.process_events()?;
        self.by_node
            .get(&node)
            .cloned()
            .ok_or_else(|| WorkspaceError::UnknownPane(format!("{:?}", node)))
    }

    /// Write a configuration into the next free slot.
    pub fn push<T: Serialize + ?Sized>(&mut self, config: &T) -> WorkspaceResult<&mut Self> {
        let index = self.get_num_windows() as i64;
        self.set(Some(index), config)
    }

    /// Write a configuration into a slot. `None` is a no-op.
    pub fn set<T: Serialize + ?Sized>(
        &mut self,
        slot: Option<i64>,
        config: &T,
    ) -> WorkspaceResult<&mut Self> {
        let Some(index) = slot else {
            tracing::trace!("set without a slot ignored");
            return Ok(self);
        };
        let slot = SlotIndex::try_from(index)?;
        let raw = serde_json::to_string(config)?;
        self.store.set(StoreKey::Slot(slot), StoreValue::Config(raw));
        self.sync_panes();
        Ok(self)
    }

    /// Clear a slot to null. The pane showing it stays in place.
    pub fn unset(&mut self, slot: Option<i64>) -> WorkspaceResult<&mut Self> {
        let Some(index) = slot else {
            return Ok(self);
        };
        let slot = SlotIndex::try_from(index)?;
        self.store.set(StoreKey::Slot(slot), StoreValue::Null);
        self.sync_panes();
        Ok(self)
    }

    /// Select the pane showing a slot, through the published layout handle.
    ///
    /// A no-op when the slot has no pane or no layout handle is published.
    pub fn select(&mut self, slot: Option<i64>) -> WorkspaceResult<&mut Self> {
        let Some(index) = slot else {
            return Ok(self);
        };
        let slot = SlotIndex::try_from(index)?;
        let workspace = self.workspace()?.clone();

        let Some(handle) = self
            .store
            .get(&StoreKey::Layout(workspace))
            .and_then(|v| v.as_layout())
        else {
            tracing::trace!(%slot, "no layout handle, select ignored");
            return Ok(self);
        };
        let Some(pane) = self
            .store
            .get(&StoreKey::Window(slot))
            .and_then(|v| v.as_pane().cloned())
        else {
            tracing::trace!(%slot, "slot has no pane, select ignored");
            return Ok(self);
        };
        if handle != self.tree.handle() {
            tracing::warn!(%slot, "layout handle belongs to another tree, select ignored");
            return Ok(self);
        }

        let node = self
            .tree
            .find_by_id(pane.as_str())
            .ok_or_else(|| WorkspaceError::UnknownPane(pane.to_string()))?;
        self.tree.select(node)?;
        self.process_events()?;
        Ok(self)
    }

    /// The pane recorded as selected in the store.
    ///
    /// `None` before any selection, after the selected pane went away with no
    /// other pane left, or before the container is set.
    pub fn get_selected(&self) -> Option<PaneId> {
        let workspace = self.workspace.as_ref()?;
        self.store
            .get(&StoreKey::Selected(workspace.clone()))
            .and_then(|v| v.as_pane().cloned())
    }

    /// Number of configuration slots tracked, null slots included.
    pub fn get_num_windows(&self) -> usize {
        self.store.slot_count()
    }

    /// Creation events seen since the container was set. Never decreases.
    pub fn num_windows_created(&self) -> WorkspaceResult<u64> {
        let workspace = self.workspace()?.clone();
        Ok(self.store.count(&StoreKey::WindowsCreated(workspace))?)
    }

    /// Register the callback run after every real selection change.
    pub fn on_selection_changed<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&PaneId) + Send + 'static,
    {
        self.on_selection = Box::new(callback);
        self
    }

    // ------------------------------------------------------------------
    // Event loop
    // ------------------------------------------------------------------

    /// Drain tree events until none are left, then let panes pick up slot
    /// changes.
    ///
    /// Each event's handler runs to completion before the next one is looked
    /// at. Events queued by a handler are processed in the same call. A
    /// failing handler does not stop the loop: the remaining events are still
    /// handled and the first error is returned at the end.
    pub fn process_events(&mut self) -> WorkspaceResult<()> {
        profile_function!();

        let mut first_error = None;
        loop {
            let batch: Vec<TreeEvent> = self.tree.drain_events().collect();
            if batch.is_empty() {
                break;
            }
            for event in batch {
                if let Err(err) = self.dispatch(event) {
                    tracing::warn!(error = %err, "tree event handler failed");
                    first_error.get_or_insert(err);
                }
            }
        }
        self.sync_panes();
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn dispatch(&mut self, event: TreeEvent) -> WorkspaceResult<()> {
        match event {
            TreeEvent::ItemCreated { pane } => {
                if let Err(err) = self.handle_pane_created(pane) {
                    self.discard_unregistered(pane)?;
                    return Err(err);
                }
            }
            TreeEvent::TabCreated { pane } => self.handle_tab_created(pane)?,
            TreeEvent::SelectionChanged { pane: Some(node), .. } => {
                if let Some(id) = self.by_node.get(&node).cloned() {
                    self.handle_selection_changed(&id)?;
                }
            }
            TreeEvent::SelectionChanged { stack, pane: None } => {
                tracing::trace!(?stack, "empty stack selected");
            }
            TreeEvent::ItemDropped { .. } => {
                self.handle_item_dropped()?;
            }
            TreeEvent::ItemDestroyed { pane, .. } => self.handle_item_destroyed(pane)?,
            TreeEvent::StackCreated { stack } | TreeEvent::StackDestroyed { stack } => {
                tracing::trace!(?stack, "stack lifecycle");
            }
        }
        Ok(())
    }

    /// Give a new pane its id, slot and widget, and count its creation.
    pub fn handle_pane_created(&mut self, node: NodeId) -> WorkspaceResult<PaneId> {
        let workspace = self.workspace()?.clone();
        let counter = StoreKey::WindowsCreated(workspace.clone());
        if self.store.get(&counter).is_none() {
            return Err(WorkspaceError::NotInitialized);
        }
        let created = self.store.count(&counter)?;

        let descriptor = self
            .tree
            .descriptor(node)
            .cloned()
            .ok_or_else(|| WorkspaceError::UnknownPane(format!("{:?}", node)))?;
        let slot = match descriptor.slot {
            Some(slot) => slot,
            None => self.free_slot_from(created)?,
        };

        let id = PaneId::for_slot(&workspace, slot);
        if self.panes.contains_key(&id) {
            return Err(WorkspaceError::DuplicatePane(id));
        }
        self.tree.add_id(node, id.as_str()).map_err(|err| match err {
            TreeError::DuplicateId { .. } => WorkspaceError::DuplicatePane(id.clone()),
            other => other.into(),
        })?;

        let stack = self.tree.parent_stack(node)?;
        self.tree.set_selection_target(stack)?;
        if self.get_selected().as_ref() == Some(&id) {
            self.tree.select(node)?;
        }

        self.store
            .set(StoreKey::Window(slot), StoreValue::Pane(id.clone()));
        let mut widget = PaneWidget::new(id.clone(), self.store.slot_view(slot), self.factory.clone());
        widget.mount();

        self.panes.insert(
            id.clone(),
            PaneEntry {
                node,
                slot,
                container_element_id: id.container_element_id(),
                flags: PaneFlags::empty(),
                widget,
            },
        );
        self.by_node.insert(node, id.clone());

        self.store
            .compare_and_swap(
                counter,
                &StoreValue::Count(created),
                StoreValue::Count(created + 1),
            )
            .map_err(|err| match err {
                StoreError::Conflict { found, .. } => WorkspaceError::CounterRace {
                    expected: created,
                    found: found.as_count(),
                },
                other => other.into(),
            })?;

        tracing::debug!(pane = %id, %slot, created = created + 1, "pane created");
        Ok(id)
    }

    /// First slot at or after the creation count that no live pane holds.
    ///
    /// The counter alone can point at a taken slot once `set_container` has
    /// reset it while panes are still alive.
    fn free_slot_from(&self, created: u64) -> WorkspaceResult<SlotIndex> {
        let mut index = i64::try_from(created).unwrap_or(i64::MAX);
        let taken: Vec<SlotIndex> = self.panes.values().map(|entry| entry.slot).collect();
        loop {
            let slot = SlotIndex::try_from(index)?;
            if !taken.contains(&slot) {
                return Ok(slot);
            }
            index = index.saturating_add(1);
        }
    }

    /// Take a pane that could not be registered back out of the tree, along
    /// with the stack and row it leaves empty.
    fn discard_unregistered(&mut self, node: NodeId) -> WorkspaceResult<()> {
        if self.by_node.contains_key(&node) || !self.tree.contains(node) {
            return Ok(());
        }
        let stack = self.tree.parent_stack(node)?;
        let row = self.tree.parent(stack);

        self.tree.remove(node)?;
        if let Some(row) = row
            && !self.tree.contains(stack)
            && self.tree.contains(row)
            && self.tree.children(row).is_empty()
        {
            self.tree.remove(row)?;
        }
        tracing::warn!(?node, "unregistered pane removed from the layout");
        Ok(())
    }

    /// Bind the tab menu and surface the tab if it holds the selection.
    pub fn handle_tab_created(&mut self, node: NodeId) -> WorkspaceResult<()> {
        let Some(id) = self.by_node.get(&node).cloned() else {
            tracing::trace!(?node, "tab for an unindexed pane");
            return Ok(());
        };

        let menu = self
            .menus
            .entry(id.clone())
            .or_insert_with(|| TabMenu::new(id.clone()));
        if menu.attach() {
            tracing::trace!(pane = %id, "tab menu attached");
        }

        if self.get_selected().as_ref() == Some(&id) {
            self.tree.set_active_pane(node)?;
        }
        Ok(())
    }

    /// Record a new selection. Returns whether anything changed.
    ///
    /// Selecting the pane that is already selected writes nothing and does
    /// not run the callback.
    pub fn handle_selection_changed(&mut self, pane: &PaneId) -> WorkspaceResult<bool> {
        let workspace = self.workspace()?.clone();
        if self.get_selected().as_ref() == Some(pane) {
            tracing::trace!(pane = %pane, "selection unchanged");
            return Ok(false);
        }
        if !self.panes.contains_key(pane) {
            return Err(WorkspaceError::UnknownPane(pane.to_string()));
        }

        self.store
            .set(StoreKey::Selected(workspace), StoreValue::Pane(pane.clone()));
        (self.on_selection)(pane);
        self.events.push(WorkspaceEvent::SelectionChanged { pane: pane.clone() });
        tracing::debug!(pane = %pane, "selection changed");
        Ok(true)
    }

    /// Remove top-level rows left without panes. Returns how many went.
    pub fn handle_item_dropped(&mut self) -> WorkspaceResult<usize> {
        let empty: Vec<NodeId> = self
            .tree
            .rows()
            .iter()
            .copied()
            .filter(|&row| self.tree.pane_count(row) == 0)
            .collect();

        for &row in &empty {
            self.tree.remove(row)?;
        }
        if !empty.is_empty() {
            tracing::debug!(removed = empty.len(), "pruned empty rows");
        }
        Ok(empty.len())
    }

    /// Tear down everything the controller holds for a departed pane.
    fn handle_item_destroyed(&mut self, node: NodeId) -> WorkspaceResult<()> {
        let Some(id) = self.by_node.remove(&node) else {
            return Ok(());
        };
        let Some(mut entry) = self.panes.shift_remove(&id) else {
            return Ok(());
        };

        entry.widget.destroy();
        self.menus.remove(&id);
        self.store.remove(&StoreKey::Window(entry.slot));
        self.events.push(WorkspaceEvent::PaneRemoved {
            pane: id.clone(),
            slot: entry.slot,
        });
        tracing::debug!(pane = %id, slot = %entry.slot, "pane removed");

        if self.get_selected().as_ref() == Some(&id) {
            self.reselect_after_removal()?;
        }
        Ok(())
    }

    /// Keep `selected` pointing at a live pane: clear it, then select the
    /// first pane left in the tree.
    fn reselect_after_removal(&mut self) -> WorkspaceResult<()> {
        let workspace = self.workspace()?.clone();
        self.store.set(StoreKey::Selected(workspace), StoreValue::Null);

        let Some(first) = self.tree.panes().into_iter().find(|n| self.by_node.contains_key(n)) else {
            return Ok(());
        };
        if !self.tree.select(first)? {
            // The tree already considered it selected, so no event will come.
            if let Some(id) = self.by_node.get(&first).cloned() {
                self.handle_selection_changed(&id)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tabs and menus
    // ------------------------------------------------------------------

    /// Pointer pressed on a pane's tab: select it within its stack.
    pub fn on_tab_pointer_down(&mut self, pane: &PaneId) -> WorkspaceResult<()> {
        let node = self.node_of(pane)?;
        self.tree.select(node)?;
        self.process_events()
    }

    /// Open a pane's tab menu and return the actions it offers.
    ///
    /// Opening an already open menu is harmless. Fails for panes whose tab was
    /// never created.
    pub fn open_tab_menu(&mut self, pane: &PaneId) -> WorkspaceResult<&'static [MenuAction]> {
        let menu = self
            .menus
            .get_mut(pane)
            .ok_or_else(|| WorkspaceError::UnknownPane(pane.to_string()))?;
        if !menu.open() {
            tracing::trace!(pane = %pane, "tab menu already open");
        }
        Ok(menu.actions())
    }

    /// Close a pane's tab menu. Returns whether it was open.
    pub fn close_tab_menu(&mut self, pane: &PaneId) -> bool {
        self.menus.get_mut(pane).is_some_and(TabMenu::close)
    }

    /// Run a tab menu action for a pane, closing its menu first.
    ///
    /// Fullscreen, favorite and share only raise a [`WorkspaceEvent`] for the
    /// host. Rotation also rebuilds the pane's engine. Removal tears the pane
    /// down and prunes rows it leaves empty.
    pub fn invoke_menu_action(&mut self, pane: &PaneId, action: MenuAction) -> WorkspaceResult<()> {
        let node = self.node_of(pane)?;
        self.close_tab_menu(pane);
        tracing::debug!(pane = %pane, ?action, "menu action");

        match action {
            MenuAction::ToggleFullscreen => {
                let entry = self.entry_mut(pane)?;
                entry.flags.toggle(PaneFlags::FULLSCREEN);
                let fullscreen = entry.flags.contains(PaneFlags::FULLSCREEN);
                self.events.push(WorkspaceEvent::FullscreenToggled {
                    pane: pane.clone(),
                    fullscreen,
                });
            }
            MenuAction::RotateSlider => {
                let entry = self.entry_mut(pane)?;
                entry.flags.toggle(PaneFlags::SLIDER_VERTICAL);
                let vertical = entry.flags.contains(PaneFlags::SLIDER_VERTICAL);
                entry.widget.set_slider_vertical(vertical);
                self.events.push(WorkspaceEvent::SliderRotated {
                    pane: pane.clone(),
                    vertical,
                });
            }
            MenuAction::Favorite => {
                let config = self.slot_config(pane)?;
                self.events.push(WorkspaceEvent::FavoriteRequested {
                    pane: pane.clone(),
                    config,
                });
            }
            MenuAction::Share => {
                let config = self.slot_config(pane)?;
                self.events.push(WorkspaceEvent::ShareRequested {
                    pane: pane.clone(),
                    config,
                });
            }
            MenuAction::Remove => {
                self.tree.remove(node)?;
                self.process_events()?;
                self.handle_item_dropped()?;
                self.process_events()?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tab dragging
    // ------------------------------------------------------------------

    /// Start dragging a pane's tab from `pointer`.
    ///
    /// The drag only becomes active once the pointer has moved past the
    /// threshold in [`drag_tab_to`](Self::drag_tab_to).
    pub fn begin_tab_drag(&mut self, pane: &PaneId, pointer: Vec2) -> WorkspaceResult<()> {
        let node = self.node_of(pane)?;
        self.tree.begin_drag(node, pointer)?;
        Ok(())
    }

    /// Move the dragged tab. Returns the drop zone to highlight, if any.
    pub fn drag_tab_to(&mut self, pointer: Vec2) -> Option<stormdeck_layout::DropHighlight> {
        self.tree.drag_to(pointer)
    }

    /// Drop the dragged tab and reconcile. Returns whether the pane moved.
    pub fn end_tab_drag(&mut self) -> WorkspaceResult<bool> {
        let moved = self.tree.end_drag()?.is_some();
        self.process_events()?;
        Ok(moved)
    }

    /// Abandon the current drag, leaving the layout untouched.
    pub fn cancel_tab_drag(&mut self) {
        self.tree.cancel_drag();
    }

    // ------------------------------------------------------------------
    // Resizing
    // ------------------------------------------------------------------

    /// Container size observed. Returns how many engines were refreshed.
    pub fn resize(&mut self, size: Size<f32>, now: Instant) -> WorkspaceResult<usize> {
        match self.resize.observe(size, now) {
            Some(size) => self.apply_size(size),
            None => Ok(0),
        }
    }

    /// Apply a debounced size once it has settled.
    pub fn poll_resize(&mut self, now: Instant) -> WorkspaceResult<usize> {
        match self.resize.poll(now) {
            Some(size) => self.apply_size(size),
            None => Ok(0),
        }
    }

    fn apply_size(&mut self, size: Size<f32>) -> WorkspaceResult<usize> {
        profile_scope!("apply_size");
        self.tree.update_size(size)?;

        let mut refreshed = 0;
        for entry in self.panes.values_mut() {
            let Some(body) = self.tree.pane_body(entry.node) else {
                continue;
            };
            let pixels = Size::new(body.width.round() as u32, body.height.round() as u32);
            if entry.widget.on_resize(pixels) {
                refreshed += 1;
            }
        }
        tracing::debug!(%size, refreshed, "workspace resized");
        Ok(refreshed)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Take the events raised for the host since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = WorkspaceEvent> + '_ {
        self.events.drain()
    }

    /// The id bound by [`set_container`](Self::set_container), if any.
    pub fn workspace_id(&self) -> Option<&WorkspaceId> {
        self.workspace.as_ref()
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Read access to the layout tree.
    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    /// Direct tree access for structural changes. Call
    /// [`WorkspaceController::process_events`] afterwards.
    pub fn tree_mut(&mut self) -> &mut LayoutTree {
        &mut self.tree
    }

    /// The index entry for a live pane.
    pub fn pane(&self, pane: &PaneId) -> Option<&PaneEntry> {
        self.panes.get(pane)
    }

    /// Live pane ids in creation order.
    pub fn pane_ids(&self) -> impl Iterator<Item = &PaneId> {
        self.panes.keys()
    }

    /// The pane id assigned to a tree node.
    ///
    /// `None` for nodes that are not panes or were never registered.
    pub fn pane_for_node(&self, node: NodeId) -> Option<&PaneId> {
        self.by_node.get(&node)
    }

    /// The tab menu bound to a pane, once its tab exists.
    pub fn menu(&self, pane: &PaneId) -> Option<&TabMenu> {
        self.menus.get(pane)
    }

    fn workspace(&self) -> WorkspaceResult<&WorkspaceId> {
        self.workspace.as_ref().ok_or(WorkspaceError::NotInitialized)
    }

    fn node_of(&self, pane: &PaneId) -> WorkspaceResult<NodeId> {
        self.panes
            .get(pane)
            .map(|entry| entry.node)
            .ok_or_else(|| WorkspaceError::UnknownPane(pane.to_string()))
    }

    fn entry_mut(&mut self, pane: &PaneId) -> WorkspaceResult<&mut PaneEntry> {
        self.panes
            .get_mut(pane)
            .ok_or_else(|| WorkspaceError::UnknownPane(pane.to_string()))
    }

    fn slot_config(&self, pane: &PaneId) -> WorkspaceResult<Option<String>> {
        let slot = self
            .panes
            .get(pane)
            .map(|entry| entry.slot)
            .ok_or_else(|| WorkspaceError::UnknownPane(pane.to_string()))?;
        Ok(self
            .store
            .get(&StoreKey::Slot(slot))
            .and_then(|v| v.as_config().map(str::to_owned)))
    }

    fn sync_panes(&mut self) {
        for entry in self.panes.values_mut() {
            entry.widget.sync();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stormdeck_pane::{AnimationConfig, AnimationEngine};

    struct NullEngine;

    impl AnimationEngine for NullEngine {
        fn create(&mut self) {}
        fn refresh_extents(&mut self, _size: Size<u32>) {}
        fn destroy(&mut self) {}
    }

    fn controller() -> WorkspaceController {
        let factory: Arc<dyn EngineFactory> =
            Arc::new(|_: &AnimationConfig| Box::new(NullEngine) as Box<dyn AnimationEngine>);
        WorkspaceController::new(SharedStore::new(), factory).unwrap()
    }

    #[test]
    fn operations_require_a_container() {
        let mut ctl = controller();
        assert!(matches!(
            ctl.create_windows(1),
            Err(WorkspaceError::NotInitialized)
        ));
        assert_eq!(ctl.get_selected(), None);
    }

    #[test]
    fn set_container_is_repeatable() {
        let mut ctl = controller();
        ctl.set_container("ws").unwrap().create_windows(2).unwrap();
        assert_eq!(ctl.num_windows_created().unwrap(), 2);

        ctl.set_container("ws").unwrap();
        assert_eq!(ctl.num_windows_created().unwrap(), 0);
    }

    #[test]
    fn negative_slots_are_rejected() {
        let mut ctl = controller();
        ctl.set_container("ws").unwrap();
        assert!(matches!(
            ctl.set(Some(-1), &serde_json::json!({})),
            Err(WorkspaceError::InvalidSlot(-1))
        ));
        assert!(matches!(ctl.unset(Some(-3)), Err(WorkspaceError::InvalidSlot(-3))));
    }

    #[test]
    fn null_slot_is_a_noop() {
        let mut ctl = controller();
        ctl.set_container("ws").unwrap();
        ctl.set(None, &serde_json::json!({"time": 0}))
            .unwrap()
            .unset(None)
            .unwrap()
            .select(None)
            .unwrap();
        assert_eq!(ctl.get_num_windows(), 0);
    }

    #[test]
    fn empty_container_id_is_rejected() {
        let mut ctl = controller();
        assert!(matches!(
            ctl.set_container(""),
            Err(WorkspaceError::InvalidWorkspaceId(_))
        ));
    }
}
