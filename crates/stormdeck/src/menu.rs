//! Tab context menu.

use bitflags::bitflags;
use stormdeck_core::PaneId;

/// The entries every tab menu offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    ToggleFullscreen,
    RotateSlider,
    Favorite,
    Share,
    Remove,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::ToggleFullscreen,
        MenuAction::RotateSlider,
        MenuAction::Favorite,
        MenuAction::Share,
        MenuAction::Remove,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::ToggleFullscreen => "Toggle fullscreen",
            MenuAction::RotateSlider => "Rotate time slider",
            MenuAction::Favorite => "Add to favorites",
            MenuAction::Share => "Share",
            MenuAction::Remove => "Remove",
        }
    }
}

bitflags! {
    /// Per-pane display toggles driven from the tab menu.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PaneFlags: u8 {
        const FULLSCREEN      = 1 << 0;
        const SLIDER_VERTICAL = 1 << 1;
    }
}

/// Context menu bound to one pane's tab.
///
/// Listeners are attached at most once however often the tab is rendered or
/// the menu reopened.
#[derive(Debug)]
pub struct TabMenu {
    pane: PaneId,
    listeners: usize,
    open: bool,
}

impl TabMenu {
    pub fn new(pane: PaneId) -> Self {
        Self {
            pane,
            listeners: 0,
            open: false,
        }
    }

    /// Bind the menu's listeners. Returns `false` if already bound.
    pub fn attach(&mut self) -> bool {
        if self.listeners > 0 {
            return false;
        }
        self.listeners = 1;
        true
    }

    /// Returns `false` if the menu was already open.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
    }

    pub fn pane(&self) -> &PaneId {
        &self.pane
    }

    pub fn actions(&self) -> &'static [MenuAction] {
        &MenuAction::ALL
    }
}
