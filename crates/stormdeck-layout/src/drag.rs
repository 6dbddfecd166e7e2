//! Tab drag sessions.

use stormdeck_core::math::Vec2;

use crate::drop_zone::DropHighlight;
use crate::types::NodeId;

/// Distance in pixels the pointer must travel before a press becomes a drag.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// State of one tab being dragged.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The pane whose tab is being dragged.
    pub pane: NodeId,
    pub start_pos: Vec2,
    pub current_pos: Vec2,
    /// Whether the drag threshold has been exceeded.
    pub is_active: bool,
    /// Drop offered for the current pointer position.
    pub highlight: Option<DropHighlight>,
}

impl DragSession {
    pub fn new(pane: NodeId, start_pos: Vec2) -> Self {
        Self {
            pane,
            start_pos,
            current_pos: start_pos,
            is_active: false,
            highlight: None,
        }
    }

    /// Update the pointer position. Returns whether the drag is active.
    pub fn update(&mut self, pos: Vec2) -> bool {
        self.current_pos = pos;
        if !self.is_active && (pos - self.start_pos).length() >= DRAG_THRESHOLD {
            self.is_active = true;
        }
        self.is_active
    }

    pub fn delta(&self) -> Vec2 {
        self.current_pos - self.start_pos
    }
}
