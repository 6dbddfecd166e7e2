//! Drop zone detection for tab dragging.
//!
//! Every stack offers six segments. Each has a hover rectangle (where the
//! pointer must be) and a highlight rectangle (what is drawn while hovering):
//!
//! - Header: the tab strip
//! - Body: the middle half of the content area
//! - Left/Right: the outer quarters, highlighting half the content area
//! - Top/Bottom: the upper/lower half between the side quarters
//!
//! Which segment wins is decided by a [`DropZonePolicy`].

use stormdeck_core::DropPolicyKind;
use stormdeck_core::math::Vec2;

use crate::types::{LayoutRect, NodeId};

/// Threshold for edge zones (25% of width/height).
pub const DEFAULT_EDGE_THRESHOLD: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropSegment {
    Header,
    Body,
    Left,
    Right,
    Top,
    Bottom,
}

impl DropSegment {
    /// Whether dropping here opens a new split instead of joining the stack.
    pub fn splits(&self) -> bool {
        matches!(
            self,
            DropSegment::Left | DropSegment::Right | DropSegment::Top | DropSegment::Bottom
        )
    }

    /// Whether the new split goes before the target.
    pub fn is_before(&self) -> bool {
        matches!(self, DropSegment::Left | DropSegment::Top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentArea {
    pub segment: DropSegment,
    pub hover: LayoutRect,
    pub highlight: LayoutRect,
}

/// The drop currently offered to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropHighlight {
    pub stack: NodeId,
    /// Segment under the pointer.
    pub hovered: DropSegment,
    /// Segment the drop will be applied to.
    pub segment: DropSegment,
    pub area: LayoutRect,
}

/// Compute the six segment areas of a stack, in the order policies scan them.
pub fn stack_segments(stack: LayoutRect, header_height: f32) -> Vec<SegmentArea> {
    let header_height = header_height.min(stack.height).max(0.0);
    let header = LayoutRect::new(stack.x, stack.y, stack.width, header_height);
    let content = LayoutRect::new(
        stack.x,
        stack.y + header_height,
        stack.width,
        stack.height - header_height,
    );

    let (x, y, w, h) = (content.x, content.y, content.width, content.height);
    let t = DEFAULT_EDGE_THRESHOLD;

    let left_half = LayoutRect::new(x, y, w * 0.5, h);
    let right_half = LayoutRect::new(x + w * 0.5, y, w * 0.5, h);
    let top_half = LayoutRect::new(x, y, w, h * 0.5);
    let bottom_half = LayoutRect::new(x, y + h * 0.5, w, h * 0.5);

    vec![
        SegmentArea {
            segment: DropSegment::Header,
            hover: header,
            highlight: header,
        },
        SegmentArea {
            segment: DropSegment::Body,
            hover: LayoutRect::new(x + w * t, y + h * t, w * (1.0 - 2.0 * t), h * (1.0 - 2.0 * t)),
            highlight: content,
        },
        SegmentArea {
            segment: DropSegment::Left,
            hover: LayoutRect::new(x, y, w * t, h),
            highlight: left_half,
        },
        SegmentArea {
            segment: DropSegment::Right,
            hover: LayoutRect::new(x + w * (1.0 - t), y, w * t, h),
            highlight: right_half,
        },
        SegmentArea {
            segment: DropSegment::Top,
            hover: LayoutRect::new(x + w * t, y, w * (1.0 - 2.0 * t), h * 0.5),
            highlight: top_half,
        },
        SegmentArea {
            segment: DropSegment::Bottom,
            hover: LayoutRect::new(x + w * t, y + h * 0.5, w * (1.0 - 2.0 * t), h * 0.5),
            highlight: bottom_half,
        },
    ]
}

/// Strategy deciding which segment of a stack is highlighted for a pointer.
///
/// This is the extension point for customizing drop behaviour; the tree never
/// special-cases a policy.
pub trait DropZonePolicy: Send + Sync {
    fn highlight(&self, stack: NodeId, areas: &[SegmentArea], pointer: Vec2)
    -> Option<DropHighlight>;
}

/// Default behaviour: the tab strip when over it, otherwise the nearest edge
/// of the content area, with the centre joining the stack.
#[derive(Debug, Clone)]
pub struct NearestEdgePolicy {
    /// Edge threshold as a fraction (0.1-0.5).
    pub edge_threshold: f32,
}

impl Default for NearestEdgePolicy {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
        }
    }
}

impl NearestEdgePolicy {
    pub fn with_edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold.clamp(0.1, 0.5);
        self
    }
}

impl DropZonePolicy for NearestEdgePolicy {
    fn highlight(
        &self,
        stack: NodeId,
        areas: &[SegmentArea],
        pointer: Vec2,
    ) -> Option<DropHighlight> {
        let find = |segment| areas.iter().find(|a| a.segment == segment);

        if let Some(header) = find(DropSegment::Header)
            && header.hover.has_area()
            && header.hover.contains(pointer)
        {
            return Some(DropHighlight {
                stack,
                hovered: DropSegment::Header,
                segment: DropSegment::Header,
                area: header.highlight,
            });
        }

        let content = find(DropSegment::Body)?.highlight;
        if !content.has_area() || !content.contains(pointer) {
            return None;
        }

        let rel_x = (pointer.x - content.x) / content.width;
        let rel_y = (pointer.y - content.y) / content.height;

        let segment = if rel_x < self.edge_threshold {
            DropSegment::Left
        } else if rel_x > 1.0 - self.edge_threshold {
            DropSegment::Right
        } else if rel_y < self.edge_threshold {
            DropSegment::Top
        } else if rel_y > 1.0 - self.edge_threshold {
            DropSegment::Bottom
        } else {
            DropSegment::Body
        };

        find(segment).map(|area| DropHighlight {
            stack,
            hovered: segment,
            segment,
            area: area.highlight,
        })
    }
}

/// Confines drops to existing stack bodies.
///
/// Skips the tab strip; the first remaining segment whose hover rectangle
/// strictly contains the pointer wins, and the drop always joins the stack,
/// so dragging a tab can never open a new split.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyOnlyPolicy;

impl DropZonePolicy for BodyOnlyPolicy {
    fn highlight(
        &self,
        stack: NodeId,
        areas: &[SegmentArea],
        pointer: Vec2,
    ) -> Option<DropHighlight> {
        let hovered = areas
            .iter()
            .filter(|a| a.segment != DropSegment::Header)
            .find(|a| a.hover.contains_strict(pointer))?;

        let body = areas.iter().find(|a| a.segment == DropSegment::Body)?;

        Some(DropHighlight {
            stack,
            hovered: hovered.segment,
            segment: DropSegment::Body,
            area: body.highlight,
        })
    }
}

/// Build the policy selected in the workspace configuration.
pub fn policy_for(kind: DropPolicyKind) -> Box<dyn DropZonePolicy> {
    match kind {
        DropPolicyKind::NearestEdge => Box::new(NearestEdgePolicy::default()),
        DropPolicyKind::BodyOnly => Box::new(BodyOnlyPolicy),
    }
}
