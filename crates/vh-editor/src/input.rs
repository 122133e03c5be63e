//! Drag input abstraction.
//!
//! Normalizes the renderer's drag lifecycle callbacks (HTML5 drag events,
//! pointer emulation) into a unified `DragEvent` enum consumed by the
//! `DragController`.

use vh_core::NodeId;

/// A normalized drag lifecycle event.
///
/// Geometry is the pointer's vertical offset from the top of the candidate
/// node's bounding box, and that box's height, both in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// Drag gesture began on a node.
    Start { id: NodeId },

    /// Pointer is over a candidate drop target.
    Over {
        target: NodeId,
        offset_y: f32,
        height: f32,
    },

    /// Pointer left the hovered candidate.
    Leave,

    /// Released over a target.
    Drop {
        target: NodeId,
        offset_y: f32,
        height: f32,
    },

    /// Gesture finished (after a drop, on cancel, or from the global
    /// pointer-up safety net).
    End,
}

impl DragEvent {
    pub fn start(id: &str) -> Self {
        Self::Start {
            id: NodeId::intern(id),
        }
    }

    pub fn over(target: &str, offset_y: f32, height: f32) -> Self {
        Self::Over {
            target: NodeId::intern(target),
            offset_y,
            height,
        }
    }

    pub fn drop_on(target: &str, offset_y: f32, height: f32) -> Self {
        Self::Drop {
            target: NodeId::intern(target),
            offset_y,
            height,
        }
    }

    /// The node under the pointer, if this event carries one.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::Over { target, .. } | Self::Drop { target, .. } => Some(*target),
            _ => None,
        }
    }
}
