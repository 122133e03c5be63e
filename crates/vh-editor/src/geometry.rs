//! Drop geometry: pointer position → drop intent.
//!
//! The candidate row is split by the pointer's fractional height:
//!
//! | fraction | intent |
//! |----------|--------|
//! | `[0, 0.45)` | `Before` |
//! | `[0.45, 0.55]` | `Inside` |
//! | `(0.55, 1]` | `After` |
//!
//! Only the narrow centre band reparents, so ordinary reordering gestures
//! rarely nest a node by accident.

use serde::{Deserialize, Serialize};

/// Below this fraction the drop goes before the target.
pub const BEFORE_THRESHOLD: f32 = 0.45;
/// Above this fraction the drop goes after the target.
pub const AFTER_THRESHOLD: f32 = 0.55;

/// What a drop on a target node means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropIntent {
    /// Become the target's previous sibling.
    Before,
    /// Become the target's next sibling.
    After,
    /// Become the target's first child.
    Inside,
}

impl DropIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Inside => "inside",
        }
    }

    /// `Before` or `After`: the move reorders among the target's siblings.
    pub fn is_sibling(&self) -> bool {
        !matches!(self, Self::Inside)
    }
}

/// Classify a pointer `offset_y` within a target box of `height`.
///
/// A degenerate box (non-positive or non-finite height) has no edges and
/// resolves to `Inside`. Offsets outside the box still compare against the
/// thresholds, so a pointer above the box is `Before`, below is `After`.
pub fn resolve_drop_intent(offset_y: f32, height: f32) -> DropIntent {
    if !(height.is_finite() && height > 0.0) {
        return DropIntent::Inside;
    }
    let fraction = offset_y / height;
    if fraction < BEFORE_THRESHOLD {
        DropIntent::Before
    } else if fraction > AFTER_THRESHOLD {
        DropIntent::After
    } else {
        DropIntent::Inside
    }
}

/// On-screen vertical extent of a rendered node row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowBounds {
    pub y: f32,
    pub height: f32,
}

impl RowBounds {
    pub fn contains(&self, py: f32) -> bool {
        py >= self.y && py <= self.y + self.height
    }

    /// Intent for a pointer at absolute `py`.
    pub fn intent_at(&self, py: f32) -> DropIntent {
        resolve_drop_intent(py - self.y, self.height)
    }
}
