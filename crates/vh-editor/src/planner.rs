//! Move planning: drag + drop intent → destination parent and index.
//!
//! A move is executed as remove-then-insert, but the plan is always computed
//! against the tree **before** removal. When the dragged node is an earlier
//! sibling of the drop position, removing it shifts every later sibling down
//! by one, so the planned index is corrected by -1.

use crate::geometry::DropIntent;
use std::fmt;
use vh_core::{NodeId, Tree};

/// Where an accepted move puts the dragged node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    pub dragged: NodeId,
    pub parent: NodeId,
    /// Index in `parent`'s children *after* the dragged node is removed.
    pub index: usize,
}

/// Why a drop was turned into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Dropped onto itself.
    SelfDrop,
    TargetNotFound,
    DraggedNotFound,
    /// Target is inside the dragged node's subtree (or the dragged node is
    /// the root).
    Cycle,
    /// `Before`/`After` on the root, which has no siblings.
    RootSibling,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::SelfDrop => "node dropped onto itself",
            Rejection::TargetNotFound => "drop target not in tree",
            Rejection::DraggedNotFound => "dragged node not in tree",
            Rejection::Cycle => "target is inside the dragged subtree",
            Rejection::RootSibling => "the root cannot have siblings",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Rejection {}

/// Plan moving `dragged` relative to `target`.
///
/// Checks, in order: self-drop, target present, dragged present, then the
/// cycle guard. `Inside` always lands at index 0 of the target.
pub fn plan_move(
    tree: &Tree,
    dragged: NodeId,
    target: NodeId,
    intent: DropIntent,
) -> Result<MovePlan, Rejection> {
    if dragged == target {
        return Err(Rejection::SelfDrop);
    }
    if !tree.contains(target) {
        return Err(Rejection::TargetNotFound);
    }
    if !tree.contains(dragged) {
        return Err(Rejection::DraggedNotFound);
    }
    // Covers dragging the root too: every other node descends from it.
    if tree.is_ancestor_of(dragged, target) {
        return Err(Rejection::Cycle);
    }

    if intent == DropIntent::Inside {
        return Ok(MovePlan {
            dragged,
            parent: target,
            index: 0,
        });
    }

    let (parent, target_index) = tree.position_of(target).ok_or(Rejection::RootSibling)?;
    let mut index = match intent {
        DropIntent::After => target_index + 1,
        _ => target_index,
    };
    if let Some((dragged_parent, dragged_index)) = tree.position_of(dragged)
        && dragged_parent == parent
        && dragged_index < index
    {
        index -= 1;
    }

    Ok(MovePlan {
        dragged,
        parent,
        index,
    })
}

/// Execute a plan: detach the dragged subtree and insert it at the planned
/// position. Returns an unchanged copy if the dragged node is gone.
pub fn apply_move(tree: &Tree, plan: &MovePlan) -> Tree {
    let (without, removed) = tree.remove_node(plan.dragged);
    match removed {
        Some(node) => without.insert_node(plan.parent, node, plan.index),
        None => tree.clone(),
    }
}

/// Plan and apply in one step.
pub fn move_node(
    tree: &Tree,
    dragged: NodeId,
    target: NodeId,
    intent: DropIntent,
) -> Result<Tree, Rejection> {
    let plan = plan_move(tree, dragged, target, intent)?;
    Ok(apply_move(tree, &plan))
}
