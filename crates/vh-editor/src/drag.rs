//! Drag-and-drop interaction state machine.
//!
//! ```text
//!            Start(non-root)           Over(other node)
//!   Idle ───────────────────▶ Dragging ───────────────▶ Hovering
//!    ▲                           ▲  ◀─────────────────────  │
//!    │                           │        Leave             │
//!    └──────── End (any state) ──┴──── Drop (plan + reset) ─┘
//! ```
//!
//! Only one node can be dragged at a time; a `Start` while a drag is active
//! is ignored. Every drop and every `End` returns the machine to `Idle`,
//! whether or not the move was accepted, so a lost pointer-up can never
//! leave it stuck.

use crate::geometry::{DropIntent, resolve_drop_intent};
use crate::input::DragEvent;
use crate::planner::{MovePlan, plan_move};
use serde::Serialize;
use vh_core::{NodeId, Tree};

/// Current drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        dragged: NodeId,
    },
    Hovering {
        dragged: NodeId,
        target: NodeId,
        intent: DropIntent,
    },
}

impl DragState {
    pub fn dragged(&self) -> Option<NodeId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { dragged } | DragState::Hovering { dragged, .. } => {
                Some(*dragged)
            }
        }
    }

    /// Hover target and intent, for drop-indicator rendering.
    pub fn hover(&self) -> Option<(NodeId, DropIntent)> {
        match self {
            DragState::Hovering { target, intent, .. } => Some((*target, *intent)),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }
}

/// Translates drag events into state transitions and, on drop, a move plan.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Handle one event. Returns a plan only for an accepted drop.
    pub fn handle(&mut self, tree: &Tree, event: &DragEvent) -> Option<MovePlan> {
        match *event {
            DragEvent::Start { id } => {
                self.start(tree, id);
                None
            }
            DragEvent::Over {
                target,
                offset_y,
                height,
            } => {
                self.over(target, resolve_drop_intent(offset_y, height));
                None
            }
            DragEvent::Leave => {
                self.leave();
                None
            }
            DragEvent::Drop {
                target,
                offset_y,
                height,
            } => self.drop_on(tree, target, resolve_drop_intent(offset_y, height)),
            DragEvent::End => {
                self.end();
                None
            }
        }
    }

    /// Begin dragging `id`. The root and unknown ids are not draggable.
    /// Returns whether a drag started.
    pub fn start(&mut self, tree: &Tree, id: NodeId) -> bool {
        if let Some(active) = self.state.dragged() {
            log::trace!("drag start {id} ignored: {active} already dragging");
            return false;
        }
        if tree.is_root(id) || !tree.contains(id) {
            log::trace!("drag start {id} ignored: not draggable");
            return false;
        }
        log::trace!("drag start {id}");
        self.state = DragState::Dragging { dragged: id };
        true
    }

    /// Pointer over `target` with the given intent. Hovering the dragged
    /// node itself clears any hover.
    pub fn over(&mut self, target: NodeId, intent: DropIntent) {
        let Some(dragged) = self.state.dragged() else {
            return;
        };
        self.state = if target == dragged {
            DragState::Dragging { dragged }
        } else {
            DragState::Hovering {
                dragged,
                target,
                intent,
            }
        };
    }

    pub fn leave(&mut self) {
        if let DragState::Hovering { dragged, .. } = self.state {
            self.state = DragState::Dragging { dragged };
        }
    }

    /// Drop on `target`. Plans against the tree as it is now and resets to
    /// `Idle` whatever the outcome.
    pub fn drop_on(&mut self, tree: &Tree, target: NodeId, intent: DropIntent) -> Option<MovePlan> {
        let dragged = self.state.dragged()?;
        self.state = DragState::Idle;
        match plan_move(tree, dragged, target, intent) {
            Ok(plan) => {
                log::trace!(
                    "drop {dragged} {} {target} → {}[{}]",
                    intent.as_str(),
                    plan.parent,
                    plan.index
                );
                Some(plan)
            }
            Err(reason) => {
                log::debug!("drop {dragged} {} {target} rejected: {reason}", intent.as_str());
                None
            }
        }
    }

    /// End of gesture: always back to `Idle`.
    pub fn end(&mut self) {
        if !self.state.is_idle() {
            log::trace!("drag end");
        }
        self.state = DragState::Idle;
    }
}
