//! Tree session: the single owner of the current hierarchy value.
//!
//! The session routes drag events through the `DragController`, applies
//! accepted plans as remove + insert, and replaces its tree wholesale. The
//! previous value is simply dropped; anything that cloned it keeps a
//! consistent snapshot.

use crate::drag::{DragController, DragState};
use crate::input::DragEvent;
use crate::planner::{MovePlan, apply_move};
use crate::view::ViewState;
use vh_core::{NodeId, Tree};

/// Callback fired once per accepted move: `(dragged, new_parent, index)`.
pub type MoveListener = Box<dyn FnMut(NodeId, NodeId, usize)>;

pub struct TreeSession {
    tree: Tree,
    drag: DragController,
    pub view: ViewState,
    /// Bumped on every tree replacement.
    generation: u64,
    on_move: Option<MoveListener>,
}

impl TreeSession {
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            drag: DragController::new(),
            view: ViewState::new(),
            generation: 0,
            on_move: None,
        }
    }

    /// Start a session on the built-in vessel hierarchy.
    pub fn with_vessel_hierarchy() -> Result<Self, String> {
        vh_core::vessel_hierarchy().map(Self::new)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Register the move listener, replacing any previous one.
    pub fn on_move_node(&mut self, listener: impl FnMut(NodeId, NodeId, usize) + 'static) {
        self.on_move = Some(Box::new(listener));
    }

    /// Swap in a new tree value (e.g. a reloaded seed). Cancels any drag.
    pub fn replace_tree(&mut self, tree: Tree) {
        self.drag.end();
        self.set_tree(tree);
    }

    /// Feed one drag event. Returns `true` if the tree changed.
    pub fn handle_drag(&mut self, event: &DragEvent) -> bool {
        match self.drag.handle(&self.tree, event) {
            Some(plan) => {
                self.commit(plan);
                true
            }
            None => false,
        }
    }

    pub fn drag_start(&mut self, id: NodeId) -> bool {
        self.drag.start(&self.tree, id)
    }

    /// Apply an accepted plan and notify the listener.
    fn commit(&mut self, plan: MovePlan) {
        let next = apply_move(&self.tree, &plan);
        log::info!(
            "moved {} to {}[{}] (generation {})",
            plan.dragged,
            plan.parent,
            plan.index,
            self.generation + 1
        );
        self.set_tree(next);
        if let Some(listener) = self.on_move.as_mut() {
            listener(plan.dragged, plan.parent, plan.index);
        }
    }

    fn set_tree(&mut self, tree: Tree) {
        self.tree = tree;
        self.generation += 1;
        self.view.refresh_search(&self.tree);
    }

    // ─── View shortcuts ──────────────────────────────────────────────────

    pub fn set_search(&mut self, query: &str) {
        self.view.set_search(&self.tree, query);
    }

    pub fn expand_all(&mut self) {
        self.view.expand_all(&self.tree);
    }

    pub fn visible_ids(&self) -> Vec<NodeId> {
        self.view.visible_ids(&self.tree)
    }
}
