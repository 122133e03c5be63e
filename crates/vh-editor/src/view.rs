//! View state for the tree widget: expansion, search filtering, and the
//! pan/zoom viewport.
//!
//! None of this touches the tree value; it is keyed by `NodeId` so it
//! survives tree replacement after a move.

use std::collections::HashSet;
use vh_core::{NodeId, SearchResult, Tree, search};

pub const MIN_SCALE: f32 = 0.3;
pub const MAX_SCALE: f32 = 2.0;
pub const ZOOM_STEP: f32 = 0.1;

// ─── Viewport ────────────────────────────────────────────────────────────

/// Pan offset and zoom scale applied to the rendered tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Pointer-to-offset delta captured at pan start; `Some` while panning.
    pan_anchor: Option<(f32, f32)>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            pan_anchor: None,
        }
    }
}

impl Viewport {
    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-ZOOM_STEP);
    }

    fn zoom_by(&mut self, delta: f32) {
        self.scale = (self.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Wheel zoom: only with Ctrl held. Scrolling up (negative delta) zooms in.
    /// Returns whether the wheel was consumed.
    pub fn wheel(&mut self, delta_y: f32, ctrl: bool) -> bool {
        if !ctrl {
            return false;
        }
        if delta_y > 0.0 {
            self.zoom_out();
        } else {
            self.zoom_in();
        }
        true
    }

    /// Back to 100% at the origin.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pointer down on the background. Only the primary button pans.
    pub fn pan_start(&mut self, x: f32, y: f32, button: i16) {
        if button == 0 {
            self.pan_anchor = Some((x - self.offset_x, y - self.offset_y));
        }
    }

    pub fn pan_move(&mut self, x: f32, y: f32) -> bool {
        let Some((ax, ay)) = self.pan_anchor else {
            return false;
        };
        self.offset_x = x - ax;
        self.offset_y = y - ay;
        true
    }

    /// Pointer up or pointer left the container.
    pub fn pan_end(&mut self) {
        self.pan_anchor = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Scale indicator value, e.g. `130` for 1.3×.
    pub fn percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

// ─── View state ──────────────────────────────────────────────────────────

/// Expansion, search, and viewport state of one tree widget.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    expanded: HashSet<NodeId>,
    query: String,
    search: SearchResult,
    pub viewport: Viewport,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle(&mut self, id: NodeId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        self.expanded.insert(id);
    }

    pub fn expand_all(&mut self, tree: &Tree) {
        self.expanded = tree.all_ids().into_iter().collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search(&self) -> &SearchResult {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Run a new search and auto-expand every path leading to a match.
    /// Existing expansion is kept.
    pub fn set_search(&mut self, tree: &Tree, query: &str) {
        self.query = query.to_string();
        self.refresh_search(tree);
    }

    /// Re-run the current query against a replaced tree.
    pub fn refresh_search(&mut self, tree: &Tree) {
        self.search = search(tree, &self.query);
        if self.is_searching() {
            self.expanded.extend(self.search.path.iter().copied());
        }
    }

    pub fn is_match(&self, id: NodeId) -> bool {
        self.search.is_match(id)
    }

    /// Hidden only while searching and neither a match nor on a match path.
    pub fn is_visible(&self, id: NodeId) -> bool {
        !self.is_searching() || self.search.is_visible(id)
    }

    /// Ids the renderer should draw, pre-order: visible, and every ancestor
    /// expanded.
    pub fn visible_ids(&self, tree: &Tree) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_visible(tree.root(), &mut out);
        out
    }

    fn collect_visible(&self, node: &vh_core::Node, out: &mut Vec<NodeId>) {
        if !self.is_visible(node.id) {
            return;
        }
        out.push(node.id);
        if self.is_expanded(node.id) {
            for child in &node.children {
                self.collect_visible(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vh_core::{Level, Node};

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    fn sample() -> Tree {
        Tree::new(Node::with_children(
            "root",
            "Equipments",
            Level::EquipmentType,
            vec![
                Node::with_children(
                    "engine",
                    "Engine",
                    Level::Equipment,
                    vec![Node::leaf("boiler", "Aux boiler", Level::Assembly)],
                ),
                Node::leaf("deck", "Deck", Level::Equipment),
            ],
        ))
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = Viewport::default();
        for _ in 0..20 {
            vp.zoom_in();
        }
        assert_eq!(vp.scale, MAX_SCALE);
        for _ in 0..40 {
            vp.zoom_out();
        }
        assert_eq!(vp.scale, MIN_SCALE);
        assert_eq!(vp.percent(), 30);
    }

    #[test]
    fn wheel_needs_ctrl() {
        let mut vp = Viewport::default();
        assert!(!vp.wheel(-1.0, false));
        assert_eq!(vp.percent(), 100);
        assert!(vp.wheel(-1.0, true));
        assert_eq!(vp.percent(), 110);
        assert!(vp.wheel(3.0, true));
        assert_eq!(vp.percent(), 100);
    }

    #[test]
    fn panning() {
        let mut vp = Viewport::default();
        assert!(!vp.pan_move(5.0, 5.0));
        vp.pan_start(10.0, 10.0, 2);
        assert!(!vp.is_panning());
        vp.pan_start(10.0, 10.0, 0);
        assert!(vp.pan_move(30.0, 5.0));
        assert_eq!((vp.offset_x, vp.offset_y), (20.0, -5.0));
        vp.pan_end();
        vp.pan_start(40.0, 0.0, 0);
        vp.pan_move(50.0, 0.0);
        assert_eq!((vp.offset_x, vp.offset_y), (30.0, -5.0));
        vp.reset();
        assert_eq!(vp, Viewport::default());
    }

    #[test]
    fn toggle_expand_collapse() {
        let tree = sample();
        let mut view = ViewState::new();
        assert!(!view.is_expanded(id("root")));
        view.toggle(id("root"));
        assert!(view.is_expanded(id("root")));
        view.toggle(id("root"));
        assert!(!view.is_expanded(id("root")));

        view.expand_all(&tree);
        assert!(tree.all_ids().iter().all(|n| view.is_expanded(*n)));
        view.collapse_all();
        assert!(tree.all_ids().iter().all(|n| !view.is_expanded(*n)));
    }

    #[test]
    fn search_auto_expands_paths() {
        let tree = sample();
        let mut view = ViewState::new();
        view.expand(id("deck"));
        view.set_search(&tree, "boiler");
        assert!(view.is_expanded(id("root")));
        assert!(view.is_expanded(id("engine")));
        assert!(view.is_expanded(id("deck")));
        assert!(view.is_match(id("boiler")));
        assert!(!view.is_visible(id("deck")));
        assert_eq!(
            view.visible_ids(&tree),
            vec![id("root"), id("engine"), id("boiler")]
        );
    }

    #[test]
    fn blank_search_shows_everything_expanded() {
        let tree = sample();
        let mut view = ViewState::new();
        view.set_search(&tree, "  ");
        assert!(!view.is_searching());
        assert!(view.is_visible(id("deck")));
        assert_eq!(view.visible_ids(&tree), vec![id("root")]);
        view.expand(id("root"));
        assert_eq!(
            view.visible_ids(&tree),
            vec![id("root"), id("engine"), id("deck")]
        );
    }
}
