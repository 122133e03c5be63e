//! WASM bridge for the vessel hierarchy tree. Exposes the Rust tree engine
//! to the web front end.
//!
//! Compiled via `wasm-pack build --target web`. The JS renderer owns the DOM
//! (pills, connectors, PNG export); it forwards drag and view events here and
//! re-renders from `tree_json()` / `visible_ids_json()` whenever a call
//! reports a change.

mod console;

use vh_core::{NodeId, Tree};
use vh_editor::{DragEvent, TreeSession, resolve_drop_intent};
use wasm_bindgen::prelude::*;

/// The main WASM-facing tree controller.
///
/// Holds the session (current tree, drag state, view state). All
/// interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct VesselTree {
    session: TreeSession,
}

#[wasm_bindgen]
impl VesselTree {
    /// Create a controller on the built-in vessel hierarchy.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<VesselTree, JsValue> {
        console::setup();
        let session = TreeSession::with_vessel_hierarchy().map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { session })
    }

    /// Create a controller from hierarchy JSON.
    pub fn from_json(json: &str) -> Result<VesselTree, JsValue> {
        console::setup();
        let tree = vh_core::parse_tree(json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            session: TreeSession::new(tree),
        })
    }

    /// Replace the hierarchy with new JSON. Returns `false` on a parse error
    /// (the current tree is kept).
    pub fn set_tree_json(&mut self, json: &str) -> bool {
        match vh_core::parse_tree(json) {
            Ok(tree) => {
                self.session.replace_tree(tree);
                true
            }
            Err(e) => {
                log::warn!("set_tree_json: {e}");
                false
            }
        }
    }

    /// The current tree as nested JSON.
    pub fn tree_json(&self) -> String {
        tree_to_json(self.session.tree())
    }

    /// Increments each time the tree value is replaced.
    pub fn generation(&self) -> f64 {
        self.session.generation() as f64
    }

    pub fn set_log_level(&self, level: &str) -> bool {
        match console::parse_level(level) {
            Some(filter) => {
                log::set_max_level(filter);
                true
            }
            None => false,
        }
    }

    // ─── Drag lifecycle ──────────────────────────────────────────────────

    /// Register `callback(draggedId, parentId, index)`, fired once per
    /// accepted move after the tree has been replaced.
    pub fn set_on_move_node(&mut self, callback: js_sys::Function) {
        self.session.on_move_node(move |dragged, parent, index| {
            let result = callback.call3(
                &JsValue::NULL,
                &JsValue::from_str(dragged.as_str()),
                &JsValue::from_str(parent.as_str()),
                &JsValue::from_f64(index as f64),
            );
            if let Err(e) = result {
                log::warn!("onMoveNode callback threw: {e:?}");
            }
        });
    }

    /// Drag began on `id`. Returns `false` for the root or unknown ids.
    pub fn drag_start(&mut self, id: &str) -> bool {
        self.session.drag_start(NodeId::intern(id))
    }

    /// Pointer over `target`. Returns the hover intent (`"before"`,
    /// `"after"`, `"inside"`) or `""` when nothing is hovered.
    pub fn drag_over(&mut self, target: &str, offset_y: f32, height: f32) -> String {
        self.session
            .handle_drag(&DragEvent::over(target, offset_y, height));
        self.session
            .drag_state()
            .hover()
            .map(|(_, intent)| intent.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn drag_leave(&mut self) {
        self.session.handle_drag(&DragEvent::Leave);
    }

    /// Drop on `target`. Returns `true` if the tree changed.
    pub fn drop_on(&mut self, target: &str, offset_y: f32, height: f32) -> bool {
        self.session
            .handle_drag(&DragEvent::drop_on(target, offset_y, height))
    }

    pub fn drag_end(&mut self) {
        self.session.handle_drag(&DragEvent::End);
    }

    /// `{"state":"idle"}`, `{"state":"dragging","dragged":…}` or
    /// `{"state":"hovering","dragged":…,"target":…,"intent":…}`.
    pub fn drag_state_json(&self) -> String {
        serde_json::to_string(&self.session.drag_state())
            .unwrap_or_else(|e| format!(r#"{{"state":"idle","error":"{e}"}}"#))
    }

    // ─── Expansion & search ──────────────────────────────────────────────

    pub fn toggle(&mut self, id: &str) {
        self.session.view.toggle(NodeId::intern(id));
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.session.view.is_expanded(NodeId::intern(id))
    }

    pub fn expand_all(&mut self) {
        self.session.expand_all();
    }

    pub fn collapse_all(&mut self) {
        self.session.view.collapse_all();
    }

    pub fn set_search(&mut self, query: &str) {
        self.session.set_search(query);
    }

    pub fn is_match(&self, id: &str) -> bool {
        self.session.view.is_match(NodeId::intern(id))
    }

    /// JSON array of ids to render, pre-order.
    pub fn visible_ids_json(&self) -> String {
        let ids: Vec<&str> = self
            .session
            .visible_ids()
            .into_iter()
            .map(|id| id.as_str())
            .collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// CSS class for a node's pill, `""` for unknown ids.
    pub fn level_class(&self, id: &str) -> String {
        self.session
            .tree()
            .find_node(NodeId::intern(id))
            .map(|n| n.level.css_class().to_string())
            .unwrap_or_default()
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        self.session.view.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.session.view.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.session.view.viewport.reset();
    }

    /// Returns `true` if the wheel was consumed (Ctrl held).
    pub fn wheel(&mut self, delta_y: f32, ctrl: bool) -> bool {
        self.session.view.viewport.wheel(delta_y, ctrl)
    }

    pub fn pan_start(&mut self, x: f32, y: f32, button: i16) {
        self.session.view.viewport.pan_start(x, y, button);
    }

    pub fn pan_move(&mut self, x: f32, y: f32) -> bool {
        self.session.view.viewport.pan_move(x, y)
    }

    pub fn pan_end(&mut self) {
        self.session.view.viewport.pan_end();
    }

    pub fn is_panning(&self) -> bool {
        self.session.view.viewport.is_panning()
    }

    pub fn scale_percent(&self) -> u32 {
        self.session.view.viewport.percent()
    }

    /// CSS `transform` for the tree content element (origin top-left).
    pub fn transform_css(&self) -> String {
        let vp = &self.session.view.viewport;
        format!(
            "translate({}px, {}px) scale({})",
            vp.offset_x, vp.offset_y, vp.scale
        )
    }
}

fn tree_to_json(tree: &Tree) -> String {
    serde_json::to_string(tree).unwrap_or_else(|e| {
        log::error!("tree serialization failed: {e}");
        String::new()
    })
}

// ─── Standalone functions (no controller needed) ─────────────────────────

/// Drop intent for a pointer `offset_y` inside a row of `height`.
#[wasm_bindgen]
pub fn drop_intent(offset_y: f32, height: f32) -> String {
    resolve_drop_intent(offset_y, height).as_str().to_string()
}

/// Validate hierarchy JSON. Returns `{"ok":true,"nodes":N}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_tree(json: &str) -> String {
    match vh_core::parse_tree(json) {
        Ok(tree) => serde_json::json!({ "ok": true, "nodes": tree.len() }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn controller() -> VesselTree {
        match VesselTree::new() {
            Ok(vt) => vt,
            Err(_) => panic!("built-in hierarchy failed to load"),
        }
    }

    #[test]
    fn drag_over_reports_intent() {
        let mut vt = controller();
        assert!(vt.drag_start("deck"));
        assert_eq!(vt.drag_over("engine", 1.0, 30.0), "before");
        assert_eq!(vt.drag_over("engine", 15.0, 30.0), "inside");
        assert_eq!(vt.drag_over("deck", 15.0, 30.0), "");
        vt.drag_end();
        assert_eq!(vt.drag_state_json(), r#"{"state":"idle"}"#);
    }

    #[test]
    fn hover_state_json() {
        let mut vt = controller();
        vt.drag_start("cargo");
        vt.drag_over("deck", 29.0, 30.0);
        assert_eq!(
            vt.drag_state_json(),
            r#"{"state":"hovering","dragged":"cargo","target":"deck","intent":"after"}"#
        );
    }

    #[test]
    fn drop_updates_tree_json() {
        let mut vt = controller();
        assert!(!vt.drag_start("equipments"));
        assert!(vt.drag_start("misc"));
        assert!(vt.drop_on("engine", 15.0, 30.0));
        vt.drag_end();

        assert_eq!(vt.generation(), 1.0);
        let json: serde_json::Value = serde_json::from_str(&vt.tree_json()).unwrap();
        assert_eq!(json["children"][0]["children"][0]["id"], "misc");
    }

    #[test]
    fn search_and_visibility() {
        let mut vt = controller();
        vt.set_search("turbo");
        assert!(vt.is_match("me-turbocharger"));
        assert!(vt.is_expanded("air-exhaust-system"));
        let ids: Vec<String> = serde_json::from_str(&vt.visible_ids_json()).unwrap();
        assert_eq!(
            ids,
            [
                "equipments",
                "engine",
                "main-engine-propulsion",
                "main-engine",
                "air-exhaust-system",
                "me-turbocharger",
            ]
        );
    }

    #[test]
    fn viewport_controls() {
        let mut vt = controller();
        vt.zoom_in();
        vt.zoom_in();
        assert_eq!(vt.scale_percent(), 120);
        vt.pan_start(0.0, 0.0, 0);
        vt.pan_move(15.0, -5.0);
        vt.pan_end();
        vt.reset_view();
        assert_eq!(vt.transform_css(), "translate(0px, 0px) scale(1)");
    }

    #[test]
    fn level_classes() {
        let vt = controller();
        assert_eq!(vt.level_class("seal"), "node-component");
        assert_eq!(vt.level_class("equipments"), "node-equipment-type");
        assert_eq!(vt.level_class("missing"), "");
    }

    #[test]
    fn replacing_tree() {
        let mut vt = controller();
        assert!(!vt.set_tree_json("{not json"));
        assert!(vt.set_tree_json(r#"{"id":"r","name":"R","level":"equipment_type"}"#));
        assert_eq!(vt.tree_json(), r#"{"id":"r","name":"R","level":"equipment_type"}"#);
    }

    #[test]
    fn standalone_helpers() {
        assert_eq!(drop_intent(5.0, 100.0), "before");
        assert_eq!(drop_intent(50.0, 100.0), "inside");
        assert_eq!(drop_intent(95.0, 100.0), "after");
        let ok: serde_json::Value =
            serde_json::from_str(&validate_tree(r#"{"id":"r","name":"R","level":"equipment_type"}"#))
                .unwrap();
        assert_eq!(ok["ok"], true);
        assert_eq!(ok["nodes"], 1);
        let err: serde_json::Value = serde_json::from_str(&validate_tree("[]")).unwrap();
        assert_eq!(err["ok"], false);
    }
}
