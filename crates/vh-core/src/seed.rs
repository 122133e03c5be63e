//! Seed hierarchy loading.
//!
//! The tree is built once per session from static JSON: a nested `Node`
//! object (`id`, `name`, `level`, optional `children`).

use crate::model::Tree;

/// The built-in vessel equipment hierarchy.
const VESSEL_HIERARCHY: &str = include_str!("../data/vessel_hierarchy.json");

/// Parse a hierarchy from JSON, rejecting duplicate ids.
pub fn parse_tree(json: &str) -> Result<Tree, String> {
    let tree: Tree =
        serde_json::from_str(json).map_err(|e| format!("invalid hierarchy JSON: {e}"))?;
    let dups = tree.duplicate_ids();
    if !dups.is_empty() {
        let names: Vec<&str> = dups.iter().map(|id| id.as_str()).collect();
        return Err(format!("duplicate node ids: {}", names.join(", ")));
    }
    log::debug!("loaded hierarchy rooted at {} ({} nodes)", tree.root_id(), tree.len());
    Ok(tree)
}

/// Load the built-in vessel equipment hierarchy.
pub fn vessel_hierarchy() -> Result<Tree, String> {
    parse_tree(VESSEL_HIERARCHY)
}
