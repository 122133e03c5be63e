//! Free-text search over node names.
//!
//! A search yields the set of matching nodes plus every ancestor on the path
//! to a match, so the view can auto-expand those paths and hide the rest.

use crate::id::NodeId;
use crate::model::{Node, Tree};
use std::collections::HashSet;

/// Result of a name search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Nodes whose name contains the query (case-insensitive).
    pub matched: HashSet<NodeId>,
    /// Ancestors of matched nodes.
    pub path: HashSet<NodeId>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn is_match(&self, id: NodeId) -> bool {
        self.matched.contains(&id)
    }

    /// A node stays visible under an active search if it matches or leads
    /// to a match.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.matched.contains(&id) || self.path.contains(&id)
    }
}

/// Case-insensitive substring search. A blank query matches nothing; any
/// other query is matched as typed, surrounding spaces included.
pub fn search(tree: &Tree, query: &str) -> SearchResult {
    let mut result = SearchResult::default();
    if query.trim().is_empty() {
        return result;
    }
    let needle = query.to_lowercase();
    let mut ancestors = Vec::new();
    search_node(tree.root(), &needle, &mut ancestors, &mut result);
    log::trace!(
        "search {query:?}: {} matched, {} on path",
        result.matched.len(),
        result.path.len()
    );
    result
}

fn search_node(node: &Node, needle: &str, ancestors: &mut Vec<NodeId>, out: &mut SearchResult) {
    if node.name.to_lowercase().contains(needle) {
        out.matched.insert(node.id);
        out.path.extend(ancestors.iter().copied());
    }
    ancestors.push(node.id);
    for child in &node.children {
        search_node(child, needle, ancestors, out);
    }
    ancestors.pop();
}
