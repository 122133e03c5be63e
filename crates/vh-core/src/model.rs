//! Core data model for the vessel equipment hierarchy.
//!
//! The hierarchy is a single rooted tree of `Node` values. Edges are the
//! ordered `children` vectors; parent links are never stored, so a node's
//! parent is always recovered by walking down from the root.
//!
//! `Tree` is a value type. Every mutating operation (`remove_node`,
//! `insert_node`) works on a deep copy and returns a **new** `Tree`, leaving
//! `self` untouched; a renderer still holding the previous value keeps a
//! consistent view.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;

// ─── Levels ──────────────────────────────────────────────────────────────

/// Classification level of a node. Presentation only (drives the pill
/// colour); the tree does not enforce that a level matches its depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "equipment_type")]
    EquipmentType,
    #[serde(rename = "equipment")]
    Equipment,
    #[serde(rename = "assembly")]
    Assembly,
    #[serde(rename = "sub_assembly")]
    SubAssembly,
    #[serde(rename = "sub_assembly_2")]
    SubAssembly2,
    #[serde(rename = "sub_assembly_3")]
    SubAssembly3,
    #[serde(rename = "component")]
    Component,
}

impl Level {
    /// All levels, root-most first.
    pub const ALL: [Level; 7] = [
        Level::EquipmentType,
        Level::Equipment,
        Level::Assembly,
        Level::SubAssembly,
        Level::SubAssembly2,
        Level::SubAssembly3,
        Level::Component,
    ];

    /// The level a node at `depth` nominally has (root = 0).
    /// Anything deeper than the last level is a component.
    pub fn for_depth(depth: usize) -> Self {
        Self::ALL[depth.min(Self::ALL.len() - 1)]
    }

    /// Serialized name, e.g. `sub_assembly_2`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::EquipmentType => "equipment_type",
            Level::Equipment => "equipment",
            Level::Assembly => "assembly",
            Level::SubAssembly => "sub_assembly",
            Level::SubAssembly2 => "sub_assembly_2",
            Level::SubAssembly3 => "sub_assembly_3",
            Level::Component => "component",
        }
    }

    /// CSS class the web renderer uses to colour the node pill.
    pub fn css_class(&self) -> &'static str {
        match self {
            Level::EquipmentType => "node-equipment-type",
            Level::Equipment => "node-equipment",
            Level::Assembly => "node-assembly",
            Level::SubAssembly => "node-sub-assembly",
            Level::SubAssembly2 => "node-sub-assembly-2",
            Level::SubAssembly3 => "node-sub-assembly-3",
            Level::Component => "node-component",
        }
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A single entry in the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique across the whole tree, immutable.
    pub id: NodeId,

    /// Display label; also what search matches against.
    pub name: String,

    pub level: Level,

    /// Ordered children. Order is display order and drop-index order.
    /// Empty for leaves (and omitted when serialized).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(id: &str, name: &str, level: Level) -> Self {
        Self {
            id: NodeId::intern(id),
            name: name.to_string(),
            level,
            children: Vec::new(),
        }
    }

    pub fn with_children(id: &str, name: &str, level: Level, children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::leaf(id, name, level)
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Position of a direct child.
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|c| c.id == id)
    }
}

// ─── Tree ────────────────────────────────────────────────────────────────

/// The full hierarchy: a distinguished root plus everything below it.
///
/// The root has no parent, so it can never be dragged, removed, or given
/// siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> NodeId {
        self.root.id
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.root.id == id
    }

    /// Pre-order, depth-first walk: a node, then its children in order.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![&self.root],
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false; a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every id in pre-order (drives "expand all").
    pub fn all_ids(&self) -> Vec<NodeId> {
        self.iter().map(|n| n.id).collect()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find_node(id).is_some()
    }

    /// Depth-first lookup by id.
    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        self.iter().find(|n| n.id == id)
    }

    /// Id of the node whose children directly contain `id`.
    /// `None` for the root and for unknown ids.
    pub fn find_parent_id(&self, id: NodeId) -> Option<NodeId> {
        self.position_of(id).map(|(parent, _)| parent)
    }

    /// Parent id and index within the parent's children.
    pub fn position_of(&self, id: NodeId) -> Option<(NodeId, usize)> {
        self.iter()
            .find_map(|n| n.child_index(id).map(|index| (n.id, index)))
    }

    /// Ancestors of `id`, root first, excluding `id` itself.
    /// Empty for the root; `None` if `id` is not in the tree.
    pub fn path_to(&self, id: NodeId) -> Option<SmallVec<[NodeId; 8]>> {
        let mut path = SmallVec::new();
        collect_path(&self.root, id, &mut path).then_some(path)
    }

    /// Root is depth 0.
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        self.path_to(id).map(|p| p.len())
    }

    /// Check if `ancestor` is a parent/grandparent/etc. of `descendant`.
    /// A node is not its own ancestor.
    pub fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        if ancestor == descendant {
            return false;
        }
        self.path_to(descendant)
            .is_some_and(|path| path.contains(&ancestor))
    }

    /// Ids that occur more than once, each reported once, in pre-order of
    /// their second occurrence.
    pub fn duplicate_ids(&self) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for node in self.iter() {
            if !seen.insert(node.id) && !dups.contains(&node.id) {
                dups.push(node.id);
            }
        }
        dups
    }

    /// Detach `id` and its subtree.
    ///
    /// Returns the new tree and the detached subtree. Removing the root or
    /// an unknown id is a no-op: an unchanged copy and `None`.
    pub fn remove_node(&self, id: NodeId) -> (Tree, Option<Node>) {
        let mut root = self.root.clone();
        let removed = detach(&mut root, id);
        if removed.is_none() {
            log::debug!("remove_node: {id} is the root or not in the tree; unchanged");
        }
        (Tree { root }, removed)
    }

    /// Insert `node` into `parent_id`'s children at `index`.
    ///
    /// An index past the end appends. An unknown parent is a no-op and
    /// returns an unchanged copy.
    pub fn insert_node(&self, parent_id: NodeId, node: Node, index: usize) -> Tree {
        let mut root = self.root.clone();
        match attach(&mut root, parent_id, node, index) {
            Ok(()) => Tree { root },
            Err(node) => {
                log::debug!(
                    "insert_node: parent {parent_id} not found; {} not inserted",
                    node.id
                );
                self.clone()
            }
        }
    }
}

/// Pre-order iterator over a tree's nodes.
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn collect_path(node: &Node, id: NodeId, path: &mut SmallVec<[NodeId; 8]>) -> bool {
    if node.id == id {
        return true;
    }
    path.push(node.id);
    if node.children.iter().any(|c| collect_path(c, id, path)) {
        return true;
    }
    path.pop();
    false
}

fn detach(node: &mut Node, id: NodeId) -> Option<Node> {
    if let Some(pos) = node.child_index(id) {
        return Some(node.children.remove(pos));
    }
    node.children.iter_mut().find_map(|c| detach(c, id))
}

/// Hands the node back in `Err` when `parent_id` is not below `node`.
fn attach(node: &mut Node, parent_id: NodeId, child: Node, index: usize) -> Result<(), Node> {
    if node.id == parent_id {
        let at = index.min(node.children.len());
        node.children.insert(at, child);
        return Ok(());
    }
    let mut child = child;
    for c in node.children.iter_mut() {
        match attach(c, parent_id, child, index) {
            Ok(()) => return Ok(()),
            Err(back) => child = back,
        }
    }
    Err(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    /// root
    /// ├── a
    /// │   ├── a1
    /// │   └── a2
    /// └── b
    fn sample() -> Tree {
        Tree::new(Node::with_children(
            "root",
            "Root",
            Level::EquipmentType,
            vec![
                Node::with_children(
                    "a",
                    "Alpha",
                    Level::Equipment,
                    vec![
                        Node::leaf("a1", "Alpha One", Level::Assembly),
                        Node::leaf("a2", "Alpha Two", Level::Assembly),
                    ],
                ),
                Node::leaf("b", "Beta", Level::Equipment),
            ],
        ))
    }

    #[test]
    fn level_for_depth_clamps() {
        assert_eq!(Level::for_depth(0), Level::EquipmentType);
        assert_eq!(Level::for_depth(4), Level::SubAssembly2);
        assert_eq!(Level::for_depth(6), Level::Component);
        assert_eq!(Level::for_depth(40), Level::Component);
    }

    #[test]
    fn level_serde_names() {
        let json = serde_json::to_string(&Level::SubAssembly2).unwrap();
        assert_eq!(json, "\"sub_assembly_2\"");
        for level in Level::ALL {
            let parsed: Level = serde_json::from_str(&format!("\"{}\"", level.as_str())).unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn pre_order_ids() {
        let ids: Vec<&str> = sample().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["root", "a", "a1", "a2", "b"]);
        assert_eq!(sample().len(), 5);
    }

    #[test]
    fn find_and_parent() {
        let tree = sample();
        assert_eq!(tree.find_node(id("a2")).map(|n| n.name.as_str()), Some("Alpha Two"));
        assert!(tree.find_node(id("zz")).is_none());
        assert_eq!(tree.find_parent_id(id("a2")), Some(id("a")));
        assert_eq!(tree.find_parent_id(id("b")), Some(id("root")));
        assert_eq!(tree.find_parent_id(id("root")), None);
        assert_eq!(tree.find_parent_id(id("zz")), None);
    }

    #[test]
    fn position_and_depth() {
        let tree = sample();
        assert_eq!(tree.position_of(id("a2")), Some((id("a"), 1)));
        assert_eq!(tree.position_of(id("root")), None);
        assert_eq!(tree.depth_of(id("root")), Some(0));
        assert_eq!(tree.depth_of(id("a1")), Some(2));
        assert_eq!(tree.depth_of(id("zz")), None);
        assert_eq!(tree.path_to(id("a1")).unwrap().as_slice(), &[id("root"), id("a")]);
    }

    #[test]
    fn ancestry() {
        let tree = sample();
        assert!(tree.is_ancestor_of(id("a"), id("a1")));
        assert!(tree.is_ancestor_of(id("root"), id("a1")));
        assert!(!tree.is_ancestor_of(id("a1"), id("a")));
        assert!(!tree.is_ancestor_of(id("a"), id("a")));
        assert!(!tree.is_ancestor_of(id("b"), id("a1")));
    }

    #[test]
    fn remove_leaves_input_untouched() {
        let tree = sample();
        let (after, removed) = tree.remove_node(id("a"));
        assert_eq!(removed.as_ref().map(|n| n.children.len()), Some(2));
        assert!(!after.contains(id("a1")));
        assert!(tree.contains(id("a1")));
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn remove_root_is_noop() {
        let tree = sample();
        let (after, removed) = tree.remove_node(id("root"));
        assert!(removed.is_none());
        assert_eq!(after, tree);
    }

    #[test]
    fn insert_creates_children_on_leaf() {
        let tree = sample();
        let after = tree.insert_node(id("b"), Node::leaf("new", "New", Level::Assembly), 0);
        assert_eq!(after.position_of(id("new")), Some((id("b"), 0)));
    }

    #[test]
    fn insert_past_end_appends() {
        let tree = sample();
        let after = tree.insert_node(id("a"), Node::leaf("x", "X", Level::Assembly), 99);
        assert_eq!(after.position_of(id("x")), Some((id("a"), 2)));
    }

    #[test]
    fn insert_into_missing_parent_is_noop() {
        let tree = sample();
        let after = tree.insert_node(id("nope"), Node::leaf("x", "X", Level::Assembly), 0);
        assert_eq!(after, tree);
    }

    #[test]
    fn duplicates_reported_once() {
        let tree = Tree::new(Node::with_children(
            "r",
            "R",
            Level::EquipmentType,
            vec![
                Node::leaf("dup", "One", Level::Equipment),
                Node::leaf("dup", "Two", Level::Equipment),
                Node::leaf("dup", "Three", Level::Equipment),
            ],
        ));
        assert_eq!(tree.duplicate_ids(), vec![id("dup")]);
        assert!(sample().duplicate_ids().is_empty());
    }
}
