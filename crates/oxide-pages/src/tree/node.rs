//! Route tree storage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::converters::cache::CachedRoutes;
use crate::lexer::Token;

/// Index of a node inside its [`RouteTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The view name given to files without an `@name` suffix.
pub const DEFAULT_VIEW: &str = "default";

/// One physical file's contribution to a tree position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNodeFile {
    /// The file path as given by the caller.
    pub path: String,
    /// Reconstructed path relative to its root, used as a sort key.
    pub relative_path: String,
    /// `default` or the `@name` named view.
    pub view_name: String,
    /// Mode suffixes, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,
    /// Route groups the file sits under, outermost first.
    pub groups: Vec<String>,
    /// The parsed segments, group segments included.
    pub original_segments: Vec<Vec<Token>>,
    /// Layer priority; lower wins.
    pub priority: i32,
}

impl RouteNodeFile {
    /// Returns true if this file renders the default view.
    #[must_use]
    pub fn is_default_view(&self) -> bool {
        self.view_name == DEFAULT_VIEW
    }

    /// The joined group path, e.g. `admin/settings`.
    #[must_use]
    pub fn group_path(&self) -> String {
        self.groups.join("/")
    }

    /// Key under which two files at one node are considered duplicates.
    pub(crate) fn duplicate_key(&self) -> (String, String, String) {
        let mut modes = self.modes.clone().unwrap_or_default();
        modes.sort();
        (self.view_name.clone(), self.group_path(), modes.join(","))
    }
}

/// A position in the route tree.
#[derive(Debug, Clone)]
pub struct RouteNode {
    id: NodeId,
    raw_segment: String,
    segment: Vec<Token>,
    pub(crate) files: Vec<RouteNodeFile>,
    pub(crate) children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl RouteNode {
    fn new(id: NodeId, raw_segment: String, segment: Vec<Token>, parent: Option<NodeId>) -> Self {
        Self {
            id,
            raw_segment,
            segment,
            files: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }

    /// This node's id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The canonical segment string this node is keyed by.
    #[must_use]
    pub fn raw_segment(&self) -> &str {
        &self.raw_segment
    }

    /// The tokens of this node's segment.
    #[must_use]
    pub fn segment(&self) -> &[Token] {
        &self.segment
    }

    /// Files attached to this node.
    #[must_use]
    pub fn files(&self) -> &[RouteNodeFile] {
        &self.files
    }

    /// Child ids in insertion order.
    #[must_use]
    pub fn child_ids(&self) -> &[NodeId] {
        &self.children
    }

    /// The parent node, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns true if at least one file is attached.
    #[must_use]
    pub fn is_page(&self) -> bool {
        !self.files.is_empty()
    }
}

/// Returns true if the node holds at least one file.
#[must_use]
pub fn is_page_node(node: &RouteNode) -> bool {
    node.is_page()
}

/// A tree of route positions built from page files.
///
/// Nodes live in an arena; a parent owns its children through their ids and
/// the file index maps every attached file back to its node. Every mutation
/// bumps the generation so cached emitter output can be invalidated.
#[derive(Debug, Clone)]
pub struct RouteTree {
    nodes: Vec<Option<RouteNode>>,
    free: Vec<usize>,
    file_index: HashMap<String, NodeId>,
    generation: u64,
    pub(crate) cache: Option<CachedRoutes>,
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTree {
    const ROOT: NodeId = NodeId(0);

    /// Creates an empty tree holding only the synthetic root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(RouteNode::new(Self::ROOT, String::new(), Vec::new(), None))],
            free: Vec::new(),
            file_index: HashMap::new(),
            generation: 0,
            cache: None,
        }
    }

    /// The synthetic root node.
    #[must_use]
    pub fn root(&self) -> &RouteNode {
        self.nodes[Self::ROOT.0]
            .as_ref()
            .unwrap_or_else(|| unreachable!("the root node is never removed"))
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&RouteNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Iterates over the children of a node in insertion order.
    pub fn children<'t>(&'t self, node: &'t RouteNode) -> impl Iterator<Item = &'t RouteNode> + 't {
        node.children.iter().filter_map(|id| self.node(*id))
    }

    /// Finds the child of `parent` stored under `key`.
    #[must_use]
    pub fn child(&self, parent: NodeId, key: &str) -> Option<&RouteNode> {
        let parent = self.node(parent)?;
        self.children(parent).find(|child| child.raw_segment == key)
    }

    /// Returns the node holding `file`, according to the file index.
    #[must_use]
    pub fn node_for_file(&self, file: &str) -> Option<&RouteNode> {
        self.file_index.get(file).and_then(|id| self.node(*id))
    }

    /// Number of files currently attached to the tree.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.file_index.len()
    }

    /// Returns true if `file` is attached to the tree.
    #[must_use]
    pub fn contains_file(&self, file: &str) -> bool {
        self.file_index.contains_key(file)
    }

    /// Returns true if the tree has no nodes besides the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root().children.is_empty()
    }

    /// The mutation counter; changes whenever the tree is modified.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn touch(&mut self) {
        self.generation += 1;
    }

    pub(crate) const fn root_id(&self) -> NodeId {
        Self::ROOT
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut RouteNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns the child of `parent` keyed by `key`, creating it if needed.
    pub(crate) fn child_or_insert(&mut self, parent: NodeId, key: String, segment: Vec<Token>) -> NodeId {
        if let Some(child) = self.child(parent, &key) {
            return child.id;
        }

        let id = match self.free.pop() {
            Some(slot) => NodeId(slot),
            None => {
                self.nodes.push(None);
                NodeId(self.nodes.len() - 1)
            }
        };
        self.nodes[id.0] = Some(RouteNode::new(id, key, segment, Some(parent)));
        if let Some(parent) = self.node_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    pub(crate) fn index_file(&mut self, file: &str, node: NodeId) {
        self.file_index.insert(file.to_string(), node);
    }

    pub(crate) fn unindex_file(&mut self, file: &str) -> Option<NodeId> {
        self.file_index.remove(file)
    }

    /// Finds the node holding `file` by walking the whole tree.
    pub(crate) fn find_file(&self, file: &str) -> Option<NodeId> {
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if node.files.iter().any(|f| f.path == file) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Removes empty nodes from `id` upwards, stopping at the first node
    /// that still has files or children.
    pub(crate) fn prune(&mut self, mut id: NodeId) -> usize {
        let mut removed = 0;
        while id != Self::ROOT {
            let Some(node) = self.node(id) else { break };
            if node.is_page() || !node.children.is_empty() {
                break;
            }
            let parent = node.parent;
            self.nodes[id.0] = None;
            self.free.push(id.0);
            removed += 1;

            let Some(parent) = parent else { break };
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.retain(|child| *child != id);
            }
            id = parent;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    fn tokens(value: &str) -> Vec<Token> {
        vec![Token::text(value)]
    }

    #[test]
    fn test_child_or_insert_reuses_keys() {
        let mut tree = RouteTree::new();
        let root = tree.root_id();
        let a = tree.child_or_insert(root, "a".to_string(), tokens("a"));
        let again = tree.child_or_insert(root, "a".to_string(), tokens("a"));
        assert_eq!(a, again);
        assert_eq!(tree.root().child_ids(), &[a]);
        assert_eq!(tree.node(a).unwrap().parent(), Some(root));
    }

    #[test]
    fn test_prune_removes_empty_chain() {
        let mut tree = RouteTree::new();
        let root = tree.root_id();
        let a = tree.child_or_insert(root, "a".to_string(), tokens("a"));
        let b = tree.child_or_insert(a, "b".to_string(), tokens("b"));
        assert_eq!(tree.prune(b), 2);
        assert!(tree.is_empty());
        assert!(tree.node(a).is_none());

        let c = tree.child_or_insert(root, "[id]".to_string(), vec![Token::new(TokenKind::Dynamic, "id")]);
        assert!(c == a || c == b, "freed slots are reused");
    }

    #[test]
    fn test_duplicate_key_ignores_mode_order() {
        let file = |modes: &[&str]| RouteNodeFile {
            path: "a.vue".to_string(),
            relative_path: "a.vue".to_string(),
            view_name: DEFAULT_VIEW.to_string(),
            modes: Some(modes.iter().map(|m| (*m).to_string()).collect()),
            groups: vec!["g".to_string()],
            original_segments: Vec::new(),
            priority: 0,
        };
        assert_eq!(
            file(&["client", "vapor"]).duplicate_key(),
            file(&["vapor", "client"]).duplicate_key()
        );
    }
}
