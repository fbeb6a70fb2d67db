//! Tree traversal.

use super::node::{RouteNode, RouteTree};

/// Visits every node in pre-order, depth first, skipping the synthetic root.
///
/// The visitor receives the node, its depth (top-level nodes are at depth 0)
/// and its parent (`None` for top-level nodes).
pub fn walk_tree<'t, F>(tree: &'t RouteTree, mut visitor: F)
where
    F: FnMut(&'t RouteNode, usize, Option<&'t RouteNode>),
{
    let root = tree.root();
    let mut stack: Vec<(&'t RouteNode, usize, Option<&'t RouteNode>)> = tree
        .children(root)
        .map(|child| (child, 0, None))
        .collect();
    stack.reverse();

    while let Some((node, depth, parent)) = stack.pop() {
        visitor(node, depth, parent);
        let start = stack.len();
        stack.extend(tree.children(node).map(|child| (child, depth + 1, Some(node))));
        stack[start..].reverse();
    }
}
