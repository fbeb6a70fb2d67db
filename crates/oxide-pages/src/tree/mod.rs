//! Route tree.
//!
//! Parsed paths are merged into a tree keyed by canonical segment strings.
//! Route groups do not create nodes; they are recorded on each file. The
//! tree supports incremental `add_file`/`remove_file` updates and tracks a
//! generation counter used to invalidate cached emitter output.

mod builder;
mod node;
mod walk;

pub use builder::{add_file, build_tree, remove_file, BuildOptions, DuplicateStrategy, TreeInput};
pub use node::{is_page_node, NodeId, RouteNode, RouteNodeFile, RouteTree, DEFAULT_VIEW};
pub use walk::walk_tree;
