//! Flattening a route tree into one entry per logical route.

use crate::lexer::{is_group_segment, Token, TokenKind};
use crate::tree::{walk_tree, RouteNodeFile, RouteTree};

/// Stands in for the segments of a file that sits only under groups.
static INDEX_SEGMENT: [Token; 1] = [Token {
    kind: TokenKind::Static,
    value: String::new(),
}];

/// One logical route: a primary file plus every file sharing its position.
#[derive(Debug, Clone)]
pub struct FlatRoute<'t> {
    /// The file that drives the canonical path and name.
    pub file: &'t RouteNodeFile,
    /// Path-building segments of the primary file, groups excluded.
    pub segments: Vec<&'t [Token]>,
    /// All files at this position with the same group path, named views
    /// and mode variants included. Contains `file` itself.
    pub siblings: Vec<&'t RouteNodeFile>,
}

impl FlatRoute<'_> {
    /// Returns true if any sibling renders a named view.
    #[must_use]
    pub fn has_named_views(&self) -> bool {
        self.siblings.iter().any(|f| !f.is_default_view())
    }
}

/// Files at one node sharing a group path.
struct Bucket<'t> {
    group_path: String,
    defaults: Vec<&'t RouteNodeFile>,
    named: Vec<&'t RouteNodeFile>,
}

/// Flattens the tree in depth-first order.
///
/// Files at each page node are grouped by their joined group path; each
/// group yields one [`FlatRoute`] whose primary file is the first default
/// view (or the first named view when no default exists).
#[must_use]
pub fn flatten_tree(tree: &RouteTree) -> Vec<FlatRoute<'_>> {
    let mut routes = Vec::new();

    walk_tree(tree, |node, _, _| {
        let mut buckets: Vec<Bucket<'_>> = Vec::new();
        for file in node.files() {
            let group_path = file.group_path();
            let position = match buckets.iter().position(|b| b.group_path == group_path) {
                Some(position) => position,
                None => {
                    buckets.push(Bucket {
                        group_path,
                        defaults: Vec::new(),
                        named: Vec::new(),
                    });
                    buckets.len() - 1
                }
            };
            let bucket = &mut buckets[position];
            if file.is_default_view() {
                bucket.defaults.push(file);
            } else {
                bucket.named.push(file);
            }
        }

        for bucket in buckets {
            let Some(primary) = bucket.defaults.first().or(bucket.named.first()).copied() else {
                continue;
            };
            let mut segments: Vec<&[Token]> = primary
                .original_segments
                .iter()
                .filter(|segment| !is_group_segment(segment))
                .map(Vec::as_slice)
                .collect();
            if segments.is_empty() {
                segments.push(&INDEX_SEGMENT);
            }
            let siblings = bucket.defaults.into_iter().chain(bucket.named).collect();
            routes.push(FlatRoute {
                file: primary,
                segments,
                siblings,
            });
        }
    });

    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseOptions;
    use crate::tree::{build_tree, BuildOptions};

    fn tree(files: &[&str]) -> RouteTree {
        let options = BuildOptions::new().parse(ParseOptions::new().modes(&["client", "server"]));
        build_tree(files.iter().copied(), &options).unwrap()
    }

    #[test]
    fn test_mode_variants_share_one_route() {
        let tree = tree(&["app.client.vue", "app.server.vue"]);
        let flat = flatten_tree(&tree);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].file.path, "app.client.vue");
        assert_eq!(flat[0].siblings.len(), 2);
    }

    #[test]
    fn test_group_paths_split_routes() {
        let tree = tree(&["(a)/about.vue", "(b)/about.vue"]);
        let flat = flatten_tree(&tree);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].segments.len(), 1);
        assert_eq!(flat[0].file.groups, vec!["a".to_string()]);
    }

    #[test]
    fn test_named_views_attach_to_primary() {
        let tree = tree(&["index@sidebar.vue", "index.vue"]);
        let flat = flatten_tree(&tree);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].file.path, "index.vue");
        assert!(flat[0].has_named_views());
    }

    #[test]
    fn test_group_only_file_is_index() {
        let tree = tree(&["(admin).vue"]);
        let flat = flatten_tree(&tree);
        assert_eq!(flat[0].segments, vec![&INDEX_SEGMENT[..]]);
    }
}
