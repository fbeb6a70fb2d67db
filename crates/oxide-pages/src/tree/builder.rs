//! Building and incrementally updating route trees.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::node::{NodeId, RouteNodeFile, RouteTree, DEFAULT_VIEW};
use crate::error::TreeError;
use crate::lexer::{encode_segment, is_group_segment, is_index_segment, Token, TokenKind};
use crate::parser::{ParseOptions, ParsedPath, PathParser};

/// How to resolve two files that map to the same route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateStrategy {
    /// Keep the existing file unless the new one has a strictly lower priority.
    #[default]
    FirstWins,
    /// Always replace the existing file.
    LastWins,
    /// Fail, naming both files.
    Error,
}

/// Options for [`build_tree`] and [`add_file`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
    /// How raw paths are parsed.
    #[serde(flatten)]
    pub parse: ParseOptions,
    /// Conflict resolution between files at the same route.
    pub duplicate_strategy: DuplicateStrategy,
}

impl BuildOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parse options.
    #[must_use]
    pub fn parse(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Sets the duplicate strategy.
    #[must_use]
    pub const fn duplicate_strategy(mut self, strategy: DuplicateStrategy) -> Self {
        self.duplicate_strategy = strategy;
        self
    }
}

/// A file to insert into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeInput {
    /// A raw path with the default priority.
    Raw(String),
    /// A raw path with an explicit layer priority.
    Prioritized {
        /// The file path.
        path: String,
        /// Layer priority; lower wins.
        priority: i32,
    },
    /// An already parsed path.
    Parsed {
        /// The parsed path.
        parsed: ParsedPath,
        /// Layer priority; lower wins.
        priority: i32,
    },
}

impl From<&str> for TreeInput {
    fn from(path: &str) -> Self {
        Self::Raw(path.to_string())
    }
}

impl From<String> for TreeInput {
    fn from(path: String) -> Self {
        Self::Raw(path)
    }
}

impl From<&String> for TreeInput {
    fn from(path: &String) -> Self {
        Self::Raw(path.clone())
    }
}

impl From<(&str, i32)> for TreeInput {
    fn from((path, priority): (&str, i32)) -> Self {
        Self::Prioritized {
            path: path.to_string(),
            priority,
        }
    }
}

impl From<(String, i32)> for TreeInput {
    fn from((path, priority): (String, i32)) -> Self {
        Self::Prioritized { path, priority }
    }
}

impl From<ParsedPath> for TreeInput {
    fn from(parsed: ParsedPath) -> Self {
        Self::Parsed {
            parsed,
            priority: 0,
        }
    }
}

impl TreeInput {
    fn resolve(self, parser: &PathParser) -> Result<(ParsedPath, i32), TreeError> {
        match self {
            Self::Raw(path) => Ok((parser.parse(&path)?, 0)),
            Self::Prioritized { path, priority } => Ok((parser.parse(&path)?, priority)),
            Self::Parsed { parsed, priority } => Ok((parsed, priority)),
        }
    }
}

/// Builds a route tree from file paths.
///
/// Inputs are inserted in order; see [`DuplicateStrategy`] for how files
/// landing on the same route are resolved.
///
/// # Errors
///
/// Returns a `TreeError` if a path is malformed or, with the `error`
/// strategy, if two files collide.
///
/// # Example
///
/// ```
/// use oxide_pages::tree::{build_tree, BuildOptions};
///
/// let tree = build_tree(["index.vue", "users/[id].vue"], &BuildOptions::default()).unwrap();
/// assert_eq!(tree.file_count(), 2);
/// ```
pub fn build_tree<I>(inputs: I, options: &BuildOptions) -> Result<RouteTree, TreeError>
where
    I: IntoIterator,
    I::Item: Into<TreeInput>,
{
    let parser = PathParser::new(&options.parse);
    let mut tree = RouteTree::new();
    for input in inputs {
        let (parsed, priority) = input.into().resolve(&parser)?;
        insert(&mut tree, &parsed, priority, options.duplicate_strategy)?;
    }
    Ok(tree)
}

/// Inserts one file into an existing tree.
///
/// Pass a precompiled `parser` when adding many files to skip rebuilding
/// it from `options.parse` every call.
///
/// # Errors
///
/// Returns a `TreeError` if the path is malformed or, with the `error`
/// strategy, if it collides with an existing file.
pub fn add_file(
    tree: &mut RouteTree,
    input: impl Into<TreeInput>,
    options: &BuildOptions,
    parser: Option<&PathParser>,
) -> Result<(), TreeError> {
    let (parsed, priority) = match parser {
        Some(parser) => input.into().resolve(parser)?,
        None => input.into().resolve(&PathParser::new(&options.parse))?,
    };
    insert(tree, &parsed, priority, options.duplicate_strategy)
}

/// Removes a file from the tree, pruning nodes left empty.
///
/// Returns `true` if the file was attached to the tree.
pub fn remove_file(tree: &mut RouteTree, file: &str) -> bool {
    tree.touch();
    if detach(tree, file) {
        true
    } else {
        debug!(file, "remove: file not in tree");
        false
    }
}

/// Detaches `file` from the node holding it and prunes what is left empty.
///
/// A missing or stale index entry falls back to a depth-first search.
fn detach(tree: &mut RouteTree, file: &str) -> bool {
    let indexed = tree.unindex_file(file).filter(|id| {
        tree.node(*id)
            .is_some_and(|node| node.files.iter().any(|f| f.path == file))
    });
    let Some(id) = indexed.or_else(|| tree.find_file(file)) else {
        return false;
    };

    if let Some(node) = tree.node_mut(id) {
        node.files.retain(|f| f.path != file);
    }
    let pruned = tree.prune(id);
    debug!(file, pruned, "removed file");
    true
}

/// Reconstructs the root-relative path used as a deterministic sort key.
fn relative_path(parsed: &ParsedPath) -> String {
    let mut relative = parsed
        .segments
        .iter()
        .map(|segment| {
            if is_index_segment(segment) {
                "index".to_string()
            } else {
                encode_segment(segment)
            }
        })
        .collect::<Vec<_>>()
        .join("/");
    if let Some(ext) = Path::new(&parsed.file).extension().and_then(|e| e.to_str()) {
        relative.push('.');
        relative.push_str(ext);
    }
    relative
}

fn insert(
    tree: &mut RouteTree,
    parsed: &ParsedPath,
    priority: i32,
    strategy: DuplicateStrategy,
) -> Result<(), TreeError> {
    if tree.contains_file(&parsed.file) && detach(tree, &parsed.file) {
        debug!(file = %parsed.file, "file already in tree, re-inserting");
    }

    let mut node = tree.root_id();
    let mut groups = Vec::new();

    for segment in &parsed.segments {
        if is_group_segment(segment) {
            groups.extend(
                segment
                    .iter()
                    .filter(|t| t.kind == TokenKind::Group)
                    .map(|t| t.value.clone()),
            );
            continue;
        }
        node = tree.child_or_insert(node, encode_segment(segment), segment.clone());
    }
    if node == tree.root_id() {
        // Only groups: the file is the index route of its group.
        node = tree.child_or_insert(node, String::new(), vec![Token::index()]);
    }

    let file = RouteNodeFile {
        path: parsed.file.clone(),
        relative_path: relative_path(parsed),
        view_name: parsed.view_name().unwrap_or(DEFAULT_VIEW).to_string(),
        modes: parsed.modes().map(<[String]>::to_vec),
        groups,
        original_segments: parsed.segments.clone(),
        priority,
    };

    let result = attach(tree, node, file, strategy);
    if result.is_err() {
        tree.prune(node);
    }
    tree.touch();
    result
}

/// Attaches a file to a node, applying the duplicate strategy.
fn attach(
    tree: &mut RouteTree,
    id: NodeId,
    file: RouteNodeFile,
    strategy: DuplicateStrategy,
) -> Result<(), TreeError> {
    let Some(node) = tree.node_mut(id) else {
        return Ok(());
    };

    let key = file.duplicate_key();
    let Some(index) = node.files.iter().position(|f| f.duplicate_key() == key) else {
        debug!(
            file = %file.path,
            view = %file.view_name,
            priority = file.priority,
            "attached file"
        );
        let path = file.path.clone();
        node.files.push(file);
        tree.index_file(&path, id);
        return Ok(());
    };

    let existing = &node.files[index];
    let replace = match strategy {
        DuplicateStrategy::Error => {
            return Err(TreeError::DuplicateRoute {
                position: file.relative_path,
                existing: existing.path.clone(),
                incoming: file.path,
            });
        }
        DuplicateStrategy::LastWins => true,
        DuplicateStrategy::FirstWins => file.priority < existing.priority,
    };

    if !replace {
        debug!(kept = %existing.path, dropped = %file.path, "duplicate route, keeping existing file");
        return Ok(());
    }

    debug!(kept = %file.path, dropped = %existing.path, "duplicate route, replacing existing file");
    let path = file.path.clone();
    let old = std::mem::replace(&mut node.files[index], file);
    tree.unindex_file(&old.path);
    tree.index_file(&path, id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_segments_do_not_create_nodes() {
        let tree = build_tree(["(admin)/users.vue"], &BuildOptions::default()).unwrap();
        let users = tree.child(tree.root_id(), "users").unwrap();
        assert_eq!(users.files()[0].groups, vec!["admin".to_string()]);
        assert_eq!(users.files()[0].original_segments.len(), 2);
    }

    #[test]
    fn test_mixed_group_segment_is_a_node() {
        let tree = build_tree(["(admin)-users.vue"], &BuildOptions::default()).unwrap();
        assert!(tree.child(tree.root_id(), "(admin)-users").is_some());
    }

    #[test]
    fn test_relative_path_renders_index() {
        let tree = build_tree(["users/index.vue"], &BuildOptions::default()).unwrap();
        let users = tree.child(tree.root_id(), "users").unwrap();
        let index = tree.child(users.id(), "").unwrap();
        assert_eq!(index.files()[0].relative_path, "users/index.vue");
        assert_eq!(index.segment(), &[Token::index()]);
    }

    #[test]
    fn test_error_strategy_keeps_existing_file() {
        let options = BuildOptions::new().duplicate_strategy(DuplicateStrategy::Error);
        let mut tree = build_tree(["a/b.vue"], &options).unwrap();
        let err = add_file(&mut tree, "a/b.ts", &options, None).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateRoute { .. }));
        assert_eq!(tree.file_count(), 1);
        assert!(tree.child(tree.root_id(), "a").is_some());
    }

    #[test]
    fn test_remove_falls_back_to_search_on_stale_index() {
        let mut tree = build_tree(["a/b.vue", "c.vue"], &BuildOptions::default()).unwrap();
        tree.unindex_file("a/b.vue");
        assert!(!tree.contains_file("a/b.vue"));

        assert!(remove_file(&mut tree, "a/b.vue"));
        assert!(tree.child(tree.root_id(), "a").is_none());
        assert!(tree.child(tree.root_id(), "c").is_some());
        assert!(!remove_file(&mut tree, "a/b.vue"));
    }

    #[test]
    fn test_remove_ignores_index_pointing_at_wrong_node() {
        let mut tree = build_tree(["a.vue", "b.vue"], &BuildOptions::default()).unwrap();
        let b = tree.child(tree.root_id(), "b").unwrap().id();
        tree.index_file("a.vue", b);

        assert!(remove_file(&mut tree, "a.vue"));
        assert!(tree.child(tree.root_id(), "a").is_none());
        assert_eq!(tree.child(tree.root_id(), "b").unwrap().files().len(), 1);
    }

    #[test]
    fn test_remove_unknown_file() {
        let mut tree = build_tree(["a.vue"], &BuildOptions::default()).unwrap();
        assert!(!remove_file(&mut tree, "b.vue"));
        assert_eq!(tree.file_count(), 1);
    }

    #[test]
    fn test_build_options_deserialize() {
        let options: BuildOptions =
            serde_json::from_str(r#"{ "roots": ["pages"], "duplicateStrategy": "last-wins" }"#)
                .unwrap();
        assert_eq!(options.duplicate_strategy, DuplicateStrategy::LastWins);
        assert_eq!(options.parse.roots, vec!["pages".to_string()]);
    }
}
