#![allow(dead_code)]

use oxide_pages::converters::{to_vue_router4, VueRouterOptions};
use oxide_pages::lexer::{parse_segment, Token};
use oxide_pages::parser::ParseOptions;
use oxide_pages::tree::{build_tree, BuildOptions, RouteTree};
use serde_json::Value;

pub fn segment(raw: &str) -> Vec<Token> {
    parse_segment(raw, None, None).unwrap_or_else(|e| panic!("Failed to lex: {raw}\nError: {e}"))
}

pub fn tree(files: &[&str]) -> RouteTree {
    tree_with(files, &BuildOptions::default())
}

pub fn tree_with(files: &[&str], options: &BuildOptions) -> RouteTree {
    build_tree(files.iter().copied(), options)
        .unwrap_or_else(|e| panic!("Failed to build tree from {files:?}\nError: {e}"))
}

/// Build options recognizing the `client` and `server` modes.
pub fn mode_options() -> BuildOptions {
    BuildOptions::new().parse(ParseOptions::new().modes(&["client", "server"]))
}

/// Emits the nested routes of `tree` as JSON.
pub fn routes_json(tree: &mut RouteTree, options: &VueRouterOptions) -> Value {
    serde_json::to_value(to_vue_router4(tree, options)).unwrap()
}

/// Builds a tree from `files` and emits its nested routes as JSON.
pub fn vue(files: &[&str]) -> Value {
    routes_json(&mut tree(files), &VueRouterOptions::default())
}

/// Collects the top-level route paths.
pub fn top_paths(routes: &Value) -> Vec<String> {
    routes
        .as_array()
        .unwrap()
        .iter()
        .map(|route| route["path"].as_str().unwrap().to_string())
        .collect()
}
