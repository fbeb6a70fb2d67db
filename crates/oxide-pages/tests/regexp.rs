//! Anchored regular expression output.

mod common;

use std::collections::HashMap;

use common::*;
use oxide_pages::converters::{to_regexp, RegExpRoute};
use oxide_pages::error::ConvertError;
use pretty_assertions::assert_eq;

fn route(file: &str) -> RegExpRoute {
    to_regexp(&tree(&[file]))
        .unwrap_or_else(|e| panic!("Failed to build regexp for: {file}\nError: {e}"))
        .remove(0)
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_dynamic_matches_single_segment_only() {
    let slug = route("[slug].vue");
    assert!(slug.pattern.is_match("/file"));
    assert!(!slug.pattern.is_match("/file/extra"));
    assert!(!slug.pattern.is_match("file"));
    assert!(!slug.pattern.is_match(""));
    assert_eq!(slug.keys, vec!["slug".to_string()]);
    assert_eq!(slug.match_path("/file"), Some(params(&[("slug", "file")])));
}

#[test]
fn test_trailing_slash_is_optional() {
    let about = route("about.vue");
    assert!(about.pattern.is_match("/about"));
    assert!(about.pattern.is_match("/about/"));
    assert!(!about.pattern.is_match("/about-us"));
}

#[test]
fn test_index_matches_root() {
    let index = route("index.vue");
    assert_eq!(index.as_str(), "^/?$");
    assert!(index.pattern.is_match("/"));
    assert!(!index.pattern.is_match("/x"));
}

#[test]
fn test_optional_segment() {
    let page = route("blog/[[page]].vue");
    assert_eq!(page.match_path("/blog"), Some(params(&[("page", "")])));
    assert_eq!(page.match_path("/blog/2"), Some(params(&[("page", "2")])));
    assert_eq!(page.match_path("/blog/2/3"), None);
}

#[test]
fn test_catchall_spans_slashes() {
    let docs = route("docs/[...slug].vue");
    assert_eq!(
        docs.match_path("/docs/guide/intro"),
        Some(params(&[("slug", "guide/intro")]))
    );
    assert_eq!(docs.match_path("/docs"), Some(params(&[("slug", "")])));
    assert_eq!(docs.match_path("/doc"), None);
}

#[test]
fn test_repeatable_params() {
    let repeat = route("tags/[tag]+.vue");
    assert_eq!(repeat.match_path("/tags/a/b"), Some(params(&[("tag", "a/b")])));
    assert_eq!(repeat.match_path("/tags"), None);

    let optional = route("tags/[[tag]]+.vue");
    assert_eq!(optional.match_path("/tags/"), Some(params(&[("tag", "")])));
    assert_eq!(optional.match_path("/tags"), None);
    assert_eq!(
        optional.match_path("/tags/a/b"),
        Some(params(&[("tag", "a/b")]))
    );
}

#[test]
fn test_mixed_segment_and_escaping() {
    let post = route("posts/v1.0-[id].vue");
    assert_eq!(post.match_path("/posts/v1.0-7"), Some(params(&[("id", "7")])));
    assert_eq!(post.match_path("/posts/v1x0-7"), None);
}

#[test]
fn test_groups_are_transparent() {
    let settings = route("(admin)/settings/[tab].vue");
    assert_eq!(
        settings.match_path("/settings/profile"),
        Some(params(&[("tab", "profile")]))
    );
}

#[test]
fn test_repeated_param_name_is_invalid() {
    let err = to_regexp(&tree(&["[id]/[id].vue"])).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidPattern { ref file, .. } if file == "[id]/[id].vue"));
}
