//! Flat rou3 patterns.

mod common;

use common::*;
use oxide_pages::converters::{to_rou3, Rou3Route};
use oxide_pages::error::{ConvertError, UnsupportedFeature};
use pretty_assertions::assert_eq;
use serde_json::json;

fn rou3_err(file: &str) -> ConvertError {
    to_rou3(&tree(&[file])).expect_err(&format!("Expected rou3 error for: {file}"))
}

#[test]
fn test_flat_patterns_in_tree_order() {
    let tree = tree(&[
        "index.vue",
        "users/[id].vue",
        "docs/[...slug].vue",
        "(admin)/settings.vue",
        "[...].vue",
    ]);
    let routes = to_rou3(&tree).unwrap();
    let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["/", "/users/:id", "/docs/**:slug", "/settings", "/**"]
    );
}

#[test]
fn test_routes_serialize_as_path_and_file() {
    let routes = to_rou3(&tree(&["blog/post-[id].vue"])).unwrap();
    assert_eq!(
        routes,
        vec![Rou3Route {
            path: "/blog/post-:id".to_string(),
            file: "blog/post-[id].vue".to_string(),
        }]
    );
    assert_eq!(
        serde_json::to_value(&routes).unwrap(),
        json!([{ "path": "/blog/post-:id", "file": "blog/post-[id].vue" }])
    );
}

#[test]
fn test_unsupported_params_raise_distinct_errors() {
    let optional = rou3_err("[[optional]].vue");
    let repeatable = rou3_err("[slug]+.vue");
    let optional_repeatable = rou3_err("[[slug]]+.vue");

    assert_eq!(
        optional.unsupported_feature(),
        Some(UnsupportedFeature::OptionalParam)
    );
    assert_eq!(
        repeatable.unsupported_feature(),
        Some(UnsupportedFeature::RepeatableParam)
    );
    assert_eq!(
        optional_repeatable.unsupported_feature(),
        Some(UnsupportedFeature::OptionalRepeatableParam)
    );

    assert!(optional.to_string().contains("optional parameters"));
    assert!(repeatable.to_string().contains("repeatable parameters"));
    assert!(optional_repeatable
        .to_string()
        .contains("optional repeatable parameters"));
    assert!(optional.to_string().contains("[[optional]].vue"));
}

#[test]
fn test_unsupported_param_deep_in_path() {
    let err = rou3_err("shop/[category]/[[page]].vue");
    assert!(matches!(
        err,
        ConvertError::Unsupported {
            feature: UnsupportedFeature::OptionalParam,
            ref segment,
            ..
        } if segment == "[[page]]"
    ));
}
