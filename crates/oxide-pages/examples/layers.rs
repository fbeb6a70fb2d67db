//! Layered pages with incremental updates.
//!
//! An app layer overrides pages from a base layer; files are then added and
//! removed the way a file watcher would, and the tree is emitted in all
//! three router formats.
//!
//! Run with `cargo run --example layers`; set `VERBOSE=1` for debug logs.

use oxide_pages::converters::{to_regexp, to_rou3, to_vue_router4, VueRouterOptions};
use oxide_pages::parser::{ParseOptions, PathParser};
use oxide_pages::tree::{add_file, build_tree, remove_file, BuildOptions};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const APP_PRIORITY: i32 = 0;
const BASE_PRIORITY: i32 = 1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if std::env::var_os("VERBOSE").is_some() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = BuildOptions::new().parse(
        ParseOptions::new()
            .roots(&["app/pages", "base/pages"])
            .modes(&["client", "server"]),
    );
    let parser = PathParser::new(&options.parse);

    let mut tree = build_tree(
        [
            ("base/pages/index.vue", BASE_PRIORITY),
            ("base/pages/about.vue", BASE_PRIORITY),
            ("base/pages/blog/[slug].vue", BASE_PRIORITY),
            ("app/pages/about.vue", APP_PRIORITY),
            ("app/pages/(account)/profile.client.vue", APP_PRIORITY),
        ],
        &options,
    )?;
    info!(files = tree.file_count(), "built tree");

    let vue_options = VueRouterOptions::new().attr("mode", &["client", "server"]);
    let routes = to_vue_router4(&mut tree, &vue_options);
    println!("{}", serde_json::to_string_pretty(&routes)?);

    add_file(&mut tree, ("app/pages/blog.vue", APP_PRIORITY), &options, Some(&parser))?;
    add_file(&mut tree, ("app/pages/blog/index.vue", APP_PRIORITY), &options, Some(&parser))?;
    remove_file(&mut tree, "base/pages/about.vue");
    info!(generation = tree.generation(), "applied file changes");

    let routes = to_vue_router4(&mut tree, &vue_options);
    println!("{}", serde_json::to_string_pretty(&routes)?);

    for route in to_rou3(&tree)? {
        println!("rou3   {:<20} {}", route.path, route.file);
    }
    for route in to_regexp(&tree)? {
        println!("regexp {:<36} {}", route.as_str(), route.file);
    }

    Ok(())
}
