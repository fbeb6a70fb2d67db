//! # oxide-pages
//!
//! File-system page routing: turn page file paths such as
//! `users/[id].vue` or `(admin)/settings@sidebar.client.vue` into a route
//! tree, then emit router configurations from it.
//!
//! This crate provides:
//! - A segment lexer for `[param]`, `[[optional]]`, `[...catchall]`,
//!   `[param]+`, `[[param]]+` and `(group)` syntax
//! - A path parser handling roots, extensions, named views and modes
//! - An incrementally updatable route tree with layer priorities
//! - Emitters for Vue Router 4, rou3 and plain regular expressions
//!
//! ## Building a tree
//!
//! ```rust
//! use oxide_pages::converters::{to_rou3, to_vue_router4, VueRouterOptions};
//! use oxide_pages::tree::{add_file, build_tree, remove_file, BuildOptions};
//!
//! let options = BuildOptions::default();
//! let mut tree = build_tree(["index.vue", "users/[id].vue"], &options).unwrap();
//!
//! add_file(&mut tree, "about.vue", &options, None).unwrap();
//! assert!(remove_file(&mut tree, "about.vue"));
//!
//! let routes = to_vue_router4(&mut tree, &VueRouterOptions::default());
//! assert_eq!(routes[1].path, "/users/:id()");
//!
//! let flat = to_rou3(&tree).unwrap();
//! assert_eq!(flat[1].path, "/users/:id");
//! ```
//!
//! ## Layers
//!
//! Files from several roots can share a tree. When two files land on the
//! same route, the lower priority wins:
//!
//! ```rust
//! use oxide_pages::parser::ParseOptions;
//! use oxide_pages::tree::{build_tree, BuildOptions};
//!
//! let options = BuildOptions::new().parse(ParseOptions::new().roots(&["app/pages", "base/pages"]));
//! let tree = build_tree(
//!     [("base/pages/about.vue", 1), ("app/pages/about.vue", 0)],
//!     &options,
//! )
//! .unwrap();
//! assert_eq!(tree.node_for_file("app/pages/about.vue").unwrap().files().len(), 1);
//! assert!(!tree.contains_file("base/pages/about.vue"));
//! ```

pub mod converters;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use converters::{to_regexp, to_rou3, to_vue_router4, VueRoute, VueRouterOptions};
pub use error::{ConvertError, Error, Result, SegmentError, TreeError, UnsupportedFeature};
pub use lexer::{parse_segment, Token, TokenKind};
pub use parser::{parse_path, ParseOptions, ParsedPath, PathParser};
pub use tree::{add_file, build_tree, remove_file, BuildOptions, DuplicateStrategy, RouteTree};
