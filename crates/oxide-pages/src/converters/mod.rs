//! Router config emitters.
//!
//! Every emitter starts from [`flatten_tree`], which yields one entry per
//! logical route, then renders it for a target router:
//!
//! - [`to_vue_router4`]: nested Vue Router 4 routes, memoized on the tree
//! - [`to_rou3`]: flat rou3 patterns
//! - [`to_regexp`]: anchored regular expressions

pub(crate) mod cache;
mod flatten;
mod regexp;
mod rou3;
mod url;
mod vue_router;

pub use flatten::{flatten_tree, FlatRoute};
pub use regexp::{to_regexp, to_regexp_segment, RegExpRoute};
pub use rou3::{to_rou3, to_rou3_segment, Rou3Route};
pub use url::{encode_path, join_url, natural_cmp, with_leading_slash};
pub use vue_router::{
    default_route_name, to_vue_router4, to_vue_router_path, to_vue_router_segment, vue_routes,
    DuplicateRouteName, DuplicateRouteNameFn, RouteNameFn, VueRoute, VueRouteMeta,
    VueRouterOptions,
};
