//! Nested route config in Vue Router 4 syntax.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cache::CachedRoutes;
use super::flatten::{flatten_tree, FlatRoute};
use super::url::{encode_path, join_url, natural_cmp, with_leading_slash};
use crate::lexer::{is_index_segment, Token, TokenKind};
use crate::tree::RouteTree;

/// Catchall syntax for a catchall followed by more segments.
const MID_CATCHALL: &str = "([^/]*)*";
/// Catchall syntax for a terminal catchall.
const TERMINAL_CATCHALL: &str = "(.*)*";

/// Computes a route name from the slash-joined raw segment names.
pub type RouteNameFn = Box<dyn Fn(&str) -> String>;

/// Receives the first collision for each duplicated route name.
pub type DuplicateRouteNameFn = Box<dyn Fn(&DuplicateRouteName)>;

/// Two distinct routes that resolved to the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRouteName {
    /// The shared route name.
    pub name: String,
    /// The file of the route that collided.
    pub file: String,
    /// The file of the route that claimed the name first.
    pub existing_file: String,
}

/// Options for [`to_vue_router4`].
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VueRouterOptions {
    /// Overrides the default route name generator.
    #[serde(skip)]
    pub get_route_name: Option<RouteNameFn>,
    /// Receives duplicate route names; defaults to a `tracing` warning.
    #[serde(skip)]
    pub on_duplicate_route_name: Option<DuplicateRouteNameFn>,
    /// Attribute name to candidate mode values. A route carrying exactly one
    /// candidate gets it hoisted as a scalar attribute.
    pub attrs: BTreeMap<String, Vec<String>>,
}

impl fmt::Debug for VueRouterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VueRouterOptions")
            .field("get_route_name", &self.get_route_name.is_some())
            .field("on_duplicate_route_name", &self.on_duplicate_route_name.is_some())
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl VueRouterOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom route name generator.
    #[must_use]
    pub fn get_route_name(mut self, f: impl Fn(&str) -> String + 'static) -> Self {
        self.get_route_name = Some(Box::new(f));
        self
    }

    /// Sets the duplicate route name callback.
    #[must_use]
    pub fn on_duplicate_route_name(mut self, f: impl Fn(&DuplicateRouteName) + 'static) -> Self {
        self.on_duplicate_route_name = Some(Box::new(f));
        self
    }

    /// Maps an attribute to the mode values it may be hoisted from.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, values: &[&str]) -> Self {
        self.attrs
            .insert(name.into(), values.iter().map(|v| (*v).to_string()).collect());
        self
    }

    /// Identifies the output-affecting configuration for caching.
    fn fingerprint(&self) -> String {
        format!(
            "{}{}{}",
            u8::from(self.get_route_name.is_some()),
            u8::from(self.on_duplicate_route_name.is_some()),
            serde_json::to_string(&self.attrs).unwrap_or_default()
        )
    }
}

/// Route metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VueRouteMeta {
    /// Groups the route's file sits under.
    pub groups: Vec<String>,
}

/// One entry of a Vue Router 4 route config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VueRoute {
    /// Route name; absent when a child with an empty path owns it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Path, relative to the parent for nested routes.
    pub path: String,
    /// The primary page file.
    pub file: String,
    /// Nested routes.
    pub children: Vec<VueRoute>,
    /// Group metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<VueRouteMeta>,
    /// View name to file, when named views are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<BTreeMap<String, String>>,
    /// Modes not hoisted into an attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,
    /// Attributes hoisted from modes.
    #[serde(flatten)]
    pub attrs: BTreeMap<String, String>,
}

/// Renders one segment in Vue Router path syntax, without a leading slash.
///
/// `has_succeeding` selects the mid-path catchall form.
///
/// # Example
///
/// ```
/// use oxide_pages::converters::to_vue_router_segment;
/// use oxide_pages::lexer::parse_segment;
///
/// let tokens = parse_segment("[...slug]", None, None).unwrap();
/// assert_eq!(to_vue_router_segment(&tokens, false), ":slug(.*)*");
/// ```
#[must_use]
pub fn to_vue_router_segment(tokens: &[Token], has_succeeding: bool) -> String {
    tokens
        .iter()
        .map(|token| {
            let name = token.value.as_str();
            match token.kind {
                TokenKind::Static => encode_path(name),
                TokenKind::Dynamic => format!(":{name}()"),
                TokenKind::Optional => format!(":{name}?"),
                TokenKind::Repeatable => format!(":{name}+"),
                TokenKind::OptionalRepeatable => format!(":{name}*"),
                TokenKind::Catchall => {
                    let name = if name.is_empty() { "pathMatch" } else { name };
                    let pattern = if has_succeeding { MID_CATCHALL } else { TERMINAL_CATCHALL };
                    format!(":{name}{pattern}")
                }
                TokenKind::Group => String::new(),
            }
        })
        .collect()
}

/// Renders a full path in Vue Router syntax. Index segments contribute
/// nothing; group tokens are dropped.
#[must_use]
pub fn to_vue_router_path(segments: &[&[Token]]) -> String {
    let parts: Vec<String> = segments
        .iter()
        .enumerate()
        .filter(|(_, tokens)| !is_index_segment(tokens))
        .map(|(i, tokens)| {
            let has_succeeding = segments.get(i + 1).is_some_and(|next| !is_index_segment(next));
            to_vue_router_segment(tokens, has_succeeding)
        })
        .filter(|part| !part.is_empty())
        .collect();
    format!("/{}", parts.join("/"))
}

/// The default route name: trailing `/index` removed, slashes turned into
/// dashes, `index` when nothing is left.
#[must_use]
pub fn default_route_name(raw: &str) -> String {
    let trimmed = if raw == "index" {
        ""
    } else {
        raw.strip_suffix("/index").unwrap_or(raw)
    };
    let name = trimmed.replace('/', "-");
    if name.is_empty() {
        "index".to_string()
    } else {
        name
    }
}

/// Sort weight of a segment; higher sorts first.
fn segment_score(tokens: &[Token], has_succeeding: bool) -> u8 {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Group)
        .map(|t| match t.kind {
            TokenKind::Catchall if has_succeeding => 1,
            TokenKind::Catchall => 0,
            TokenKind::OptionalRepeatable => 2,
            TokenKind::Optional => 3,
            TokenKind::Repeatable => 4,
            TokenKind::Dynamic => 5,
            TokenKind::Static | TokenKind::Group => 6,
        })
        .min()
        .unwrap_or(6)
}

/// A route under construction.
struct Draft<'t> {
    raw_name: String,
    path: String,
    scores: Vec<u8>,
    flat: FlatRoute<'t>,
    children: Vec<Draft<'t>>,
}

fn compare_drafts(a: &Draft<'_>, b: &Draft<'_>) -> Ordering {
    a.scores
        .iter()
        .zip(&b.scores)
        .find(|(x, y)| x != y)
        .map_or(Ordering::Equal, |(x, y)| y.cmp(x))
        .then_with(|| a.scores.len().cmp(&b.scores.len()))
        .then_with(|| natural_cmp(&a.path, &b.path))
}

/// Places a route, nesting it under an existing route whose name and path
/// match a prefix of its own.
fn place<'t>(roots: &mut Vec<Draft<'t>>, flat: FlatRoute<'t>) {
    let mut level = roots;
    let mut raw_name = String::new();
    let mut path = String::new();
    let mut scores = Vec::new();

    for (i, tokens) in flat.segments.iter().enumerate() {
        let is_index = is_index_segment(tokens);
        if !raw_name.is_empty() {
            raw_name.push('/');
        }
        if is_index {
            raw_name.push_str("index");
        } else {
            raw_name.extend(
                tokens
                    .iter()
                    .filter(|t| t.kind != TokenKind::Group)
                    .map(|t| t.value.as_str()),
            );
        }

        let has_succeeding = flat
            .segments
            .get(i + 1)
            .is_some_and(|next| !is_index_segment(next));
        let route_path = format!("/{}", to_vue_router_segment(tokens, has_succeeding));
        let candidate =
            with_leading_slash(&join_url(&path, &route_path)).replace(MID_CATCHALL, TERMINAL_CATCHALL);

        if let Some(position) = level
            .iter()
            .position(|d| d.raw_name == raw_name && d.path == candidate)
        {
            level = &mut level[position].children;
            path.clear();
            scores.clear();
        } else if is_index {
            if path.is_empty() {
                path.push('/');
            }
        } else {
            path.push_str(&route_path);
            scores.push(segment_score(tokens, has_succeeding));
        }
    }

    level.push(Draft {
        raw_name,
        path,
        scores,
        flat,
        children: Vec::new(),
    });
}

/// Turns drafts into sorted, named routes.
struct Finalizer<'o> {
    options: &'o VueRouterOptions,
    names: HashMap<String, String>,
    reported: HashSet<String>,
}

impl Finalizer<'_> {
    fn finalize(&mut self, mut drafts: Vec<Draft<'_>>, nested: bool) -> Vec<VueRoute> {
        drafts.sort_by(compare_drafts);
        drafts
            .into_iter()
            .map(|draft| self.finish(draft, nested))
            .collect()
    }

    fn finish(&mut self, draft: Draft<'_>, nested: bool) -> VueRoute {
        let Draft {
            raw_name,
            path,
            flat,
            children,
            ..
        } = draft;

        let path = match path.strip_prefix('/') {
            Some(relative) if nested => relative.to_string(),
            _ => path,
        };
        let children = self.finalize(children, true);

        let name = if children.iter().any(|child| child.path.is_empty()) {
            None
        } else {
            Some(self.route_name(&raw_name))
        };
        if let Some(name) = &name {
            self.claim_name(name, &flat.file.path);
        }

        let components = flat.has_named_views().then(|| {
            let mut components = BTreeMap::new();
            for file in &flat.siblings {
                components
                    .entry(file.view_name.clone())
                    .or_insert_with(|| file.path.clone());
            }
            components
        });

        let (modes, attrs) = self.split_modes(&flat);

        VueRoute {
            name,
            path,
            file: flat.file.path.clone(),
            children,
            meta: (!flat.file.groups.is_empty()).then(|| VueRouteMeta {
                groups: flat.file.groups.clone(),
            }),
            components,
            modes,
            attrs,
        }
    }

    fn route_name(&self, raw_name: &str) -> String {
        match &self.options.get_route_name {
            Some(get_route_name) => get_route_name(raw_name),
            None => default_route_name(raw_name),
        }
    }

    fn claim_name(&mut self, name: &str, file: &str) {
        match self.names.get(name) {
            None => {
                self.names.insert(name.to_string(), file.to_string());
            }
            Some(existing) if existing != file && self.reported.insert(name.to_string()) => {
                let duplicate = DuplicateRouteName {
                    name: name.to_string(),
                    file: file.to_string(),
                    existing_file: existing.clone(),
                };
                match &self.options.on_duplicate_route_name {
                    Some(on_duplicate) => on_duplicate(&duplicate),
                    None => warn!(
                        name,
                        file,
                        existing = %duplicate.existing_file,
                        "duplicate route name; set a custom name to disambiguate"
                    ),
                }
            }
            Some(_) => {}
        }
    }

    /// Unions sibling modes and hoists configured attributes out of them.
    fn split_modes(&self, flat: &FlatRoute<'_>) -> (Option<Vec<String>>, BTreeMap<String, String>) {
        let mut modes: Vec<String> = Vec::new();
        for mode in flat.siblings.iter().filter_map(|f| f.modes.as_ref()).flatten() {
            if !modes.contains(mode) {
                modes.push(mode.clone());
            }
        }

        let mut attrs = BTreeMap::new();
        for (attr, candidates) in &self.options.attrs {
            let present: Vec<&String> = candidates.iter().filter(|c| modes.contains(*c)).collect();
            if let [only] = present.as_slice() {
                let value = (*only).clone();
                modes.retain(|mode| *mode != value);
                attrs.insert(attr.clone(), value);
            }
        }

        ((!modes.is_empty()).then_some(modes), attrs)
    }
}

/// Builds the nested route config without touching the tree's cache.
#[must_use]
pub fn vue_routes(tree: &RouteTree, options: &VueRouterOptions) -> Vec<VueRoute> {
    let mut flat = flatten_tree(tree);
    flat.sort_by(|a, b| {
        let (a, b) = (&a.file.relative_path, &b.file.relative_path);
        a.len().cmp(&b.len()).then_with(|| natural_cmp(a, b))
    });

    let mut drafts = Vec::new();
    for route in flat {
        place(&mut drafts, route);
    }

    Finalizer {
        options,
        names: HashMap::new(),
        reported: HashSet::new(),
    }
    .finalize(drafts, false)
}

/// Emits a nested Vue Router 4 route config.
///
/// The result is memoized on the tree until the tree is mutated or the
/// options change; every call returns an owned copy.
///
/// # Example
///
/// ```
/// use oxide_pages::converters::{to_vue_router4, VueRouterOptions};
/// use oxide_pages::tree::{build_tree, BuildOptions};
///
/// let mut tree = build_tree(["parent.vue", "parent/child.vue"], &BuildOptions::default()).unwrap();
/// let routes = to_vue_router4(&mut tree, &VueRouterOptions::default());
/// assert_eq!(routes[0].path, "/parent");
/// assert_eq!(routes[0].children[0].path, "child");
/// ```
pub fn to_vue_router4(tree: &mut RouteTree, options: &VueRouterOptions) -> Vec<VueRoute> {
    let fingerprint = options.fingerprint();
    let generation = tree.generation();
    if let Some(routes) = tree.cache.as_ref().and_then(|c| c.get(generation, &fingerprint)) {
        debug!(generation, "vue router config served from cache");
        return routes.to_vec();
    }

    debug!(generation, "building vue router config");
    let routes = vue_routes(tree, options);
    tree.cache = Some(CachedRoutes::new(generation, fingerprint, routes.clone()));
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::parse_segment;

    fn segment(raw: &str) -> Vec<Token> {
        parse_segment(raw, None, None).unwrap()
    }

    #[test]
    fn test_segment_syntax() {
        assert_eq!(to_vue_router_segment(&segment("[id]"), false), ":id()");
        assert_eq!(to_vue_router_segment(&segment("[[id]]"), false), ":id?");
        assert_eq!(to_vue_router_segment(&segment("[id]+"), false), ":id+");
        assert_eq!(to_vue_router_segment(&segment("[[id]]+"), false), ":id*");
        assert_eq!(to_vue_router_segment(&segment("[...all]"), true), ":all([^/]*)*");
        assert_eq!(
            to_vue_router_segment(&segment("(g)-[id]-x:y"), false),
            "-:id()-x\\:y"
        );
    }

    #[test]
    fn test_path_syntax() {
        let users = segment("users");
        let id = segment("[id]");
        let index = segment("index");
        assert_eq!(to_vue_router_path(&[&users, &id]), "/users/:id()");
        assert_eq!(to_vue_router_path(&[&users, &index]), "/users");
        assert_eq!(to_vue_router_path(&[&index]), "/");
    }

    #[test]
    fn test_default_route_name() {
        assert_eq!(default_route_name("index"), "index");
        assert_eq!(default_route_name("users/index"), "users");
        assert_eq!(default_route_name("users/id"), "users-id");
        assert_eq!(default_route_name("blogindex"), "blogindex");
    }

    #[test]
    fn test_segment_score_order() {
        let scores: Vec<u8> = ["about", "[id]", "[id]+", "[[id]]", "[[id]]+", "[...all]"]
            .iter()
            .map(|raw| segment_score(&segment(raw), false))
            .collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
        assert_eq!(scores.last(), Some(&0));
    }

    #[test]
    fn test_fingerprint_tracks_options() {
        let plain = VueRouterOptions::new();
        let named = VueRouterOptions::new().get_route_name(|raw| raw.to_string());
        let attrs = VueRouterOptions::new().attr("mode", &["client", "server"]);
        assert_ne!(plain.fingerprint(), named.fingerprint());
        assert_ne!(plain.fingerprint(), attrs.fingerprint());
    }
}
