//! Anchored regular expressions, one per route.

use std::collections::HashMap;

use regex::Regex;

use super::flatten::flatten_tree;
use crate::error::ConvertError;
use crate::lexer::{Token, TokenKind};
use crate::tree::RouteTree;

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RegExpRoute {
    /// The anchored pattern.
    pub pattern: Regex,
    /// Capture names in order of appearance.
    pub keys: Vec<String>,
    /// The primary page file.
    pub file: String,
}

impl RegExpRoute {
    /// Matches a full path, returning the named captures.
    ///
    /// Params that took part in the match but captured nothing (an absent
    /// optional param) map to an empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_pages::converters::to_regexp;
    /// use oxide_pages::tree::{build_tree, BuildOptions};
    ///
    /// let tree = build_tree(["posts/[id].vue"], &BuildOptions::default()).unwrap();
    /// let routes = to_regexp(&tree).unwrap();
    /// let params = routes[0].match_path("/posts/42").unwrap();
    /// assert_eq!(params["id"], "42");
    /// assert!(routes[0].match_path("/posts/42/edit").is_none());
    /// ```
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.pattern.captures(path)?;
        let params = self
            .keys
            .iter()
            .map(|key| {
                let value = caps.name(key).map_or("", |m| m.as_str());
                (key.clone(), value.to_string())
            })
            .collect();
        Some(params)
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Turns a param name into a valid capture name: dots are stripped and a
/// leading digit gets an underscore prefix.
fn capture_name(value: &str) -> String {
    let name: String = value.chars().filter(|c| *c != '.').collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Renders one segment as a regex body, without the leading slash.
///
/// Returns the body and the capture names it introduces.
#[must_use]
pub fn to_regexp_segment(tokens: &[Token]) -> (String, Vec<String>) {
    let mut body = String::new();
    let mut keys = Vec::new();

    for token in tokens {
        let class = match token.kind {
            TokenKind::Static => {
                body.push_str(&regex::escape(&token.value));
                continue;
            }
            TokenKind::Group => continue,
            TokenKind::Dynamic => "[^/]+",
            TokenKind::Optional => "[^/]*",
            TokenKind::Repeatable => "[^/]+(?:/[^/]+)*",
            TokenKind::OptionalRepeatable => "[^/]*(?:/[^/]+)*",
            TokenKind::Catchall => ".*",
        };

        let name = capture_name(&token.value);
        if name.is_empty() {
            body.push_str(&format!("({class})"));
        } else {
            body.push_str(&format!("(?P<{name}>{class})"));
            keys.push(name);
        }
    }

    (body, keys)
}

/// Returns true if the whole segment, slash included, may be absent.
///
/// Only optional, catchall and group tokens qualify. A `[[name]]+` segment
/// keeps its slash, so `tags/[[tag]]+` matches `/tags/` but not `/tags`.
fn is_optional_segment(tokens: &[Token]) -> bool {
    tokens.iter().all(|t| {
        matches!(
            t.kind,
            TokenKind::Optional | TokenKind::Catchall | TokenKind::Group
        )
    })
}

/// Emits one anchored regex per logical route, in tree order.
///
/// Patterns match the full path only, with an optional trailing slash.
///
/// # Errors
///
/// Returns `ConvertError::InvalidPattern` if a generated pattern does not
/// compile, for example when a path repeats a param name.
pub fn to_regexp(tree: &RouteTree) -> Result<Vec<RegExpRoute>, ConvertError> {
    flatten_tree(tree)
        .into_iter()
        .map(|route| {
            let mut source = String::from("^");
            let mut keys = Vec::new();

            for tokens in &route.segments {
                let (body, segment_keys) = to_regexp_segment(tokens);
                if body.is_empty() {
                    continue;
                }
                if is_optional_segment(tokens) {
                    source.push_str(&format!("(?:/{body})?"));
                } else {
                    source.push('/');
                    source.push_str(&body);
                }
                keys.extend(segment_keys);
            }
            source.push_str("/?$");

            let pattern = Regex::new(&source).map_err(|source| ConvertError::InvalidPattern {
                file: route.file.path.clone(),
                source,
            })?;
            Ok(RegExpRoute {
                pattern,
                keys,
                file: route.file.path.clone(),
            })
        })
        .collect()
}
