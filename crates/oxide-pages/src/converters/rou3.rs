//! Flat route patterns for the rou3 router.

use serde::Serialize;

use super::flatten::flatten_tree;
use crate::error::{ConvertError, UnsupportedFeature};
use crate::lexer::{encode_segment, Token, TokenKind};
use crate::tree::RouteTree;

/// One flat rou3 route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rou3Route {
    /// The rou3 pattern, e.g. `/users/:id` or `/docs/**:slug`.
    pub path: String,
    /// The primary page file.
    pub file: String,
}

/// Renders one segment in rou3 syntax.
///
/// # Errors
///
/// Returns `ConvertError::Unsupported` for optional, repeatable and
/// optional-repeatable params, which rou3 cannot express.
pub fn to_rou3_segment(tokens: &[Token], file: &str) -> Result<String, ConvertError> {
    let mut out = String::new();
    for token in tokens {
        let unsupported = match token.kind {
            TokenKind::Static => {
                out.push_str(&token.value);
                continue;
            }
            TokenKind::Dynamic if token.value.is_empty() => {
                out.push('*');
                continue;
            }
            TokenKind::Dynamic => {
                out.push(':');
                out.push_str(&token.value);
                continue;
            }
            TokenKind::Catchall => {
                out.push_str("**");
                if !token.value.is_empty() {
                    out.push(':');
                    out.push_str(&token.value);
                }
                continue;
            }
            TokenKind::Group => continue,
            TokenKind::Optional => UnsupportedFeature::OptionalParam,
            TokenKind::Repeatable => UnsupportedFeature::RepeatableParam,
            TokenKind::OptionalRepeatable => UnsupportedFeature::OptionalRepeatableParam,
        };
        return Err(ConvertError::Unsupported {
            feature: unsupported,
            segment: encode_segment(tokens),
            file: file.to_string(),
        });
    }
    Ok(out)
}

/// Emits one flat rou3 pattern per logical route, in tree order.
///
/// # Errors
///
/// Returns `ConvertError::Unsupported` naming the first token type rou3
/// cannot express.
///
/// # Example
///
/// ```
/// use oxide_pages::converters::to_rou3;
/// use oxide_pages::tree::{build_tree, BuildOptions};
///
/// let tree = build_tree(["users/[id].vue"], &BuildOptions::default()).unwrap();
/// let routes = to_rou3(&tree).unwrap();
/// assert_eq!(routes[0].path, "/users/:id");
/// ```
pub fn to_rou3(tree: &RouteTree) -> Result<Vec<Rou3Route>, ConvertError> {
    flatten_tree(tree)
        .into_iter()
        .map(|route| {
            let file = route.file.path.as_str();
            let parts = route
                .segments
                .iter()
                .map(|tokens| to_rou3_segment(tokens, file))
                .collect::<Result<Vec<_>, _>>()?;
            let parts: Vec<String> = parts.into_iter().filter(|part| !part.is_empty()).collect();
            Ok(Rou3Route {
                path: format!("/{}", parts.join("/")),
                file: file.to_string(),
            })
        })
        .collect()
}
