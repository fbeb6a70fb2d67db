//! Path parser implementation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::options::{ParseOptions, WarnFn};
use crate::error::SegmentError;
use crate::lexer::{parse_segment, Token};

/// Matches the last dot-suffix of a file name.
static DEFAULT_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\w+$").expect("valid extension regex"));

/// Matches an `@name` named-view suffix.
static NAMED_VIEW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([\w-]+)(?:\.|$)").expect("valid named view regex"));

/// Extra information carried by a file name besides its segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPathMeta {
    /// Mode suffixes in file-name order, e.g. `["client", "vapor"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,
    /// Named view from an `@name` suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A file path split into tokenized segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPath {
    /// The original path, as given.
    pub file: String,
    /// One token list per slash-delimited segment.
    pub segments: Vec<Vec<Token>>,
    /// Named view and modes; absent when neither is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ParsedPathMeta>,
}

impl ParsedPath {
    /// Returns the named view, if any.
    #[must_use]
    pub fn view_name(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.name.as_deref())
    }

    /// Returns the mode suffixes, if any.
    #[must_use]
    pub fn modes(&self) -> Option<&[String]> {
        self.meta.as_ref().and_then(|m| m.modes.as_deref())
    }
}

/// Strategy for removing the file extension.
#[derive(Debug, Clone)]
enum ExtensionRule {
    /// Strip whatever follows the last dot.
    LastDot,
    /// Strip only these suffixes (each stored with its leading dot).
    AllowList(Vec<String>),
}

/// A path parser with its configuration normalized once.
///
/// Reuse one `PathParser` for repeated or incremental parsing instead of
/// calling [`parse_path`] per file.
#[derive(Clone)]
pub struct PathParser {
    /// Roots with a trailing slash, longest first.
    roots: Vec<String>,
    extension: ExtensionRule,
    postfix: Option<String>,
    /// Mode suffixes with a leading dot.
    modes: Vec<(String, String)>,
    warn: Option<WarnFn>,
}

impl std::fmt::Debug for PathParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathParser")
            .field("roots", &self.roots)
            .field("extension", &self.extension)
            .field("postfix", &self.postfix)
            .field("modes", &self.modes)
            .finish_non_exhaustive()
    }
}

impl Default for PathParser {
    fn default() -> Self {
        Self::new(&ParseOptions::default())
    }
}

impl PathParser {
    /// Compiles a parser from options.
    #[must_use]
    pub fn new(options: &ParseOptions) -> Self {
        let mut roots: Vec<String> = options
            .roots
            .iter()
            .filter(|root| !root.is_empty())
            .map(|root| format!("{}/", root.trim_end_matches('/')))
            .collect();
        roots.sort_by(|a, b| b.len().cmp(&a.len()));

        let extension = options.extensions.as_ref().map_or(ExtensionRule::LastDot, |exts| {
            ExtensionRule::AllowList(
                exts.iter()
                    .map(|ext| format!(".{}", ext.trim_start_matches('.')))
                    .collect(),
            )
        });

        let modes = options
            .modes
            .iter()
            .filter(|mode| !mode.is_empty())
            .map(|mode| (mode.clone(), format!(".{mode}")))
            .collect();

        Self {
            roots,
            extension,
            postfix: options.postfix.clone().filter(|p| !p.is_empty()),
            modes,
            warn: options.warn.clone(),
        }
    }

    /// Parses one file path.
    ///
    /// # Errors
    ///
    /// Returns a `SegmentError` if any segment is malformed.
    pub fn parse(&self, file: &str) -> Result<ParsedPath, SegmentError> {
        let mut path = self.strip_root(file).to_string();
        self.strip_extension(&mut path);

        if let Some(postfix) = &self.postfix {
            if path.ends_with(postfix.as_str()) {
                path.truncate(path.len() - postfix.len());
            }
        }

        let name = take_named_view(&mut path);
        let modes = self.take_modes(&mut path);

        let trimmed = path.trim_matches('/');
        let pieces: Vec<&str> = if trimmed.is_empty() {
            vec![""]
        } else {
            trimmed.split('/').filter(|piece| !piece.is_empty()).collect()
        };

        let warn = self.warn.as_deref().map(|w| w as &dyn Fn(&str));
        let segments = pieces
            .into_iter()
            .map(|piece| parse_segment(piece, Some(file), warn))
            .collect::<Result<Vec<_>, _>>()?;

        let meta = (modes.is_some() || name.is_some()).then_some(ParsedPathMeta { modes, name });

        Ok(ParsedPath {
            file: file.to_string(),
            segments,
            meta,
        })
    }

    /// Parses several file paths, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns a `SegmentError` if any segment is malformed.
    pub fn parse_all<S: AsRef<str>>(&self, files: &[S]) -> Result<Vec<ParsedPath>, SegmentError> {
        files.iter().map(|file| self.parse(file.as_ref())).collect()
    }

    fn strip_root<'p>(&self, file: &'p str) -> &'p str {
        self.roots
            .iter()
            .find_map(|root| file.strip_prefix(root.as_str()))
            .unwrap_or(file)
    }

    fn strip_extension(&self, path: &mut String) {
        let cut = match &self.extension {
            ExtensionRule::LastDot => DEFAULT_EXTENSION.find(path).map(|m| m.start()),
            ExtensionRule::AllowList(exts) => exts
                .iter()
                .find(|ext| path.ends_with(ext.as_str()))
                .map(|ext| path.len() - ext.len()),
        };
        if let Some(cut) = cut {
            path.truncate(cut);
        }
    }

    /// Strips trailing `.mode` suffixes, returning them left to right.
    fn take_modes(&self, path: &mut String) -> Option<Vec<String>> {
        let mut found = Vec::new();
        while let Some((mode, suffix)) = self
            .modes
            .iter()
            .find(|(_, suffix)| path.ends_with(suffix.as_str()))
        {
            path.truncate(path.len() - suffix.len());
            found.insert(0, mode.clone());
        }
        (!found.is_empty()).then_some(found)
    }
}

/// Removes the last `@name` suffix from the path and returns the name.
fn take_named_view(path: &mut String) -> Option<String> {
    let (start, end, name) = NAMED_VIEW
        .captures_iter(path)
        .last()
        .and_then(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some((whole.start(), name.end(), name.as_str().to_string()))
        })?;
    path.replace_range(start..end, "");
    Some(name)
}

/// Parses raw file paths into tokenized segments.
///
/// For each path: the longest matching root is stripped, then the extension,
/// the postfix, an `@name` named view and any `.mode` suffixes. The rest is
/// split on slashes and each piece is tokenized.
///
/// # Errors
///
/// Returns a `SegmentError` if any segment is malformed.
///
/// # Example
///
/// ```
/// use oxide_pages::parser::{parse_path, ParseOptions};
///
/// let options = ParseOptions::new().modes(&["client"]);
/// let parsed = parse_path(&["users/[id]@sidebar.client.vue"], &options).unwrap();
/// let meta = parsed[0].meta.as_ref().unwrap();
/// assert_eq!(meta.name.as_deref(), Some("sidebar"));
/// assert_eq!(meta.modes, Some(vec!["client".to_string()]));
/// ```
pub fn parse_path<S: AsRef<str>>(
    files: &[S],
    options: &ParseOptions,
) -> Result<Vec<ParsedPath>, SegmentError> {
    PathParser::new(options).parse_all(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    fn parse(file: &str) -> ParsedPath {
        PathParser::default().parse(file).unwrap()
    }

    #[test]
    fn test_strips_extension() {
        let parsed = parse("about.vue");
        assert_eq!(parsed.segments, vec![vec![Token::text("about")]]);
        assert_eq!(parsed.meta, None);
    }

    #[test]
    fn test_extension_allow_list() {
        let parser = PathParser::new(&ParseOptions::new().extensions(&["vue"]));
        let parsed = parser.parse("about.md").unwrap();
        assert_eq!(parsed.segments, vec![vec![Token::text("about.md")]]);
        let parsed = parser.parse("about.vue").unwrap();
        assert_eq!(parsed.segments, vec![vec![Token::text("about")]]);
    }

    #[test]
    fn test_longest_root_wins() {
        let parser = PathParser::new(&ParseOptions::new().roots(&["app", "app/pages/"]));
        let parsed = parser.parse("app/pages/users.vue").unwrap();
        assert_eq!(parsed.segments, vec![vec![Token::text("users")]]);
    }

    #[test]
    fn test_empty_path_is_index() {
        let parser = PathParser::new(&ParseOptions::new().roots(&["pages"]));
        let parsed = parser.parse("pages/.vue").unwrap();
        assert_eq!(parsed.segments, vec![vec![Token::index()]]);
    }

    #[test]
    fn test_named_view_and_modes() {
        let parser = PathParser::new(&ParseOptions::new().modes(&["client", "vapor"]));
        let parsed = parser.parse("app@aside.client.vapor.vue").unwrap();
        assert_eq!(parsed.view_name(), Some("aside"));
        assert_eq!(
            parsed.modes(),
            Some(&["client".to_string(), "vapor".to_string()][..])
        );
        assert_eq!(parsed.segments, vec![vec![Token::text("app")]]);
    }

    #[test]
    fn test_postfix() {
        let parser = PathParser::new(&ParseOptions::new().postfix(".page"));
        let parsed = parser.parse("about.page.vue").unwrap();
        assert_eq!(parsed.segments, vec![vec![Token::text("about")]]);
    }

    #[test]
    fn test_nested_segments() {
        let parsed = parse("(marketing)/blog/[[page]].vue");
        assert_eq!(parsed.segments.len(), 3);
        assert_eq!(parsed.segments[0][0].kind, TokenKind::Group);
        assert_eq!(parsed.segments[2][0].kind, TokenKind::Optional);
    }

    #[test]
    fn test_error_propagates() {
        assert!(PathParser::default().parse("users/[].vue").is_err());
    }
}
