//! Token types for the segment lexer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a segment token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Literal text. An empty value marks an index route.
    Static,
    /// `[name]`
    Dynamic,
    /// `[[name]]`
    Optional,
    /// `[...name]`
    Catchall,
    /// `(name)`, transparent to the emitted path.
    Group,
    /// `[name]+`
    Repeatable,
    /// `[[name]]+`
    OptionalRepeatable,
}

impl TokenKind {
    /// Returns true for every kind that binds a route parameter.
    #[must_use]
    pub const fn is_param(self) -> bool {
        !matches!(self, Self::Static | Self::Group)
    }
}

/// A typed piece of a path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The token kind.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Literal text or parameter name.
    pub value: String,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Creates a static token.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Static, value)
    }

    /// The index-route marker: a single empty static token.
    #[must_use]
    pub fn index() -> Self {
        Self::text("")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = &self.value;
        match self.kind {
            TokenKind::Static => f.write_str(value),
            TokenKind::Dynamic => write!(f, "[{value}]"),
            TokenKind::Optional => write!(f, "[[{value}]]"),
            TokenKind::Catchall => write!(f, "[...{value}]"),
            TokenKind::Group => write!(f, "({value})"),
            TokenKind::Repeatable => write!(f, "[{value}]+"),
            TokenKind::OptionalRepeatable => write!(f, "[[{value}]]+"),
        }
    }
}

/// Encodes a token sequence back into file-system syntax.
///
/// This is the canonical key under which tree nodes are stored, so two
/// segments that lex to the same tokens always share a node.
#[must_use]
pub fn encode_segment(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

/// Returns true if the segment is the index marker produced for `index`.
#[must_use]
pub fn is_index_segment(tokens: &[Token]) -> bool {
    matches!(tokens, [token] if token.kind == TokenKind::Static && token.value.is_empty())
}

/// Returns true if every token of a non-empty segment is a group.
#[must_use]
pub fn is_group_segment(tokens: &[Token]) -> bool {
    !tokens.is_empty() && tokens.iter().all(|t| t.kind == TokenKind::Group)
}
