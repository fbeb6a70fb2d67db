//! Segment lexer.
//!
//! Splits a single path segment such as `prefix-[slug]` or `[[id]]+` into
//! typed tokens. The lexer is a small state machine; it never sees slashes.

mod token;
mod tokenizer;

pub use token::{encode_segment, is_group_segment, is_index_segment, Token, TokenKind};
pub use tokenizer::{parse_segment, SegmentLexer};
