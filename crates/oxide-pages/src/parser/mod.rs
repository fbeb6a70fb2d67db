//! Path parser.
//!
//! Turns raw page file paths into [`ParsedPath`] records: roots, extension,
//! named view and mode suffixes are stripped, then every segment is lexed.

mod options;
mod parser;

pub use options::{ParseOptions, WarnFn};
pub use parser::{parse_path, ParsedPath, ParsedPathMeta, PathParser};
