//! Segment tokenizer implementation.

use tracing::warn;

use super::{Token, TokenKind};
use crate::error::SegmentError;

/// Lexer states while scanning a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initial,
    Static,
    Dynamic,
    Optional,
    Catchall,
    Group,
}

/// A lexer that splits one path segment into tokens.
pub struct SegmentLexer<'a> {
    /// The segment being lexed.
    input: &'a str,
    /// The file the segment belongs to, for diagnostics.
    path: &'a str,
    /// Receives non-fatal diagnostics.
    warn: Option<&'a dyn Fn(&str)>,
    /// The current byte position.
    pos: usize,
    state: State,
    /// Whether the open bracket was `[[`.
    double_bracket: bool,
    buffer: String,
    tokens: Vec<Token>,
}

impl<'a> SegmentLexer<'a> {
    /// Creates a new lexer for the given segment.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            path: input,
            warn: None,
            pos: 0,
            state: State::Initial,
            double_bracket: false,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    /// Sets the file path reported in diagnostics.
    #[must_use]
    pub const fn with_path(mut self, path: &'a str) -> Self {
        self.path = path;
        self
    }

    /// Sets the callback receiving non-fatal diagnostics.
    #[must_use]
    pub fn with_warn(mut self, warn: Option<&'a dyn Fn(&str)>) -> Self {
        self.warn = warn;
        self
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Emits the buffered text as a token of the given kind.
    fn emit(&mut self, kind: TokenKind) {
        let value = std::mem::take(&mut self.buffer);
        self.tokens.push(Token::new(kind, value));
    }

    /// Emits pending static text, if any.
    fn flush_static(&mut self) {
        if self.state == State::Static && !self.buffer.is_empty() {
            self.emit(TokenKind::Static);
        }
    }

    fn report(&self, c: char) {
        self.diagnose(&format!(
            "'{c}' is not allowed in a dynamic route parameter and has been ignored. Consider renaming '{}'.",
            self.path
        ));
    }

    fn diagnose(&self, message: &str) {
        match self.warn {
            Some(warn_fn) => warn_fn(message),
            None => warn!("{message}"),
        }
    }

    /// Consumes the whole segment.
    ///
    /// # Errors
    ///
    /// Returns a `SegmentError` for empty or unterminated params and groups.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SegmentError> {
        if self.input.is_empty() {
            return Ok(vec![Token::index()]);
        }

        while let Some(c) = self.advance() {
            match self.state {
                State::Initial | State::Static => self.scan_text(c),
                State::Dynamic | State::Optional | State::Catchall => self.scan_param(c)?,
                State::Group => self.scan_group(c)?,
            }
        }

        match self.state {
            State::Dynamic | State::Optional | State::Catchall => {
                return Err(SegmentError::UnfinishedParam {
                    param: self.buffer,
                    segment: self.input.to_string(),
                    path: self.path.to_string(),
                });
            }
            State::Group => {
                return Err(SegmentError::UnfinishedGroup {
                    group: self.buffer,
                    segment: self.input.to_string(),
                    path: self.path.to_string(),
                });
            }
            State::Initial | State::Static => self.flush_static(),
        }

        if let [token] = self.tokens.as_mut_slice() {
            if token.kind == TokenKind::Static && token.value == "index" {
                token.value.clear();
            }
        }

        Ok(self.tokens)
    }

    fn scan_text(&mut self, c: char) {
        match c {
            '[' => {
                self.flush_static();
                self.state = State::Dynamic;
                self.double_bracket = false;
            }
            '(' => {
                self.flush_static();
                self.state = State::Group;
            }
            _ => {
                self.state = State::Static;
                self.buffer.push(c);
            }
        }
    }

    fn scan_param(&mut self, c: char) -> Result<(), SegmentError> {
        if self.buffer == "..." {
            self.buffer.clear();
            self.state = State::Catchall;
        }

        match c {
            '[' if self.state == State::Dynamic && self.buffer.is_empty() && !self.double_bracket => {
                self.state = State::Optional;
                self.double_bracket = true;
            }
            ']' => {
                if self.double_bracket {
                    // `]]` closes a double bracket; a lone `]` inside it is ignored.
                    if self.peek() != Some(']') {
                        return Ok(());
                    }
                    self.advance();
                }
                self.close_param()?;
            }
            c if is_param_char(c) => self.buffer.push(c),
            c => self.report(c),
        }
        Ok(())
    }

    fn close_param(&mut self) -> Result<(), SegmentError> {
        if self.buffer.is_empty() && self.state != State::Catchall {
            return Err(SegmentError::EmptyParam {
                segment: self.input.to_string(),
                path: self.path.to_string(),
            });
        }

        let repeat = self.peek() == Some('+');
        let kind = match (self.state, repeat) {
            (State::Dynamic, true) => TokenKind::Repeatable,
            (State::Optional, true) => TokenKind::OptionalRepeatable,
            (State::Optional, false) => TokenKind::Optional,
            (State::Catchall, _) => TokenKind::Catchall,
            _ => TokenKind::Dynamic,
        };
        if repeat {
            self.advance();
            if kind == TokenKind::Catchall {
                self.diagnose(&format!(
                    "'+' has no effect on a catch-all parameter and has been ignored. Consider renaming '{}'.",
                    self.path
                ));
            }
        }

        self.emit(kind);
        self.state = State::Initial;
        self.double_bracket = false;
        Ok(())
    }

    fn scan_group(&mut self, c: char) -> Result<(), SegmentError> {
        if c != ')' {
            self.buffer.push(c);
            return Ok(());
        }
        if self.buffer.is_empty() {
            return Err(SegmentError::EmptyGroup {
                segment: self.input.to_string(),
                path: self.path.to_string(),
            });
        }
        self.emit(TokenKind::Group);
        self.state = State::Initial;
        Ok(())
    }
}

/// Characters allowed in a parameter name.
const fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Lexes one raw segment (no slashes) into tokens.
///
/// `path` names the file in diagnostics; `warn` receives messages about
/// characters dropped from parameter names, falling back to a `tracing`
/// warning when absent.
///
/// # Errors
///
/// Returns a `SegmentError` for empty or unterminated params and groups.
///
/// # Example
///
/// ```
/// use oxide_pages::lexer::{parse_segment, Token, TokenKind};
///
/// let tokens = parse_segment("[...slug]", None, None).unwrap();
/// assert_eq!(tokens, vec![Token::new(TokenKind::Catchall, "slug")]);
/// ```
pub fn parse_segment(
    segment: &str,
    path: Option<&str>,
    warn: Option<&dyn Fn(&str)>,
) -> Result<Vec<Token>, SegmentError> {
    SegmentLexer::new(segment)
        .with_path(path.unwrap_or(segment))
        .with_warn(warn)
        .tokenize()
}
