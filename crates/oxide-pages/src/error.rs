//! Error types for parsing, tree building and route conversion.

use std::fmt;

use thiserror::Error;

/// Fatal errors raised while lexing a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// A bracket was closed without a parameter name (`[]`, `[[]]`).
    #[error("Empty param in segment '{segment}' of '{path}'")]
    EmptyParam {
        /// The segment being lexed.
        segment: String,
        /// The file the segment belongs to.
        path: String,
    },

    /// A group was closed without a name (`()`).
    #[error("Empty group in segment '{segment}' of '{path}'")]
    EmptyGroup {
        /// The segment being lexed.
        segment: String,
        /// The file the segment belongs to.
        path: String,
    },

    /// The segment ended inside a bracket.
    #[error("Unfinished param \"{param}\" in segment '{segment}' of '{path}'")]
    UnfinishedParam {
        /// The parameter name buffered so far.
        param: String,
        /// The segment being lexed.
        segment: String,
        /// The file the segment belongs to.
        path: String,
    },

    /// The segment ended inside a group.
    #[error("Unfinished group \"{group}\" in segment '{segment}' of '{path}'")]
    UnfinishedGroup {
        /// The group name buffered so far.
        group: String,
        /// The segment being lexed.
        segment: String,
        /// The file the segment belongs to.
        path: String,
    },
}

/// Errors raised while inserting files into a route tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A file path could not be parsed.
    #[error(transparent)]
    Segment(#[from] SegmentError),

    /// Two files map to the same route and the `error` strategy is active.
    #[error("Duplicate route '{position}': '{incoming}' conflicts with '{existing}'")]
    DuplicateRoute {
        /// The relative route position both files resolve to.
        position: String,
        /// The file already in the tree.
        existing: String,
        /// The file being inserted.
        incoming: String,
    },
}

/// A token type a flat pattern router cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedFeature {
    /// `[[name]]`
    OptionalParam,
    /// `[name]+`
    RepeatableParam,
    /// `[[name]]+`
    OptionalRepeatableParam,
}

impl fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let feature = match self {
            Self::OptionalParam => "optional parameters",
            Self::RepeatableParam => "repeatable parameters",
            Self::OptionalRepeatableParam => "optional repeatable parameters",
        };
        f.write_str(feature)
    }
}

/// Errors raised while emitting router configurations.
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// The target format has no equivalent for a token.
    #[error("rou3 does not support {feature}: segment '{segment}' in '{file}'")]
    Unsupported {
        /// The unsupported feature.
        feature: UnsupportedFeature,
        /// The offending segment, in file-system syntax.
        segment: String,
        /// The file the segment belongs to.
        file: String,
    },

    /// A generated regular expression failed to compile.
    #[error("Invalid route pattern for '{file}': {source}")]
    InvalidPattern {
        /// The file the pattern was generated for.
        file: String,
        /// The underlying regex error.
        source: regex::Error,
    },
}

impl ConvertError {
    /// Returns the unsupported feature, if this is an `Unsupported` error.
    #[must_use]
    pub const fn unsupported_feature(&self) -> Option<UnsupportedFeature> {
        match self {
            Self::Unsupported { feature, .. } => Some(*feature),
            Self::InvalidPattern { .. } => None,
        }
    }
}

/// Any error produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Segment lexing failed.
    #[error(transparent)]
    Segment(#[from] SegmentError),

    /// Tree insertion failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Route conversion failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Result type alias for page routing operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_error_messages_lead_with_kind() {
        let err = SegmentError::EmptyParam {
            segment: "[]".to_string(),
            path: "pages/[].vue".to_string(),
        };
        assert!(err.to_string().starts_with("Empty param"));

        let err = SegmentError::UnfinishedGroup {
            group: "admin".to_string(),
            segment: "(admin".to_string(),
            path: "(admin".to_string(),
        };
        assert!(err.to_string().starts_with("Unfinished group"));
    }

    #[test]
    fn test_unsupported_features_are_distinct() {
        let messages = [
            UnsupportedFeature::OptionalParam,
            UnsupportedFeature::RepeatableParam,
            UnsupportedFeature::OptionalRepeatableParam,
        ]
        .map(|feature| feature.to_string());
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }

    #[test]
    fn test_tree_error_wraps_segment_error() {
        let err: TreeError = SegmentError::EmptyGroup {
            segment: "()".to_string(),
            path: "()".to_string(),
        }
        .into();
        assert!(matches!(err, TreeError::Segment(_)));
    }
}
