//! Path parser configuration.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Callback receiving non-fatal parser diagnostics.
pub type WarnFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Options controlling how raw file paths are parsed.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Extensions to strip (with or without a leading dot). When `None`,
    /// the last dot-suffix of the file name is stripped.
    pub extensions: Option<Vec<String>>,
    /// A literal suffix stripped after the extension, e.g. `.page`.
    pub postfix: Option<String>,
    /// Mode suffixes recognised before the extension, e.g. `client`.
    pub modes: Vec<String>,
    /// Directory prefixes stripped from every path; the longest match wins.
    pub roots: Vec<String>,
    /// Receives warnings about characters dropped from parameter names.
    #[serde(skip)]
    pub warn: Option<WarnFn>,
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("extensions", &self.extensions)
            .field("postfix", &self.postfix)
            .field("modes", &self.modes)
            .field("roots", &self.roots)
            .field("warn", &self.warn.as_ref().map(|_| "Fn(&str)"))
            .finish()
    }
}

impl ParseOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts extension stripping to the given extensions.
    #[must_use]
    pub fn extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = Some(extensions.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Sets the suffix stripped after the extension.
    #[must_use]
    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = Some(postfix.into());
        self
    }

    /// Sets the recognised mode suffixes.
    #[must_use]
    pub fn modes(mut self, modes: &[&str]) -> Self {
        self.modes = modes.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the root directories stripped from paths.
    #[must_use]
    pub fn roots(mut self, roots: &[&str]) -> Self {
        self.roots = roots.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the warning callback.
    #[must_use]
    pub fn warn(mut self, warn: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.warn = Some(Arc::new(warn));
        self
    }
}
