//! Filtering of include statements which are excluded from the analysis.
//!
//! Typical use is an optional header which is not available in every build
//! configuration and thus cannot be attributed to any dependency.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;

use crate::config::{load_ignore_config, IgnoreConfig};
use crate::error::{InclintError, InclintResult};
use crate::include::include_without_quotes;

/// Include paths and patterns ignored by the analysis.
///
/// Both are compared against the include statement without quotes or angle
/// brackets.
#[derive(Debug, Clone, Default)]
pub struct IgnoredIncludes {
    paths: HashSet<String>,
    patterns: Vec<Regex>,
}

impl IgnoredIncludes {
    pub fn new(paths: impl IntoIterator<Item = String>, patterns: Vec<Regex>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
            patterns,
        }
    }

    /// Compiles the configured patterns and merges both path lists.
    pub fn from_config(config: &IgnoreConfig) -> InclintResult<Self> {
        let patterns = config
            .patterns()
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<InclintResult<Vec<_>>>()?;

        Ok(Self::new(config.all_paths().cloned(), patterns))
    }

    /// Loads the ignore configuration file, see [`load_ignore_config`].
    pub fn load(config_file: Option<&Path>) -> InclintResult<Self> {
        Self::from_config(&load_ignore_config(config_file)?)
    }

    pub fn paths(&self) -> &HashSet<String> {
        &self.paths
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.patterns.is_empty()
    }

    /// Whether the include statement (with quotes or brackets) is ignored.
    ///
    /// A pattern has to match starting at the first character of the include
    /// path, but it does not have to consume the whole path.
    pub fn is_ignored(&self, include: &str) -> bool {
        let unquoted = include_without_quotes(include);

        self.paths.contains(unquoted) || self.patterns.iter().any(|p| p.is_match(unquoted))
    }
}

/// Compiles an ignore pattern anchored at the start of the include path.
pub fn compile_pattern(pattern: &str) -> InclintResult<Regex> {
    Regex::new(&format!("^(?:{})", pattern))
        .map_err(|e| InclintError::pattern(pattern, e.to_string()))
}
