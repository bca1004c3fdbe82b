//! Ignore configuration loading.
//!
//! The configuration is a JSON file, every key is optional:
//!
//! ```json
//! {
//!   "ignore_include_paths": ["optional/feature.h"],
//!   "extra_ignore_include_paths": ["vendor/config.h"],
//!   "ignore_include_patterns": ["generated/.*", ".*_pb\\.h$"]
//! }
//! ```

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{InclintError, InclintResult, IoResultExt};

/// Raw content of the ignore configuration file.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct IgnoreConfig {
    /// Include paths ignored by the analysis, compared without quotes.
    pub ignore_include_paths: Option<Vec<String>>,
    /// Further include paths, merged into `ignore_include_paths`.
    pub extra_ignore_include_paths: Option<Vec<String>>,
    /// Regex patterns which have to match from the start of the include path.
    pub ignore_include_patterns: Option<Vec<String>>,
}

impl IgnoreConfig {
    /// All ignored paths of both path keys. Duplicates collapse later on.
    pub fn all_paths(&self) -> impl Iterator<Item = &String> {
        self.ignore_include_paths
            .iter()
            .flatten()
            .chain(self.extra_ignore_include_paths.iter().flatten())
    }

    /// All configured patterns in declaration order.
    pub fn patterns(&self) -> &[String] {
        self.ignore_include_patterns.as_deref().unwrap_or_default()
    }
}

/// Loads the ignore configuration.
///
/// Having no configuration is fine, neither `None` nor a path to a file which
/// does not exist is an error. Both result in an empty configuration.
pub fn load_ignore_config(path: Option<&Path>) -> InclintResult<IgnoreConfig> {
    let Some(path) = path else {
        return Ok(IgnoreConfig::default());
    };
    if !path.exists() {
        return Ok(IgnoreConfig::default());
    }

    let content = fs::read_to_string(path).with_path(path)?;
    serde_json::from_str(&content).map_err(|e| InclintError::config(path, e.to_string()))
}
