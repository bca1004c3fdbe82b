//! Include statements and the preprocessed include list format.
//!
//! An include list file is what the preprocessing step (or `inclint extract`)
//! produces for a group of source files:
//!
//! ```json
//! [
//!   {
//!     "file": "lib/foo.cpp",
//!     "resolved_includes": [{ "include": "<lib/foo.h>", "file": "lib/foo.h" }]
//!   }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{InclintError, InclintResult, IoResultExt};
use crate::ignore::IgnoredIncludes;

/// A single include directive of the target under inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeStatement {
    /// The file in which the include statement appears
    pub file: String,
    /// The include target as written, including quotes or angle brackets
    pub include: String,
    /// The path of the included file, relative to the execution directory
    pub resolved_include: String,
}

impl IncludeStatement {
    pub fn new(
        file: impl Into<String>,
        include: impl Into<String>,
        resolved_include: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            include: include.into(),
            resolved_include: resolved_include.into(),
        }
    }
}

/// One resolved include of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludedFile {
    /// The include target as written, including quotes or angle brackets
    pub include: String,
    /// Path of the file the include resolved to
    pub file: String,
}

/// All resolved includes of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedFile {
    pub file: String,
    pub resolved_includes: Vec<IncludedFile>,
}

/// A system include is using angle brackets `<..>`.
pub fn is_system_include(include: &str) -> bool {
    include.starts_with('<') && include.ends_with('>')
}

/// Removes angle brackets or quotes around an include, if present.
pub fn include_without_quotes(include: &str) -> &str {
    let quoted = include.len() >= 3
        && ((include.starts_with('"') && include.ends_with('"'))
            || (include.starts_with('<') && include.ends_with('>')));
    if quoted {
        &include[1..include.len() - 1]
    } else {
        include
    }
}

/// Reads a single include list file.
pub fn read_include_list(path: &Path) -> InclintResult<Vec<ScannedFile>> {
    let content = fs::read_to_string(path).with_path(path)?;
    serde_json::from_str(&content).map_err(|e| InclintError::parse(path, e.to_string()))
}

/// Loads the include statements from all given include list files.
///
/// Ignored includes are dropped here, they never reach the evaluation.
pub fn load_include_statements<P: AsRef<Path>>(
    files: &[P],
    ignored: &IgnoredIncludes,
) -> InclintResult<Vec<IncludeStatement>> {
    let mut statements = Vec::new();

    for path in files {
        for scanned in read_include_list(path.as_ref())? {
            for included in scanned.resolved_includes {
                if ignored.is_ignored(&included.include) {
                    debug!(file = %scanned.file, include = %included.include, "ignoring include");
                    continue;
                }
                statements.push(IncludeStatement {
                    file: scanned.file.clone(),
                    include: included.include,
                    resolved_include: included.file,
                });
            }
        }
    }

    Ok(statements)
}
