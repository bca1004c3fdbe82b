//! Builder API running a complete analysis from files on disk.
//!
//! ```rust,ignore
//! use inclint_core::prelude::*;
//!
//! let result = Inclint::new("target_info.json")
//!     .deps(["dep_a.json", "dep_b.json"])
//!     .public_include_files(["public_includes.json"])
//!     .private_include_files(["private_includes.json"])
//!     .optimize_implementation_deps(true)
//!     .analyze()?;
//!
//! if !result.is_ok() {
//!     println!("{}", to_plain(&result, "report.json"));
//! }
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::evaluate::evaluate_includes;
use crate::ignore::IgnoredIncludes;
use crate::include::load_include_statements;
use crate::result::AnalysisResult;
use crate::system::load_system_under_inspection;

/// Builder for configuring an include analysis.
#[derive(Debug, Clone)]
pub struct Inclint {
    /// Descriptor of the target under inspection
    target_file: PathBuf,

    /// Descriptors of the public dependencies
    deps: Vec<PathBuf>,

    /// Descriptors of the implementation dependencies
    implementation_deps: Vec<PathBuf>,

    /// Include lists of the public files
    public_include_files: Vec<PathBuf>,

    /// Include lists of the private files
    private_include_files: Vec<PathBuf>,

    /// Optional ignore configuration
    ignored_includes_config: Option<PathBuf>,

    optimize_implementation_deps: bool,
}

impl Inclint {
    /// Create a new analysis for the target described by `target_file`.
    pub fn new(target_file: impl Into<PathBuf>) -> Self {
        Self {
            target_file: target_file.into(),
            deps: Vec::new(),
            implementation_deps: Vec::new(),
            public_include_files: Vec::new(),
            private_include_files: Vec::new(),
            ignored_includes_config: None,
            optimize_implementation_deps: false,
        }
    }

    /// Add descriptor files of dependencies available to all files.
    pub fn deps(mut self, files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.deps.extend(files.into_iter().map(Into::into));
        self
    }

    /// Add descriptor files of dependencies available to private files only.
    pub fn implementation_deps(mut self, files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.implementation_deps.extend(files.into_iter().map(Into::into));
        self
    }

    /// Add include lists of the public files of the target.
    pub fn public_include_files(mut self, files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.public_include_files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Add include lists of the private files of the target.
    pub fn private_include_files(mut self, files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.private_include_files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Use an ignore configuration. A missing file means nothing is ignored.
    pub fn ignored_includes_config(mut self, file: impl Into<PathBuf>) -> Self {
        self.ignored_includes_config = Some(file.into());
        self
    }

    /// Report public dependencies which are only used by private files.
    pub fn optimize_implementation_deps(mut self, enabled: bool) -> Self {
        self.optimize_implementation_deps = enabled;
        self
    }

    /// Run the analysis and return its findings.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        // 1. Ignore configuration
        let ignored = IgnoredIncludes::load(self.ignored_includes_config.as_deref())
            .context("Failed to load the ignored includes configuration")?;

        // 2. Target and dependency index
        let mut system = load_system_under_inspection(
            &self.target_file,
            &self.deps,
            &self.implementation_deps,
        )
        .with_context(|| {
            format!(
                "Failed to load the target under inspection from {}",
                self.target_file.display()
            )
        })?;

        // 3. Include statements
        let public_includes = load_include_statements(&self.public_include_files, &ignored)
            .context("Failed to load the include lists of the public files")?;
        let private_includes = load_include_statements(&self.private_include_files, &ignored)
            .context("Failed to load the include lists of the private files")?;

        // 4. Evaluation
        let result = evaluate_includes(
            &public_includes,
            &private_includes,
            &mut system,
            self.optimize_implementation_deps,
        )
        .context("Failed to evaluate the include statements")?;

        Ok(result)
    }
}
