//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use inclint_core::prelude::*;
//! ```

// Core analysis types
pub use crate::error::{InclintError, InclintResult};
pub use crate::result::AnalysisResult;

// Builder API
pub use crate::builder::Inclint;

// Step by step analysis
pub use crate::evaluate::evaluate_includes;
pub use crate::ignore::IgnoredIncludes;
pub use crate::include::{load_include_statements, IncludeStatement};
pub use crate::system::{load_system_under_inspection, SystemUnderInspection};

// Include extraction without preprocessor
pub use crate::resolve::{scan_source_files, IncludePathResolver, IncludeResolver};

// Reporting
pub use crate::report::{print_plain, to_plain, write_json_report};
