//! inclint-core: include-what-you-use checks for C and C++ targets
//!
//! Given the include statements of a target and the header files offered by
//! its direct dependencies, this library reports
//!
//! - **Missing dependencies**: headers which are included without a direct
//!   dependency providing them (e.g. only available transitively)
//! - **Unused dependencies**: declared dependencies of which no header is
//!   included
//! - **Misplaced dependencies**: public dependencies used only by private
//!   files, which could become implementation dependencies
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use inclint_core::prelude::*;
//!
//! let result = Inclint::new("target_info.json")
//!     .deps(["dep.json"])
//!     .public_include_files(["public_includes.json"])
//!     .analyze()?;
//!
//! write_json_report(&result, "report.json".as_ref())?;
//! ```
//!
//! # Module Organization
//!
//! - [`extract`]: Lexical extraction of include directives from source text
//! - [`resolve`]: Resolution of include tokens to files via include paths
//! - [`include`]: Include statements and the include list file format
//! - [`ignore`]: Includes excluded from the analysis
//! - [`system`]: Target under inspection and the dependency index
//! - [`usage`]: Usage states of dependencies
//! - [`evaluate`]: The analysis itself
//! - [`report`]: Plain and JSON output
//! - [`builder`]: Fluent builder API running a complete analysis
//! - [`error`]: Typed error handling

pub mod builder;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod extract;
pub mod ignore;
pub mod include;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod resolve;
pub mod result;
pub mod system;
pub mod usage;

// ============================================================================
// Explicit Re-exports
// ============================================================================

// Error types
pub use error::{InclintError, InclintResult, IoResultExt};

// Builder API
pub use builder::Inclint;

// Configuration
pub use config::{load_ignore_config, IgnoreConfig};

// Evaluation
pub use evaluate::evaluate_includes;
pub use result::AnalysisResult;

// Extraction and resolution
pub use extract::extract_includes;
pub use resolve::{scan_source_files, IncludePathResolver, IncludeResolver};

// Include statements
pub use ignore::{compile_pattern, IgnoredIncludes};
pub use include::{
    include_without_quotes, is_system_include, load_include_statements, read_include_list,
    IncludeStatement, IncludedFile, ScannedFile,
};

// Logging
pub use logging::{init_structured_logging, log_error, log_event, log_info, log_warn};

// Reporting
pub use report::{print_plain, to_json, to_plain, write_json_report, JsonReport};

// Dependency index
pub use system::{
    load_system_under_inspection, CcDependency, DepId, DependencyDescriptor, DependencyKind,
    DependencyScope, SystemUnderInspection, TargetUnderInspection,
};
pub use usage::{DependencyUsage, UsageStatus};
