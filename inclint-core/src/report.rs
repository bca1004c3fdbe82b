//! Output formatting - plaintext and JSON.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{InclintError, InclintResult, IoResultExt};
use crate::include::{include_without_quotes, IncludeStatement};
use crate::result::AnalysisResult;

const FRAME: &str =
    "================================================================================\n";

/// Machine-readable form of an [`AnalysisResult`].
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub analyzed_target: &'a str,
    pub public_includes_without_dep: BTreeMap<&'a str, Vec<&'a str>>,
    pub private_includes_without_dep: BTreeMap<&'a str, Vec<&'a str>>,
    pub unused_deps: &'a BTreeSet<String>,
    pub unused_implementation_deps: &'a BTreeSet<String>,
    pub deps_which_should_be_private: &'a BTreeSet<String>,
    pub use_implementation_deps: bool,
}

impl<'a> JsonReport<'a> {
    pub fn from_result(result: &'a AnalysisResult) -> Self {
        Self {
            analyzed_target: result.target(),
            public_includes_without_dep: missing_includes_by_file(
                result.public_includes_without_direct_dep(),
            ),
            private_includes_without_dep: missing_includes_by_file(
                result.private_includes_without_direct_dep(),
            ),
            unused_deps: result.unused_deps(),
            unused_implementation_deps: result.unused_implementation_deps(),
            deps_which_should_be_private: result.deps_which_should_be_private(),
            use_implementation_deps: result.optimize_implementation_deps(),
        }
    }
}

/// Groups include statements by the file containing them.
///
/// The includes keep their order of appearance and lose their quotes.
pub fn missing_includes_by_file(includes: &[IncludeStatement]) -> BTreeMap<&str, Vec<&str>> {
    let mut map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for include in includes {
        map.entry(include.file.as_str())
            .or_default()
            .push(include_without_quotes(&include.include));
    }
    map
}

/// Renders the result as JSON.
pub fn to_json(result: &AnalysisResult) -> serde_json::Value {
    // Serializing maps with string keys and string lists cannot fail
    serde_json::to_value(JsonReport::from_result(result)).unwrap_or(serde_json::Value::Null)
}

/// Writes the JSON report to `path`.
pub fn write_json_report(result: &AnalysisResult, path: &Path) -> InclintResult<()> {
    let json = serde_json::to_string(&JsonReport::from_result(result))
        .map_err(|e| InclintError::internal(format!("serializing report failed: {}", e)))?;
    fs::write(path, json).with_path(path)
}

/// Renders the human-readable report.
///
/// `report_path` points the reader to the JSON report with the same content.
pub fn to_plain(result: &AnalysisResult, report_path: &str) -> String {
    let mut content = format!("inclint analyzing: {}\n\n", result.target());

    if result.is_ok() {
        content.push_str("Result: SUCCESS\n");
        return format!("{FRAME}{content}{FRAME}");
    }

    content.push_str("Result: FAILURE\n");

    let public = result.public_includes_without_direct_dep();
    let private = result.private_includes_without_direct_dep();
    if !public.is_empty() || !private.is_empty() {
        content.push_str("\nIncludes which are not available from the direct dependencies:\n");
        for include in public.iter().chain(private) {
            content.push_str(&format!(
                "  In file '{}' include: {}\n",
                include.file, include.include
            ));
        }
    }

    push_section(
        &mut content,
        "Unused dependencies in 'deps' (none of their headers are included):",
        result.unused_deps(),
    );
    push_section(
        &mut content,
        "Unused dependencies in 'implementation_deps' (none of their headers are included):",
        result.unused_implementation_deps(),
    );
    push_section(
        &mut content,
        "'deps' which should be moved to 'implementation_deps' (their headers are included only in private code):",
        result.deps_which_should_be_private(),
    );

    content.push_str(&format!("\ninclint report: {}\n", report_path));

    format!("{FRAME}{content}{FRAME}")
}

fn push_section(content: &mut String, title: &str, deps: &BTreeSet<String>) {
    if deps.is_empty() {
        return;
    }
    content.push('\n');
    content.push_str(title);
    content.push('\n');
    for dep in deps {
        content.push_str(&format!("  {}\n", dep));
    }
}

/// Prints the human-readable report to stdout.
pub fn print_plain(result: &AnalysisResult, report_path: &str) {
    println!("{}", to_plain(result, report_path));
}
