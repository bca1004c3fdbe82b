//! Evaluation of the include statements against the direct dependencies.
//!
//! Public files may only use headers of public dependencies (`deps`).
//! Private files may use headers of all direct dependencies. Headers only
//! reachable through transitive dependencies are reported as missing.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::error::InclintResult;
use crate::include::IncludeStatement;
use crate::result::AnalysisResult;
use crate::system::{DependencyScope, SystemUnderInspection};
use crate::usage::UsageStatus;

/// Marks the dependencies used by `includes` and returns the includes which
/// are satisfied neither by a dependency nor by the target itself.
fn find_includes_without_direct_dep(
    includes: &[IncludeStatement],
    usage: UsageStatus,
    scope: DependencyScope,
    system: &mut SystemUnderInspection,
) -> InclintResult<Vec<IncludeStatement>> {
    let mut invalid = Vec::new();

    for include in includes {
        if system.record_usage(scope, &include.resolved_include, usage)? {
            continue;
        }
        if system.is_own_header(&include.resolved_include) {
            continue;
        }

        debug!(file = %include.file, include = %include.include, "include without direct dependency");
        invalid.push(include.clone());
    }

    Ok(invalid)
}

/// Checks which included headers are available through the direct
/// dependencies of the target under inspection.
///
/// Reports includes without a matching dependency and unused dependencies.
/// If `optimize_implementation_deps` is set, public dependencies used only by
/// private files are reported as well.
///
/// The usage state inside `system` is updated in place.
pub fn evaluate_includes(
    public_includes: &[IncludeStatement],
    private_includes: &[IncludeStatement],
    system: &mut SystemUnderInspection,
    optimize_implementation_deps: bool,
) -> InclintResult<AnalysisResult> {
    let mut result = AnalysisResult::new(system.target().name.clone(), optimize_implementation_deps);

    let public_without_dep = find_includes_without_direct_dep(
        public_includes,
        UsageStatus::Public,
        DependencyScope::Public,
        system,
    )?;
    result.set_public_includes_without_direct_dep(public_without_dep);

    let private_without_dep = find_includes_without_direct_dep(
        private_includes,
        UsageStatus::Private,
        DependencyScope::All,
        system,
    )?;
    result.set_private_includes_without_direct_dep(private_without_dep);

    let unused_deps: BTreeSet<String> = system
        .reachable_dependencies(DependencyScope::Public)
        .filter(|dep| !dep.usage.is_used())
        .map(|dep| dep.name.clone())
        .collect();

    // A dependency listed in both lists is reported once, as unused public dependency
    let unused_implementation_deps: BTreeSet<String> = system
        .reachable_dependencies(DependencyScope::All)
        .filter(|dep| !dep.usage.is_used() && !unused_deps.contains(&dep.name))
        .map(|dep| dep.name.clone())
        .collect();

    result.set_unused_deps(unused_deps);
    result.set_unused_implementation_deps(unused_implementation_deps);

    if optimize_implementation_deps {
        let should_be_private: BTreeSet<String> = system
            .reachable_dependencies(DependencyScope::Public)
            .filter(|dep| dep.usage.status() == UsageStatus::Private)
            .map(|dep| dep.name.clone())
            .collect();
        result.set_deps_which_should_be_private(should_be_private);
    }

    info!(
        analyzed_target = %result.target(),
        public_includes = public_includes.len(),
        private_includes = private_includes.len(),
        findings = result.finding_count(),
        "evaluated includes"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::to_json;
    use crate::system::{DependencyDescriptor, TargetUnderInspection};
    use std::collections::HashSet;

    fn target(own_headers: &[&str]) -> TargetUnderInspection {
        TargetUnderInspection {
            name: "//:foo".into(),
            header_files: own_headers.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn dep(name: &str, headers: &[&str]) -> DependencyDescriptor {
        DependencyDescriptor::new(name, headers.iter().copied())
    }

    fn inc(file: &str, include: &str, resolved: &str) -> IncludeStatement {
        IncludeStatement::new(file, include, resolved)
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn assert_no_findings(result: &AnalysisResult) {
        assert!(result.is_ok());
        assert!(result.public_includes_without_direct_dep().is_empty());
        assert!(result.private_includes_without_direct_dep().is_empty());
        assert!(result.unused_deps().is_empty());
        assert!(result.unused_implementation_deps().is_empty());
        assert!(result.deps_which_should_be_private().is_empty());
    }

    #[test]
    fn test_success_for_no_input() {
        let mut system = SystemUnderInspection::build(target(&[]), &[], &[]);

        let result = evaluate_includes(&[], &[], &mut system, false).unwrap();

        assert_no_findings(&result);
        let data = to_json(&result);
        assert_eq!(data["analyzed_target"], "//:foo");
        assert_eq!(data["use_implementation_deps"], false);
    }

    #[test]
    fn test_success_for_all_checks() {
        let mut system = SystemUnderInspection::build(
            target(&[]),
            &[dep("//pub/dep:a", &["path/hdr_a.h"])],
            &[dep("//priv/dep:b", &["path/hdr_b.h"])],
        );

        let result = evaluate_includes(
            &[inc("pub_file_using_a.h", "<hdr_a.h>", "path/hdr_a.h")],
            &[inc("priv_file_using_b.h", "<hdr_b.h>", "path/hdr_b.h")],
            &mut system,
            true,
        )
        .unwrap();

        assert_no_findings(&result);
        assert!(result.optimize_implementation_deps());
    }

    #[test]
    fn test_detect_includes_without_matching_dependency() {
        let mut system = SystemUnderInspection::build(
            target(&[]),
            &[dep("//pub/dep:b", &["path/pub_hdr_b.h"])],
            &[dep("//priv/dep:b", &["path/priv_hdr_b.h"])],
        );
        let public = [
            inc("pub_file_using_a.h", "<pub_hdr_a_1.h>", "path/pub_hdr_a_1.h"),
            inc("pub_file_using_a.h", "<pub_hdr_a_2.h>", "path/pub_hdr_a_2.h"),
            inc("pub_file_using_b.h", "<pub_hdr_b.h>", "path/pub_hdr_b.h"),
            inc("pub_file_using_c.h", "<pub_hdr_c.h>", "path/pub_hdr_c.h"),
        ];
        let private = [
            inc("priv_file_using_a.h", "<priv_hdr_a_1.h>", "path/priv_hdr_a_1.h"),
            inc("priv_file_using_a.h", "<priv_hdr_a_2.h>", "path/priv_hdr_a_2.h"),
            inc("priv_file_using_b.h", "<priv_hdr_b.h>", "path/priv_hdr_b.h"),
            inc("priv_file_using_c.h", "<priv_hdr_c.h>", "path/priv_hdr_c.h"),
        ];

        let result = evaluate_includes(&public, &private, &mut system, false).unwrap();

        assert!(!result.is_ok());
        assert!(result.unused_deps().is_empty());
        assert!(result.unused_implementation_deps().is_empty());

        let data = to_json(&result);
        assert_eq!(
            data["public_includes_without_dep"],
            serde_json::json!({
                "pub_file_using_a.h": ["pub_hdr_a_1.h", "pub_hdr_a_2.h"],
                "pub_file_using_c.h": ["pub_hdr_c.h"],
            })
        );
        assert_eq!(
            data["private_includes_without_dep"],
            serde_json::json!({
                "priv_file_using_a.h": ["priv_hdr_a_1.h", "priv_hdr_a_2.h"],
                "priv_file_using_c.h": ["priv_hdr_c.h"],
            })
        );
    }

    #[test]
    fn test_public_file_cannot_use_implementation_dep() {
        let mut system = SystemUnderInspection::build(
            target(&[]),
            &[],
            &[dep("//priv/dep:b", &["path/hdr_b.h"])],
        );

        let result = evaluate_includes(
            &[inc("pub.h", "<hdr_b.h>", "path/hdr_b.h")],
            &[],
            &mut system,
            false,
        )
        .unwrap();

        assert_eq!(result.public_includes_without_direct_dep().len(), 1);
        assert_eq!(result.unused_implementation_deps(), &set(&["//priv/dep:b"]));
    }

    #[test]
    fn test_target_under_inspection_provides_headers() {
        let mut system = SystemUnderInspection::build(
            target(&["path/hdr_a.h", "path/hdr_b.h"]),
            &[],
            &[],
        );

        let result = evaluate_includes(
            &[inc("pub_file_using_a.h", "<hdr_a.h>", "path/hdr_a.h")],
            &[inc("priv_file_using_b.cpp", "<hdr_b.h>", "path/hdr_b.h")],
            &mut system,
            true,
        )
        .unwrap();

        assert_no_findings(&result);
    }

    #[test]
    fn test_own_header_does_not_mark_dependencies() {
        // Including an own header says nothing about unrelated dependencies
        let mut system = SystemUnderInspection::build(
            target(&["own.h"]),
            &[dep("//pub:a", &["a.h"])],
            &[],
        );

        let result = evaluate_includes(
            &[inc("pub.h", "\"own.h\"", "own.h")],
            &[],
            &mut system,
            false,
        )
        .unwrap();

        assert_eq!(result.unused_deps(), &set(&["//pub:a"]));
    }

    #[test]
    fn test_dependency_offering_own_header_is_used() {
        // Dependencies are looked up before the own headers, so a dependency
        // exporting the same header counts as used
        let mut system = SystemUnderInspection::build(
            target(&["shared/own.h"]),
            &[dep("//pub:exports_own", &["shared/own.h"])],
            &[dep("//impl:exports_own", &["shared/own.h"])],
        );

        let result = evaluate_includes(
            &[inc("pub.h", "\"shared/own.h\"", "shared/own.h")],
            &[inc("priv.cpp", "\"shared/own.h\"", "shared/own.h")],
            &mut system,
            true,
        )
        .unwrap();

        assert_no_findings(&result);
        assert!(system
            .reachable_dependencies(DependencyScope::All)
            .all(|d| d.usage.is_used()));
    }

    #[test]
    fn test_detect_unused_dependencies() {
        let mut system = SystemUnderInspection::build(
            target(&[]),
            &[
                dep("//pub/dep:a", &["path/hdr_pub_a.h"]),
                // Even if multiple headers are unused, the dependency is reported once
                dep("//pub/dep:b", &["path/hdr_pub_b_1.h", "path/hdr_pub_b_2.h"]),
            ],
            &[
                dep("//priv/dep:a", &["path/hdr_priv_a.h"]),
                dep("//priv/dep:b", &["path/hdr_priv_b_1.h", "path/hdr_priv_b_2.h"]),
            ],
        );

        let result = evaluate_includes(&[], &[], &mut system, false).unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.unused_deps(), &set(&["//pub/dep:a", "//pub/dep:b"]));
        assert_eq!(
            result.unused_implementation_deps(),
            &set(&["//priv/dep:a", "//priv/dep:b"])
        );
        assert!(result.deps_which_should_be_private().is_empty());
    }

    #[test]
    fn test_dependency_in_both_lists_is_reported_once() {
        let mut system = SystemUnderInspection::build(
            target(&[]),
            &[dep("//both:dep", &["both.h"])],
            &[dep("//both:dep", &["both.h"])],
        );

        let result = evaluate_includes(&[], &[], &mut system, false).unwrap();

        assert_eq!(result.unused_deps(), &set(&["//both:dep"]));
        assert!(result.unused_implementation_deps().is_empty());
    }

    #[test]
    fn test_single_header_marks_dependency_as_used() {
        let mut system = SystemUnderInspection::build(
            target(&[]),
            &[dep("//pub/dep:a", &["path/hdr_a_1.h", "path/hdr_a_2.h"])],
            &[dep("//priv/dep:b", &["path/hdr_b_1.h", "path/hdr_b_2.h"])],
        );

        let result = evaluate_includes(
            &[inc("pub_file_using_a.h", "<hdr_a_1.h>", "path/hdr_a_1.h")],
            &[inc("priv_file_using_b.cpp", "<hdr_b_1.h>", "path/hdr_b_1.h")],
            &mut system,
            false,
        )
        .unwrap();

        assert_no_findings(&result);
    }

    #[test]
    fn test_header_marks_all_associated_dependencies_as_used() {
        let mut system = SystemUnderInspection::build(
            target(&[]),
            &[
                dep("//pub/dep:a", &["path/hdr_a.h"]),
                dep("//pub/dep:other_a", &["path/hdr_a.h"]),
            ],
            &[
                dep("//priv/dep:b", &["path/hdr_b.h"]),
                dep("//priv/dep:other_b", &["path/hdr_b.h"]),
            ],
        );

        let result = evaluate_includes(
            &[inc("pub_file_using_a.h", "<hdr_a.h>", "path/hdr_a.h")],
            &[inc("priv_file_using_b.cpp", "<hdr_b.h>", "path/hdr_b.h")],
            &mut system,
            false,
        )
        .unwrap();

        assert_no_findings(&result);
    }

    #[test]
    fn test_detect_public_deps_which_should_be_private() {
        let mut system = SystemUnderInspection::build(
            target(&[]),
            &[
                dep("//pub/dep:used_privately", &["path/hdr_a.h"]),
                dep("//pub/dep:used_publicly", &["path/hdr_b.h"]),
                dep("//pub/dep:used_everywhere", &["path/hdr_c.h"]),
            ],
            &[],
        );

        let result = evaluate_includes(
            &[
                inc("pub.h", "<hdr_b.h>", "path/hdr_b.h"),
                inc("pub.h", "<hdr_c.h>", "path/hdr_c.h"),
            ],
            &[
                inc("priv.cpp", "<hdr_a.h>", "path/hdr_a.h"),
                inc("priv.cpp", "<hdr_c.h>", "path/hdr_c.h"),
            ],
            &mut system,
            true,
        )
        .unwrap();

        assert!(!result.is_ok());
        assert_eq!(
            result.deps_which_should_be_private(),
            &set(&["//pub/dep:used_privately"])
        );
    }

    #[test]
    fn test_should_be_private_requires_optimization_flag() {
        let mut system = SystemUnderInspection::build(
            target(&[]),
            &[dep("//pub/dep:a", &["path/hdr_a.h"])],
            &[],
        );

        let result = evaluate_includes(
            &[],
            &[inc("priv.cpp", "<hdr_a.h>", "path/hdr_a.h")],
            &mut system,
            false,
        )
        .unwrap();

        assert_no_findings(&result);
    }

    #[test]
    fn test_include_order_does_not_matter() {
        let build = || {
            SystemUnderInspection::build(
                target(&[]),
                &[dep("//pub:a", &["a.h"]), dep("//pub:b", &["b.h"])],
                &[dep("//impl:c", &["c.h"])],
            )
        };
        let includes = vec![
            inc("x.cpp", "<a.h>", "a.h"),
            inc("x.cpp", "<missing.h>", "missing.h"),
            inc("y.cpp", "<c.h>", "c.h"),
        ];
        let mut reversed = includes.clone();
        reversed.reverse();

        let mut forward_system = build();
        let forward = evaluate_includes(&[], &includes, &mut forward_system, true).unwrap();
        let mut backward_system = build();
        let backward = evaluate_includes(&[], &reversed, &mut backward_system, true).unwrap();

        assert_eq!(forward.unused_deps(), backward.unused_deps());
        assert_eq!(forward.deps_which_should_be_private(), backward.deps_which_should_be_private());
        assert_eq!(forward.deps_which_should_be_private(), &set(&["//pub:a"]));

        let unused: HashSet<_> = forward.unused_deps().iter().collect();
        assert!(forward
            .unused_implementation_deps()
            .iter()
            .all(|d| !unused.contains(d)));
    }
}
