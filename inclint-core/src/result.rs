//! Findings of a single analysis run.

use std::collections::BTreeSet;

use crate::include::IncludeStatement;

/// Result of analyzing the include statements of one target.
///
/// The setters are meant to be called once each by the evaluation. Rendering
/// lives in [`crate::report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    target: String,
    optimize_implementation_deps: bool,

    public_includes_without_direct_dep: Vec<IncludeStatement>,
    private_includes_without_direct_dep: Vec<IncludeStatement>,
    unused_deps: BTreeSet<String>,
    unused_implementation_deps: BTreeSet<String>,
    deps_which_should_be_private: BTreeSet<String>,
}

impl AnalysisResult {
    pub fn new(target: impl Into<String>, optimize_implementation_deps: bool) -> Self {
        Self {
            target: target.into(),
            optimize_implementation_deps,
            public_includes_without_direct_dep: Vec::new(),
            private_includes_without_direct_dep: Vec::new(),
            unused_deps: BTreeSet::new(),
            unused_implementation_deps: BTreeSet::new(),
            deps_which_should_be_private: BTreeSet::new(),
        }
    }

    /// True if there is not a single finding.
    pub fn is_ok(&self) -> bool {
        self.public_includes_without_direct_dep.is_empty()
            && self.private_includes_without_direct_dep.is_empty()
            && self.unused_deps.is_empty()
            && self.unused_implementation_deps.is_empty()
            && self.deps_which_should_be_private.is_empty()
    }

    /// Total number of findings over all categories.
    pub fn finding_count(&self) -> usize {
        self.public_includes_without_direct_dep.len()
            + self.private_includes_without_direct_dep.len()
            + self.unused_deps.len()
            + self.unused_implementation_deps.len()
            + self.deps_which_should_be_private.len()
    }

    pub fn set_public_includes_without_direct_dep(&mut self, includes: Vec<IncludeStatement>) {
        self.public_includes_without_direct_dep = includes;
    }

    pub fn set_private_includes_without_direct_dep(&mut self, includes: Vec<IncludeStatement>) {
        self.private_includes_without_direct_dep = includes;
    }

    pub fn set_unused_deps(&mut self, deps: BTreeSet<String>) {
        self.unused_deps = deps;
    }

    pub fn set_unused_implementation_deps(&mut self, deps: BTreeSet<String>) {
        self.unused_implementation_deps = deps;
    }

    pub fn set_deps_which_should_be_private(&mut self, deps: BTreeSet<String>) {
        self.deps_which_should_be_private = deps;
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn optimize_implementation_deps(&self) -> bool {
        self.optimize_implementation_deps
    }

    pub fn public_includes_without_direct_dep(&self) -> &[IncludeStatement] {
        &self.public_includes_without_direct_dep
    }

    pub fn private_includes_without_direct_dep(&self) -> &[IncludeStatement] {
        &self.private_includes_without_direct_dep
    }

    pub fn unused_deps(&self) -> &BTreeSet<String> {
        &self.unused_deps
    }

    pub fn unused_implementation_deps(&self) -> &BTreeSet<String> {
        &self.unused_implementation_deps
    }

    pub fn deps_which_should_be_private(&self) -> &BTreeSet<String> {
        &self.deps_which_should_be_private
    }
}
