//! The target under inspection and the index of its direct dependencies.
//!
//! Every declared dependency is stored exactly once in an arena. The header
//! maps only hold [`DepId`] handles, so marking a dependency as used through
//! any of its headers is visible through all others.
//!
//! Dependencies without header files only provide libraries to link against.
//! They never enter the header maps and are thus invisible to the analysis,
//! which prevents them from being reported as unused.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{InclintError, InclintResult, IoResultExt};
use crate::usage::{DependencyUsage, UsageStatus};

/// Content of a target or dependency descriptor file.
///
/// Further keys (include paths, defines, ...) may be present and are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DependencyDescriptor {
    /// Unique name of the target, e.g. a build label like `//foo:bar`
    pub target: String,
    /// Header files the target offers
    pub header_files: Vec<String>,
}

impl DependencyDescriptor {
    pub fn new(
        target: impl Into<String>,
        header_files: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            target: target.into(),
            header_files: header_files.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads a descriptor file.
    pub fn read(path: &Path) -> InclintResult<Self> {
        let content = fs::read_to_string(path).with_path(path)?;
        serde_json::from_str(&content).map_err(|e| InclintError::parse(path, e.to_string()))
    }
}

/// The target whose include statements are analyzed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetUnderInspection {
    pub name: String,
    /// Headers owned by the target itself. Including them never needs a dependency.
    pub header_files: HashSet<String>,
}

impl From<DependencyDescriptor> for TargetUnderInspection {
    fn from(descriptor: DependencyDescriptor) -> Self {
        Self {
            name: descriptor.target,
            header_files: descriptor.header_files.into_iter().collect(),
        }
    }
}

/// Which dependency list a dependency was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// `deps`, available to public and private files
    Public,
    /// `implementation_deps`, available to private files only
    Implementation,
}

/// Which header map a lookup is performed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyScope {
    /// Public dependencies only
    Public,
    /// Public and implementation dependencies
    All,
}

/// Handle of a dependency inside a [`SystemUnderInspection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepId(usize);

/// A declared direct dependency and how it has been used so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CcDependency {
    pub name: String,
    pub kind: DependencyKind,
    pub usage: DependencyUsage,
}

pub type HeadersToDepsMap = HashMap<String, Vec<DepId>>;

/// The target under inspection together with its dependency index.
#[derive(Debug, Clone, Default)]
pub struct SystemUnderInspection {
    target: TargetUnderInspection,
    deps: Vec<CcDependency>,
    headers_to_public_deps: HeadersToDepsMap,
    headers_to_all_deps: HeadersToDepsMap,
}

impl SystemUnderInspection {
    pub fn new(target: TargetUnderInspection) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Builds the dependency index from the declared dependency lists.
    pub fn build(
        target: TargetUnderInspection,
        deps: &[DependencyDescriptor],
        implementation_deps: &[DependencyDescriptor],
    ) -> Self {
        let mut system = Self::new(target);
        for dep in deps {
            system.add_dependency(dep, DependencyKind::Public);
        }
        for dep in implementation_deps {
            system.add_dependency(dep, DependencyKind::Implementation);
        }
        debug!(
            analyzed_target = %system.target.name,
            dependencies = system.deps.len(),
            public_headers = system.headers_to_public_deps.len(),
            all_headers = system.headers_to_all_deps.len(),
            "built dependency index"
        );
        system
    }

    /// Adds a single dependency to the index.
    ///
    /// Public dependencies are registered in both header maps, implementation
    /// dependencies only in the map of all dependencies.
    pub fn add_dependency(&mut self, descriptor: &DependencyDescriptor, kind: DependencyKind) -> DepId {
        if self
            .deps
            .iter()
            .any(|d| d.name == descriptor.target && d.kind == kind)
        {
            warn!(dependency = %descriptor.target, ?kind, "dependency is declared multiple times");
        }

        let id = DepId(self.deps.len());
        self.deps.push(CcDependency {
            name: descriptor.target.clone(),
            kind,
            usage: DependencyUsage::default(),
        });

        for header in &descriptor.header_files {
            if kind == DependencyKind::Public {
                self.headers_to_public_deps
                    .entry(header.clone())
                    .or_default()
                    .push(id);
            }
            self.headers_to_all_deps
                .entry(header.clone())
                .or_default()
                .push(id);
        }

        id
    }

    pub fn target(&self) -> &TargetUnderInspection {
        &self.target
    }

    pub fn dependency(&self, id: DepId) -> &CcDependency {
        &self.deps[id.0]
    }

    /// Number of declared dependencies, including those without headers.
    pub fn dependency_count(&self) -> usize {
        self.deps.len()
    }

    fn headers_to_deps(&self, scope: DependencyScope) -> &HeadersToDepsMap {
        match scope {
            DependencyScope::Public => &self.headers_to_public_deps,
            DependencyScope::All => &self.headers_to_all_deps,
        }
    }

    /// All dependencies offering the given header.
    pub fn providers(&self, scope: DependencyScope, header: &str) -> &[DepId] {
        self.headers_to_deps(scope)
            .get(header)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the header belongs to the target under inspection itself.
    pub fn is_own_header(&self, header: &str) -> bool {
        self.target.header_files.contains(header)
    }

    /// Marks every dependency offering `header` as used.
    ///
    /// Returns `false` if no dependency in `scope` offers the header.
    pub fn record_usage(
        &mut self,
        scope: DependencyScope,
        header: &str,
        usage: UsageStatus,
    ) -> InclintResult<bool> {
        let ids = self.providers(scope, header).to_vec();
        if ids.is_empty() {
            return Ok(false);
        }

        for id in ids {
            self.deps[id.0].usage.update(usage)?;
        }
        Ok(true)
    }

    /// Dependencies reachable through the header map of `scope`.
    ///
    /// A dependency offering several headers is yielded once per header.
    pub fn reachable_dependencies(
        &self,
        scope: DependencyScope,
    ) -> impl Iterator<Item = &CcDependency> + '_ {
        self.headers_to_deps(scope)
            .values()
            .flatten()
            .map(move |id| &self.deps[id.0])
    }
}

/// Reads all descriptor files and builds the system under inspection.
pub fn load_system_under_inspection<P: AsRef<Path>>(
    target_file: &Path,
    dep_files: &[P],
    implementation_dep_files: &[P],
) -> InclintResult<SystemUnderInspection> {
    let target = TargetUnderInspection::from(DependencyDescriptor::read(target_file)?);
    let deps = read_descriptors(dep_files)?;
    let implementation_deps = read_descriptors(implementation_dep_files)?;

    Ok(SystemUnderInspection::build(target, &deps, &implementation_deps))
}

fn read_descriptors<P: AsRef<Path>>(files: &[P]) -> InclintResult<Vec<DependencyDescriptor>> {
    files
        .iter()
        .map(|f| DependencyDescriptor::read(f.as_ref()))
        .collect()
}
