//! Resolution of extracted include tokens to files on disk.
//!
//! This is the lightweight alternative to running a real preprocessor. It
//! does not evaluate conditional compilation, every include directive found
//! in the file is resolved.

use std::fs;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::error::{InclintResult, IoResultExt};
use crate::extract::extract_includes;
use crate::include::{include_without_quotes, is_system_include, IncludedFile, ScannedFile};

/// Maps an include token of a source file to the path of the included file.
pub trait IncludeResolver: Send + Sync {
    /// Returns `None` if the include cannot be resolved. Such includes are
    /// dropped from the analysis.
    fn resolve(&self, source_file: &Path, include: &str) -> Option<String>;
}

/// Resolves includes by searching include directories, like a compiler does.
#[derive(Debug, Clone, Default)]
pub struct IncludePathResolver {
    include_paths: Vec<PathBuf>,
    system_include_paths: Vec<PathBuf>,
    working_dir: PathBuf,
}

impl IncludePathResolver {
    /// Found files are reported relative to the current working directory.
    pub fn new(include_paths: Vec<PathBuf>, system_include_paths: Vec<PathBuf>) -> Self {
        let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            include_paths,
            system_include_paths,
            working_dir,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    fn search_dirs<'a>(
        &'a self,
        source_file: &'a Path,
        include: &str,
    ) -> impl Iterator<Item = &'a Path> + 'a {
        let own_dir = if is_system_include(include) {
            None
        } else {
            source_file.parent()
        };

        own_dir.into_iter().chain(
            self.include_paths
                .iter()
                .chain(&self.system_include_paths)
                .map(PathBuf::as_path),
        )
    }

    fn display_path(&self, found: &Path) -> String {
        let working_dir = normalize_path(&self.working_dir);
        let shown = found.strip_prefix(&working_dir).unwrap_or(found);
        shown.to_string_lossy().replace('\\', "/")
    }
}

/// Resolves `.` and `..` components without touching the filesystem.
///
/// `..` directly below the root stays at the root, leading `..` of a
/// relative path are kept.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

impl IncludeResolver for IncludePathResolver {
    fn resolve(&self, source_file: &Path, include: &str) -> Option<String> {
        let header = include_without_quotes(include);
        if header == include {
            return None;
        }

        // Relative search directories are relative to the working directory
        self.search_dirs(source_file, include)
            .map(|dir| normalize_path(&self.working_dir.join(dir).join(header)))
            .find(|candidate| candidate.is_file())
            .map(|found| self.display_path(&found))
    }
}

/// Extracts and resolves the includes of all given source files.
///
/// Files are processed in parallel, the result keeps the input order.
/// Includes which cannot be resolved are dropped.
pub fn scan_source_files<P, R>(files: &[P], resolver: &R) -> InclintResult<Vec<ScannedFile>>
where
    P: AsRef<Path> + Sync,
    R: IncludeResolver + ?Sized,
{
    files
        .par_iter()
        .map(|file| scan_source_file(file.as_ref(), resolver))
        .collect()
}

fn scan_source_file<R>(file: &Path, resolver: &R) -> InclintResult<ScannedFile>
where
    R: IncludeResolver + ?Sized,
{
    let content = fs::read_to_string(file).with_path(file)?;

    let resolved_includes = extract_includes(&content)
        .into_iter()
        .filter_map(|include| match resolver.resolve(file, &include) {
            Some(resolved) => Some(IncludedFile {
                include,
                file: resolved,
            }),
            None => {
                debug!(file = %file.display(), %include, "dropping unresolved include");
                None
            }
        })
        .collect();

    Ok(ScannedFile {
        file: file.to_string_lossy().replace('\\', "/"),
        resolved_includes,
    })
}
