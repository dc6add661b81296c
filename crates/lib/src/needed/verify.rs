//! Transitive DT_NEEDED closure checks.
//!
//! Starting from a binary's direct DT_NEEDED names, walk every library they
//! pull in and report the ones that cannot be found under the library
//! directory. Cycles are common (instrumented runtimes and the C library
//! depend on each other) and are not errors.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::rewrite::rewrite_needed;

/// Maps a runtime library path to its own DT_NEEDED names.
///
/// Returns `None` when the library does not exist. Implemented for closures
/// taking `&Path`.
pub trait LibraryLookup {
  fn needed_libraries(&mut self, path: &Path) -> Option<Vec<String>>;
}

impl<F> LibraryLookup for F
where
  F: FnMut(&Path) -> Option<Vec<String>>,
{
  fn needed_libraries(&mut self, path: &Path) -> Option<Vec<String>> {
    self(path)
  }
}

/// An in-memory library graph, keyed by runtime path.
#[derive(Debug, Clone, Default)]
pub struct LibraryMap(BTreeMap<PathBuf, Vec<String>>);

impl LibraryMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a library and its DT_NEEDED names.
  pub fn insert<S: Into<String>>(&mut self, path: impl Into<PathBuf>, needed: impl IntoIterator<Item = S>) {
    self.0.insert(path.into(), needed.into_iter().map(Into::into).collect());
  }
}

impl LibraryLookup for LibraryMap {
  fn needed_libraries(&mut self, path: &Path) -> Option<Vec<String>> {
    self.0.get(path).cloned()
  }
}

/// Runtime paths already expanded.
///
/// Owned by the caller; share one across many binaries to skip libraries
/// whose closure is already known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedLibraries(BTreeSet<PathBuf>);

impl VisitedLibraries {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, path: impl AsRef<Path>) -> bool {
    self.0.contains(path.as_ref())
  }

  pub fn insert(&mut self, path: PathBuf) -> bool {
    self.0.insert(path)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Path> {
    self.0.iter().map(PathBuf::as_path)
  }
}

/// A library the binary needs that the lookup could not find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDependency {
  pub binary: String,
  pub path: PathBuf,
}

impl fmt::Display for MissingDependency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} missing dependency {}", self.binary, self.path.display())
  }
}

/// Verify the transitive DT_NEEDED closure of `binary_name`.
///
/// Every name is rewritten (see [`rewrite_needed`]) and joined to `lib_dir`
/// before lookup. Found libraries are added to `visited` and their own
/// dependencies queued; missing ones are collected, each reported once. The
/// whole closure is always walked, so the result lists every missing library.
pub fn verify_elf_dependencies<I, S, L>(
  binary_name: &str,
  lib_dir: &Path,
  deps: I,
  lookup: &mut L,
  visited: &mut VisitedLibraries,
) -> Vec<MissingDependency>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
  L: LibraryLookup + ?Sized,
{
  let mut queue: BTreeSet<String> = deps.into_iter().map(Into::into).collect();
  let mut reported: BTreeSet<PathBuf> = BTreeSet::new();
  let mut missing = Vec::new();

  while let Some(dep) = queue.pop_first() {
    let Some(name) = rewrite_needed(&dep) else {
      trace!(binary = binary_name, dep = %dep, "ignoring dependency");
      continue;
    };

    let path = lib_dir.join(name);
    if visited.contains(&path) || reported.contains(&path) {
      continue;
    }

    match lookup.needed_libraries(&path) {
      None => {
        debug!(binary = binary_name, path = %path.display(), "missing dependency");
        reported.insert(path.clone());
        missing.push(MissingDependency {
          binary: binary_name.to_string(),
          path,
        });
      }
      Some(subdeps) => {
        trace!(binary = binary_name, path = %path.display(), needed = subdeps.len(), "visited library");
        visited.insert(path);
        queue.extend(subdeps.into_iter().filter(|sub| !visited.contains(lib_dir.join(sub))));
      }
    }
  }

  missing
}
