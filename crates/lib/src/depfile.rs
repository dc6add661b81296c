//! Build dependency tracking for files read while producing a manifest.
//!
//! Expansion and merging record every file they open into [`OpenedFiles`].
//! The caller turns that record into a Ninja-style depfile
//! (`target: dep1 dep2 ...`) so the incremental build reruns the step when any
//! of those files change.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::TMP_SUFFIX;

/// Errors from writing a depfile.
#[derive(Debug, Error)]
pub enum DepFileError {
  #[error("failed to write depfile {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Ordered set of every file path read during expansion or merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenedFiles(BTreeSet<PathBuf>);

impl OpenedFiles {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a path. Returns `true` if it was not already recorded.
  pub fn record(&mut self, path: impl Into<PathBuf>) -> bool {
    self.0.insert(path.into())
  }

  pub fn contains(&self, path: impl AsRef<Path>) -> bool {
    self.0.contains(path.as_ref())
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

impl<'a> IntoIterator for &'a OpenedFiles {
  type Item = &'a PathBuf;
  type IntoIter = std::collections::btree_set::Iter<'a, PathBuf>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

/// A single-target depfile.
#[derive(Debug, Clone)]
pub struct DepFile<'a> {
  target: String,
  deps: &'a OpenedFiles,
}

impl<'a> DepFile<'a> {
  pub fn new(target: impl Into<String>, deps: &'a OpenedFiles) -> Self {
    Self {
      target: target.into(),
      deps,
    }
  }

  /// Render as `target: dep1 dep2 ...` on one line, without a trailing newline.
  pub fn render(&self) -> String {
    let mut out = format!("{}:", self.target);
    for dep in self.deps {
      out.push(' ');
      out.push_str(&dep.to_string_lossy());
    }
    out
  }

  /// Write the depfile to `path`.
  ///
  /// Writes to a temporary sibling first, then renames over the destination.
  pub fn write(&self, path: &Path) -> Result<(), DepFileError> {
    let write_err = |source| DepFileError::Write {
      path: path.to_path_buf(),
      source,
    };

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(TMP_SUFFIX);
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, format!("{}\n", self.render())).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)?;

    debug!(path = %path.display(), deps = self.deps.len(), "wrote depfile");
    Ok(())
  }
}
