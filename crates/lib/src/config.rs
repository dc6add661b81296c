//! Configuration for manifest path resolution.
//!
//! Manifest documents reference nested manifests and source files by path.
//! Relative paths are resolved against a manifest root, which defaults to the
//! process working directory and can be overridden with
//! [`MANIFEST_ROOT_ENV`](crate::consts::MANIFEST_ROOT_ENV).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::MANIFEST_ROOT_ENV;

/// Settings shared by manifest expansion and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistConfig {
  /// Directory that relative manifest and source paths are joined to.
  /// `None` leaves relative paths untouched.
  #[serde(default)]
  pub manifest_root: Option<PathBuf>,
}

impl DistConfig {
  /// Create a config that resolves relative paths against `root`.
  pub fn with_root(root: impl Into<PathBuf>) -> Self {
    Self {
      manifest_root: Some(root.into()),
    }
  }

  /// Build a config from the environment.
  ///
  /// An empty `DISTKIT_MANIFEST_ROOT` is treated as unset.
  pub fn from_env() -> Self {
    let manifest_root = std::env::var_os(MANIFEST_ROOT_ENV)
      .filter(|value| !value.is_empty())
      .map(PathBuf::from);
    Self { manifest_root }
  }

  /// Resolve a path as written in a manifest to the path to open.
  pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match &self.manifest_root {
      Some(root) if path.is_relative() => root.join(path),
      _ => path.to_path_buf(),
    }
  }
}
