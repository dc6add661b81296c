//! Distribution manifest types.
//!
//! A distribution manifest is a JSON array describing where build outputs are
//! installed. Each item is either a direct placement or a reference to another
//! manifest document:
//!
//! ```json
//! [
//!   { "destination": "bin/app", "source": "out/app", "label": "//src:app" },
//!   { "file": "out/libs.manifest.json", "label": "//src:libs" }
//! ]
//! ```
//!
//! Expansion flattens references into [`Entry`] values; merging then removes
//! duplicates and reports conflicts.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// One expanded placement: install `source` at `destination`.
///
/// `label` records provenance (usually the build target that produced the
/// entry) and never takes part in conflict detection.
///
/// Field order gives the derived [`Ord`] its meaning: destination first, then
/// source, then label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entry {
  pub destination: String,
  pub source: String,
  #[serde(default)]
  pub label: Option<String>,
}

impl Entry {
  pub fn new(destination: impl Into<String>, source: impl Into<String>, label: Option<&str>) -> Self {
    Self {
      destination: destination.into(),
      source: source.into(),
      label: label.map(str::to_string),
    }
  }

  /// Return a copy carrying `label`.
  pub fn with_label(&self, label: Option<String>) -> Self {
    Self {
      label,
      ..self.clone()
    }
  }
}

/// A manifest item as it appears in a manifest document.
///
/// `label` distinguishes an absent key (`None`, inherit the default) from an
/// explicit `null` (`Some(None)`, no label).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawItem {
  /// A direct placement.
  Source {
    destination: String,
    source: String,
    #[serde(default, deserialize_with = "present")]
    label: Option<Option<String>>,
  },
  /// A reference to another manifest document to expand in place.
  Include {
    file: String,
    #[serde(default, deserialize_with = "present")]
    label: Option<Option<String>>,
  },
}

impl RawItem {
  /// The item's label, falling back to `default` only when the key is absent.
  pub fn effective_label(&self, default: Option<&str>) -> Option<String> {
    let label = match self {
      RawItem::Source { label, .. } | RawItem::Include { label, .. } => label,
    };
    match label {
      Some(explicit) => explicit.clone(),
      None => default.map(str::to_string),
    }
  }
}

/// Marks a key as present even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
  D: Deserializer<'de>,
{
  Option::<String>::deserialize(deserializer).map(Some)
}

/// Errors from reading, merging, or writing manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse manifest {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to compare sources {left} and {right}: {source}")]
  Compare {
    left: PathBuf,
    right: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("{0}")]
  Conflicts(String),

  #[error("failed to serialize manifest: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("failed to write manifest {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid FINI manifest line {line_number}: {line:?}")]
  InvalidFiniLine { line_number: usize, line: String },
}
