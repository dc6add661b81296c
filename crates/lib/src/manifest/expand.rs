//! Manifest expansion.
//!
//! Flattens a manifest document and every document it references into a list
//! of [`Entry`] values, in depth-first document order. No deduplication happens
//! here; see [`merge_entries`](super::merge_entries).
//!
//! References are not checked for cycles. A manifest that includes itself,
//! directly or through other manifests, recurses without bound.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::DistConfig;
use crate::depfile::OpenedFiles;

use super::types::{Entry, ManifestError, RawItem};

/// Read and decode a manifest document.
///
/// The path is recorded in `opened` before it is read, so a failed read still
/// shows up as a build dependency.
pub fn read_manifest_items(path: &Path, opened: &mut OpenedFiles) -> Result<Vec<RawItem>, ManifestError> {
  opened.record(path);
  debug!(path = %path.display(), "reading manifest");

  let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

/// Expand manifest items into entries.
///
/// Items without a `label` key take `default_label`. Referenced manifests are
/// expanded recursively, with the referencing item's label as their default.
pub fn expand_manifest_items(
  items: &[RawItem],
  default_label: Option<&str>,
  config: &DistConfig,
  opened: &mut OpenedFiles,
) -> Result<Vec<Entry>, ManifestError> {
  let mut entries = Vec::new();
  expand_into(items, default_label, config, opened, &mut entries)?;
  Ok(entries)
}

/// Read a top-level manifest file and expand it.
pub fn expand_manifest_file(
  path: &Path,
  default_label: Option<&str>,
  config: &DistConfig,
  opened: &mut OpenedFiles,
) -> Result<Vec<Entry>, ManifestError> {
  let items = read_manifest_items(&config.resolve(path), opened)?;
  expand_manifest_items(&items, default_label, config, opened)
}

fn expand_into(
  items: &[RawItem],
  default_label: Option<&str>,
  config: &DistConfig,
  opened: &mut OpenedFiles,
  entries: &mut Vec<Entry>,
) -> Result<(), ManifestError> {
  for item in items {
    let label = item.effective_label(default_label);
    match item {
      RawItem::Source {
        destination, source, ..
      } => entries.push(Entry {
        destination: destination.clone(),
        source: source.clone(),
        label,
      }),
      RawItem::Include { file, .. } => {
        let nested = read_manifest_items(&config.resolve(file), opened)?;
        expand_into(&nested, label.as_deref(), config, opened, entries)?;
      }
    }
  }
  Ok(())
}
