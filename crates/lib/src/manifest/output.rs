//! Canonical serialization of merged manifests.
//!
//! Other build steps consume the merged manifest as a JSON array of entries,
//! sorted, with alphabetical keys and 2-space indentation. Identical inputs
//! always produce identical bytes.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::TMP_SUFFIX;

use super::types::{Entry, ManifestError};

/// Serialize entries to the canonical JSON form.
pub fn entries_to_json(entries: &[Entry]) -> Result<String, ManifestError> {
  let mut sorted = entries.to_vec();
  sorted.sort();
  // Round-trip through `Value` so object keys come out sorted.
  let value = serde_json::to_value(&sorted).map_err(ManifestError::Serialize)?;
  serde_json::to_string_pretty(&value).map_err(ManifestError::Serialize)
}

/// Write the canonical JSON form of `entries` to `path`.
///
/// Uses atomic write (write to temp, then rename) so readers never see a
/// partial manifest.
pub fn write_manifest(path: &Path, entries: &[Entry]) -> Result<(), ManifestError> {
  let content = entries_to_json(entries)?;
  let write_err = |source| ManifestError::Write {
    path: path.to_path_buf(),
    source,
  };

  let mut tmp = path.as_os_str().to_owned();
  tmp.push(TMP_SUFFIX);
  let tmp = PathBuf::from(tmp);

  fs::write(&tmp, content).map_err(write_err)?;
  fs::rename(&tmp, path).map_err(write_err)?;

  debug!(path = %path.display(), entries = entries.len(), "wrote manifest");
  Ok(())
}
