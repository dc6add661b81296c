//! FINI manifest conversion.
//!
//! FINI manifests are line-based: each line is `destination=source`. They are
//! produced by older build rules and converted to distribution entries so they
//! can go through the same merge.

use super::types::{Entry, ManifestError};

/// Convert FINI manifest lines into entries that all carry `label`.
///
/// Lines are split on the first `=` after trimming surrounding whitespace.
/// Blank lines are skipped; a non-blank line without `=` is an error.
pub fn fini_lines_to_entries<I, S>(lines: I, label: Option<&str>) -> Result<Vec<Entry>, ManifestError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut entries = Vec::new();
  for (index, line) in lines.into_iter().enumerate() {
    let line = line.as_ref().trim();
    if line.is_empty() {
      continue;
    }
    let Some((destination, source)) = line.split_once('=') else {
      return Err(ManifestError::InvalidFiniLine {
        line_number: index + 1,
        line: line.to_string(),
      });
    };
    entries.push(Entry::new(destination, source, label));
  }
  Ok(entries)
}
