//! Manifest merging and conflict detection.
//!
//! An expanded manifest may list the same destination several times. Entries
//! for one destination merge when their sources match, either as identical
//! path strings or as files with identical contents. Any other combination is
//! a conflict: every conflict is collected, and the merge as a whole fails.
//!
//! # Labels
//!
//! The first entry seen for a destination keeps its label. A missing label is
//! backfilled from a later compatible entry; a present one is never replaced,
//! even when a later entry carries a different label.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::{debug, warn};

use crate::config::DistConfig;
use crate::depfile::OpenedFiles;

use super::compare::files_identical;
use super::expand::expand_manifest_items;
use super::types::{Entry, ManifestError, RawItem};

/// A destination with two or more incompatible sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
  pub destination: String,
  /// Every entry involved, sorted by source, then label.
  pub culprits: Vec<Entry>,
}

impl fmt::Display for Conflict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "  Conflicting source paths for destination path: {}", self.destination)?;
    for entry in &self.culprits {
      writeln!(
        f,
        "   - source={} label={}",
        entry.source,
        entry.label.as_deref().unwrap_or("None")
      )?;
    }
    Ok(())
  }
}

/// Result of merging expanded entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
  /// Merged entries, sorted by destination.
  ///
  /// For a conflicted destination this holds the first entry seen; callers
  /// must not publish the manifest when [`conflicts`](Self::conflicts) is
  /// non-empty.
  pub entries: Vec<Entry>,
  /// Conflicts, sorted by destination.
  pub conflicts: Vec<Conflict>,
}

impl MergeOutcome {
  pub fn is_clean(&self) -> bool {
    self.conflicts.is_empty()
  }

  /// Human-readable conflict report, or an empty string when there are none.
  pub fn error_text(&self) -> String {
    if self.conflicts.is_empty() {
      return String::new();
    }
    let mut text = String::from("ERROR: Conflicting distribution entries!\n");
    for conflict in &self.conflicts {
      text.push_str(&conflict.to_string());
    }
    text
  }

  /// The merged entries, or [`ManifestError::Conflicts`] carrying the report.
  pub fn into_result(self) -> Result<Vec<Entry>, ManifestError> {
    if self.is_clean() {
      Ok(self.entries)
    } else {
      Err(ManifestError::Conflicts(self.error_text()))
    }
  }
}

/// Merge entries that share a destination and collect conflicts.
///
/// Comparing two different source paths reads both files; their resolved
/// paths are recorded in `opened` because the result depends on them.
pub fn merge_entries<I>(entries: I, config: &DistConfig, opened: &mut OpenedFiles) -> Result<MergeOutcome, ManifestError>
where
  I: IntoIterator<Item = Entry>,
{
  let mut merged: BTreeMap<String, Entry> = BTreeMap::new();
  let mut culprits: BTreeMap<String, BTreeSet<Entry>> = BTreeMap::new();

  for entry in entries {
    let Some(current) = merged.get_mut(&entry.destination) else {
      merged.insert(entry.destination.clone(), entry);
      continue;
    };

    if *current == entry {
      continue;
    }

    if !same_source(current, &entry, config, opened)? {
      culprits
        .entry(entry.destination.clone())
        .or_default()
        .extend([current.clone(), entry]);
      continue;
    }

    if current.label.is_none() && entry.label.is_some() {
      debug!(destination = %entry.destination, label = ?entry.label, "backfilling label");
      *current = current.with_label(entry.label);
    }
  }

  let conflicts: Vec<Conflict> = culprits
    .into_iter()
    .map(|(destination, entries)| {
      warn!(destination = %destination, sources = entries.len(), "conflicting distribution entries");
      // One destination per set, so set order is source then label.
      Conflict {
        destination,
        culprits: entries.into_iter().collect(),
      }
    })
    .collect();

  Ok(MergeOutcome {
    entries: merged.into_values().collect(),
    conflicts,
  })
}

/// Expand manifest items and merge the result.
pub fn expand_manifest(
  items: &[RawItem],
  config: &DistConfig,
  opened: &mut OpenedFiles,
) -> Result<MergeOutcome, ManifestError> {
  let entries = expand_manifest_items(items, None, config, opened)?;
  merge_entries(entries, config, opened)
}

fn same_source(a: &Entry, b: &Entry, config: &DistConfig, opened: &mut OpenedFiles) -> Result<bool, ManifestError> {
  if a.source == b.source {
    return Ok(true);
  }

  let left = config.resolve(&a.source);
  let right = config.resolve(&b.source);
  opened.record(left.clone());
  opened.record(right.clone());

  files_identical(&left, &right).map_err(|source| ManifestError::Compare { left, right, source })
}
