//! Distribution manifests.
//!
//! Expansion flattens nested manifest documents into entries; merging
//! deduplicates them by destination and reports conflicting sources.

mod compare;
mod expand;
mod fini;
mod merge;
mod output;
mod types;

pub use compare::files_identical;
pub use expand::{expand_manifest_file, expand_manifest_items, read_manifest_items};
pub use fini::fini_lines_to_entries;
pub use merge::{Conflict, MergeOutcome, expand_manifest, merge_entries};
pub use output::{entries_to_json, write_manifest};
pub use types::*;
