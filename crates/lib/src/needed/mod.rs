//! Native library dependency closure.
//!
//! [`verify_elf_dependencies`] walks DT_NEEDED names through a caller-supplied
//! [`LibraryLookup`], applying the fixed rewrite table in [`rewrite`] first.
//! Reading ELF files is left to the lookup.

mod rewrite;
mod verify;

pub use rewrite::{NeededRewrite, rewrite_needed};
pub use verify::{LibraryLookup, LibraryMap, MissingDependency, VisitedLibraries, verify_elf_dependencies};
