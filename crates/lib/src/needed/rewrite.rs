//! Rewrite rules for DT_NEEDED names.

use crate::consts::{KERNEL_INJECTED_LIB, LIBC_NEEDED_NAME, LIBC_RUNTIME_NAME};

/// What to do with a DT_NEEDED name before resolving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeededRewrite<'a> {
  /// Not a packaging dependency.
  Ignore,
  /// Resolve under a different name.
  Rename(&'static str),
  /// Resolve as written.
  Keep(&'a str),
}

impl<'a> NeededRewrite<'a> {
  /// Apply the rewrite table to `name`.
  pub fn of(name: &'a str) -> Self {
    match name {
      KERNEL_INJECTED_LIB => NeededRewrite::Ignore,
      LIBC_NEEDED_NAME => NeededRewrite::Rename(LIBC_RUNTIME_NAME),
      _ => NeededRewrite::Keep(name),
    }
  }

  /// The name to resolve, or `None` if the dependency is ignored.
  pub fn name(self) -> Option<&'a str> {
    match self {
      NeededRewrite::Ignore => None,
      NeededRewrite::Rename(name) => Some(name),
      NeededRewrite::Keep(name) => Some(name),
    }
  }
}

/// Rewrite a DT_NEEDED name, returning `None` when it should be ignored.
pub fn rewrite_needed(name: &str) -> Option<&str> {
  NeededRewrite::of(name).name()
}
