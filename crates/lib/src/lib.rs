//! distkit-lib: packaging checks for build outputs
//!
//! This crate provides the two resolution steps run when packaging a build:
//! - `manifest`: expand nested distribution manifests and merge them into a
//!   sorted, conflict-checked list of destination/source entries
//! - `needed`: compute the transitive DT_NEEDED closure of a binary and report
//!   libraries missing from the package
//! - `depfile`: record the files read along the way for incremental rebuilds

pub mod config;
pub mod consts;
pub mod depfile;
pub mod manifest;
pub mod needed;
