//! RigCanon CLI library.
//!
//! This crate provides the command implementations behind the `rigcanon`
//! binary: rig and config loading, canonicalization and inspection.

pub mod commands;
pub mod input;
pub mod logging;
