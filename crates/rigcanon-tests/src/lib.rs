//! RigCanon End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the canonicalization pipeline:
//!
//! - Canonicalization: rig text -> canonical skeleton, through the engine
//!   and through the CLI command layer
//! - **Determinism**: byte-identical output across runs and across record
//!   orderings of the same rig
//! - Properties: re-rooting, base naming and classification under random
//!   inputs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rigcanon-tests
//! cargo test -p rigcanon-tests --test proptest_skeleton
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export commonly used items
pub use determinism::{assert_deterministic, verify_determinism, DeterminismResult};
pub use fixtures::HumanoidRig;
