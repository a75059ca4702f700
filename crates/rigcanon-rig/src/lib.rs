//! RigCanon Rig Library
//!
//! This crate provides the skeleton graph, the rig text reader and writer,
//! structural validation, and canonical hashing used by the RigCanon engine.
//!
//! # Overview
//!
//! An auto-rigging model emits a line-oriented rig description: joint
//! positions, a root, parent→child links and per-vertex skin weights. This
//! crate turns that text into a [`Skeleton`], an arena of joints addressed
//! by [`JointId`] handles, and converts it into the name-keyed
//! [`CanonicalSkeleton`] handed to scene-building tools.
//!
//! # Example
//!
//! ```
//! use rigcanon_rig::parser::parse_rig;
//! use rigcanon_rig::validation::check_tree;
//! use rigcanon_rig::hash::skeleton_hash;
//!
//! let rig = "joints hips 0 1 0\njoints head 0 2 0\nroot hips\nhier hips head\n";
//! let parsed = parse_rig(rig).unwrap();
//!
//! let stats = check_tree(&parsed.skeleton).unwrap();
//! assert_eq!(stats.links, 1);
//!
//! let hash = skeleton_hash(&parsed.skeleton).unwrap();
//! println!("Skeleton hash: {}", hash);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types
//! - [`skeleton`]: Arena-backed joint graph and builder
//! - [`parser`]: Rig text parsing, base-naming and the axis remap
//! - [`validation`]: Tree invariant checks
//! - [`canonical`]: Name-keyed serializable skeleton
//! - [`writer`]: Rig text output
//! - [`hash`]: Canonical hashing

pub mod canonical;
pub mod error;
pub mod hash;
pub mod parser;
pub mod skeleton;
pub mod validation;
pub mod writer;

// Re-export commonly used types at the crate root
pub use canonical::{CanonicalJoint, CanonicalSkeleton, CanonicalWeight};
pub use error::{ErrorKind, RigError, RigResult, RigWarning, WarningCode};
pub use hash::{canonical_skeleton_hash, skeleton_hash};
pub use parser::{base_name, parse_rig, parse_rig_file, parse_rig_with, ParseOptions, ParsedRig};
pub use skeleton::{Joint, JointId, Skeleton, SkeletonBuilder, SkinTable, SkinWeight};
pub use validation::{check_tree, TreeStats};
pub use writer::to_rig_text;
