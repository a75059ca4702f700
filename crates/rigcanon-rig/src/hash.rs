//! Canonical hashing of skeletons.
//!
//! A skeleton hash is computed as:
//!
//! ```text
//! skeleton_hash = hex(BLAKE3(compact_json(canonical_skeleton)))
//! ```
//!
//! [`CanonicalSkeleton`] holds only structs, vectors and `BTreeMap`s, so its
//! compact serde output already has a fixed key order. Two runs over the same
//! rig text must produce the same hash.

use crate::canonical::CanonicalSkeleton;
use crate::skeleton::Skeleton;

/// Computes the canonical BLAKE3 hash of a skeleton.
///
/// # Example
/// ```
/// use rigcanon_rig::hash::skeleton_hash;
/// use rigcanon_rig::parser::parse_rig;
///
/// let skeleton = parse_rig("joints a 0 0 0\nroot a\n").unwrap().skeleton;
/// assert_eq!(skeleton_hash(&skeleton).unwrap().len(), 64);
/// ```
pub fn skeleton_hash(skeleton: &Skeleton) -> serde_json::Result<String> {
    canonical_skeleton_hash(&CanonicalSkeleton::from(skeleton))
}

/// Computes the canonical BLAKE3 hash of an already converted skeleton.
pub fn canonical_skeleton_hash(skeleton: &CanonicalSkeleton) -> serde_json::Result<String> {
    let mut hasher = blake3::Hasher::new();
    serde_json::to_writer(&mut hasher, skeleton)?;
    Ok(hasher.finalize().to_hex().to_string())
}
