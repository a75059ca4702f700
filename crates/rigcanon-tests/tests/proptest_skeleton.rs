//! Property-based skeleton tests for RigCanon using proptest.
//!
//! These tests check what canonicalization must not depend on: record
//! order, rig scale and placement, which joint a tree happens to be rooted
//! at, and `_dup_N` name suffixes on any record.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rigcanon-tests --test proptest_skeleton
//! ```

use std::collections::BTreeSet;

use proptest::prelude::*;

use rigcanon_engine::{canonicalize, classify_extremities, reroot};
use rigcanon_rig::parser::DUP_MARKER;
use rigcanon_rig::{base_name, check_tree, parse_rig, skeleton_hash, JointId, Skeleton};
use rigcanon_tests::fixtures::{join_records, HumanoidRig, CANONICAL_JOINT_COUNT, HUMANOID_JOINTS};

/// Links as (parent name, child name), ignoring direction.
fn undirected_links(skeleton: &Skeleton) -> BTreeSet<(String, String)> {
    skeleton
        .edges()
        .into_iter()
        .map(|(a, b)| {
            let (a, b) = (skeleton.name(a).to_string(), skeleton.name(b).to_string());
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        })
        .collect()
}

/// Links as (parent name, child name).
fn directed_links(skeleton: &Skeleton) -> BTreeSet<(String, String)> {
    skeleton
        .edges()
        .into_iter()
        .map(|(a, b)| (skeleton.name(a).to_string(), skeleton.name(b).to_string()))
        .collect()
}

// ============================================================================
// 1. Record Order
// ============================================================================

proptest! {
    /// Any ordering of the records produces the same canonical skeleton.
    #[test]
    fn record_order_does_not_change_hash(
        records in Just(HumanoidRig::new().with_duplicate_links().records()).prop_shuffle()
    ) {
        let reference = canonicalize(&HumanoidRig::new().text()).unwrap();
        let shuffled = canonicalize(&join_records(&records)).unwrap();
        prop_assert_eq!(&shuffled.report.skeleton_hash, &reference.report.skeleton_hash);
        prop_assert_eq!(&shuffled.report.renamed, &reference.report.renamed);
    }

    /// Leaf classification picks the same joints for any record order.
    #[test]
    fn classification_is_order_independent(
        records in Just(HumanoidRig::new().without_skin().records()).prop_shuffle()
    ) {
        let skeleton = parse_rig(&join_records(&records)).unwrap().skeleton;
        let map = classify_extremities(&skeleton).unwrap();
        let names: Vec<(&str, &str)> = map
            .roles()
            .iter()
            .map(|(role, id)| (*role, skeleton.name(*id)))
            .collect();
        prop_assert_eq!(
            names,
            vec![
                ("LeftLowerArm", "forearm_l"),
                ("RightLowerArm", "forearm_r"),
                ("LeftLowerLeg", "shin_l"),
                ("RightLowerLeg", "shin_r"),
                ("Head", "head"),
            ]
        );
    }
}

// ============================================================================
// 2. Scale and Placement
// ============================================================================

proptest! {
    /// Uniform scaling and translation keep every name assignment.
    #[test]
    fn scale_and_offset_keep_names(
        scale in 0.1f64..10.0,
        dx in -10.0f64..10.0,
        dy in -10.0f64..10.0,
        dz in -10.0f64..10.0,
    ) {
        let reference = canonicalize(&HumanoidRig::new().text()).unwrap();
        let moved = canonicalize(
            &HumanoidRig::new().scaled(scale).translated([dx, dy, dz]).text()
        ).unwrap();

        prop_assert_eq!(&moved.report.renamed, &reference.report.renamed);
        prop_assert_eq!(moved.report.joint_count, CANONICAL_JOINT_COUNT);
        prop_assert_eq!(&moved.report.chest_root, "chest");
        let names: Vec<&String> = moved.canonical.joints.keys().collect();
        let expected: Vec<&String> = reference.canonical.joints.keys().collect();
        prop_assert_eq!(names, expected);
    }
}

// ============================================================================
// 3. Re-rooting
// ============================================================================

proptest! {
    /// Re-rooting keeps the undirected tree, and re-rooting back restores it.
    #[test]
    fn reroot_round_trip(index in 0..HUMANOID_JOINTS.len()) {
        let skeleton = parse_rig(&HumanoidRig::new().text()).unwrap().skeleton;
        let original_root = skeleton.root();
        let new_root = JointId::from_index(index);

        let rerooted = reroot(&skeleton, new_root).unwrap();
        prop_assert_eq!(rerooted.root(), new_root);
        prop_assert!(check_tree(&rerooted).is_ok());
        prop_assert_eq!(undirected_links(&rerooted), undirected_links(&skeleton));

        let restored = reroot(&rerooted, original_root).unwrap();
        prop_assert_eq!(directed_links(&restored), directed_links(&skeleton));
        prop_assert_eq!(skeleton_hash(&restored).unwrap(), skeleton_hash(&skeleton).unwrap());
    }
}

// ============================================================================
// 4. Base Names
// ============================================================================

proptest! {
    /// Stripping the duplicate suffix is idempotent.
    #[test]
    fn base_name_is_idempotent(name in "[a-z][a-z0-9_]{0,24}") {
        let once = base_name(&name);
        prop_assert_eq!(base_name(once), once);
    }

    /// A `_dup_N` suffix always strips back to the original name.
    #[test]
    fn dup_suffix_strips_to_base(name in "[a-z][a-z0-9_]{0,16}", n in 0u32..1000) {
        prop_assume!(!name.contains(DUP_MARKER));
        let suffixed = format!("{}{}{}", name, DUP_MARKER, n);
        prop_assert_eq!(base_name(&suffixed), name.as_str());
    }

    /// A rig whose every name carries its own `_dup_N` suffix parses to the
    /// same skeleton as the plain rig.
    #[test]
    fn suffixed_names_match_plain_rig(first in 0u32..100_000) {
        let plain = parse_rig(&HumanoidRig::new().text()).unwrap().skeleton;
        let suffixed = parse_rig(&HumanoidRig::new().with_suffixed_names(first).text())
            .unwrap()
            .skeleton;
        prop_assert_eq!(skeleton_hash(&suffixed).unwrap(), skeleton_hash(&plain).unwrap());

        let reference = canonicalize(&HumanoidRig::new().text()).unwrap();
        let canonical = canonicalize(&HumanoidRig::new().with_suffixed_names(first).text()).unwrap();
        prop_assert_eq!(&canonical.report.skeleton_hash, &reference.report.skeleton_hash);
        prop_assert_eq!(&canonical.report.renamed, &reference.report.renamed);
    }
}
