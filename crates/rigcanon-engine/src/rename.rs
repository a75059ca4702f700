//! Canonical relabelling of classified joints.

use std::collections::HashMap;

use rigcanon_rig::{JointId, RigError, RigResult, Skeleton};

use crate::classify::ExtremityMap;
use crate::proximal::ProximalMap;

/// Builds the joint → canonical name table from the lower and upper maps.
///
/// Fails with [`RigError::AmbiguousTopology`] if one joint would receive two
/// canonical names, which happens when a classified leaf is also the parent
/// of another classified leaf's slot.
pub fn rename_table(
    skeleton: &Skeleton,
    extremities: &ExtremityMap,
    proximal: &ProximalMap,
) -> RigResult<Vec<(JointId, &'static str)>> {
    let entries = extremities.roles().into_iter().chain(
        proximal
            .roles()
            .into_iter()
            .filter_map(|(name, id)| id.map(|id| (name, id))),
    );

    let mut table: Vec<(JointId, &'static str)> = Vec::with_capacity(10);
    for (name, id) in entries {
        if let Some((_, previous)) = table.iter().find(|(existing, _)| *existing == id) {
            return Err(RigError::ambiguous(format!(
                "joint '{}' would be named both {} and {}",
                skeleton.name(id),
                previous,
                name
            )));
        }
        table.push((id, name));
    }
    Ok(table)
}

/// Returns a copy of `skeleton` with the joints in `table` relabelled.
///
/// Handles, edges and skin weights are untouched; only names change. Fails
/// with [`RigError::NameCollision`] if a canonical name is already carried
/// by a joint that is not being renamed.
pub fn apply_renames(skeleton: &Skeleton, table: &[(JointId, &str)]) -> RigResult<Skeleton> {
    let renames: HashMap<JointId, &str> = table.iter().copied().collect();
    for (id, name) in table {
        if let Some(holder) = skeleton.id(name) {
            if !renames.contains_key(&holder) {
                return Err(RigError::NameCollision {
                    name: name.to_string(),
                });
            }
        }
        tracing::trace!(from = skeleton.name(*id), to = *name, "rename");
    }

    let mut builder = Skeleton::builder();
    for id in skeleton.ids() {
        let name = renames.get(&id).copied().unwrap_or(skeleton.name(id));
        let position = skeleton.position(id);
        if builder.joint(name, position) != id {
            return Err(RigError::NameCollision {
                name: name.to_string(),
            });
        }
    }
    for (parent, child) in skeleton.edges() {
        builder.edge(parent, child);
    }
    for (vertex, weights) in skeleton.skin_weights() {
        for w in weights {
            builder.skin(*vertex, w.joint, w.weight);
        }
    }
    Ok(builder.build(skeleton.root()))
}

/// Classified joints get their canonical names.
pub fn canonical_rename(
    skeleton: &Skeleton,
    extremities: &ExtremityMap,
    proximal: &ProximalMap,
) -> RigResult<Skeleton> {
    let table = rename_table(skeleton, extremities, proximal)?;
    apply_renames(skeleton, &table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use pretty_assertions::assert_eq;
    use rigcanon_rig::{CanonicalSkeleton, ErrorKind};

    fn limb_rig() -> (Skeleton, ExtremityMap, ProximalMap) {
        let mut b = Skeleton::builder();
        let root = b.joint("j0", DVec3::ZERO);
        let mut uppers = Vec::new();
        let mut leaves = Vec::new();
        for i in 0..5 {
            let upper = b.joint(&format!("u{}", i), DVec3::new(i as f64, 0.0, 1.0));
            let leaf = b.joint(&format!("l{}", i), DVec3::new(i as f64, 0.0, 2.0));
            b.edge(root, upper);
            b.edge(upper, leaf);
            b.skin(i, leaf, 1.0);
            uppers.push(upper);
            leaves.push(leaf);
        }
        let extremities = ExtremityMap {
            left_lower_arm: leaves[0],
            right_lower_arm: leaves[1],
            left_lower_leg: leaves[2],
            right_lower_leg: leaves[3],
            head: leaves[4],
        };
        let proximal = ProximalMap {
            left_upper_arm: Some(uppers[0]),
            right_upper_arm: Some(uppers[1]),
            left_upper_leg: Some(uppers[2]),
            right_upper_leg: Some(uppers[3]),
            neck: None,
        };
        (b.build(root), extremities, proximal)
    }

    #[test]
    fn test_rename_preserves_structure() {
        let (s, extremities, proximal) = limb_rig();
        let renamed = canonical_rename(&s, &extremities, &proximal).unwrap();

        assert_eq!(renamed.edges(), s.edges());
        assert_eq!(renamed.len(), s.len());
        assert_eq!(renamed.name(extremities.head), "Head");
        assert_eq!(renamed.name(proximal.left_upper_arm.unwrap()), "LeftUpperArm");
        // slot without a joint leaves the original name alone
        assert_eq!(renamed.id("u4"), Some(JointId::from_index(9)));
        assert_eq!(renamed.id("l0"), None);

        let canonical = CanonicalSkeleton::from(&renamed);
        assert_eq!(canonical.joints["LeftUpperArm"].children, vec!["LeftLowerArm"]);
        assert_eq!(canonical.skin_weights[&4][0].joint, "Head");
    }

    #[test]
    fn test_joint_with_two_roles() {
        let (s, mut extremities, proximal) = limb_rig();
        extremities.head = proximal.left_upper_arm.unwrap();
        let err = canonical_rename(&s, &extremities, &proximal).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousTopology);
        assert!(err.to_string().contains("'u0'"));
    }

    #[test]
    fn test_name_taken_by_unmapped_joint() {
        let (s, extremities, proximal) = limb_rig();
        let s = apply_renames(&s, &[(s.id("u4").unwrap(), "Head")]).unwrap();
        let err = canonical_rename(&s, &extremities, &proximal).unwrap_err();
        assert!(matches!(err, RigError::NameCollision { ref name } if name == "Head"));
    }

    #[test]
    fn test_swap_names() {
        let (s, _, _) = limb_rig();
        let a = s.id("u0").unwrap();
        let b = s.id("u1").unwrap();
        let swapped = apply_renames(&s, &[(a, "u1"), (b, "u0")]).unwrap();
        assert_eq!(swapped.id("u1"), Some(a));
        assert_eq!(swapped.id("u0"), Some(b));
    }
}
