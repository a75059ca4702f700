//! Optional finishing passes: chest consolidation and ground alignment.

use glam::DVec3;
use rigcanon_rig::{JointId, RigError, RigResult, Skeleton, SkinWeight};

use crate::names;

/// Folds `chest_root` into Chest.
///
/// Chest-root's children take its place in Chest's child list, its skin
/// weights move to Chest (added to Chest's own weight on the same vertex),
/// and the joint is removed.
pub fn merge_chest_root(skeleton: &Skeleton, chest_root: JointId) -> RigResult<Skeleton> {
    let chest = skeleton
        .id(names::CHEST)
        .ok_or_else(|| RigError::malformed("no Chest joint to merge into"))?;
    if chest_root == chest || chest_root == skeleton.root() {
        return Err(RigError::malformed(format!(
            "'{}' cannot be merged into Chest",
            skeleton.name(chest_root)
        )));
    }

    let mut out = skeleton.clone();
    let mut chest_children = Vec::with_capacity(skeleton.children(chest).len() + 2);
    for child in skeleton.children(chest) {
        if *child == chest_root {
            chest_children.extend_from_slice(skeleton.children(chest_root));
        } else {
            chest_children.push(*child);
        }
    }
    let moved = skeleton.children(chest_root).to_vec();
    for child in &moved {
        if !chest_children.contains(child) {
            chest_children.push(*child);
        }
    }
    out.set_children(chest_root, Vec::new());
    out.set_children(chest, chest_children);

    let mut transferred = 0usize;
    for weights in out.skin_weights_mut().values_mut() {
        let Some(at) = weights.iter().position(|w| w.joint == chest_root) else {
            continue;
        };
        let weight = weights.remove(at).weight;
        match weights.iter_mut().find(|w| w.joint == chest) {
            Some(existing) => existing.weight += weight,
            None => weights.push(SkinWeight {
                joint: chest,
                weight,
            }),
        }
        transferred += 1;
    }

    let name = skeleton.name(chest_root).to_string();
    out.remove_joint(chest_root)?;
    tracing::debug!(
        joint = name.as_str(),
        children = moved.len(),
        weights = transferred,
        "merged chest-root into Chest"
    );
    Ok(out)
}

/// Height of the lowest joint, the amount a scene host lifts the armature
/// by so it stands on the ground plane.
pub fn ground_offset(skeleton: &Skeleton) -> f64 {
    skeleton.min_z()
}

/// Returns a copy of `skeleton` translated so its lowest joint is at z = 0.
pub fn align_to_ground(skeleton: &Skeleton) -> Skeleton {
    let mut out = skeleton.clone();
    out.translate(DVec3::new(0.0, 0.0, -ground_offset(skeleton)));
    out
}
