//! Pelvis and chest detection, re-rooting, and Hips/Spine/Chest insertion.

use glam::DVec3;
use rigcanon_rig::{JointId, RigError, RigResult, Skeleton};

use crate::names;
use crate::reroot::reroot;
use crate::stage::sorted_by_key;

/// The two tri-furcating joints the spine is built between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpineAnchors {
    /// Lower candidate; becomes the root.
    pub pelvis: JointId,
    /// Upper candidate; hangs below the synthesized Chest.
    pub chest_root: JointId,
}

/// Joints with exactly three children, closest to the origin first.
///
/// Equal distances are ordered by joint name.
pub fn trifurcations(skeleton: &Skeleton) -> Vec<JointId> {
    let candidates: Vec<JointId> = skeleton
        .ids()
        .filter(|id| skeleton.children(*id).len() == 3)
        .collect();
    sorted_by_key(skeleton, &candidates, |p| p.length())
}

/// Picks pelvis and chest-root.
///
/// The two tri-furcations closest to the origin are selected by distance;
/// which of them is the pelvis is decided by height alone. On equal height
/// the farther one is the pelvis.
pub fn find_spine_anchors(skeleton: &Skeleton) -> RigResult<SpineAnchors> {
    let candidates = trifurcations(skeleton);
    if candidates.len() < 2 {
        return Err(RigError::ambiguous(format!(
            "found {} joint(s) with three children, need 2 to tell pelvis from chest",
            candidates.len()
        )));
    }

    let (near, far) = (candidates[0], candidates[1]);
    let anchors = if skeleton.position(far).z <= skeleton.position(near).z {
        SpineAnchors {
            pelvis: far,
            chest_root: near,
        }
    } else {
        SpineAnchors {
            pelvis: near,
            chest_root: far,
        }
    };
    tracing::debug!(
        candidates = candidates.len(),
        pelvis = skeleton.name(anchors.pelvis),
        chest_root = skeleton.name(anchors.chest_root),
        "found spine anchors"
    );
    Ok(anchors)
}

/// Midpoint of the two lowest children of `joint`.
fn lowest_children_midpoint(skeleton: &Skeleton, joint: JointId) -> Option<DVec3> {
    let lowest = sorted_by_key(skeleton, skeleton.children(joint), |p| p.z);
    match lowest.as_slice() {
        [a, b, ..] => Some(skeleton.position(*a).lerp(skeleton.position(*b), 0.5)),
        _ => None,
    }
}

/// Rebuilds the trunk of the skeleton.
///
/// 1. picks pelvis and chest-root ([`find_spine_anchors`])
/// 2. moves the pelvis to the midpoint of its two lowest children
/// 3. re-roots the hierarchy at the pelvis
/// 4. inserts Hips (1/3), Spine (2/3) and Chest (at chest-root) on the
///    pelvis→chest-root line, with Hips→Spine→Chest→chest-root as the only
///    path from the pelvis to chest-root
///
/// Joints that sat between pelvis and chest-root in the input stay attached
/// to the pelvis side as a stub branch.
pub fn reconstruct_spine(skeleton: &Skeleton) -> RigResult<(Skeleton, SpineAnchors)> {
    let anchors = find_spine_anchors(skeleton)?;
    let SpineAnchors { pelvis, chest_root } = anchors;

    let mut out = reroot(skeleton, pelvis)?;
    if let Some(center) = lowest_children_midpoint(skeleton, pelvis) {
        out.set_position(pelvis, center);
    }

    let bottom = out.position(pelvis);
    let top = out.position(chest_root);
    let hips = out.add_joint(names::HIPS, bottom.lerp(top, 1.0 / 3.0))?;
    let spine = out.add_joint(names::SPINE, bottom.lerp(top, 2.0 / 3.0))?;
    let chest = out.add_joint(names::CHEST, top)?;

    out.detach_from_parents(chest_root, None);
    out.add_child(pelvis, hips);
    out.add_child(hips, spine);
    out.add_child(spine, chest);
    out.add_child(chest, chest_root);

    Ok((out, anchors))
}
