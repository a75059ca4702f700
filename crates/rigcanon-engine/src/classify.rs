//! Extremity classification.
//!
//! Picks the five functional leaves of a humanoid rig from coordinate
//! extrema. +X is the character's left and +Z is up.

use rigcanon_rig::{JointId, RigError, RigResult, Skeleton};

use crate::names;
use crate::stage::sorted_by_key;

/// The five classified leaf joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtremityMap {
    pub left_lower_arm: JointId,
    pub right_lower_arm: JointId,
    pub left_lower_leg: JointId,
    pub right_lower_leg: JointId,
    pub head: JointId,
}

impl ExtremityMap {
    /// Canonical name and joint for every slot.
    pub fn roles(&self) -> [(&'static str, JointId); 5] {
        [
            (names::LEFT_LOWER_ARM, self.left_lower_arm),
            (names::RIGHT_LOWER_ARM, self.right_lower_arm),
            (names::LEFT_LOWER_LEG, self.left_lower_leg),
            (names::RIGHT_LOWER_LEG, self.right_lower_leg),
            (names::HEAD, self.head),
        ]
    }
}

/// Classifies the leaves of `skeleton`.
///
/// - LeftLowerArm: leaf with maximum x; RightLowerArm: minimum x
/// - legs: the two lowest leaves, the one with smaller x is RightLowerLeg
/// - Head: leaf with maximum z
///
/// Equal coordinates are ordered by joint name. Fails with
/// [`RigError::AmbiguousTopology`] if there are fewer than two leaves or the
/// selections do not land on five distinct joints.
pub fn classify_extremities(skeleton: &Skeleton) -> RigResult<ExtremityMap> {
    let leaves = skeleton.leaves();
    if leaves.len() < 2 {
        return Err(RigError::ambiguous(format!(
            "found {} leaf joint(s), need at least 2 to resolve the legs",
            leaves.len()
        )));
    }

    let lowest = sorted_by_key(skeleton, &leaves, |p| p.z);
    let legs = sorted_by_key(skeleton, &lowest[..2], |p| p.x);

    let map = ExtremityMap {
        left_lower_arm: sorted_by_key(skeleton, &leaves, |p| -p.x)[0],
        right_lower_arm: sorted_by_key(skeleton, &leaves, |p| p.x)[0],
        left_lower_leg: legs[1],
        right_lower_leg: legs[0],
        head: sorted_by_key(skeleton, &leaves, |p| -p.z)[0],
    };

    let roles = map.roles();
    for (i, (role, id)) in roles.iter().enumerate() {
        if let Some((other, _)) = roles[i + 1..].iter().find(|(_, other)| other == id) {
            return Err(RigError::ambiguous(format!(
                "leaf '{}' is both {} and {}",
                skeleton.name(*id),
                role,
                other
            )));
        }
    }

    tracing::debug!(
        leaves = leaves.len(),
        left_arm = skeleton.name(map.left_lower_arm),
        right_arm = skeleton.name(map.right_lower_arm),
        left_leg = skeleton.name(map.left_lower_leg),
        right_leg = skeleton.name(map.right_lower_leg),
        head = skeleton.name(map.head),
        "classified extremities"
    );
    Ok(map)
}
