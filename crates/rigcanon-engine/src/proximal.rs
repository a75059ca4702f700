//! Upper-joint lookup for classified leaves.

use rigcanon_rig::{JointId, RigWarning, Skeleton, WarningCode};

use crate::classify::ExtremityMap;
use crate::names;

/// Direct parents of the classified leaves. A slot is `None` when its leaf
/// has no parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProximalMap {
    pub left_upper_arm: Option<JointId>,
    pub right_upper_arm: Option<JointId>,
    pub left_upper_leg: Option<JointId>,
    pub right_upper_leg: Option<JointId>,
    pub neck: Option<JointId>,
}

impl ProximalMap {
    /// Canonical name and joint for every slot.
    pub fn roles(&self) -> [(&'static str, Option<JointId>); 5] {
        [
            (names::LEFT_UPPER_ARM, self.left_upper_arm),
            (names::RIGHT_UPPER_ARM, self.right_upper_arm),
            (names::LEFT_UPPER_LEG, self.left_upper_leg),
            (names::RIGHT_UPPER_LEG, self.right_upper_leg),
            (names::NECK, self.neck),
        ]
    }
}

/// Finds the parent of every classified leaf.
///
/// A leaf without a parent leaves its slot empty and raises a
/// `MissingProximalJoint` warning.
pub fn map_proximal(skeleton: &Skeleton, extremities: &ExtremityMap) -> (ProximalMap, Vec<RigWarning>) {
    let parents = skeleton.parents();
    let mut warnings = Vec::new();
    let mut lookup = |upper: &str, lower: &str, leaf: JointId| {
        let parent = parents[leaf.index()];
        if parent.is_none() {
            warnings.push(RigWarning::for_joint(
                WarningCode::MissingProximalJoint,
                upper,
                format!("{} '{}' has no parent", lower, skeleton.name(leaf)),
            ));
        }
        parent
    };

    let map = ProximalMap {
        left_upper_arm: lookup(names::LEFT_UPPER_ARM, names::LEFT_LOWER_ARM, extremities.left_lower_arm),
        right_upper_arm: lookup(names::RIGHT_UPPER_ARM, names::RIGHT_LOWER_ARM, extremities.right_lower_arm),
        left_upper_leg: lookup(names::LEFT_UPPER_LEG, names::LEFT_LOWER_LEG, extremities.left_lower_leg),
        right_upper_leg: lookup(names::RIGHT_UPPER_LEG, names::RIGHT_LOWER_LEG, extremities.right_lower_leg),
        neck: lookup(names::NECK, names::HEAD, extremities.head),
    };
    (map, warnings)
}
