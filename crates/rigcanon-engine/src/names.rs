//! Canonical joint names.

pub const HIPS: &str = "Hips";
pub const SPINE: &str = "Spine";
pub const CHEST: &str = "Chest";
pub const NECK: &str = "Neck";
pub const HEAD: &str = "Head";

pub const LEFT_SHOULDER: &str = "LeftShoulder";
pub const LEFT_UPPER_ARM: &str = "LeftUpperArm";
pub const LEFT_LOWER_ARM: &str = "LeftLowerArm";
pub const LEFT_HAND: &str = "LeftHand";
pub const RIGHT_SHOULDER: &str = "RightShoulder";
pub const RIGHT_UPPER_ARM: &str = "RightUpperArm";
pub const RIGHT_LOWER_ARM: &str = "RightLowerArm";
pub const RIGHT_HAND: &str = "RightHand";

pub const LEFT_UPPER_LEG: &str = "LeftUpperLeg";
pub const LEFT_LOWER_LEG: &str = "LeftLowerLeg";
pub const LEFT_FOOT: &str = "LeftFoot";
pub const RIGHT_UPPER_LEG: &str = "RightUpperLeg";
pub const RIGHT_LOWER_LEG: &str = "RightLowerLeg";
pub const RIGHT_FOOT: &str = "RightFoot";

/// (extremity, lower limb) pairs for hand and foot synthesis.
pub const LIMB_EXTREMITIES: [(&str, &str); 4] = [
    (LEFT_HAND, LEFT_LOWER_ARM),
    (RIGHT_HAND, RIGHT_LOWER_ARM),
    (LEFT_FOOT, LEFT_LOWER_LEG),
    (RIGHT_FOOT, RIGHT_LOWER_LEG),
];

/// (shoulder, upper arm) pairs, left side first.
pub const SHOULDERS: [(&str, &str); 2] = [
    (LEFT_SHOULDER, LEFT_UPPER_ARM),
    (RIGHT_SHOULDER, RIGHT_UPPER_ARM),
];
