//! Shoulder insertion between Chest and the upper arms.

use rigcanon_rig::{RigResult, RigWarning, Skeleton, WarningCode};

use crate::names::{self, SHOULDERS};
use crate::stage::StageOutput;

/// Splits Chest→UpperArm on both sides with a Shoulder joint at the midpoint.
///
/// Shoulder takes UpperArm's place in Chest's children (or is appended when
/// UpperArm hangs elsewhere) and UpperArm becomes Shoulder's only child,
/// leaving every other parent. A side whose Chest or UpperArm is missing is
/// skipped with a `MissingShoulderAnchor` warning.
pub fn insert_shoulders(skeleton: &Skeleton) -> RigResult<StageOutput> {
    let mut out = StageOutput::new(skeleton.clone());

    let Some(chest) = skeleton.id(names::CHEST) else {
        for (shoulder, _) in SHOULDERS {
            out.warn(RigWarning::for_joint(
                WarningCode::MissingShoulderAnchor,
                shoulder,
                "no Chest joint to attach to",
            ));
        }
        return Ok(out);
    };

    for (shoulder_name, upper_name) in SHOULDERS {
        let Some(upper) = skeleton.id(upper_name) else {
            out.warn(RigWarning::for_joint(
                WarningCode::MissingShoulderAnchor,
                shoulder_name,
                format!("no {} joint", upper_name),
            ));
            continue;
        };

        let s = &mut out.skeleton;
        let position = s.position(chest).lerp(s.position(upper), 0.5);
        let shoulder = s.add_joint(shoulder_name, position)?;

        let mut chest_children = s.children(chest).to_vec();
        match chest_children.iter_mut().find(|c| **c == upper) {
            Some(slot) => *slot = shoulder,
            None => chest_children.push(shoulder),
        }
        s.set_children(chest, chest_children);
        s.detach_from_parents(upper, None);
        s.add_child(shoulder, upper);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use pretty_assertions::assert_eq;
    use rigcanon_rig::check_tree;

    fn chest_with_arms(arms_under_chest: bool) -> Skeleton {
        let mut b = Skeleton::builder();
        let root = b.joint("root", DVec3::ZERO);
        let chest = b.joint("Chest", DVec3::new(0.0, 0.0, 10.0));
        let holder = b.joint("holder", DVec3::new(0.0, 0.0, 10.0));
        let left = b.joint("LeftUpperArm", DVec3::new(2.0, 0.0, 10.0));
        let right = b.joint("RightUpperArm", DVec3::new(-2.0, 0.0, 12.0));
        let neck = b.joint("Neck", DVec3::new(0.0, 0.0, 11.0));
        b.edge(root, chest);
        let parent = if arms_under_chest { chest } else { holder };
        b.edge(chest, holder);
        b.edge(parent, left);
        b.edge(chest, neck);
        b.edge(parent, right);
        b.build(root)
    }

    #[test]
    fn test_left_shoulder_midpoint() {
        let out = insert_shoulders(&chest_with_arms(true)).unwrap();
        let s = &out.skeleton;
        assert!(out.warnings.is_empty());
        check_tree(s).unwrap();

        let chest = s.id("Chest").unwrap();
        let left = s.id("LeftShoulder").unwrap();
        let right = s.id("RightShoulder").unwrap();
        assert_eq!(s.position(left), DVec3::new(1.0, 0.0, 10.0));
        assert_eq!(s.position(right), DVec3::new(-1.0, 0.0, 11.0));

        let names: Vec<&str> = s.children(chest).iter().map(|c| s.name(*c)).collect();
        assert_eq!(names, vec!["holder", "LeftShoulder", "Neck", "RightShoulder"]);
        assert_eq!(s.children(left), &[s.id("LeftUpperArm").unwrap()]);
    }

    #[test]
    fn test_upper_arm_elsewhere() {
        let out = insert_shoulders(&chest_with_arms(false)).unwrap();
        let s = &out.skeleton;
        check_tree(s).unwrap();

        let chest = s.id("Chest").unwrap();
        let holder = s.id("holder").unwrap();
        assert!(s.children(holder).is_empty());
        let names: Vec<&str> = s.children(chest).iter().map(|c| s.name(*c)).collect();
        assert_eq!(names, vec!["holder", "Neck", "LeftShoulder", "RightShoulder"]);
        assert_eq!(
            s.parent_of(s.id("RightUpperArm").unwrap()),
            s.id("RightShoulder")
        );
    }

    #[test]
    fn test_missing_anchors_warn() {
        let mut b = Skeleton::builder();
        let root = b.joint("Chest", DVec3::ZERO);
        let arm = b.joint("RightUpperArm", DVec3::X);
        b.edge(root, arm);
        let out = insert_shoulders(&b.build(root)).unwrap();

        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].joint.as_deref(), Some("LeftShoulder"));
        assert!(out.skeleton.id("RightShoulder").is_some());

        let mut b = Skeleton::builder();
        let root = b.joint("root", DVec3::ZERO);
        let out = insert_shoulders(&b.build(root)).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert_eq!(out.skeleton.len(), 1);
    }
}
