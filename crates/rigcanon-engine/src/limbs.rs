//! Hand and foot synthesis.

use rigcanon_rig::{RigResult, RigWarning, Skeleton, WarningCode};

use crate::names::LIMB_EXTREMITIES;
use crate::stage::StageOutput;

/// Appends LeftHand, RightHand, LeftFoot and RightFoot beyond their lower
/// limb joints.
///
/// Each extremity sits one full segment past the lower limb, continuing the
/// parent→lower direction: `lower + (lower - parent)`. A lower limb that is
/// missing or has no parent is skipped with a `MissingLimb` warning.
pub fn synthesize_extremities(skeleton: &Skeleton) -> RigResult<StageOutput> {
    let mut out = StageOutput::new(skeleton.clone());

    for (extremity, lower_name) in LIMB_EXTREMITIES {
        let Some(lower) = skeleton.id(lower_name) else {
            out.warn(RigWarning::for_joint(
                WarningCode::MissingLimb,
                extremity,
                format!("no {} joint to extend", lower_name),
            ));
            continue;
        };
        let Some(parent) = skeleton.parent_of(lower) else {
            out.warn(RigWarning::for_joint(
                WarningCode::MissingLimb,
                extremity,
                format!("{} has no parent, segment direction unknown", lower_name),
            ));
            continue;
        };

        let end = skeleton.position(lower);
        let position = end + (end - skeleton.position(parent));
        let id = out.skeleton.add_joint(extremity, position)?;
        out.skeleton.add_child(lower, id);
    }

    Ok(out)
}
