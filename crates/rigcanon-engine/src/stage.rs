//! Shared plumbing for transformation stages.

use std::cmp::Ordering;

use rigcanon_rig::{JointId, RigWarning, Skeleton};

/// A stage's new skeleton plus the warnings it raised.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub skeleton: Skeleton,
    pub warnings: Vec<RigWarning>,
}

impl StageOutput {
    /// Wraps a skeleton with no warnings.
    pub fn new(skeleton: Skeleton) -> Self {
        Self {
            skeleton,
            warnings: Vec::new(),
        }
    }

    /// Records a warning.
    pub fn warn(&mut self, warning: RigWarning) {
        self.warnings.push(warning);
    }
}

/// Sorts joints by `key(position)` ascending, breaking ties by name.
pub(crate) fn sorted_by_key(
    skeleton: &Skeleton,
    joints: &[JointId],
    key: impl Fn(glam::DVec3) -> f64,
) -> Vec<JointId> {
    let mut sorted = joints.to_vec();
    sorted.sort_by(|a, b| {
        let ka = key(skeleton.position(*a));
        let kb = key(skeleton.position(*b));
        ka.partial_cmp(&kb)
            .unwrap_or(Ordering::Equal)
            .then_with(|| skeleton.name(*a).cmp(skeleton.name(*b)))
    });
    sorted
}
