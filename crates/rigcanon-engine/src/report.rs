//! Canonicalization report types.

use std::collections::BTreeMap;

use rigcanon_rig::RigWarning;
use serde::{Deserialize, Serialize};

/// Timing information for a single canonicalization stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    /// Name of the stage (e.g., "parse", "classify", "spine").
    pub stage: String,
    /// Duration of this stage in microseconds.
    pub duration_us: u64,
}

impl StageTiming {
    /// Creates a new stage timing entry.
    ///
    /// # Example
    /// ```
    /// use rigcanon_engine::report::StageTiming;
    ///
    /// let timing = StageTiming::new("spine", 42);
    /// assert_eq!(timing.stage, "spine");
    /// assert_eq!(timing.duration_us, 42);
    /// ```
    pub fn new(stage: impl Into<String>, duration_us: u64) -> Self {
        Self {
            stage: stage.into(),
            duration_us,
        }
    }
}

/// Everything a caller needs to know about a successful run besides the
/// skeleton itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalizationReport {
    /// Name of the root joint (the pelvis).
    pub root: String,
    /// Number of joints in the output.
    pub joint_count: usize,
    /// Number of parent→child links in the output.
    pub link_count: usize,
    /// Minimum z over all joints before any ground alignment.
    pub ground_offset: f64,
    /// Whether the output was translated by `-ground_offset`.
    pub aligned_to_ground: bool,
    /// BLAKE3 hash of the canonical JSON form of the output.
    pub skeleton_hash: String,
    /// Canonical name → joint name in the input rig.
    pub renamed: BTreeMap<String, String>,
    /// Name of the joint picked as chest-root.
    pub chest_root: String,
    /// Whether chest-root was folded into Chest.
    pub merged_chest_root: bool,
    /// Skin weights dropped at parse time for being at or below the epsilon.
    pub dropped_weights: usize,
    /// `hier` records dropped as self-loops or duplicates.
    pub dropped_edges: usize,
    /// Non-fatal conditions, in the order they were raised.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RigWarning>,
    /// Per-stage timings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timings: Vec<StageTiming>,
}

impl CanonicalizationReport {
    /// Returns true if any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Sum of all stage durations in microseconds.
    pub fn total_duration_us(&self) -> u64 {
        self.timings.iter().map(|t| t.duration_us).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigcanon_rig::WarningCode;

    fn report() -> CanonicalizationReport {
        CanonicalizationReport {
            root: "joint_0".to_string(),
            joint_count: 30,
            link_count: 29,
            ground_offset: -0.9,
            aligned_to_ground: false,
            skeleton_hash: "ab".repeat(32),
            renamed: BTreeMap::from([("Head".to_string(), "joint_12".to_string())]),
            chest_root: "joint_5".to_string(),
            merged_chest_root: false,
            dropped_weights: 0,
            dropped_edges: 0,
            warnings: Vec::new(),
            timings: vec![StageTiming::new("parse", 30), StageTiming::new("spine", 12)],
        }
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(report().total_duration_us(), 42);
    }

    #[test]
    fn test_serialize_skips_empty_warnings() {
        let json = serde_json::to_string(&report()).unwrap();
        assert!(!json.contains("warnings"));
        assert!(json.contains("\"duration_us\":30"));
        assert!(json.contains("\"Head\":\"joint_12\""));
    }

    #[test]
    fn test_warnings_roundtrip() {
        let mut report = report();
        report.warnings.push(RigWarning::for_joint(
            WarningCode::MissingLimb,
            "LeftHand",
            "LeftLowerArm has no parent",
        ));
        assert!(report.has_warnings());

        let json = serde_json::to_string(&report).unwrap();
        let parsed: CanonicalizationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
