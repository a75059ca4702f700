//! Rig text fixtures.
//!
//! [`HumanoidRig`] renders a small Y-up humanoid the way an auto-rigger emits
//! it: joints named by the model, a pelvis and a chest that each fan out
//! into three children, and a few skin records. Variants transform the same
//! rig so tests can check what the engine must not care about.

use std::path::{Path, PathBuf};

/// Joint names and Y-up positions.
pub const HUMANOID_JOINTS: [(&str, [f64; 3]); 13] = [
    ("pelvis", [0.0, 1.0, 0.02]),
    ("thigh_l", [0.1, 0.9, 0.0]),
    ("shin_l", [0.12, 0.5, 0.0]),
    ("thigh_r", [-0.1, 0.9, 0.0]),
    ("shin_r", [-0.12, 0.5, 0.0]),
    ("spine_1", [0.0, 1.2, 0.0]),
    ("chest", [0.0, 1.4, 0.0]),
    ("neck", [0.0, 1.6, 0.0]),
    ("head", [0.0, 1.8, 0.0]),
    ("upperarm_l", [0.2, 1.45, 0.0]),
    ("forearm_l", [0.45, 1.45, 0.0]),
    ("upperarm_r", [-0.2, 1.45, 0.0]),
    ("forearm_r", [-0.45, 1.45, 0.0]),
];

/// Parent → child links.
pub const HUMANOID_LINKS: [(&str, &str); 12] = [
    ("pelvis", "thigh_l"),
    ("thigh_l", "shin_l"),
    ("pelvis", "thigh_r"),
    ("thigh_r", "shin_r"),
    ("pelvis", "spine_1"),
    ("spine_1", "chest"),
    ("chest", "neck"),
    ("neck", "head"),
    ("chest", "upperarm_l"),
    ("upperarm_l", "forearm_l"),
    ("chest", "upperarm_r"),
    ("upperarm_r", "forearm_r"),
];

/// Skin records; the last neck weight is below the default epsilon.
pub const HUMANOID_SKIN: [&str; 3] = [
    "skin 0 forearm_l 0.8 upperarm_l 0.2",
    "skin 1 chest 0.5 spine_1 0.5",
    "skin 2 head 1.0 neck 0.0001",
];

/// Number of joints the default pipeline produces for the humanoid.
pub const CANONICAL_JOINT_COUNT: usize = 22;

/// A configurable humanoid rig.
///
/// # Example
///
/// ```
/// use rigcanon_tests::fixtures::HumanoidRig;
///
/// let text = HumanoidRig::new().scaled(2.0).mirrored().text();
/// assert!(text.contains("joints forearm_l -0.9 2.9 0"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HumanoidRig {
    scale: f64,
    offset: [f64; 3],
    mirrored: bool,
    duplicate_links: bool,
    suffix_from: Option<u32>,
    skin: bool,
}

impl Default for HumanoidRig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: [0.0; 3],
            mirrored: false,
            duplicate_links: false,
            suffix_from: None,
            skin: true,
        }
    }
}

impl HumanoidRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplies every coordinate by `scale`.
    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Adds `offset` to every position, after scaling.
    pub fn translated(mut self, offset: [f64; 3]) -> Self {
        self.offset = offset;
        self
    }

    /// Negates x so the character's left and right swap.
    pub fn mirrored(mut self) -> Self {
        self.mirrored = true;
        self
    }

    /// Repeats every link with `_dup_N` suffixed names, as the rigging model
    /// does for joints it split and merged back.
    pub fn with_duplicate_links(mut self) -> Self {
        self.duplicate_links = true;
        self
    }

    /// Writes every joint name in every record with its own `_dup_N`
    /// suffix, counting up from `first`.
    pub fn with_suffixed_names(mut self, first: u32) -> Self {
        self.suffix_from = Some(first);
        self
    }

    /// Leaves out the skin records.
    pub fn without_skin(mut self) -> Self {
        self.skin = false;
        self
    }

    fn position(&self, p: [f64; 3]) -> [f64; 3] {
        let x = if self.mirrored { -p[0] } else { p[0] };
        [
            x * self.scale + self.offset[0],
            p[1] * self.scale + self.offset[1],
            p[2] * self.scale + self.offset[2],
        ]
    }

    /// Rig records, one per line, in the order an auto-rigger writes them.
    pub fn records(&self) -> Vec<String> {
        let mut next = self.suffix_from;
        let mut name = |base: &str| match next.as_mut() {
            Some(n) => {
                *n += 1;
                format!("{}_dup_{}", base, *n - 1)
            }
            None => base.to_string(),
        };

        let mut records = Vec::new();
        for (joint, p) in HUMANOID_JOINTS {
            let [x, y, z] = self.position(p);
            records.push(format!("joints {} {} {} {}", name(joint), x, y, z));
        }
        records.push(format!("root {}", name("pelvis")));
        for (parent, child) in HUMANOID_LINKS {
            let (parent, child) = (name(parent), name(child));
            records.push(format!("hier {} {}", parent, child));
        }
        if self.duplicate_links {
            for (i, (parent, child)) in HUMANOID_LINKS.into_iter().enumerate() {
                records.push(format!("hier {}_dup_{} {}_dup_{}", parent, i, child, i + 1));
            }
        }
        if self.skin {
            for skin in HUMANOID_SKIN {
                // skin <vertex> (<joint> <weight>)*
                let fields: Vec<String> = skin
                    .split_whitespace()
                    .enumerate()
                    .map(|(i, field)| {
                        if i >= 2 && i % 2 == 0 {
                            name(field)
                        } else {
                            field.to_string()
                        }
                    })
                    .collect();
                records.push(fields.join(" "));
            }
        }
        records
    }

    /// The rig as text.
    pub fn text(&self) -> String {
        join_records(&self.records())
    }

    /// Writes the rig to `dir/name` and returns the path.
    pub fn write_to(&self, dir: &Path, name: &str) -> std::io::Result<PathBuf> {
        let path = dir.join(name);
        std::fs::write(&path, self.text())?;
        Ok(path)
    }
}

/// Joins records into rig text with a trailing newline.
pub fn join_records(records: &[String]) -> String {
    let mut text = records.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_records() {
        let records = HumanoidRig::new().records();
        assert_eq!(records.len(), 13 + 1 + 12 + 3);
        assert_eq!(records[0], "joints pelvis 0 1 0.02");
        assert_eq!(records[13], "root pelvis");
    }

    #[test]
    fn test_variants() {
        let records = HumanoidRig::new().with_duplicate_links().without_skin().records();
        assert_eq!(records.len(), 13 + 1 + 24);
        assert!(records.contains(&"hier pelvis_dup_0 thigh_l_dup_1".to_string()));

        let text = HumanoidRig::new().translated([1.0, 0.0, 0.0]).text();
        assert!(text.starts_with("joints pelvis 1 1 0.02\n"));
    }

    #[test]
    fn test_suffixed_names() {
        let records = HumanoidRig::new().with_suffixed_names(7).records();
        assert_eq!(records.len(), 13 + 1 + 12 + 3);
        assert_eq!(records[0], "joints pelvis_dup_7 0 1 0.02");
        assert_eq!(records[13], "root pelvis_dup_20");
        assert_eq!(records[14], "hier pelvis_dup_21 thigh_l_dup_22");
        assert_eq!(records[26], "skin 0 forearm_l_dup_45 0.8 upperarm_l_dup_46 0.2");
    }
}
