//! Name-keyed, serializable form of a skeleton.
//!
//! This is the shape handed to the scene-building collaborator: joints are
//! keyed by name, children are sorted, and skin weights refer to joints by
//! name. Every map is ordered so the JSON output is stable.

use std::collections::BTreeMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{RigError, RigResult};
use crate::skeleton::Skeleton;

/// A joint in the serializable skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalJoint {
    /// Head position in the target (Z-up) space.
    pub position: [f64; 3],
    /// Parent joint name, absent for the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Child joint names, sorted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

/// A single (joint, weight) influence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalWeight {
    pub joint: String,
    pub weight: f64,
}

/// Serializable skeleton keyed by joint name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSkeleton {
    /// Name of the root joint.
    pub root: String,
    /// Joints keyed by name.
    pub joints: BTreeMap<String, CanonicalJoint>,
    /// Skin weights keyed by vertex index.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skin_weights: BTreeMap<u32, Vec<CanonicalWeight>>,
}

impl CanonicalSkeleton {
    /// Returns the number of parent→child links.
    pub fn link_count(&self) -> usize {
        self.joints.values().map(|j| j.children.len()).sum()
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses the JSON form back.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Rebuilds an arena skeleton from the name-keyed form.
    ///
    /// Joints are inserted in name order, so the result does not depend on
    /// how the source skeleton laid out its arena.
    pub fn to_skeleton(&self) -> RigResult<Skeleton> {
        let mut builder = Skeleton::builder();
        for (name, joint) in &self.joints {
            let [x, y, z] = joint.position;
            builder.joint(name, DVec3::new(x, y, z));
        }
        let lookup = |name: &str| {
            builder
                .id(name)
                .ok_or_else(|| RigError::malformed(format!("unknown joint '{}'", name)))
        };
        let root = lookup(&self.root)?;
        let mut edges = Vec::new();
        for (name, joint) in &self.joints {
            let parent = lookup(name)?;
            for child in &joint.children {
                edges.push((parent, lookup(child)?));
            }
        }
        let mut weights = Vec::new();
        for (vertex, influences) in &self.skin_weights {
            for influence in influences {
                weights.push((*vertex, lookup(&influence.joint)?, influence.weight));
            }
        }

        for (parent, child) in edges {
            builder.edge(parent, child);
        }
        for (vertex, joint, weight) in weights {
            builder.skin(vertex, joint, weight);
        }
        Ok(builder.build(root))
    }
}

impl From<&Skeleton> for CanonicalSkeleton {
    fn from(skeleton: &Skeleton) -> Self {
        let parents = skeleton.parents();
        let joints = skeleton
            .ids()
            .map(|id| {
                let mut children: Vec<String> = skeleton
                    .children(id)
                    .iter()
                    .map(|c| skeleton.name(*c).to_string())
                    .collect();
                children.sort();
                let joint = CanonicalJoint {
                    position: skeleton.position(id).to_array(),
                    parent: parents[id.index()].map(|p| skeleton.name(p).to_string()),
                    children,
                };
                (skeleton.name(id).to_string(), joint)
            })
            .collect();

        let skin_weights = skeleton
            .skin_weights()
            .iter()
            .map(|(vertex, weights)| {
                let weights = weights
                    .iter()
                    .map(|w| CanonicalWeight {
                        joint: skeleton.name(w.joint).to_string(),
                        weight: w.weight,
                    })
                    .collect();
                (*vertex, weights)
            })
            .collect();

        Self {
            root: skeleton.name(skeleton.root()).to_string(),
            joints,
            skin_weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_rig;
    use pretty_assertions::assert_eq;

    const RIG: &str = "\
joints root 0 0 0
joints b 0 1 0
joints a 1 1 0
root root
hier root b
hier root a
skin 4 a 0.5 b 0.5
";

    #[test]
    fn test_from_skeleton() {
        let skeleton = parse_rig(RIG).unwrap().skeleton;
        let canonical = CanonicalSkeleton::from(&skeleton);

        assert_eq!(canonical.root, "root");
        assert_eq!(canonical.joints["root"].children, vec!["a", "b"]);
        assert_eq!(canonical.joints["a"].parent.as_deref(), Some("root"));
        assert_eq!(canonical.joints["b"].position, [0.0, 0.0, 1.0]);
        assert_eq!(canonical.skin_weights[&4][0].joint, "a");
        assert_eq!(canonical.link_count(), 2);
    }

    #[test]
    fn test_json_shape() {
        let skeleton = parse_rig(RIG).unwrap().skeleton;
        let json = serde_json::to_value(CanonicalSkeleton::from(&skeleton)).unwrap();

        assert_eq!(json["root"], "root");
        assert!(json["joints"]["a"].get("children").is_none());
        assert!(json["joints"]["root"].get("parent").is_none());
        assert_eq!(json["skin_weights"]["4"][1]["joint"], "b");
    }

    #[test]
    fn test_to_skeleton_is_layout_independent() {
        let skeleton = parse_rig(RIG).unwrap().skeleton;
        let canonical = CanonicalSkeleton::from(&skeleton);
        let rebuilt = canonical.to_skeleton().unwrap();

        assert_eq!(rebuilt.len(), 3);
        assert_eq!(CanonicalSkeleton::from(&rebuilt), canonical);
    }

    #[test]
    fn test_to_skeleton_unknown_child() {
        let mut canonical = CanonicalSkeleton::from(&parse_rig(RIG).unwrap().skeleton);
        canonical
            .joints
            .get_mut("a")
            .unwrap()
            .children
            .push("ghost".to_string());
        assert!(canonical.to_skeleton().is_err());
    }
}
