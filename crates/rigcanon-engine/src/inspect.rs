//! Read-only diagnostics for a parsed rig.
//!
//! Runs the classification steps without modifying anything, so a rig that
//! fails canonicalization can still be examined.

use std::collections::BTreeMap;

use rigcanon_rig::{check_tree, Skeleton};
use serde::{Deserialize, Serialize};

use crate::classify::classify_extremities;
use crate::proximal::map_proximal;
use crate::rename::rename_table;
use crate::spine::{find_spine_anchors, trifurcations};

/// A joint with exactly three children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrifurcationSummary {
    pub name: String,
    /// Distance from the origin.
    pub distance: f64,
    /// Z coordinate.
    pub height: f64,
}

/// What the engine sees in a rig before changing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigSummary {
    pub root: String,
    pub joint_count: usize,
    pub link_count: usize,
    /// Longest root-to-leaf path, when the hierarchy is a tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    /// Leaf joint names, sorted.
    pub leaves: Vec<String>,
    /// Canonical slot → joint name, for every slot that could be filled.
    pub roles: BTreeMap<String, String>,
    /// Tri-furcating joints, closest to the origin first.
    pub trifurcations: Vec<TrifurcationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pelvis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_root: Option<String>,
    /// Reasons the rig would fail canonicalization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
}

impl RigSummary {
    /// Returns true if no problems were found.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Summarizes `skeleton` without modifying it.
pub fn summarize(skeleton: &Skeleton) -> RigSummary {
    let mut problems = Vec::new();

    let depth = match check_tree(skeleton) {
        Ok(stats) => Some(stats.depth),
        Err(e) => {
            problems.push(e.to_string());
            None
        }
    };

    let mut leaves: Vec<String> = skeleton
        .leaves()
        .into_iter()
        .map(|id| skeleton.name(id).to_string())
        .collect();
    leaves.sort();

    let mut roles = BTreeMap::new();
    match classify_extremities(skeleton) {
        Ok(extremities) => {
            for (role, id) in extremities.roles() {
                roles.insert(role.to_string(), skeleton.name(id).to_string());
            }
            let (proximal, warnings) = map_proximal(skeleton, &extremities);
            for (role, id) in proximal.roles() {
                if let Some(id) = id {
                    roles.insert(role.to_string(), skeleton.name(id).to_string());
                }
            }
            problems.extend(warnings.iter().map(|w| w.to_string()));
            if let Err(e) = rename_table(skeleton, &extremities, &proximal) {
                problems.push(e.to_string());
            }
        }
        Err(e) => problems.push(e.to_string()),
    }

    let trifurcations = trifurcations(skeleton)
        .into_iter()
        .map(|id| TrifurcationSummary {
            name: skeleton.name(id).to_string(),
            distance: skeleton.position(id).length(),
            height: skeleton.position(id).z,
        })
        .collect();

    let (pelvis, chest_root) = match find_spine_anchors(skeleton) {
        Ok(anchors) => (
            Some(skeleton.name(anchors.pelvis).to_string()),
            Some(skeleton.name(anchors.chest_root).to_string()),
        ),
        Err(e) => {
            problems.push(e.to_string());
            (None, None)
        }
    };

    RigSummary {
        root: skeleton.name(skeleton.root()).to_string(),
        joint_count: skeleton.len(),
        link_count: skeleton.edge_count(),
        depth,
        leaves,
        roles,
        trifurcations,
        pelvis,
        chest_root,
        problems,
    }
}
