//! Structural checks for the tree invariant.

use std::collections::VecDeque;

use crate::error::{RigError, RigResult};
use crate::skeleton::Skeleton;

/// Summary of a skeleton that passed [`check_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of joints.
    pub joints: usize,
    /// Number of parent→child links.
    pub links: usize,
    /// Length of the longest root-to-leaf path, in links.
    pub depth: usize,
}

/// Verifies that the hierarchy is a single tree rooted at the skeleton root.
///
/// - the root has no parent
/// - every other joint has exactly one parent
/// - every joint is reachable from the root
///
/// Multiple parents and unreachable cycles are reported as
/// [`RigError::CyclicGraph`]; a joint with no parent at all is reported as
/// [`RigError::MalformedRig`].
pub fn check_tree(skeleton: &Skeleton) -> RigResult<TreeStats> {
    let mut parent_count = vec![0usize; skeleton.len()];
    for (_, child) in skeleton.edges() {
        parent_count[child.index()] += 1;
    }

    let root = skeleton.root();
    if parent_count[root.index()] > 0 {
        return Err(RigError::cyclic(skeleton.name(root)));
    }
    for id in skeleton.ids() {
        if id == root {
            continue;
        }
        match parent_count[id.index()] {
            0 => {
                return Err(RigError::malformed(format!(
                    "joint '{}' is not connected to root '{}'",
                    skeleton.name(id),
                    skeleton.name(root)
                )))
            }
            1 => {}
            _ => return Err(RigError::cyclic(skeleton.name(id))),
        }
    }

    let mut depth_of = vec![None; skeleton.len()];
    depth_of[root.index()] = Some(0usize);
    let mut queue = VecDeque::from([root]);
    let mut depth = 0;
    while let Some(id) = queue.pop_front() {
        let d = depth_of[id.index()].unwrap_or(0);
        depth = depth.max(d);
        for child in skeleton.children(id) {
            if depth_of[child.index()].is_some() {
                return Err(RigError::cyclic(skeleton.name(*child)));
            }
            depth_of[child.index()] = Some(d + 1);
            queue.push_back(*child);
        }
    }

    if let Some(unreached) = skeleton.ids().find(|id| depth_of[id.index()].is_none()) {
        return Err(RigError::cyclic(skeleton.name(unreached)));
    }

    Ok(TreeStats {
        joints: skeleton.len(),
        links: skeleton.edge_count(),
        depth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::parse_rig;

    #[test]
    fn test_valid_tree() {
        let rig = "joints a 0 0 0\njoints b 0 0 1\njoints c 0 0 2\njoints d 1 0 0\n\
                   root a\nhier a b\nhier b c\nhier a d\n";
        let stats = check_tree(&parse_rig(rig).unwrap().skeleton).unwrap();
        assert_eq!(
            stats,
            TreeStats {
                joints: 4,
                links: 3,
                depth: 2
            }
        );
    }

    #[test]
    fn test_disconnected_joint() {
        let rig = "joints a 0 0 0\njoints b 0 0 1\nroot a\n";
        let err = check_tree(&parse_rig(rig).unwrap().skeleton).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRig);
        assert!(err.to_string().contains("'b' is not connected"));
    }

    #[test]
    fn test_two_parents() {
        let rig = "joints a 0 0 0\njoints b 0 0 1\njoints c 0 0 2\n\
                   root a\nhier a b\nhier a c\nhier b c\n";
        let err = check_tree(&parse_rig(rig).unwrap().skeleton).unwrap_err();
        assert!(matches!(err, RigError::CyclicGraph { ref joint } if joint == "c"));
    }

    #[test]
    fn test_root_with_parent() {
        let rig = "joints a 0 0 0\njoints b 0 0 1\nroot a\nhier a b\nhier b a\n";
        let err = check_tree(&parse_rig(rig).unwrap().skeleton).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CyclicGraph);
    }

    #[test]
    fn test_detached_cycle() {
        let rig = "joints a 0 0 0\njoints b 0 0 1\njoints c 0 0 2\n\
                   root a\nhier b c\nhier c b\n";
        let err = check_tree(&parse_rig(rig).unwrap().skeleton).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CyclicGraph);
    }
}
