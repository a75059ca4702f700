//! Re-rooting of joint hierarchies.
//!
//! The parent→children map is read as an undirected tree and walked from the
//! new root, each edge recorded in the direction it was walked. Edge ids are
//! tracked so that only the edge a joint was reached by is skipped; two
//! distinct links between the same pair of joints form a cycle and are
//! reported as one.

use std::collections::VecDeque;

use rigcanon_rig::{JointId, RigError, RigResult, Skeleton};

/// Returns the children lists of `skeleton` re-rooted at `new_root`.
///
/// Joints not connected to `new_root` end up with no links. Fails with
/// [`RigError::CyclicGraph`] if the walk reaches a joint twice.
pub fn reroot_hierarchy(skeleton: &Skeleton, new_root: JointId) -> RigResult<Vec<Vec<JointId>>> {
    let mut adjacency: Vec<Vec<(JointId, usize)>> = vec![Vec::new(); skeleton.len()];
    for (edge, (parent, child)) in skeleton.edges().into_iter().enumerate() {
        adjacency[parent.index()].push((child, edge));
        adjacency[child.index()].push((parent, edge));
    }

    let mut hierarchy = vec![Vec::new(); skeleton.len()];
    let mut visited = vec![false; skeleton.len()];
    visited[new_root.index()] = true;
    let mut queue = VecDeque::from([(new_root, None)]);

    while let Some((joint, arrived_by)) = queue.pop_front() {
        for &(next, edge) in &adjacency[joint.index()] {
            if Some(edge) == arrived_by {
                continue;
            }
            if visited[next.index()] {
                return Err(RigError::cyclic(skeleton.name(next)));
            }
            visited[next.index()] = true;
            hierarchy[joint.index()].push(next);
            queue.push_back((next, Some(edge)));
        }
    }

    Ok(hierarchy)
}

/// Returns a copy of `skeleton` rooted at `new_root`.
pub fn reroot(skeleton: &Skeleton, new_root: JointId) -> RigResult<Skeleton> {
    let hierarchy = reroot_hierarchy(skeleton, new_root)?;
    let mut rerooted = skeleton.clone();
    rerooted.set_hierarchy(hierarchy);
    rerooted.set_root(new_root);
    tracing::debug!(
        from = skeleton.name(skeleton.root()),
        to = skeleton.name(new_root),
        "re-rooted hierarchy"
    );
    Ok(rerooted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use pretty_assertions::assert_eq;
    use rigcanon_rig::{check_tree, ErrorKind};

    /// a → b → c, a → d
    fn tree() -> Skeleton {
        let mut b = Skeleton::builder();
        let a = b.joint("a", DVec3::ZERO);
        let bb = b.joint("b", DVec3::X);
        let c = b.joint("c", DVec3::Y);
        let d = b.joint("d", DVec3::Z);
        b.edge(a, bb);
        b.edge(bb, c);
        b.edge(a, d);
        b.build(a)
    }

    fn undirected(s: &Skeleton) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = s
            .edges()
            .into_iter()
            .map(|(p, c)| {
                let (p, c) = (s.name(p).to_string(), s.name(c).to_string());
                if p < c {
                    (p, c)
                } else {
                    (c, p)
                }
            })
            .collect();
        edges.sort();
        edges
    }

    #[test]
    fn test_reroot_at_leaf() {
        let s = tree();
        let c = s.id("c").unwrap();
        let r = reroot(&s, c).unwrap();

        assert_eq!(r.root(), c);
        assert_eq!(r.children(c), &[s.id("b").unwrap()]);
        assert_eq!(r.children(s.id("b").unwrap()), &[s.id("a").unwrap()]);
        assert_eq!(r.children(s.id("a").unwrap()), &[s.id("d").unwrap()]);
        assert_eq!(undirected(&r), undirected(&s));
        check_tree(&r).unwrap();
    }

    #[test]
    fn test_round_trip() {
        let s = tree();
        let there = reroot(&s, s.id("d").unwrap()).unwrap();
        let back = reroot(&there, s.root()).unwrap();
        assert_eq!(back.edges(), s.edges());
    }

    #[test]
    fn test_reroot_at_current_root_is_identity() {
        let s = tree();
        assert_eq!(reroot(&s, s.root()).unwrap().hierarchy(), s.hierarchy());
    }

    #[test]
    fn test_cycle_detected() {
        let mut s = tree();
        s.add_child(s.id("c").unwrap(), s.id("d").unwrap());
        let err = reroot(&s, s.root()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CyclicGraph);
    }

    #[test]
    fn test_two_way_link_is_a_cycle() {
        let mut s = tree();
        s.add_child(s.id("b").unwrap(), s.id("a").unwrap());
        assert!(reroot(&s, s.id("c").unwrap()).is_err());
    }
}
