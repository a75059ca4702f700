//! Serializes a skeleton back into rig text.
//!
//! Output uses the same record layout the parser reads, so a scene host that
//! already consumes auto-rigger output can consume canonical skeletons
//! unchanged. Positions are converted back to the source (Y-up) space.

use std::fmt::Write as _;

use crate::parser::unmap_axes;
use crate::skeleton::Skeleton;

/// Renders a skeleton as rig text.
///
/// Joints are written in breadth-first order from the root, followed by the
/// root record, the hierarchy in the same order, and finally skin records by
/// ascending vertex index.
pub fn to_rig_text(skeleton: &Skeleton) -> String {
    let order = breadth_first(skeleton);
    let mut out = String::new();

    for id in &order {
        let [x, y, z] = unmap_axes(skeleton.position(*id));
        let _ = writeln!(out, "joints {} {} {} {}", skeleton.name(*id), x, y, z);
    }
    let _ = writeln!(out, "root {}", skeleton.name(skeleton.root()));
    for id in &order {
        for child in skeleton.children(*id) {
            let _ = writeln!(out, "hier {} {}", skeleton.name(*id), skeleton.name(*child));
        }
    }
    for (vertex, weights) in skeleton.skin_weights() {
        let _ = write!(out, "skin {}", vertex);
        for w in weights {
            let _ = write!(out, " {} {}", skeleton.name(w.joint), w.weight);
        }
        out.push('\n');
    }
    out
}

/// Root first, then level by level. Joints not reachable from the root are
/// appended in arena order so nothing is lost.
fn breadth_first(skeleton: &Skeleton) -> Vec<crate::skeleton::JointId> {
    let mut seen = vec![false; skeleton.len()];
    let mut order = Vec::with_capacity(skeleton.len());
    let mut level = vec![skeleton.root()];
    seen[skeleton.root().index()] = true;

    while !level.is_empty() {
        let mut next = Vec::new();
        for id in level {
            order.push(id);
            for child in skeleton.children(id) {
                if !seen[child.index()] {
                    seen[child.index()] = true;
                    next.push(*child);
                }
            }
        }
        level = next;
    }

    order.extend(skeleton.ids().filter(|id| !seen[id.index()]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalSkeleton;
    use crate::parser::parse_rig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_layout() {
        let rig = "joints hips 0 1 0\njoints knee 0.5 0.5 0.25\nroot hips\nhier hips knee\nskin 2 knee 0.5\n";
        let skeleton = parse_rig(rig).unwrap().skeleton;
        let text = to_rig_text(&skeleton);

        assert_eq!(
            text,
            "joints hips 0 1 0\njoints knee 0.5 0.5 0.25\nroot hips\nhier hips knee\nskin 2 knee 0.5\n"
        );
    }

    #[test]
    fn test_written_text_parses_to_same_skeleton() {
        let rig = "joints a 0 0 0\njoints b 1 2 3\njoints c -1 2 3\njoints d 0 4 0\n\
                   root a\nhier a b\nhier a c\nhier a d\nskin 0 b 0.25 d 0.75\n";
        let skeleton = parse_rig(rig).unwrap().skeleton;
        let reparsed = parse_rig(&to_rig_text(&skeleton)).unwrap().skeleton;
        assert_eq!(
            CanonicalSkeleton::from(&reparsed),
            CanonicalSkeleton::from(&skeleton)
        );
    }
}
