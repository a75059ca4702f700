//! Arena-backed joint graph.
//!
//! A [`Skeleton`] owns every joint record in a flat arena. Children lists and
//! skin-weight entries refer to joints through [`JointId`] handles, so
//! relabelling a joint never has to chase name references elsewhere in the
//! structure.

use std::collections::{BTreeMap, HashMap};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{RigError, RigResult};

/// Handle to a joint inside a [`Skeleton`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointId(u32);

impl JointId {
    /// Returns the arena index of this joint.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Creates a handle from an arena index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// A single joint record.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    /// Unique joint name.
    pub name: String,
    /// Head position in the target (Z-up) space.
    pub position: DVec3,
    /// Child joints. Order carries no meaning.
    pub children: Vec<JointId>,
}

/// One joint influence on a mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinWeight {
    pub joint: JointId,
    pub weight: f64,
}

/// Skin weights keyed by mesh vertex index.
pub type SkinTable = BTreeMap<u32, Vec<SkinWeight>>;

/// A rooted joint hierarchy with positions and skin weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    joints: Vec<Joint>,
    lookup: HashMap<String, JointId>,
    root: JointId,
    skin: SkinTable,
}

impl Skeleton {
    /// Creates a builder for assembling a skeleton joint by joint.
    pub fn builder() -> SkeletonBuilder {
        SkeletonBuilder::default()
    }

    /// Returns the root joint.
    pub fn root(&self) -> JointId {
        self.root
    }

    /// Makes `id` the root joint. The hierarchy is not touched.
    pub fn set_root(&mut self, id: JointId) {
        self.root = id;
    }

    /// Returns the number of joints.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Returns true if the skeleton has no joints.
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Iterates over every joint handle in arena order.
    pub fn ids(&self) -> impl Iterator<Item = JointId> + '_ {
        (0..self.joints.len()).map(JointId::from_index)
    }

    /// Returns the joint record for `id`.
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    /// Looks up a joint by name.
    pub fn id(&self, name: &str) -> Option<JointId> {
        self.lookup.get(name).copied()
    }

    /// Returns the name of a joint.
    pub fn name(&self, id: JointId) -> &str {
        &self.joints[id.index()].name
    }

    /// Returns the position of a joint.
    pub fn position(&self, id: JointId) -> DVec3 {
        self.joints[id.index()].position
    }

    pub fn set_position(&mut self, id: JointId, position: DVec3) {
        self.joints[id.index()].position = position;
    }

    /// Returns the children of a joint.
    pub fn children(&self, id: JointId) -> &[JointId] {
        &self.joints[id.index()].children
    }

    pub fn set_children(&mut self, id: JointId, children: Vec<JointId>) {
        self.joints[id.index()].children = children;
    }

    /// Appends `child` to the children of `parent` unless the edge exists.
    pub fn add_child(&mut self, parent: JointId, child: JointId) {
        let children = &mut self.joints[parent.index()].children;
        if !children.contains(&child) {
            children.push(child);
        }
    }

    /// Removes `child` from the children list of every joint except `keep`.
    pub fn detach_from_parents(&mut self, child: JointId, keep: Option<JointId>) {
        for (index, joint) in self.joints.iter_mut().enumerate() {
            if Some(JointId::from_index(index)) == keep {
                continue;
            }
            joint.children.retain(|c| *c != child);
        }
    }

    /// Adds a new joint with no edges.
    ///
    /// Fails with [`RigError::NameCollision`] if the name is already taken.
    pub fn add_joint(&mut self, name: impl Into<String>, position: DVec3) -> RigResult<JointId> {
        let name = name.into();
        if self.lookup.contains_key(&name) {
            return Err(RigError::NameCollision { name });
        }
        let id = JointId::from_index(self.joints.len());
        self.lookup.insert(name.clone(), id);
        self.joints.push(Joint {
            name,
            position,
            children: Vec::new(),
        });
        Ok(id)
    }

    /// Relabels a joint. Edges and skin weights follow automatically.
    pub fn rename(&mut self, id: JointId, name: impl Into<String>) -> RigResult<()> {
        let name = name.into();
        if self.joints[id.index()].name == name {
            return Ok(());
        }
        if self.lookup.contains_key(&name) {
            return Err(RigError::NameCollision { name });
        }
        let old = std::mem::replace(&mut self.joints[id.index()].name, name.clone());
        self.lookup.remove(&old);
        self.lookup.insert(name, id);
        Ok(())
    }

    /// Removes a joint from the arena, compacting handles.
    ///
    /// Edges to the joint are dropped and its own children are left without
    /// a parent; callers re-attach them first. Skin weights on the joint are
    /// discarded. The root cannot be removed.
    pub fn remove_joint(&mut self, id: JointId) -> RigResult<()> {
        if id == self.root {
            return Err(RigError::malformed(format!(
                "cannot remove root joint '{}'",
                self.name(id)
            )));
        }

        let remap: Vec<Option<JointId>> = (0..self.joints.len())
            .map(|index| match index.cmp(&id.index()) {
                std::cmp::Ordering::Less => Some(JointId::from_index(index)),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(JointId::from_index(index - 1)),
            })
            .collect();

        let removed = self.joints.remove(id.index());
        self.lookup.remove(&removed.name);
        for joint in &mut self.joints {
            joint.children = joint
                .children
                .iter()
                .filter_map(|c| remap[c.index()])
                .collect();
        }
        for handle in self.lookup.values_mut() {
            if let Some(new) = remap[handle.index()] {
                *handle = new;
            }
        }
        for weights in self.skin.values_mut() {
            weights.retain(|w| w.joint != id);
            for w in weights.iter_mut() {
                if let Some(new) = remap[w.joint.index()] {
                    w.joint = new;
                }
            }
        }
        self.skin.retain(|_, weights| !weights.is_empty());
        if let Some(root) = remap[self.root.index()] {
            self.root = root;
        }
        Ok(())
    }

    /// Returns the parent of every joint, derived by inverting the children
    /// lists. A joint listed under several parents reports the last one.
    pub fn parents(&self) -> Vec<Option<JointId>> {
        let mut parents = vec![None; self.joints.len()];
        for (index, joint) in self.joints.iter().enumerate() {
            for child in &joint.children {
                parents[child.index()] = Some(JointId::from_index(index));
            }
        }
        parents
    }

    /// Returns the parent of a single joint.
    pub fn parent_of(&self, id: JointId) -> Option<JointId> {
        self.joints
            .iter()
            .position(|joint| joint.children.contains(&id))
            .map(JointId::from_index)
    }

    /// Joints that appear as a child but have no children of their own.
    pub fn leaves(&self) -> Vec<JointId> {
        let parents = self.parents();
        self.ids()
            .filter(|id| parents[id.index()].is_some() && self.children(*id).is_empty())
            .collect()
    }

    /// Returns the number of parent→child links.
    pub fn edge_count(&self) -> usize {
        self.joints.iter().map(|j| j.children.len()).sum()
    }

    /// Returns every parent→child link in arena order.
    pub fn edges(&self) -> Vec<(JointId, JointId)> {
        self.ids()
            .flat_map(|parent| self.children(parent).iter().map(move |c| (parent, *c)))
            .collect()
    }

    /// Returns a copy of the children lists, indexed by joint.
    pub fn hierarchy(&self) -> Vec<Vec<JointId>> {
        self.joints.iter().map(|j| j.children.clone()).collect()
    }

    /// Replaces every children list at once.
    ///
    /// # Panics
    /// Panics if `hierarchy` does not have one entry per joint.
    pub fn set_hierarchy(&mut self, hierarchy: Vec<Vec<JointId>>) {
        assert_eq!(hierarchy.len(), self.joints.len(), "hierarchy size mismatch");
        for (joint, children) in self.joints.iter_mut().zip(hierarchy) {
            joint.children = children;
        }
    }

    /// Returns the skin-weight table.
    pub fn skin_weights(&self) -> &SkinTable {
        &self.skin
    }

    /// Returns the skin-weight table for modification.
    pub fn skin_weights_mut(&mut self) -> &mut SkinTable {
        &mut self.skin
    }

    /// Moves every joint by `offset`.
    pub fn translate(&mut self, offset: DVec3) {
        for joint in &mut self.joints {
            joint.position += offset;
        }
    }

    /// Minimum Z over all joints, or 0 for an empty skeleton.
    pub fn min_z(&self) -> f64 {
        self.joints
            .iter()
            .map(|j| j.position.z)
            .reduce(f64::min)
            .unwrap_or(0.0)
    }
}

/// Incremental constructor used by the rig parser and by tests.
#[derive(Debug, Default)]
pub struct SkeletonBuilder {
    joints: Vec<Joint>,
    lookup: HashMap<String, JointId>,
    skin: SkinTable,
}

impl SkeletonBuilder {
    /// Adds a joint, or returns the existing handle if the name is known.
    ///
    /// The first position recorded for a name wins.
    pub fn joint(&mut self, name: &str, position: DVec3) -> JointId {
        if let Some(id) = self.lookup.get(name) {
            return *id;
        }
        let id = JointId::from_index(self.joints.len());
        self.lookup.insert(name.to_string(), id);
        self.joints.push(Joint {
            name: name.to_string(),
            position,
            children: Vec::new(),
        });
        id
    }

    /// Looks up a joint added earlier.
    pub fn id(&self, name: &str) -> Option<JointId> {
        self.lookup.get(name).copied()
    }

    /// Records a parent→child link.
    ///
    /// Returns false (and records nothing) for self-loops and duplicates.
    pub fn edge(&mut self, parent: JointId, child: JointId) -> bool {
        if parent == child {
            return false;
        }
        let children = &mut self.joints[parent.index()].children;
        if children.contains(&child) {
            return false;
        }
        children.push(child);
        true
    }

    /// Sets the weight of `joint` on `vertex`, replacing an earlier value.
    pub fn skin(&mut self, vertex: u32, joint: JointId, weight: f64) {
        let weights = self.skin.entry(vertex).or_default();
        match weights.iter_mut().find(|w| w.joint == joint) {
            Some(existing) => existing.weight = weight,
            None => weights.push(SkinWeight { joint, weight }),
        }
    }

    /// Finishes the skeleton with the given root.
    pub fn build(self, root: JointId) -> Skeleton {
        Skeleton {
            joints: self.joints,
            lookup: self.lookup,
            root,
            skin: self.skin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_skeleton_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Skeleton>();
    }

    fn chain() -> Skeleton {
        let mut b = Skeleton::builder();
        let a = b.joint("a", DVec3::ZERO);
        let bb = b.joint("b", DVec3::new(0.0, 0.0, 1.0));
        let c = b.joint("c", DVec3::new(0.0, 0.0, 2.0));
        b.edge(a, bb);
        b.edge(bb, c);
        b.skin(0, c, 0.75);
        b.skin(0, bb, 0.25);
        b.build(a)
    }

    #[test]
    fn test_builder_drops_self_loops_and_duplicates() {
        let mut b = Skeleton::builder();
        let a = b.joint("a", DVec3::ZERO);
        let c = b.joint("c", DVec3::ONE);
        assert!(b.edge(a, c));
        assert!(!b.edge(a, c));
        assert!(!b.edge(a, a));
        let s = b.build(a);
        assert_eq!(s.edge_count(), 1);
    }

    #[test]
    fn test_builder_first_position_wins() {
        let mut b = Skeleton::builder();
        let first = b.joint("a", DVec3::ONE);
        let second = b.joint("a", DVec3::ZERO);
        assert_eq!(first, second);
        let s = b.build(first);
        assert_eq!(s.position(first), DVec3::ONE);
    }

    #[test]
    fn test_skin_replaces_existing_weight() {
        let mut b = Skeleton::builder();
        let a = b.joint("a", DVec3::ZERO);
        b.skin(3, a, 0.2);
        b.skin(3, a, 0.9);
        let s = b.build(a);
        assert_eq!(s.skin_weights()[&3], vec![SkinWeight { joint: a, weight: 0.9 }]);
    }

    #[test]
    fn test_parents_and_leaves() {
        let s = chain();
        let parents = s.parents();
        assert_eq!(parents[0], None);
        assert_eq!(parents[1], Some(JointId::from_index(0)));
        assert_eq!(s.parent_of(JointId::from_index(2)), Some(JointId::from_index(1)));
        assert_eq!(s.leaves(), vec![JointId::from_index(2)]);
    }

    #[test]
    fn test_rename_keeps_skin_references() {
        let mut s = chain();
        let c = s.id("c").unwrap();
        s.rename(c, "Head").unwrap();
        assert_eq!(s.id("c"), None);
        assert_eq!(s.id("Head"), Some(c));
        assert_eq!(s.skin_weights()[&0][0].joint, c);
        assert_eq!(s.name(c), "Head");
    }

    #[test]
    fn test_rename_collision() {
        let mut s = chain();
        let c = s.id("c").unwrap();
        let err = s.rename(c, "a").unwrap_err();
        assert!(matches!(err, RigError::NameCollision { ref name } if name == "a"));
    }

    #[test]
    fn test_add_joint_collision() {
        let mut s = chain();
        assert!(s.add_joint("b", DVec3::ZERO).is_err());
        let d = s.add_joint("d", DVec3::ZERO).unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s.id("d"), Some(d));
    }

    #[test]
    fn test_remove_joint_compacts_handles() {
        let mut s = chain();
        let b = s.id("b").unwrap();
        let a = s.id("a").unwrap();
        s.add_child(a, s.id("c").unwrap());
        s.remove_joint(b).unwrap();

        assert_eq!(s.len(), 2);
        let c = s.id("c").unwrap();
        assert_eq!(c.index(), 1);
        assert_eq!(s.children(s.id("a").unwrap()), &[c]);
        assert_eq!(s.skin_weights()[&0], vec![SkinWeight { joint: c, weight: 0.75 }]);
    }

    #[test]
    fn test_remove_root_fails() {
        let mut s = chain();
        assert!(s.remove_joint(s.root()).is_err());
    }

    #[test]
    fn test_detach_from_parents() {
        let mut s = chain();
        let a = s.id("a").unwrap();
        let c = s.id("c").unwrap();
        s.add_child(a, c);
        s.detach_from_parents(c, Some(a));
        assert_eq!(s.parent_of(c), Some(a));
        assert_eq!(s.edge_count(), 2);
    }

    #[test]
    fn test_min_z_and_translate() {
        let mut s = chain();
        s.translate(DVec3::new(0.0, 0.0, -0.5));
        assert_eq!(s.min_z(), -0.5);
    }
}
