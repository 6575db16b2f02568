use std::collections::VecDeque;

use crate::errors::{Error, Result};
use crate::math::prelude::*;
use crate::utils::hash::FastHashMap;
use crate::Entity;

use super::node::Node;
use super::state::UpdateState;
use super::transform::Transform;

/// A simple scene graph that stores the local transforms of spatial entities, the
/// tree relationships between them, and the world matrices accumulated through
/// that tree.
///
/// Components are kept in dense columns indexed by a row number; `remap` is the
/// membership index which maps every spatial entity to its row. Rows are
/// swap-removed, so a row number is only stable until the next removal.
///
/// World matrices are refreshed by `build_local_matrices` followed by `propagate`,
/// starting from the explicitly registered scene roots.
pub struct SceneGraph {
    pub(super) remap: FastHashMap<Entity, usize>,
    pub(super) entities: Vec<Entity>,
    pub(super) nodes: Vec<Node>,
    pub(super) transforms: Vec<Transform>,
    pub(super) snapshots: Vec<Option<Transform>>,
    pub(super) local_matrices: Vec<Matrix4<f32>>,
    pub(super) world_matrices: Vec<Matrix4<f32>>,
    pub(super) states: Vec<UpdateState>,
    pub(super) roots: Vec<Entity>,
    pub(super) queue: VecDeque<usize>,
    pub(super) prune_clean_subtrees: bool,
}

impl Default for SceneGraph {
    fn default() -> Self {
        SceneGraph::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        SceneGraph::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SceneGraph {
            remap: FastHashMap::default(),
            entities: Vec::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            transforms: Vec::with_capacity(capacity),
            snapshots: Vec::with_capacity(capacity),
            local_matrices: Vec::with_capacity(capacity),
            world_matrices: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
            roots: Vec::new(),
            queue: VecDeque::new(),
            prune_clean_subtrees: false,
        }
    }

    /// Skips the whole subtree below a child when neither the child nor its parent
    /// were updated this tick, instead of walking it without writing.
    #[inline]
    pub fn set_prune_clean_subtrees(&mut self, prune: bool) {
        self.prune_clean_subtrees = prune;
    }

    /// Gets the number of spatial entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns true if `ent` carries spatial components.
    #[inline]
    pub fn contains(&self, ent: Entity) -> bool {
        self.remap.contains_key(&ent)
    }

    /// Iterates spatial entities and their world matrices in storage order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &Matrix4<f32>)> + '_ {
        self.entities
            .iter()
            .cloned()
            .zip(self.world_matrices.iter())
    }

    /// Adds spatial components to `ent`. Returns false if it already has them.
    pub(crate) fn add(&mut self, ent: Entity, transform: Transform) -> bool {
        if self.remap.contains_key(&ent) {
            return false;
        }

        self.remap.insert(ent, self.entities.len());
        self.entities.push(ent);
        self.nodes.push(Node::new(ent));
        self.transforms.push(transform);
        self.snapshots.push(None);
        self.local_matrices.push(Matrix4::one());
        self.world_matrices.push(Matrix4::one());
        self.states.push(UpdateState::NotUpdated);
        true
    }

    /// Removes a node and all of its descendants from `SceneGraph`.
    pub(crate) fn remove(&mut self, ent: Entity) -> Option<Vec<Entity>> {
        let index = *self.remap.get(&ent)?;
        if let Some(parent) = self.nodes[index].parent {
            self.remove_child(parent, ent);
        }

        let mut removes = vec![ent];
        removes.extend(self.descendants(ent));

        for &v in &removes {
            self.unregister_root(v);
            self.swap_remove(v);
        }

        Some(removes)
    }

    /// Removes the spatial components of a single node. It is detached from its
    /// parent, and its children become orphans which keep their own subtrees.
    pub(crate) fn strip(&mut self, ent: Entity) -> bool {
        let index = match self.remap.get(&ent) {
            Some(&index) => index,
            None => return false,
        };

        if let Some(parent) = self.nodes[index].parent {
            self.remove_child(parent, ent);
        }

        let children = ::std::mem::replace(&mut self.nodes[index].children, Default::default());
        for child in children {
            if let Some(&ci) = self.remap.get(&child) {
                let node = &mut self.nodes[ci];
                node.parent = None;
                node.child_index = None;
                self.snapshots[ci] = None;
            }
        }

        self.unregister_root(ent);
        self.swap_remove(ent);
        true
    }

    fn swap_remove(&mut self, ent: Entity) {
        if let Some(index) = self.remap.remove(&ent) {
            self.entities.swap_remove(index);
            self.nodes.swap_remove(index);
            self.transforms.swap_remove(index);
            self.snapshots.swap_remove(index);
            self.local_matrices.swap_remove(index);
            self.world_matrices.swap_remove(index);
            self.states.swap_remove(index);

            if index < self.entities.len() {
                let moved = self.entities[index];
                if let Some(v) = self.remap.get_mut(&moved) {
                    *v = index;
                }
            }
        }

        debug_assert!(self.remap.len() == self.entities.len());
    }

    #[inline]
    fn index(&self, ent: Entity) -> Result<usize> {
        self.remap
            .get(&ent)
            .cloned()
            .ok_or_else(|| Error::NonNodeFound(ent))
    }
}

impl SceneGraph {
    /// Gets the parent node.
    #[inline]
    pub fn parent(&self, ent: Entity) -> Option<Entity> {
        self.remap.get(&ent).and_then(|&v| self.nodes[v].parent)
    }

    /// Gets the children in stored order. The order changes when a child is removed.
    #[inline]
    pub fn children(&self, ent: Entity) -> &[Entity] {
        self.remap
            .get(&ent)
            .map(|&v| &self.nodes[v].children[..])
            .unwrap_or(&[])
    }

    /// Gets the slot of `ent` inside its parent's children.
    #[inline]
    pub fn child_index(&self, ent: Entity) -> Option<usize> {
        self.remap.get(&ent).and_then(|&v| self.nodes[v].child_index)
    }

    /// Returns ture if this is the leaf of a hierarchy, aka. has no child.
    #[inline]
    pub fn is_leaf(&self, ent: Entity) -> bool {
        self.remap
            .get(&ent)
            .map(|&v| self.nodes[v].children.is_empty())
            .unwrap_or(false)
    }

    /// Returns an iterator of references to its ancestors.
    #[inline]
    pub fn ancestors(&self, ent: Entity) -> Ancestors<'_> {
        Ancestors {
            cursor: self.parent(ent),
            scene: self,
        }
    }

    /// Return true if rhs is one of the ancestor of lhs.
    #[inline]
    pub fn is_ancestor(&self, lhs: Entity, rhs: Entity) -> bool {
        self.ancestors(lhs).any(|v| v == rhs)
    }

    /// Returns an iterator of references to its descendants, in breadth-first order.
    pub fn descendants(&self, ent: Entity) -> Descendants<'_> {
        let mut queue = VecDeque::new();
        if let Some(&index) = self.remap.get(&ent) {
            queue.push_back(index);
        }

        Descendants {
            scene: self,
            queue,
            pending: &[],
        }
    }
}

/// An iterator of references to its ancestors.
pub struct Ancestors<'a> {
    scene: &'a SceneGraph,
    cursor: Option<Entity>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let ent = self.cursor?;
        self.cursor = self.scene.parent(ent);
        Some(ent)
    }
}

/// An iterator of references to its descendants, in breadth-first order.
pub struct Descendants<'a> {
    scene: &'a SceneGraph,
    queue: VecDeque<usize>,
    pending: &'a [Entity],
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some((&child, rest)) = self.pending.split_first() {
                self.pending = rest;
                if let Some(&index) = self.scene.remap.get(&child) {
                    self.queue.push_back(index);
                    return Some(child);
                }
            }

            let index = self.queue.pop_front()?;
            self.pending = &self.scene.nodes[index].children[..];
        }
    }
}

impl SceneGraph {
    /// Attachs `child` to the end of `parent`'s children, detaching it from its
    /// previous parent first.
    ///
    /// Attaching a node below itself or one of its descendants, or attaching a
    /// registered scene root, is rejected so the hierarchy always stays a forest.
    ///
    /// The child's snapshot is cleared, so the next `build_local_matrices` marks it
    /// `Updated` even though its local transform is unchanged. Its inherited world
    /// matrix is stale after a re-parent. `detach` and `try_register_root` do the
    /// same.
    pub fn try_add_child(&mut self, parent: Entity, child: Entity) -> Result<()> {
        let parent_index = self.index(parent)?;
        let child_index = self.index(child)?;

        if self.nodes[child_index].parent == Some(parent) {
            return Ok(());
        }

        if parent == child {
            return Err(Error::CanNotAttachSelfAsParent);
        }

        if self.is_ancestor(parent, child) {
            return Err(Error::CyclicRelationship { parent, child });
        }

        if self.roots.contains(&child) {
            return Err(Error::RootCanNotBeChild(child));
        }

        if let Some(prev) = self.nodes[child_index].parent {
            self.detach(prev, child_index);
        }

        let slot = {
            let node = &mut self.nodes[parent_index];
            node.children.push(child);
            node.children.len() - 1
        };

        let node = &mut self.nodes[child_index];
        node.parent = Some(parent);
        node.child_index = Some(slot);
        self.snapshots[child_index] = None;
        Ok(())
    }

    /// Attachs `child` to `parent`. Does nothing if that is not possible.
    pub fn add_child(&mut self, parent: Entity, child: Entity) {
        match self.try_add_child(parent, child) {
            Ok(_) => {}
            Err(Error::NonNodeFound(ent)) => trace!("Skips add_child: {} has no node.", ent),
            Err(err) => warn!("{}", err),
        }
    }

    /// Detachs `child` from `parent`. The last child of `parent` takes over the
    /// freed slot.
    pub fn try_remove_child(&mut self, parent: Entity, child: Entity) -> Result<()> {
        self.index(parent)?;
        let child_index = self.index(child)?;

        if self.nodes[child_index].parent != Some(parent) {
            return Err(Error::NotChildOf { parent, child });
        }

        self.detach(parent, child_index);
        Ok(())
    }

    /// Detachs `child` from `parent`. Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: Entity, child: Entity) {
        if let Err(err) = self.try_remove_child(parent, child) {
            trace!("Skips remove_child: {}", err);
        }
    }

    fn detach(&mut self, parent: Entity, child_index: usize) {
        let (ent, slot) = {
            let node = &mut self.nodes[child_index];
            node.parent = None;
            (node.ent, node.child_index.take())
        };

        self.snapshots[child_index] = None;

        let (parent_index, slot) = match (self.remap.get(&parent), slot) {
            (Some(&parent_index), Some(slot)) => (parent_index, slot),
            _ => return,
        };

        let moved = {
            let children = &mut self.nodes[parent_index].children;
            debug_assert!(children[slot] == ent, "Corrupted child slot of {}.", ent);
            children.swap_remove(slot);
            children.get(slot).cloned()
        };

        if let Some(moved) = moved {
            if let Some(&mi) = self.remap.get(&moved) {
                self.nodes[mi].child_index = Some(slot);
            }
        }
    }
}

impl SceneGraph {
    /// Registers `ent` as a traversal seed of propagation. Roots are visited in
    /// registration order.
    pub fn try_register_root(&mut self, ent: Entity) -> Result<()> {
        let index = self.index(ent)?;

        if self.nodes[index].parent.is_some() {
            return Err(Error::HasParent(ent));
        }

        if !self.roots.contains(&ent) {
            self.roots.push(ent);
            self.snapshots[index] = None;
        }

        Ok(())
    }

    /// Registers `ent` as scene root. Does nothing if that is not possible.
    pub fn register_root(&mut self, ent: Entity) {
        if let Err(err) = self.try_register_root(ent) {
            warn!("{}", err);
        }
    }

    /// Removes `ent` from the scene roots. Returns false if it was not registered.
    pub fn unregister_root(&mut self, ent: Entity) -> bool {
        if let Some(position) = self.roots.iter().position(|&v| v == ent) {
            self.roots.remove(position);
            true
        } else {
            false
        }
    }

    /// Returns true if `ent` is a registered scene root.
    #[inline]
    pub fn is_root(&self, ent: Entity) -> bool {
        self.roots.contains(&ent)
    }

    /// Gets the scene roots in registration order.
    #[inline]
    pub fn roots(&self) -> &[Entity] {
        &self.roots
    }
}

impl SceneGraph {
    /// Gets the transform in local space.
    #[inline]
    pub fn local_transform(&self, ent: Entity) -> Option<Transform> {
        self.remap.get(&ent).map(|&index| self.transforms[index])
    }

    /// Sets the transform in local space.
    #[inline]
    pub fn set_local_transform(&mut self, ent: Entity, transform: Transform) {
        if let Some(&index) = self.remap.get(&ent) {
            self.transforms[index] = transform;
        }
    }

    /// Gets position of the transform in local space.
    #[inline]
    pub fn local_position(&self, ent: Entity) -> Option<Vector3<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.transforms[index].position)
    }

    /// Sets position of the transform in local space.
    #[inline]
    pub fn set_local_position<T>(&mut self, ent: Entity, position: T)
    where
        T: Into<Vector3<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            self.transforms[index].position = position.into();
        }
    }

    /// Moves the transform in the direction and distance of translation.
    #[inline]
    pub fn translate<T>(&mut self, ent: Entity, translation: T)
    where
        T: Into<Vector3<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            self.transforms[index].position += translation.into();
        }
    }

    /// Gets rotation of the transform in local space.
    #[inline]
    pub fn local_rotation(&self, ent: Entity) -> Option<Quaternion<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.transforms[index].rotation)
    }

    /// Sets rotation of the transform in local space.
    #[inline]
    pub fn set_local_rotation<T>(&mut self, ent: Entity, rotation: T)
    where
        T: Into<Quaternion<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            self.transforms[index].rotation = rotation.into();
        }
    }

    /// Applies a rotation of Entity.
    #[inline]
    pub fn rotate<T>(&mut self, ent: Entity, rotation: T)
    where
        T: Into<Quaternion<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            self.transforms[index].rotation = rotation.into() * self.transforms[index].rotation;
        }
    }

    /// Gets scale of the transform in local space.
    #[inline]
    pub fn local_scale(&self, ent: Entity) -> Option<Vector3<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.transforms[index].scale)
    }

    /// Sets scale of the transform in local space.
    #[inline]
    pub fn set_local_scale<T>(&mut self, ent: Entity, scale: T)
    where
        T: Into<Vector3<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            self.transforms[index].scale = scale.into();
        }
    }

    /// Gets the local matrix built by the latest `build_local_matrices`.
    #[inline]
    pub fn local_matrix(&self, ent: Entity) -> Option<Matrix4<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.local_matrices[index])
    }

    /// Gets the matrix from local space to scene space, as of the latest `propagate`.
    #[inline]
    pub fn world_matrix(&self, ent: Entity) -> Option<Matrix4<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.world_matrices[index])
    }

    /// Gets position in scene space, as of the latest `propagate`.
    #[inline]
    pub fn world_position(&self, ent: Entity) -> Option<Vector3<f32>> {
        self.world_matrix(ent).map(|m| m.w.truncate())
    }

    /// Gets the update state of this tick.
    #[inline]
    pub fn update_state(&self, ent: Entity) -> Option<UpdateState> {
        self.remap.get(&ent).map(|&index| self.states[index])
    }
}
