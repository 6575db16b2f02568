use std::mem;

use super::graph::SceneGraph;
use super::state::UpdateState;

/// Counters of a single `propagate` pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PropagationStats {
    /// Registered roots which were present in the scene graph.
    pub roots: usize,
    /// Nodes popped from the traversal queue, roots included.
    pub visited: usize,
    /// Non-root nodes whose world matrix was rewritten.
    pub written: usize,
}

impl SceneGraph {
    /// Rebuilds the local matrix of every node whose transform differs from the
    /// snapshot taken at its last rebuild, and marks it `Updated`. Every other
    /// node is marked `NotUpdated`. Returns the number of rebuilt matrices.
    ///
    /// Transforms are compared exactly, so any floating point drift is a change.
    pub fn build_local_matrices(&mut self) -> usize {
        let mut rebuilt = 0;

        let iter = self
            .transforms
            .iter()
            .zip(self.snapshots.iter_mut())
            .zip(self.local_matrices.iter_mut())
            .zip(self.states.iter_mut());

        for (((transform, snapshot), local), state) in iter {
            if *snapshot == Some(*transform) {
                *state = UpdateState::NotUpdated;
            } else {
                *local = transform.matrix();
                *snapshot = Some(*transform);
                *state = UpdateState::Updated;
                rebuilt += 1;
            }
        }

        rebuilt
    }

    /// Propagates world matrices down the hierarchy, breadth-first from every
    /// registered root in registration order.
    ///
    /// A root's world matrix is its local matrix. A child is recomputed as
    /// `parent_world * child_local` if itself or its parent was updated, and is
    /// then marked `Updated` so its own children follow. Roots and children that
    /// lost their spatial components are skipped.
    pub fn propagate(&mut self) -> PropagationStats {
        let mut stats = PropagationStats::default();
        let mut queue = mem::replace(&mut self.queue, Default::default());

        for root in &self.roots {
            let root_index = match self.remap.get(root) {
                Some(&index) => index,
                None => continue,
            };

            stats.roots += 1;
            self.world_matrices[root_index] = self.local_matrices[root_index];
            queue.push_back(root_index);

            while let Some(parent_index) = queue.pop_front() {
                stats.visited += 1;

                let parent_world = self.world_matrices[parent_index];
                let parent_updated = self.states[parent_index].is_updated();

                for child in &self.nodes[parent_index].children {
                    let child_index = match self.remap.get(child) {
                        Some(&index) => index,
                        None => continue,
                    };

                    if parent_updated || self.states[child_index].is_updated() {
                        self.world_matrices[child_index] =
                            parent_world * self.local_matrices[child_index];
                        self.states[child_index] = UpdateState::Updated;
                        stats.written += 1;
                        queue.push_back(child_index);
                    } else if !self.prune_clean_subtrees {
                        queue.push_back(child_index);
                    }
                }
            }
        }

        self.queue = queue;

        trace!(
            "Propagates {} roots, visits {} nodes and writes {} world matrices.",
            stats.roots,
            stats.visited,
            stats.written
        );

        stats
    }
}
