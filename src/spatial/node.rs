use smallvec::SmallVec;

use crate::Entity;

/// `Node` records the tree relationships of a spatial entity.
///
/// Relations are stored as `Entity` values instead of references, so every access
/// goes through the membership index of the `SceneGraph`. A stale entity is just a
/// lookup miss, never a dangling pointer.
///
/// `child_index` is the slot of this node inside `parent.children`, which makes
/// detaching O(1). It is `Some` if and only if `parent` is `Some`.
#[derive(Debug, Clone)]
pub struct Node {
    pub ent: Entity,
    pub parent: Option<Entity>,
    pub children: SmallVec<[Entity; 4]>,
    pub child_index: Option<usize>,
}

impl Node {
    pub fn new(ent: Entity) -> Self {
        Node {
            ent,
            parent: None,
            children: SmallVec::new(),
            child_index: None,
        }
    }
}
