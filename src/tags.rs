use inlinable_string::InlinableString;

use crate::utils::hash::FastHashMap;
use crate::Entity;

/// Names of entities.
#[derive(Default)]
pub struct Tags {
    names: FastHashMap<Entity, InlinableString>,
}

impl Tags {
    pub fn new() -> Self {
        Tags {
            names: FastHashMap::default(),
        }
    }

    #[inline]
    pub fn add<T: Into<InlinableString>>(&mut self, ent: Entity, name: T) {
        self.names.insert(ent, name.into());
    }

    #[inline]
    pub fn remove(&mut self, ent: Entity) {
        self.names.remove(&ent);
    }

    #[inline]
    pub fn name(&self, ent: Entity) -> Option<&str> {
        self.names.get(&ent).map(|v| v.as_ref())
    }
}
