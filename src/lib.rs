//! # What is This?
//!
//! `orrery` keeps the world transforms of entity hierarchies up to date. Every
//! spatial entity has a local transform relative to its parent; once per frame the
//! changed local matrices are rebuilt and world matrices are propagated down the
//! hierarchy, breadth-first from the registered scene roots. Unchanged branches
//! are not recomputed.
//!
//! ```rust
//! use orrery::math::Vector3;
//! use orrery::prelude::*;
//!
//! let mut world = World::new();
//! let room = world.create("room");
//! let table = world.create("table");
//!
//! world.register_root(room);
//! world.add_child(room, table);
//! world.scene.set_local_position(table, [1.0, 0.0, 0.0]);
//!
//! world.advance();
//! assert_eq!(world.scene.world_position(table), Some(Vector3::new(1.0, 0.0, 0.0)));
//! ```

#[macro_use]
extern crate log;

#[macro_use]
pub mod utils;
pub mod math;

pub mod blueprint;
pub mod errors;
pub mod renderer;
pub mod settings;
pub mod spatial;
pub mod tags;
pub mod world;

impl_handle!(Entity);

pub mod prelude {
    pub use crate::blueprint::{Blueprint, BlueprintHandle, BlueprintNode};
    pub use crate::errors::{Error, Result};
    pub use crate::renderer::{HeadlessRenderer, Renderer};
    pub use crate::settings::SceneParams;
    pub use crate::spatial::prelude::*;
    pub use crate::world::World;
    pub use crate::Entity;
}
