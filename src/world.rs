//! Worlds own every entity of a game together with its components.

use crate::blueprint::{Blueprint, BlueprintHandle};
use crate::errors::{Error, Result};
use crate::math::prelude::Matrix4;
use crate::renderer::Renderer;
use crate::settings::SceneParams;
use crate::spatial::prelude::{PropagationStats, SceneGraph, Transform, UpdateState};
use crate::tags::Tags;
use crate::utils::prelude::{Arena, HandlePool};
use crate::Entity;

/// `World` owns the entities, their names and spatial components, and the
/// blueprints entities are instantiated from. There is no global state; the game
/// loop keeps a `World` and calls `advance` once per frame, before drawing.
pub struct World {
    entities: HandlePool<Entity>,
    tags: Tags,
    blueprints: Arena<BlueprintHandle, Blueprint>,
    params: SceneParams,

    pub scene: SceneGraph,
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

impl World {
    pub fn new() -> Self {
        World::with(SceneParams::default())
    }

    pub fn with(params: SceneParams) -> Self {
        let mut scene = SceneGraph::with_capacity(params.capacity);
        scene.set_prune_clean_subtrees(params.prune_clean_subtrees);

        World {
            entities: HandlePool::with_capacity(params.capacity),
            tags: Tags::new(),
            blueprints: Arena::new(),
            params,
            scene,
        }
    }

    #[inline]
    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    /// Get the length of entitis in this World.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Checks if specified `Entity` was created by this world, and has not been
    /// deleted yet.
    #[inline]
    pub fn contains(&self, ent: Entity) -> bool {
        self.entities.contains(ent)
    }

    /// Create a new Entity with default spatial components.
    pub fn create<T: AsRef<str>>(&mut self, name: T) -> Entity {
        let e = self.create_empty(name);
        self.scene.add(e, Transform::default());
        e
    }

    /// Create a new Entity without any spatial components.
    pub fn create_empty<T: AsRef<str>>(&mut self, name: T) -> Entity {
        let e = self.entities.create();
        self.tags.add(e, name.as_ref());
        e
    }

    /// Adds spatial components to an alive Entity. Does nothing if it already has them.
    pub fn add_spatial(&mut self, ent: Entity, transform: Transform) -> Result<()> {
        if !self.entities.contains(ent) {
            return Err(Error::EntityInvalid(ent));
        }

        self.scene.add(ent, transform);
        Ok(())
    }

    /// Removes the spatial components of Entity. Its children are left without parent.
    #[inline]
    pub fn remove_spatial(&mut self, ent: Entity) -> bool {
        self.scene.strip(ent)
    }

    /// Removes a Entity and all of its descendants from this world.
    pub fn delete(&mut self, ent: Entity) -> Option<Vec<Entity>> {
        let deletions = if let Some(deletions) = self.scene.remove(ent) {
            deletions
        } else if self.entities.contains(ent) {
            vec![ent]
        } else {
            return None;
        };

        for &v in &deletions {
            self.entities.free(v);
            self.tags.remove(v);
        }

        trace!("Deletes {} and {} descendants.", ent, deletions.len() - 1);
        Some(deletions)
    }

    /// Get the name of this Entity.
    #[inline]
    pub fn name(&self, ent: Entity) -> Option<&str> {
        self.tags.name(ent)
    }

    /// Set the name of this Entity.
    #[inline]
    pub fn set_name<T: AsRef<str>>(&mut self, ent: Entity, name: T) {
        if self.entities.contains(ent) {
            self.tags.add(ent, name.as_ref());
        }
    }

    /// Finds a Entity by name and returns it.
    ///
    /// The first component of the path is matched against scene roots. If name
    /// contains a '/' character, it traverses the hierarchy like a path name. Empty
    /// components are ignored.
    pub fn find<N: AsRef<str>>(&self, name: N) -> Option<Entity> {
        let mut components = name.as_ref().split('/').filter(|v| !v.is_empty());
        let first = components.next()?;

        let root = self
            .scene
            .roots()
            .iter()
            .cloned()
            .find(|&v| self.tags.name(v) == Some(first))?;

        self.walk(root, components)
    }

    /// Finds a Entity from specified searching root and returns it.
    pub fn find_from<N: AsRef<str>>(&self, root: Entity, name: N) -> Option<Entity> {
        if !self.entities.contains(root) {
            return None;
        }

        self.walk(root, name.as_ref().split('/').filter(|v| !v.is_empty()))
    }

    fn walk<'a, I>(&self, mut cursor: Entity, components: I) -> Option<Entity>
    where
        I: Iterator<Item = &'a str>,
    {
        for component in components {
            cursor = self
                .scene
                .children(cursor)
                .iter()
                .cloned()
                .find(|&child| self.tags.name(child) == Some(component))?;
        }

        Some(cursor)
    }
}

impl World {
    /// Validates and stores a blueprint.
    pub fn create_blueprint(&mut self, blueprint: Blueprint) -> Result<BlueprintHandle> {
        blueprint.validate()?;
        Ok(self.blueprints.create(blueprint))
    }

    /// Return the blueprint if exists.
    #[inline]
    pub fn blueprint(&self, handle: BlueprintHandle) -> Option<&Blueprint> {
        self.blueprints.get(handle)
    }

    /// Deletes a blueprint. Entities instantiated from it are not affected.
    #[inline]
    pub fn delete_blueprint(&mut self, handle: BlueprintHandle) -> Option<Blueprint> {
        self.blueprints.free(handle)
    }

    /// Instantiates a stored blueprint into entities of this world.
    pub fn instantiate(&mut self, handle: BlueprintHandle) -> Result<Entity> {
        let blueprint = self
            .blueprints
            .get(handle)
            .cloned()
            .ok_or_else(|| Error::BlueprintInvalid(handle))?;

        self.spawn(&blueprint)
    }

    /// Instantiates a blueprint into entities of this world, and returns the entity
    /// of its first node.
    pub fn spawn(&mut self, blueprint: &Blueprint) -> Result<Entity> {
        blueprint.validate()?;

        let mut spawned: Vec<Entity> = Vec::with_capacity(blueprint.nodes.len());
        for n in &blueprint.nodes {
            let e = self.create(&n.name);
            self.scene.set_local_transform(e, n.transform);

            if let Some(parent) = n.parent {
                self.scene.try_add_child(spawned[parent], e)?;
            }

            if n.root {
                self.scene.try_register_root(e)?;
            }

            spawned.push(e);
        }

        trace!("Spawns {} entities from blueprint.", spawned.len());
        Ok(spawned[0])
    }
}

impl World {
    /// Advances one tick: rebuilds changed local matrices, then propagates world
    /// matrices from the scene roots.
    pub fn advance(&mut self) -> PropagationStats {
        let rebuilt = self.scene.build_local_matrices();
        let stats = self.scene.propagate();

        trace!(
            "Advances world: {} local matrices rebuilt, {} world matrices written.",
            rebuilt,
            stats.written
        );

        stats
    }

    /// Hands the world matrix of every spatial entity to `renderer`.
    pub fn draw<R: Renderer>(&self, renderer: &mut R) {
        for (ent, world) in self.scene.iter() {
            renderer.draw(ent, world);
        }

        renderer.submit();
    }
}

impl World {
    /// Gets the parent node.
    #[inline]
    pub fn parent(&self, ent: Entity) -> Option<Entity> {
        self.scene.parent(ent)
    }

    /// Gets the children in stored order.
    #[inline]
    pub fn children(&self, ent: Entity) -> &[Entity] {
        self.scene.children(ent)
    }

    /// Attachs `child` to `parent`. Does nothing if that is not possible.
    #[inline]
    pub fn add_child(&mut self, parent: Entity, child: Entity) {
        self.scene.add_child(parent, child);
    }

    /// Attachs `child` to `parent`, or tells why it could not.
    #[inline]
    pub fn try_add_child(&mut self, parent: Entity, child: Entity) -> Result<()> {
        self.scene.try_add_child(parent, child)
    }

    /// Detachs `child` from `parent`. Does nothing if `child` is not a child of `parent`.
    #[inline]
    pub fn remove_child(&mut self, parent: Entity, child: Entity) {
        self.scene.remove_child(parent, child);
    }

    /// Detachs `child` from `parent`, or tells why it could not.
    #[inline]
    pub fn try_remove_child(&mut self, parent: Entity, child: Entity) -> Result<()> {
        self.scene.try_remove_child(parent, child)
    }

    /// Registers `ent` as scene root.
    #[inline]
    pub fn register_root(&mut self, ent: Entity) {
        self.scene.register_root(ent);
    }

    /// Registers `ent` as scene root, or tells why it could not.
    #[inline]
    pub fn try_register_root(&mut self, ent: Entity) -> Result<()> {
        self.scene.try_register_root(ent)
    }

    /// Removes `ent` from the scene roots.
    #[inline]
    pub fn unregister_root(&mut self, ent: Entity) -> bool {
        self.scene.unregister_root(ent)
    }

    /// Returns an iterator of references to its ancestors.
    #[inline]
    pub fn ancestors<'a>(&'a self, ent: Entity) -> impl Iterator<Item = Entity> + 'a {
        self.scene.ancestors(ent)
    }

    /// Returns an iterator of references to its descendants, in breadth-first order.
    #[inline]
    pub fn descendants<'a>(&'a self, ent: Entity) -> impl Iterator<Item = Entity> + 'a {
        self.scene.descendants(ent)
    }

    /// Gets the transform in local space.
    #[inline]
    pub fn local_transform(&self, ent: Entity) -> Option<Transform> {
        self.scene.local_transform(ent)
    }

    /// Sets the transform in local space.
    #[inline]
    pub fn set_local_transform(&mut self, ent: Entity, transform: Transform) {
        self.scene.set_local_transform(ent, transform);
    }

    /// Gets the matrix from local space to scene space, as of the latest `advance`.
    #[inline]
    pub fn world_matrix(&self, ent: Entity) -> Option<Matrix4<f32>> {
        self.scene.world_matrix(ent)
    }

    /// Gets the update state of the latest `advance`.
    #[inline]
    pub fn update_state(&self, ent: Entity) -> Option<UpdateState> {
        self.scene.update_state(ent)
    }
}
