//! The seam between the scene graph and whatever draws it.

use crate::math::Matrix4;
use crate::Entity;

/// Receives the world matrix of every spatial entity once per frame.
pub trait Renderer {
    fn draw(&mut self, ent: Entity, world: &Matrix4<f32>);

    /// Called after all entities of a frame have been drawn.
    fn submit(&mut self) {}
}

/// A renderer that only records draw calls.
#[derive(Default)]
pub struct HeadlessRenderer {
    pub draws: Vec<(Entity, Matrix4<f32>)>,
    pub frames: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        HeadlessRenderer::default()
    }
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, ent: Entity, world: &Matrix4<f32>) {
        self.draws.push((ent, *world));
    }

    fn submit(&mut self) {
        self.frames += 1;
    }
}
