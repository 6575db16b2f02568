//! Transforms, tree relationships and world matrix propagation of spatial entities.

pub mod graph;
pub mod node;
pub mod propagation;
pub mod state;
pub mod transform;

pub mod prelude {
    pub use super::graph::{Ancestors, Descendants, SceneGraph};
    pub use super::node::Node;
    pub use super::propagation::PropagationStats;
    pub use super::state::UpdateState;
    pub use super::transform::Transform;
}
