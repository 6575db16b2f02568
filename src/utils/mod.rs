//! Commonly used utilities like handles, pools and hash containers.

#[macro_use]
pub mod handle;
pub mod arena;
pub mod handle_pool;
pub mod hash;

pub mod prelude {
    pub use super::arena::Arena;
    pub use super::handle::{HandleIndex, HandleLike};
    pub use super::handle_pool::HandlePool;
    pub use super::hash::FastHashMap;
}
