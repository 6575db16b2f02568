//! Generation checked handles.

use std::fmt::Debug;
use std::hash::Hash;

/// Slot number inside a `HandlePool`. 32 bits keeps index and version in one word.
pub type HandleIndex = u32;

/// A slot index paired with the version its slot had when the handle was issued.
///
/// Freeing a slot bumps its version, so every handle still naming that slot goes
/// stale. A recycled index never aliases a deleted entity or blueprint.
pub trait HandleLike: Debug + Copy + Hash + Eq + Send + Sync {
    fn new(index: HandleIndex, version: HandleIndex) -> Self;
    fn index(&self) -> HandleIndex;
    fn version(&self) -> HandleIndex;
}

/// Declares a typed handle, e.g. `impl_handle!(Entity)`. Handles of different
/// types can not be mixed up even though they share a layout.
#[macro_export]
macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            index: $crate::utils::handle::HandleIndex,
            version: $crate::utils::handle::HandleIndex,
        }

        impl $name {
            /// The recycled slot this handle names.
            #[inline]
            pub fn index(self) -> $crate::utils::handle::HandleIndex {
                self.index
            }

            /// The generation of the slot when this handle was issued.
            #[inline]
            pub fn version(self) -> $crate::utils::handle::HandleIndex {
                self.version
            }
        }

        impl $crate::utils::handle::HandleLike for $name {
            #[inline]
            fn new(
                index: $crate::utils::handle::HandleIndex,
                version: $crate::utils::handle::HandleIndex,
            ) -> Self {
                $name { index, version }
            }

            #[inline]
            fn index(&self) -> $crate::utils::handle::HandleIndex {
                self.index
            }

            #[inline]
            fn version(&self) -> $crate::utils::handle::HandleIndex {
                self.version
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}#{}v{}", stringify!($name), self.index, self.version)
            }
        }
    };
}
