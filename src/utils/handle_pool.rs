use std::cmp::Reverse;
use std::collections::binary_heap::BinaryHeap;
use std::marker::PhantomData;

use super::handle::{HandleIndex, HandleLike};

/// Issues typed handles and tells whether a handle is still alive.
///
/// Every slot keeps a version which is odd while the slot is in use. Creating
/// and freeing both bump it, so a freed handle never matches its slot again.
/// Freed slots are reused lowest index first, which keeps the pool compact.
pub struct HandlePool<H: HandleLike> {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<Reverse<HandleIndex>>,
    _phantom: PhantomData<H>,
}

impl<H: HandleLike> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool::new()
    }
}

impl<H: HandleLike> HandlePool<H> {
    pub fn new() -> Self {
        HandlePool::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        HandlePool {
            versions: Vec::with_capacity(capacity),
            frees: BinaryHeap::new(),
            _phantom: PhantomData,
        }
    }

    /// Issues a handle, recycling the lowest freed slot if there is one.
    pub fn create(&mut self) -> H {
        match self.frees.pop() {
            Some(Reverse(index)) => {
                let version = &mut self.versions[index as usize];
                *version += 1;
                H::new(index, *version)
            }
            None => {
                let index = self.versions.len() as HandleIndex;
                self.versions.push(1);
                H::new(index, 1)
            }
        }
    }

    /// Returns true if `handle` was issued by this pool and not freed since.
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        self.versions
            .get(handle.index() as usize)
            .map_or(false, |&v| v & 0x1 == 1 && v == handle.version())
    }

    /// Frees the slot of `handle`. Returns false if it was already stale.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.contains(handle) {
            return false;
        }

        self.versions[handle.index() as usize] += 1;
        self.frees.push(Reverse(handle.index()));
        true
    }

    /// Number of alive handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
