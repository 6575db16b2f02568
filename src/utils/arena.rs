use super::handle::HandleLike;
use super::handle_pool::HandlePool;

/// A typed slot arena. Values are named by generation checked handles, so a
/// handle to a freed value keeps missing after its slot is reused.
pub struct Arena<H: HandleLike, T: Sized> {
    handles: HandlePool<H>,
    entries: Vec<Option<T>>,
}

impl<H: HandleLike, T: Sized> Default for Arena<H, T> {
    fn default() -> Self {
        Arena::new()
    }
}

impl<H: HandleLike, T: Sized> Arena<H, T> {
    pub fn new() -> Self {
        Arena {
            handles: HandlePool::new(),
            entries: Vec::new(),
        }
    }

    /// Stores `value` and returns the handle naming it.
    pub fn create(&mut self, value: T) -> H {
        let handle = self.handles.create();
        let index = handle.index() as usize;

        if index == self.entries.len() {
            self.entries.push(Some(value));
        } else {
            self.entries[index] = Some(value);
        }

        handle
    }

    #[inline]
    pub fn get(&self, handle: H) -> Option<&T> {
        if self.handles.contains(handle) {
            self.entries[handle.index() as usize].as_ref()
        } else {
            None
        }
    }

    /// Takes the value out and recycles its slot.
    pub fn free(&mut self, handle: H) -> Option<T> {
        if self.handles.free(handle) {
            self.entries[handle.index() as usize].take()
        } else {
            None
        }
    }
}
