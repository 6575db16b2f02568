/// Marks whether the local matrix of an entity, or the world matrix it inherits,
/// changed during the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    NotUpdated,
    Updated,
}

impl Default for UpdateState {
    fn default() -> Self {
        UpdateState::NotUpdated
    }
}

impl UpdateState {
    #[inline]
    pub fn is_updated(self) -> bool {
        self == UpdateState::Updated
    }
}
