use serde::{Deserialize, Serialize};

/// Opaque identifier for a pooled game object.
///
/// A handle is a (slot index, generation) pair. It never points at anything
/// by itself: the owning pool resolves it, and resolution fails once the
/// slot's generation has moved past the handle's. Copies are cheap and safe
/// to keep across frames; code acting on an object it does not currently
/// borrow must re-resolve the handle through the pool every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameObjectHandle {
    index: u32,
    generation: u32,
}

impl GameObjectHandle {
    /// A handle no pool will ever resolve. Useful for "no target" fields.
    pub const INVALID: Self = Self {
        index: u32::MAX,
        generation: u32::MAX,
    };

    /// Handles are issued by the object pool; constructing one by hand only
    /// makes sense in tests.
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index this handle refers to.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation the slot had when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl Default for GameObjectHandle {
    fn default() -> Self {
        Self::INVALID
    }
}
