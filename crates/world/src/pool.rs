use kiln_common::GameObjectHandle;
use tracing::{debug, warn};

use crate::object::GameObject;

/// A fixed storage cell: at most one object plus a generation counter.
struct Slot {
    object: Option<GameObject>,
    generation: u32,
}

/// Fixed-capacity slot storage for game objects.
///
/// The pool is the sole authority on object lifetime and handle validity.
/// Freed slots are reused LIFO; every destroy bumps the slot's generation,
/// so handles issued before the destroy stop resolving even though the
/// index may be reused immediately afterwards.
///
/// # Invariants
/// - Capacity is fixed at `initialize`; the slot array never grows.
/// - Every index is in exactly one of: the free stack, occupied by a live
///   object, or occupied awaiting the destroy flush.
/// - Slot generations only ever increase.
pub struct GameObjectPool {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    destroy_queue: Vec<u32>,
    initialized: bool,
}

impl GameObjectPool {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_slots: Vec::new(),
            destroy_queue: Vec::new(),
            initialized: false,
        }
    }

    /// Allocate `capacity` empty slots, all free, generation 0. Runs once;
    /// a capacity of 0 is legal and yields a pool that can hold nothing.
    pub fn initialize(&mut self, capacity: u32) {
        assert!(!self.initialized, "GameObjectPool: already initialized");
        self.slots.resize_with(capacity as usize, || Slot {
            object: None,
            generation: 0,
        });
        // LIFO stack, lowest index on top so allocation starts at slot 0.
        self.free_slots = (0..capacity).rev().collect();
        self.initialized = true;
        debug!(capacity, "object pool initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots, pending-destroy occupants included until the flush.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.object.is_some()).count()
    }

    pub fn free_count(&self) -> usize {
        self.free_slots.len()
    }

    pub fn pending_destroy_count(&self) -> usize {
        self.destroy_queue.len()
    }

    /// Claim a free slot and construct an empty, uninitialized object in
    /// it, named `name` and stamped with the slot's current generation.
    ///
    /// Returns `None` when every slot is taken: capacity is a hard limit
    /// and the failed request has no effect on the pool.
    pub fn create(&mut self, name: impl Into<String>) -> Option<&mut GameObject> {
        assert!(self.initialized, "GameObjectPool: create before initialize");
        let name = name.into();
        let Some(index) = self.free_slots.pop() else {
            warn!(name = %name, "no free slots available");
            return None;
        };
        let slot = &mut self.slots[index as usize];
        let handle = GameObjectHandle::new(index, slot.generation);
        debug!(name = %name, index, generation = slot.generation, "game object created");
        slot.object = Some(GameObject::new(name, handle));
        slot.object.as_mut()
    }

    /// Resolve a handle. Stale or out-of-range handles are an expected
    /// condition, not an error, and resolve to `None`.
    pub fn get(&self, handle: GameObjectHandle) -> Option<&GameObject> {
        if !self.is_valid(handle) {
            return None;
        }
        self.slots[handle.index() as usize].object.as_ref()
    }

    pub fn get_mut(&mut self, handle: GameObjectHandle) -> Option<&mut GameObject> {
        if !self.is_valid(handle) {
            return None;
        }
        self.slots[handle.index() as usize].object.as_mut()
    }

    /// First occupant named `name`, in slot-storage order; duplicates
    /// resolve to the lowest-index occupant.
    pub fn find(&self, name: &str) -> Option<&GameObject> {
        self.slots
            .iter()
            .filter_map(|s| s.object.as_ref())
            .find(|o| o.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.slots
            .iter_mut()
            .filter_map(|s| s.object.as_mut())
            .find(|o| o.name() == name)
    }

    /// True while `handle` still refers to the object it was issued for.
    pub fn is_valid(&self, handle: GameObjectHandle) -> bool {
        let Some(slot) = self.slots.get(handle.index() as usize) else {
            return false;
        };
        slot.generation == handle.generation() && slot.object.is_some()
    }

    /// Request destruction. The slot's generation is bumped immediately, so
    /// this handle and every copy of it stop resolving right away; the
    /// actual teardown is deferred to [`GameObjectPool::process_destroy_list`].
    ///
    /// No-op for invalid handles, which makes destroying twice harmless.
    pub fn destroy(&mut self, handle: GameObjectHandle) {
        if !self.is_valid(handle) {
            return;
        }
        self.slots[handle.index() as usize].generation += 1;
        self.destroy_queue.push(handle.index());
        debug!(index = handle.index(), "game object queued for destruction");
    }

    /// Flush the pending-destroy queue: terminate each queued object,
    /// release it, and return its slot to the free stack.
    ///
    /// The world runs this once per update, after all per-frame logic, so
    /// a destroy requested mid-iteration never frees a slot while that
    /// iteration is still running.
    pub fn process_destroy_list(&mut self) {
        let pending = std::mem::take(&mut self.destroy_queue);
        for index in pending {
            let slot = &mut self.slots[index as usize];
            let Some(mut object) = slot.object.take() else {
                panic!("GameObjectPool: destroy queue references an empty slot");
            };
            // The destroy request already bumped the generation; an object
            // whose own handle still matches is reachable and must not die.
            assert!(
                object.handle().generation() != slot.generation,
                "GameObjectPool: object `{}` is still reachable",
                object.name()
            );
            object.terminate();
            drop(object);
            self.free_slots.push(index);
            debug!(index, "game object destroyed");
        }
    }

    /// Iterate occupied slots in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.slots.iter().filter_map(|s| s.object.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.slots.iter_mut().filter_map(|s| s.object.as_mut())
    }
}
