use std::path::Path;

use kiln_common::GameObjectHandle;
use tracing::info;

use crate::error::LevelError;
use crate::factory::GameObjectFactory;
use crate::object::GameObject;
use crate::pool::GameObjectPool;
use crate::service::{Service, ServiceRegistry};

/// A world: a service registry plus an object pool, driven one frame at a
/// time by a single thread.
///
/// Lifecycle: register services, `initialize(capacity)`, loop
/// `update` / `render` / `debug_ui`, then `terminate`. Capacity is fixed
/// at initialization and the service set is fixed for the world's
/// lifetime.
pub struct GameWorld {
    services: ServiceRegistry,
    pool: GameObjectPool,
    initialized: bool,
}

impl GameWorld {
    pub fn new() -> Self {
        Self {
            services: ServiceRegistry::new(),
            pool: GameObjectPool::new(),
            initialized: false,
        }
    }

    /// Register a service. Adding one after `initialize` is a caller bug.
    pub fn add_service<S: Service>(&mut self, service: S) -> &mut S {
        assert!(
            !self.initialized,
            "GameWorld: cannot add a service after initialize"
        );
        self.services.add(service)
    }

    /// Type-erased variant used by the level loader and custom resolvers.
    pub fn add_boxed_service(&mut self, service: Box<dyn Service>) -> &mut dyn Service {
        assert!(
            !self.initialized,
            "GameWorld: cannot add a service after initialize"
        );
        self.services.add_boxed(service)
    }

    pub fn get_service<S: Service>(&self) -> Option<&S> {
        self.services.get()
    }

    pub fn get_service_mut<S: Service>(&mut self) -> Option<&mut S> {
        self.services.get_mut()
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Initialize services in registration order, then allocate the pool.
    pub fn initialize(&mut self, capacity: u32) {
        assert!(!self.initialized, "GameWorld: already initialized");
        self.services.initialize_all();
        self.pool.initialize(capacity);
        self.initialized = true;
        info!(capacity, "world initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Tear down services in registration order, each released as soon as
    /// its terminate hook returns. Pooled objects drop with the pool.
    /// Safe to call on a world that never initialized.
    pub fn terminate(&mut self) {
        if !self.initialized {
            return;
        }
        self.services.terminate_all();
        self.initialized = false;
        info!("world terminated");
    }

    /// Drive one simulation step: services in registration order, then
    /// every live object's components, then the destroy flush.
    pub fn update(&mut self, delta_time: f32) {
        self.services.update_all(&mut self.pool, delta_time);
        for object in self.pool.iter_mut() {
            object.update(delta_time);
        }
        self.pool.process_destroy_list();
    }

    /// Drive the render pass: services in registration order, then live
    /// objects.
    pub fn render(&mut self) {
        self.services.render_all(&self.pool);
        for object in self.pool.iter_mut() {
            object.render();
        }
    }

    /// Drive the observational debug pass: live objects first, then
    /// services.
    pub fn debug_ui(&mut self) {
        for object in self.pool.iter_mut() {
            object.debug_ui();
        }
        self.services.debug_ui_all(&self.pool);
    }

    /// Claim a slot and populate the new object from `template` through
    /// the factory. Returns `Ok(None)` when the pool is exhausted.
    ///
    /// The object comes back uninitialized: the caller decides when to run
    /// `initialize` (the level loader does so after applying per-instance
    /// overrides).
    pub fn create_game_object(
        &mut self,
        factory: &dyn GameObjectFactory,
        template: impl AsRef<Path>,
        name: impl Into<String>,
    ) -> Result<Option<GameObjectHandle>, LevelError> {
        let Some(object) = self.pool.create(name) else {
            return Ok(None);
        };
        let handle = object.handle();
        factory.make(template.as_ref(), object)?;
        Ok(Some(handle))
    }

    pub fn get_game_object(&self, handle: GameObjectHandle) -> Option<&GameObject> {
        self.pool.get(handle)
    }

    pub fn get_game_object_mut(&mut self, handle: GameObjectHandle) -> Option<&mut GameObject> {
        self.pool.get_mut(handle)
    }

    pub fn find_game_object(&self, name: &str) -> Option<&GameObject> {
        self.pool.find(name)
    }

    pub fn find_game_object_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.pool.find_mut(name)
    }

    /// Request deferred destruction; see [`GameObjectPool::destroy`].
    pub fn destroy_game_object(&mut self, handle: GameObjectHandle) {
        self.pool.destroy(handle);
    }

    pub fn pool(&self) -> &GameObjectPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut GameObjectPool {
        &mut self.pool
    }
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentKind, TypedComponent};
    use std::any::Any;

    struct Tag {
        updates_seen: u32,
    }

    impl Component for Tag {
        fn kind(&self) -> ComponentKind {
            ComponentKind::Mesh
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn update(&mut self, _delta_time: f32) {
            self.updates_seen += 1;
        }
    }

    impl TypedComponent for Tag {
        const KIND: ComponentKind = ComponentKind::Mesh;
    }

    struct StubFactory;

    impl GameObjectFactory for StubFactory {
        fn make(&self, _template_path: &Path, object: &mut GameObject) -> Result<(), LevelError> {
            object.add_component(Tag {
                updates_seen: 0,
            });
            Ok(())
        }
    }

    struct Reaper {
        victim_name: &'static str,
        replacement: Option<&'static str>,
    }

    impl Service for Reaper {
        fn name(&self) -> &'static str {
            "Reaper"
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn update(&mut self, pool: &mut GameObjectPool, _delta_time: f32) {
            if let Some(handle) = pool.find(self.victim_name).map(|o| o.handle()) {
                pool.destroy(handle);
                if let Some(replacement) = self.replacement.take() {
                    pool.create(replacement);
                }
            }
        }
    }

    #[test]
    fn created_object_resolves_by_handle_and_name() {
        let mut world = GameWorld::new();
        world.initialize(4);
        let handle = world
            .create_game_object(&StubFactory, "ignored.json", "hero")
            .unwrap()
            .unwrap();
        let by_handle = world.get_game_object(handle).unwrap();
        assert_eq!(by_handle.name(), "hero");
        assert_eq!(
            world.find_game_object("hero").map(|o| o.handle()),
            Some(handle)
        );
        // Creation never initializes; that is the caller's call.
        assert!(!by_handle.is_initialized());
        assert!(by_handle.has_component(ComponentKind::Mesh));
    }

    #[test]
    fn update_flushes_the_destroy_queue() {
        let mut world = GameWorld::new();
        world.initialize(2);
        let handle = world
            .create_game_object(&StubFactory, "ignored.json", "brief")
            .unwrap()
            .unwrap();
        world.destroy_game_object(handle);
        assert_eq!(world.pool().pending_destroy_count(), 1);
        world.update(0.016);
        assert_eq!(world.pool().pending_destroy_count(), 0);
        assert!(world.get_game_object(handle).is_none());
        assert_eq!(world.pool().free_count(), 2);
    }

    #[test]
    fn service_can_destroy_and_create_mid_update() {
        let mut world = GameWorld::new();
        world.add_service(Reaper {
            victim_name: "victim",
            replacement: Some("replacement"),
        });
        world.initialize(2);
        let victim = world
            .create_game_object(&StubFactory, "ignored.json", "victim")
            .unwrap()
            .unwrap();

        // The service destroys the victim and creates a replacement in the
        // same update pass; the flush at the end of the pass frees the slot.
        world.update(0.016);

        assert!(world.get_game_object(victim).is_none());
        let replacement = world.find_game_object("replacement").unwrap().handle();
        assert_ne!(replacement.index(), victim.index());
        assert_eq!(world.pool().live_count(), 1);
        assert_eq!(world.pool().free_count(), 1);
    }

    #[test]
    fn exhausted_pool_returns_none_without_error() {
        let mut world = GameWorld::new();
        world.initialize(1);
        world
            .create_game_object(&StubFactory, "ignored.json", "only")
            .unwrap()
            .unwrap();
        let result = world
            .create_game_object(&StubFactory, "ignored.json", "extra")
            .unwrap();
        assert!(result.is_none());
        assert_eq!(world.pool().live_count(), 1);
    }

    #[test]
    fn service_lookup_matches_exact_instance() {
        let mut world = GameWorld::new();
        world.add_service(Reaper {
            victim_name: "nobody",
            replacement: None,
        });
        world.initialize(0);
        assert!(world.get_service::<Reaper>().is_some());
        assert_eq!(world.service_count(), 1);
    }

    #[test]
    #[should_panic(expected = "cannot add a service after initialize")]
    fn add_service_after_initialize_panics() {
        let mut world = GameWorld::new();
        world.initialize(0);
        world.add_service(Reaper {
            victim_name: "nobody",
            replacement: None,
        });
    }

    #[test]
    #[should_panic(expected = "already initialized")]
    fn double_initialize_panics() {
        let mut world = GameWorld::new();
        world.initialize(0);
        world.initialize(0);
    }

    #[test]
    fn terminate_is_idempotent() {
        let mut world = GameWorld::new();
        world.initialize(0);
        world.terminate();
        world.terminate();
        assert!(!world.is_initialized());
    }
}
