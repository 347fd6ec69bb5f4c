use std::any::Any;

use serde_json::Value;
use tracing::debug;

use crate::error::LevelError;
use crate::pool::GameObjectPool;

/// A per-world subsystem driven every frame alongside the object pool.
///
/// Services register before the world initializes and live for the world's
/// lifetime. Frame hooks receive the object pool as an explicit context
/// argument rather than holding a back-reference to the world.
pub trait Service: Any {
    /// Name used in diagnostics and level documents.
    fn name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn initialize(&mut self) {}
    fn terminate(&mut self) {}
    fn update(&mut self, pool: &mut GameObjectPool, delta_time: f32) {
        let _ = (pool, delta_time);
    }
    fn render(&mut self, pool: &GameObjectPool) {
        let _ = pool;
    }
    fn debug_ui(&mut self, pool: &GameObjectPool) {
        let _ = pool;
    }
    /// Apply this service's named config block from a level document.
    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let _ = value;
        Ok(())
    }
}

/// Ordered collection of services, at most one instance per concrete type.
#[derive(Default)]
pub struct ServiceRegistry {
    entries: Vec<Box<dyn Service>>,
}

impl ServiceRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn add<S: Service>(&mut self, service: S) -> &mut S {
        self.add_boxed(Box::new(service))
            .as_any_mut()
            .downcast_mut()
            .expect("added service has the added type")
    }

    /// Register a service. Registering a second service of the same
    /// concrete type is a caller bug: lookup would silently shadow one of
    /// them, so the duplicate is rejected up front.
    pub(crate) fn add_boxed(&mut self, service: Box<dyn Service>) -> &mut dyn Service {
        let type_id = service.as_any().type_id();
        assert!(
            !self.entries.iter().any(|s| s.as_any().type_id() == type_id),
            "ServiceRegistry: service `{}` is already registered",
            service.name()
        );
        debug!(service = service.name(), "service registered");
        let index = self.entries.len();
        self.entries.push(service);
        self.entries[index].as_mut()
    }

    /// First service whose concrete type is `S`, or `None` if absent.
    pub fn get<S: Service>(&self) -> Option<&S> {
        self.entries.iter().find_map(|s| s.as_any().downcast_ref())
    }

    pub fn get_mut<S: Service>(&mut self) -> Option<&mut S> {
        self.entries
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn initialize_all(&mut self) {
        for service in &mut self.entries {
            debug!(service = service.name(), "service initialized");
            service.initialize();
        }
    }

    /// Terminate in registration order, releasing each service as soon as
    /// its hook returns.
    pub(crate) fn terminate_all(&mut self) {
        for mut service in self.entries.drain(..) {
            debug!(service = service.name(), "service terminated");
            service.terminate();
        }
    }

    pub(crate) fn update_all(&mut self, pool: &mut GameObjectPool, delta_time: f32) {
        for service in &mut self.entries {
            service.update(pool, delta_time);
        }
    }

    pub(crate) fn render_all(&mut self, pool: &GameObjectPool) {
        for service in &mut self.entries {
            service.render(pool);
        }
    }

    pub(crate) fn debug_ui_all(&mut self, pool: &GameObjectPool) {
        for service in &mut self.entries {
            service.debug_ui(pool);
        }
    }
}
