use std::fs;
use std::path::Path;

use kiln_components::TemplateFactory;
use kiln_world::{ComponentKind, GameObjectFactory, GameWorld, LevelError, Service};
use serde_json::Value;
use tracing::{info, warn};

use crate::{CameraService, PhysicsService, RenderService, UpdateService};

/// Hook consulted before built-in service name dispatch, so applications
/// can ship services the core has never heard of.
pub type ServiceResolver = Box<dyn Fn(&str) -> Option<Box<dyn Service>>>;

/// Loads a level document into a fresh world.
///
/// A level has three sections, applied strictly in order:
///
/// ```json
/// {
///   "Services": { "CameraService": { } },
///   "Capacity": 8,
///   "GameObjects": { "name": { "Template": "crate.json" } }
/// }
/// ```
///
/// Services register and deserialize first, then the world initializes
/// with the declared capacity, then game objects are created, overridden,
/// and initialized in document order. Template paths resolve relative to
/// the level file's directory. Objects never reference each other at load
/// time; anything that needs another object resolves it by name at
/// runtime.
pub struct LevelLoader {
    factory: Box<dyn GameObjectFactory>,
    resolver: Option<ServiceResolver>,
}

impl LevelLoader {
    pub fn new() -> Self {
        Self {
            factory: Box::new(TemplateFactory),
            resolver: None,
        }
    }

    /// Replace the template factory.
    pub fn with_factory(mut self, factory: impl GameObjectFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// Install a resolver consulted before the built-in service names.
    pub fn with_resolver(
        mut self,
        resolver: impl Fn(&str) -> Option<Box<dyn Service>> + 'static,
    ) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Load `path` into `world`. The world must not be initialized yet.
    ///
    /// Any error aborts the load; no rollback of already-applied steps is
    /// attempted.
    pub fn load(&self, world: &mut GameWorld, path: impl AsRef<Path>) -> Result<(), LevelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: Value = serde_json::from_str(&text).map_err(|source| LevelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let services = doc
            .get("Services")
            .and_then(Value::as_object)
            .ok_or(LevelError::MissingSection("Services"))?;
        for (name, config) in services {
            let service = self.resolve_service(world, name)?;
            service.deserialize(config)?;
        }

        let capacity = doc
            .get("Capacity")
            .ok_or(LevelError::MissingSection("Capacity"))?
            .as_u64()
            .and_then(|c| u32::try_from(c).ok())
            .ok_or(LevelError::InvalidCapacity)?;
        world.initialize(capacity);

        let objects = doc
            .get("GameObjects")
            .and_then(Value::as_object)
            .ok_or(LevelError::MissingSection("GameObjects"))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for (name, entry) in objects {
            self.load_game_object(world, base_dir, name, entry)?;
        }

        info!(
            path = %path.display(),
            capacity,
            services = world.service_count(),
            objects = world.pool().live_count(),
            "level loaded"
        );
        Ok(())
    }

    fn load_game_object(
        &self,
        world: &mut GameWorld,
        base_dir: &Path,
        name: &str,
        entry: &Value,
    ) -> Result<(), LevelError> {
        let template = entry
            .get("Template")
            .and_then(Value::as_str)
            .ok_or_else(|| LevelError::MissingTemplate {
                object: name.to_string(),
            })?;
        let template_path = base_dir.join(template);
        let Some(handle) = world.create_game_object(self.factory.as_ref(), &template_path, name)?
        else {
            warn!(object = %name, "skipped: no free slots");
            return Ok(());
        };

        if let Some(blocks) = entry.as_object() {
            for (key, value) in blocks {
                if key == "Template" {
                    continue;
                }
                let kind = ComponentKind::from_name(key)
                    .ok_or_else(|| LevelError::UnknownComponent(key.clone()))?;
                // Overrides apply only when the template actually attached
                // the component.
                if let Some(component) = world
                    .get_game_object_mut(handle)
                    .and_then(|object| object.component_mut_by_kind(kind))
                {
                    component.deserialize(value)?;
                }
            }
        }

        if let Some(object) = world.get_game_object_mut(handle) {
            object.initialize();
        }
        Ok(())
    }

    fn resolve_service<'w>(
        &self,
        world: &'w mut GameWorld,
        name: &str,
    ) -> Result<&'w mut dyn Service, LevelError> {
        if let Some(resolver) = &self.resolver {
            if let Some(service) = resolver(name) {
                info!(service = %name, "custom service registered");
                return Ok(world.add_boxed_service(service));
            }
        }
        let service: Box<dyn Service> = match name {
            "CameraService" => Box::new(CameraService::default()),
            "UpdateService" => Box::new(UpdateService::default()),
            "RenderService" => Box::new(RenderService::default()),
            "PhysicsService" => Box::new(PhysicsService::default()),
            _ => return Err(LevelError::UnknownService(name.to_string())),
        };
        Ok(world.add_boxed_service(service))
    }
}

impl Default for LevelLoader {
    fn default() -> Self {
        Self::new()
    }
}
