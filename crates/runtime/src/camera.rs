use std::any::Any;

use kiln_common::GameObjectHandle;
use kiln_world::{GameObjectPool, LevelError, Service};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Tracks the game object that owns the main camera.
///
/// The tracked handle is re-resolved from the object's name whenever it
/// goes stale, so the service survives the camera object being destroyed
/// and later recreated under the same name. This is deliberately lazy:
/// the level loader never wires object references at load time.
#[derive(Debug, Default)]
pub struct CameraService {
    main_camera_name: Option<String>,
    main_camera: GameObjectHandle,
}

impl CameraService {
    /// Handle of the current main camera object; `INVALID` while no object
    /// with the configured name is alive.
    pub fn main_camera(&self) -> GameObjectHandle {
        self.main_camera
    }

    pub fn set_main_camera_name(&mut self, name: impl Into<String>) {
        self.main_camera_name = Some(name.into());
        self.main_camera = GameObjectHandle::INVALID;
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CameraServiceConfig {
    main_camera: Option<String>,
}

impl Service for CameraService {
    fn name(&self) -> &'static str {
        "CameraService"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn update(&mut self, pool: &mut GameObjectPool, _delta_time: f32) {
        if pool.is_valid(self.main_camera) {
            return;
        }
        self.main_camera = self
            .main_camera_name
            .as_deref()
            .and_then(|name| pool.find(name))
            .map(|object| object.handle())
            // An occupant awaiting the destroy flush still matches by name
            // but its own handle is already stale; skip it.
            .filter(|handle| pool.is_valid(*handle))
            .unwrap_or(GameObjectHandle::INVALID);
        if pool.is_valid(self.main_camera) {
            debug!(camera = self.main_camera_name.as_deref(), "main camera resolved");
        }
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let config: CameraServiceConfig = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.name(), e))?;
        if let Some(name) = config.main_camera {
            self.set_main_camera_name(name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_world::GameWorld;
    use serde_json::json;

    fn world_with_camera_service() -> GameWorld {
        let mut world = GameWorld::new();
        let service = world.add_service(CameraService::default());
        service
            .deserialize(&json!({ "MainCamera": "main_cam" }))
            .unwrap();
        world.initialize(2);
        world
    }

    #[test]
    fn resolves_camera_by_name_and_follows_recreation() {
        let mut world = world_with_camera_service();
        world.pool_mut().create("main_cam").unwrap();
        world.update(0.016);
        let first = world.get_service::<CameraService>().unwrap().main_camera();
        assert!(world.pool().is_valid(first));

        // Destroy the camera: the handle goes stale immediately, and the
        // service must not latch onto the pending-destroy occupant.
        world.destroy_game_object(first);
        world.update(0.016);
        let during = world.get_service::<CameraService>().unwrap().main_camera();
        assert_eq!(during, GameObjectHandle::INVALID);

        // Recreate under the same name: the service picks up the new
        // object with a fresh generation.
        world.pool_mut().create("main_cam").unwrap();
        world.update(0.016);
        let second = world.get_service::<CameraService>().unwrap().main_camera();
        assert!(world.pool().is_valid(second));
        assert_ne!(second, first);
    }

    #[test]
    fn unconfigured_service_stays_invalid() {
        let mut world = GameWorld::new();
        world.add_service(CameraService::default());
        world.initialize(1);
        world.pool_mut().create("whatever").unwrap();
        world.update(0.016);
        assert_eq!(
            world.get_service::<CameraService>().unwrap().main_camera(),
            GameObjectHandle::INVALID
        );
    }
}
