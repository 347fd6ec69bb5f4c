use std::any::Any;

use glam::Vec3;
use kiln_components::{RigidBodyComponent, TransformComponent};
use kiln_world::{GameObjectPool, LevelError, Service};
use serde::Deserialize;
use serde_json::Value;

/// Integrates gravity into rigid bodies and applies their velocities to
/// sibling transforms. Kinematic bodies are left alone.
#[derive(Debug)]
pub struct PhysicsService {
    gravity: Vec3,
}

impl PhysicsService {
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }
}

impl Default for PhysicsService {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PhysicsServiceConfig {
    gravity: Option<[f32; 3]>,
}

impl Service for PhysicsService {
    fn name(&self) -> &'static str {
        "PhysicsService"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn update(&mut self, pool: &mut GameObjectPool, delta_time: f32) {
        for object in pool.iter_mut() {
            let Some(body) = object.get_component_mut::<RigidBodyComponent>() else {
                continue;
            };
            if body.is_kinematic {
                continue;
            }
            body.velocity += self.gravity * body.gravity_scale * delta_time;
            let velocity = body.velocity;
            if let Some(transform) = object.get_component_mut::<TransformComponent>() {
                transform.transform.translate(velocity * delta_time);
            }
        }
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let config: PhysicsServiceConfig = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.name(), e))?;
        if let Some(gravity) = config.gravity {
            self.gravity = Vec3::from(gravity);
        }
        Ok(())
    }
}
