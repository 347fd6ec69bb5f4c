use std::any::Any;

use glam::Vec3;
use kiln_world::{Component, ComponentKind, LevelError, TypedComponent};
use serde::Deserialize;
use serde_json::Value;

/// Dynamics state integrated by the physics service.
///
/// Kinematic bodies keep their velocity untouched by gravity and are moved
/// by gameplay code instead.
#[derive(Debug, Clone, Copy)]
pub struct RigidBodyComponent {
    pub mass: f32,
    pub is_kinematic: bool,
    pub gravity_scale: f32,
    pub velocity: Vec3,
}

impl Default for RigidBodyComponent {
    fn default() -> Self {
        Self {
            mass: 1.0,
            is_kinematic: false,
            gravity_scale: 1.0,
            velocity: Vec3::ZERO,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RigidBodyOverrides {
    mass: Option<f32>,
    is_kinematic: Option<bool>,
    gravity_scale: Option<f32>,
    velocity: Option<[f32; 3]>,
}

impl Component for RigidBodyComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::RigidBody
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let overrides: RigidBodyOverrides = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.kind().name(), e))?;
        if let Some(mass) = overrides.mass {
            self.mass = mass;
        }
        if let Some(is_kinematic) = overrides.is_kinematic {
            self.is_kinematic = is_kinematic;
        }
        if let Some(gravity_scale) = overrides.gravity_scale {
            self.gravity_scale = gravity_scale;
        }
        if let Some(velocity) = overrides.velocity {
            self.velocity = Vec3::from(velocity);
        }
        Ok(())
    }
}

impl TypedComponent for RigidBodyComponent {
    const KIND: ComponentKind = ComponentKind::RigidBody;
}
