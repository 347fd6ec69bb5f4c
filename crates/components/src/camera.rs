use std::any::Any;

use glam::Vec3;
use kiln_world::{Component, ComponentKind, LevelError, TypedComponent};
use serde::Deserialize;
use serde_json::Value;

/// A stationary view into the world. The renderer consumes the values; the
/// component only carries them through the object lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct CameraComponent {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, -5.0),
            look_at: Vec3::ZERO,
            fov_degrees: 60.0,
            near_plane: 0.01,
            far_plane: 1000.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CameraOverrides {
    position: Option<[f32; 3]>,
    look_at: Option<[f32; 3]>,
    fov: Option<f32>,
    near: Option<f32>,
    far: Option<f32>,
}

impl Component for CameraComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Camera
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let overrides: CameraOverrides = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.kind().name(), e))?;
        if let Some(position) = overrides.position {
            self.position = Vec3::from(position);
        }
        if let Some(look_at) = overrides.look_at {
            self.look_at = Vec3::from(look_at);
        }
        if let Some(fov) = overrides.fov {
            self.fov_degrees = fov;
        }
        if let Some(near) = overrides.near {
            self.near_plane = near;
        }
        if let Some(far) = overrides.far {
            self.far_plane = far;
        }
        Ok(())
    }
}

impl TypedComponent for CameraComponent {
    const KIND: ComponentKind = ComponentKind::Camera;
}

/// Movement tuning for a player-driven camera. Input handling lives
/// outside the core; the component stores the tuning and rides the same
/// lifecycle as every other component.
#[derive(Debug, Clone, Copy)]
pub struct FpsCameraComponent {
    pub move_speed: f32,
    pub turn_speed: f32,
    pub sprint_multiplier: f32,
}

impl Default for FpsCameraComponent {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            turn_speed: 0.1,
            sprint_multiplier: 2.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FpsCameraOverrides {
    move_speed: Option<f32>,
    turn_speed: Option<f32>,
    sprint_multiplier: Option<f32>,
}

impl Component for FpsCameraComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::FpsCamera
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let overrides: FpsCameraOverrides = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.kind().name(), e))?;
        if let Some(move_speed) = overrides.move_speed {
            self.move_speed = move_speed;
        }
        if let Some(turn_speed) = overrides.turn_speed {
            self.turn_speed = turn_speed;
        }
        if let Some(sprint) = overrides.sprint_multiplier {
            self.sprint_multiplier = sprint;
        }
        Ok(())
    }
}

impl TypedComponent for FpsCameraComponent {
    const KIND: ComponentKind = ComponentKind::FpsCamera;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camera_override_applies_named_fields() {
        let mut camera = CameraComponent::default();
        camera
            .deserialize(&json!({ "Fov": 75.0, "LookAt": [0.0, 2.0, 0.0] }))
            .unwrap();
        assert_eq!(camera.fov_degrees, 75.0);
        assert_eq!(camera.look_at, Vec3::new(0.0, 2.0, 0.0));
        // Untouched fields keep their defaults.
        assert_eq!(camera.near_plane, 0.01);
    }

    #[test]
    fn fps_camera_override_is_defensive() {
        let mut camera = FpsCameraComponent::default();
        camera.deserialize(&json!({ "MoveSpeed": 9.0 })).unwrap();
        assert_eq!(camera.move_speed, 9.0);
        assert_eq!(camera.turn_speed, 0.1);
    }
}
