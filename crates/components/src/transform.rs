use std::any::Any;

use glam::{EulerRot, Quat, Vec3};
use kiln_common::Transform;
use kiln_world::{Component, ComponentKind, LevelError, TypedComponent};
use serde::Deserialize;
use serde_json::Value;

/// Positional state for a game object.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformComponent {
    pub transform: Transform,
}

impl TransformComponent {
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TransformOverrides {
    position: Option<[f32; 3]>,
    /// Euler angles in degrees, applied XYZ.
    rotation: Option<[f32; 3]>,
    scale: Option<[f32; 3]>,
}

impl Component for TransformComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Transform
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let overrides: TransformOverrides = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.kind().name(), e))?;
        if let Some([x, y, z]) = overrides.position {
            self.transform.position = Vec3::new(x, y, z);
        }
        if let Some([x, y, z]) = overrides.rotation {
            self.transform.rotation = Quat::from_euler(
                EulerRot::XYZ,
                x.to_radians(),
                y.to_radians(),
                z.to_radians(),
            );
        }
        if let Some([x, y, z]) = overrides.scale {
            self.transform.scale = Vec3::new(x, y, z);
        }
        Ok(())
    }
}

impl TypedComponent for TransformComponent {
    const KIND: ComponentKind = ComponentKind::Transform;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_override_keeps_defaults() {
        let mut component = TransformComponent::default();
        component
            .deserialize(&json!({ "Position": [1.0, 2.0, 3.0] }))
            .unwrap();
        assert_eq!(component.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(component.transform.rotation, Quat::IDENTITY);
        assert_eq!(component.transform.scale, Vec3::ONE);
    }

    #[test]
    fn rotation_is_euler_degrees() {
        let mut component = TransformComponent::default();
        component
            .deserialize(&json!({ "Rotation": [0.0, 90.0, 0.0] }))
            .unwrap();
        let expected = Quat::from_euler(EulerRot::XYZ, 0.0, 90f32.to_radians(), 0.0);
        assert!(component.transform.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn malformed_override_is_an_error() {
        let mut component = TransformComponent::default();
        let err = component
            .deserialize(&json!({ "Position": "not an array" }))
            .unwrap_err();
        assert!(err.to_string().contains("TransformComponent"));
    }
}
