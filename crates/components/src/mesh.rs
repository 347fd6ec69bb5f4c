use std::any::Any;

use kiln_world::{Component, ComponentKind, LevelError, TypedComponent};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

/// Procedural shape parameters consumed by the render service.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum MeshShape {
    #[serde(rename_all = "PascalCase")]
    Sphere { slices: u32, rings: u32, radius: f32 },
    #[serde(rename_all = "PascalCase")]
    Cube { size: f32 },
    #[serde(rename_all = "PascalCase")]
    Plane { rows: u32, columns: u32, spacing: f32 },
}

impl Default for MeshShape {
    fn default() -> Self {
        Self::Sphere {
            slices: 16,
            rings: 16,
            radius: 1.0,
        }
    }
}

/// A procedurally built shape drawn by the render service.
#[derive(Debug, Clone, Copy)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub color: [f32; 4],
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: MeshShape::default(),
            color: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MeshOverrides {
    shape: Option<MeshShape>,
    color: Option<[f32; 4]>,
}

impl Component for MeshComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Mesh
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn render(&mut self) {
        trace!(shape = ?self.shape, "mesh submitted");
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let overrides: MeshOverrides = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.kind().name(), e))?;
        if let Some(shape) = overrides.shape {
            self.shape = shape;
        }
        if let Some(color) = overrides.color {
            self.color = color;
        }
        Ok(())
    }
}

impl TypedComponent for MeshComponent {
    const KIND: ComponentKind = ComponentKind::Mesh;
}
