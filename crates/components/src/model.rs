use std::any::Any;

use kiln_world::{Component, ComponentKind, LevelError, TypedComponent};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

/// A model file reference drawn by the render service.
#[derive(Debug, Clone)]
pub struct ModelComponent {
    pub file_name: String,
    pub display_scale: f32,
}

impl Default for ModelComponent {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            display_scale: 1.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ModelOverrides {
    file_name: Option<String>,
    display_scale: Option<f32>,
}

impl Component for ModelComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Model
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn render(&mut self) {
        trace!(file = %self.file_name, "model submitted");
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let overrides: ModelOverrides = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.kind().name(), e))?;
        if let Some(file_name) = overrides.file_name {
            self.file_name = file_name;
        }
        if let Some(scale) = overrides.display_scale {
            self.display_scale = scale;
        }
        Ok(())
    }
}

impl TypedComponent for ModelComponent {
    const KIND: ComponentKind = ComponentKind::Model;
}
