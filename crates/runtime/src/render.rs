use std::any::Any;

use kiln_world::{ComponentKind, GameObjectPool, LevelError, Service};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

/// Gathers the renderable population each frame.
///
/// The actual draw calls belong to the renderer, which is an external
/// collaborator; this service walks the pool, counts what would be
/// submitted, and carries the clear color from the level config.
#[derive(Debug)]
pub struct RenderService {
    clear_color: [f32; 4],
    last_submitted: usize,
}

impl RenderService {
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Renderables seen during the most recent render pass.
    pub fn last_submitted(&self) -> usize {
        self.last_submitted
    }
}

impl Default for RenderService {
    fn default() -> Self {
        Self {
            clear_color: [0.1, 0.1, 0.1, 1.0],
            last_submitted: 0,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RenderServiceConfig {
    clear_color: Option<[f32; 4]>,
}

impl Service for RenderService {
    fn name(&self) -> &'static str {
        "RenderService"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn render(&mut self, pool: &GameObjectPool) {
        self.last_submitted = pool
            .iter()
            .filter(|object| {
                object.has_component(ComponentKind::Mesh)
                    || object.has_component(ComponentKind::Model)
            })
            .count();
        trace!(submitted = self.last_submitted, "render pass");
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let config: RenderServiceConfig = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.name(), e))?;
        if let Some(clear_color) = config.clear_color {
            self.clear_color = clear_color;
        }
        Ok(())
    }
}
