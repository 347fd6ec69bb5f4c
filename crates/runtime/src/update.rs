use std::any::Any;

use kiln_world::{GameObjectPool, LevelError, Service};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

/// Frame bookkeeping: counts frames and accumulates scaled simulation time.
#[derive(Debug)]
pub struct UpdateService {
    time_scale: f32,
    elapsed: f64,
    frames: u64,
}

impl UpdateService {
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Total simulation time in seconds, after scaling.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for UpdateService {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            elapsed: 0.0,
            frames: 0,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateServiceConfig {
    time_scale: Option<f32>,
}

impl Service for UpdateService {
    fn name(&self) -> &'static str {
        "UpdateService"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn update(&mut self, _pool: &mut GameObjectPool, delta_time: f32) {
        self.frames += 1;
        self.elapsed += f64::from(delta_time * self.time_scale);
        trace!(frame = self.frames, elapsed = self.elapsed, "frame advanced");
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let config: UpdateServiceConfig = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.name(), e))?;
        if let Some(time_scale) = config.time_scale {
            self.time_scale = time_scale;
        }
        Ok(())
    }
}
