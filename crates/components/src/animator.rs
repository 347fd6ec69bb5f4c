use std::any::Any;

use kiln_world::{Component, ComponentKind, LevelError, TypedComponent};
use serde::Deserialize;
use serde_json::Value;

/// Drives playback time for a sibling model's animation clip.
#[derive(Debug, Clone, Copy)]
pub struct AnimatorComponent {
    pub clip_index: u32,
    pub speed: f32,
    pub looping: bool,
    playback_time: f32,
}

impl AnimatorComponent {
    /// Accumulated playback time in seconds, scaled by `speed`.
    pub fn playback_time(&self) -> f32 {
        self.playback_time
    }
}

impl Default for AnimatorComponent {
    fn default() -> Self {
        Self {
            clip_index: 0,
            speed: 1.0,
            looping: true,
            playback_time: 0.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AnimatorOverrides {
    clip_index: Option<u32>,
    speed: Option<f32>,
    looping: Option<bool>,
}

impl Component for AnimatorComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Animator
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn update(&mut self, delta_time: f32) {
        self.playback_time += delta_time * self.speed;
    }

    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let overrides: AnimatorOverrides = serde_json::from_value(value.clone())
            .map_err(|e| LevelError::deserialize(self.kind().name(), e))?;
        if let Some(clip_index) = overrides.clip_index {
            self.clip_index = clip_index;
        }
        if let Some(speed) = overrides.speed {
            self.speed = speed;
        }
        if let Some(looping) = overrides.looping {
            self.looping = looping;
        }
        Ok(())
    }
}

impl TypedComponent for AnimatorComponent {
    const KIND: ComponentKind = ComponentKind::Animator;
}
