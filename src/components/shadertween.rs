//! Tween component for shader uniforms.
//!
//! A [`ShaderTween`] animates one uniform of the entity's
//! [`EntityShader`](super::entityshader::EntityShader) from `from` to `to`
//! over `duration` seconds. See [`crate::systems::shadertween`] for the
//! update system.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::easing::Easing;
use crate::uniform::UniformValue;

/// Determines how a tween behaves when it reaches the end.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    /// Play once, then the tween is removed from the entity.
    #[default]
    Once,
    /// Restart from the beginning when finished.
    Loop,
    /// Run forward then backward, forever.
    PingPong,
}

/// Animates a single shader uniform between two values.
#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShaderTween {
    /// Name of the uniform being animated.
    pub parameter: Arc<str>,
    /// Starting value.
    pub from: UniformValue,
    /// Ending value. Must be the same kind as `from`.
    pub to: UniformValue,
    /// Duration in seconds. Zero or less completes immediately.
    pub duration: f32,
    /// Easing function to use.
    #[serde(default)]
    pub easing: Easing,
    /// Behavior when the tween ends.
    #[serde(default)]
    pub loop_mode: LoopMode,
    /// Whether the tween is currently playing.
    #[serde(default = "default_playing")]
    pub playing: bool,
    /// Accumulated time in seconds.
    #[serde(default)]
    pub time: f32,
}

fn default_playing() -> bool {
    true
}

impl ShaderTween {
    pub fn new(
        parameter: impl Into<Arc<str>>,
        from: UniformValue,
        to: UniformValue,
        duration: f32,
    ) -> Self {
        ShaderTween {
            parameter: parameter.into(),
            from,
            to,
            duration,
            easing: Easing::Linear,
            loop_mode: LoopMode::Once,
            playing: true,
            time: 0.0,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }
    pub fn looping(&self) -> bool {
        self.loop_mode == LoopMode::Loop
    }
    pub fn ping_pong(&self) -> bool {
        self.loop_mode == LoopMode::PingPong
    }
}
