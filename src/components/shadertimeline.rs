//! Keyframe timeline component.
//!
//! A [`ShaderTimeline`] plays back a list of [`Keyframe`]s on one uniform.
//! The keyframes themselves are variable-length, so they live in the
//! [`ShaderAnimationStore`](crate::resources::animationstore::ShaderAnimationStore)
//! keyed by entity; the component only keeps the playback clock.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::easing::Easing;
use crate::uniform::UniformValue;

/// A sample point on a timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time position in seconds from the start of the timeline.
    pub time: f32,
    /// Value of the uniform at `time`.
    pub value: UniformValue,
    /// Easing applied to the segment leaving this keyframe.
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(time: f32, value: UniformValue) -> Self {
        Keyframe {
            time,
            value,
            easing: Easing::Linear,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Playback state of a keyframe timeline.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct ShaderTimeline {
    /// Name of the uniform being animated.
    pub parameter: Arc<str>,
    /// Playback position in seconds.
    pub elapsed: f32,
    /// Time of the last keyframe. Kept in sync with the store by the timeline system.
    pub duration: f32,
    pub looping: bool,
    pub enabled: bool,
}

impl ShaderTimeline {
    pub fn new(parameter: impl Into<Arc<str>>) -> Self {
        ShaderTimeline {
            parameter: parameter.into(),
            elapsed: 0.0,
            duration: 0.0,
            looping: false,
            enabled: true,
        }
    }
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
    /// Rewind to the start without touching the keyframes.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
