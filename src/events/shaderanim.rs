//! Shader animation notifications.
//!
//! The animation systems never emit these while they iterate their queries.
//! Each system collects them into a
//! [`ShaderEventQueue`](crate::events::queue::ShaderEventQueue) and flushes
//! it after its traversal, triggering one observer event per notification
//! (and mirroring it into the optional
//! [`ShaderEventSink`](crate::resources::eventsink::ShaderEventSink)).
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<ShaderChainCompleted>| {
//!     let event = trigger.event();
//!     info!("{:?} finished after {} phases", event.entity, event.total_phases_executed);
//! });
//! ```

use bevy_ecs::prelude::*;
use std::sync::Arc;

use crate::components::entityshader::ShaderLayer;
use crate::uniform::UniformValue;

/// A uniform was written by a tween, timeline or chain.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ShaderParameterChanged {
    pub entity: Entity,
    pub parameter: Arc<str>,
    /// `None` when the uniform did not exist before this write.
    pub old_value: Option<UniformValue>,
    pub new_value: UniformValue,
    pub layer: ShaderLayer,
    pub shader_key: Arc<str>,
}

/// A one-shot tween reached its end and was removed.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ShaderAnimationCompleted {
    pub entity: Entity,
    pub parameter: Arc<str>,
    pub shader_key: Arc<str>,
    pub layer: ShaderLayer,
    pub final_value: UniformValue,
}

/// A chain phase finished its delay + duration window.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ShaderPhaseCompleted {
    pub entity: Entity,
    pub shader_key: Arc<str>,
    pub phase_index: usize,
    pub total_phases: usize,
    pub has_more_phases: bool,
}

/// A non-looping chain finished its last phase.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ShaderChainCompleted {
    pub entity: Entity,
    pub shader_key: Arc<str>,
    pub total_phases_executed: usize,
    pub was_looping: bool,
}

/// Any of the notifications above, in the order they were produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderAnimationEvent {
    ParameterChanged(ShaderParameterChanged),
    AnimationCompleted(ShaderAnimationCompleted),
    PhaseCompleted(ShaderPhaseCompleted),
    ChainCompleted(ShaderChainCompleted),
}

impl ShaderAnimationEvent {
    pub fn entity(&self) -> Entity {
        match self {
            ShaderAnimationEvent::ParameterChanged(e) => e.entity,
            ShaderAnimationEvent::AnimationCompleted(e) => e.entity,
            ShaderAnimationEvent::PhaseCompleted(e) => e.entity,
            ShaderAnimationEvent::ChainCompleted(e) => e.entity,
        }
    }

    /// Trigger the wrapped event for observers.
    pub fn trigger(self, commands: &mut Commands) {
        match self {
            ShaderAnimationEvent::ParameterChanged(e) => commands.trigger(e),
            ShaderAnimationEvent::AnimationCompleted(e) => commands.trigger(e),
            ShaderAnimationEvent::PhaseCompleted(e) => commands.trigger(e),
            ShaderAnimationEvent::ChainCompleted(e) => commands.trigger(e),
        }
    }
}

impl From<ShaderParameterChanged> for ShaderAnimationEvent {
    fn from(e: ShaderParameterChanged) -> Self {
        ShaderAnimationEvent::ParameterChanged(e)
    }
}

impl From<ShaderAnimationCompleted> for ShaderAnimationEvent {
    fn from(e: ShaderAnimationCompleted) -> Self {
        ShaderAnimationEvent::AnimationCompleted(e)
    }
}

impl From<ShaderPhaseCompleted> for ShaderAnimationEvent {
    fn from(e: ShaderPhaseCompleted) -> Self {
        ShaderAnimationEvent::PhaseCompleted(e)
    }
}

impl From<ShaderChainCompleted> for ShaderAnimationEvent {
    fn from(e: ShaderChainCompleted) -> Self {
        ShaderAnimationEvent::ChainCompleted(e)
    }
}
