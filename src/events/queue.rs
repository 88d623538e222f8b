//! Per-tick notification buffer.
//!
//! Systems push into a [`ShaderEventQueue`] while iterating and call
//! [`ShaderEventQueue::flush`] once the iteration is over, so observers
//! never run against a half-updated set of targets.

use bevy_ecs::prelude::*;
use std::sync::Arc;

use crate::components::entityshader::EntityShader;
use crate::events::shaderanim::{ShaderAnimationEvent, ShaderParameterChanged};
use crate::resources::eventsink::ShaderEventSink;
use crate::resources::shaderdirty::ShaderDirty;
use crate::uniform::UniformValue;

#[derive(Debug, Default)]
pub struct ShaderEventQueue {
    events: Vec<ShaderAnimationEvent>,
    changed: bool,
}

impl ShaderEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<ShaderAnimationEvent>) {
        let event = event.into();
        if matches!(event, ShaderAnimationEvent::ParameterChanged(_)) {
            self.changed = true;
        }
        self.events.push(event);
    }

    /// Queue a `ParameterChanged` for a uniform written on `shader`.
    pub fn parameter_changed(
        &mut self,
        entity: Entity,
        shader: &EntityShader,
        parameter: &Arc<str>,
        old_value: Option<UniformValue>,
        new_value: UniformValue,
    ) {
        self.push(ShaderParameterChanged {
            entity,
            parameter: parameter.clone(),
            old_value,
            new_value,
            layer: shader.layer,
            shader_key: shader.shader_key.clone(),
        });
    }

    /// Whether any uniform changed this tick.
    pub fn has_changes(&self) -> bool {
        self.changed
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Mark the dirty flag once if any uniform changed, then deliver every
    /// queued event in enqueue order.
    pub fn flush(
        self,
        commands: &mut Commands,
        sink: Option<&ShaderEventSink>,
        dirty: Option<&mut ShaderDirty>,
    ) {
        if self.changed {
            if let Some(dirty) = dirty {
                dirty.mark();
            }
        }
        for event in self.events {
            if let Some(sink) = sink {
                sink.send(event.clone());
            }
            event.trigger(commands);
        }
    }
}
