//! Shader tween system.
//!
//! [`shader_tween_system`] advances every playing [`ShaderTween`], writes the
//! interpolated value into the entity's [`EntityShader`] uniforms and queues
//! a `ShaderParameterChanged` per write. One-shot tweens that reach their end
//! queue a `ShaderAnimationCompleted` and are removed from the entity after
//! the query has been fully traversed. A tween whose endpoints differ in kind
//! never writes, but still completes when its clock runs out.

use bevy_ecs::prelude::*;
use log::warn;
use std::sync::Arc;

use crate::components::entityshader::EntityShader;
use crate::components::shadertween::{LoopMode, ShaderTween};
use crate::easing::ease;
use crate::error::ShaderAnimError;
use crate::events::queue::ShaderEventQueue;
use crate::events::shaderanim::ShaderAnimationCompleted;
use crate::resources::eventsink::ShaderEventSink;
use crate::resources::shaderdirty::ShaderDirty;
use crate::resources::worldtime::WorldTime;
use crate::uniform::{UniformValue, lerp};

/// Advance tween time by `dt` and return `(progress, finished)`.
///
/// `time` is wrapped for looping modes and clamped for [`LoopMode::Once`].
/// A non-positive `duration` yields progress 1 immediately; only a one-shot
/// tween ever reports `finished`.
pub(crate) fn advance(time: &mut f32, duration: f32, mode: LoopMode, dt: f32) -> (f32, bool) {
    *time += dt;
    if duration <= 0.0 {
        return (1.0, mode == LoopMode::Once);
    }
    match mode {
        LoopMode::PingPong => {
            *time = time.rem_euclid(2.0 * duration);
            let progress = if *time <= duration {
                *time / duration
            } else {
                2.0 - *time / duration
            };
            (progress, false)
        }
        LoopMode::Loop => {
            *time = time.rem_euclid(duration);
            (*time / duration, false)
        }
        LoopMode::Once => {
            *time = time.min(duration);
            (*time / duration, *time >= duration)
        }
    }
}

/// Write `value` into `parameter`, seeding the uniform with `initial` the
/// first time it is seen. Returns the value it replaced.
pub(crate) fn write_uniform(
    shader: &mut EntityShader,
    parameter: &Arc<str>,
    initial: &UniformValue,
    value: UniformValue,
) -> UniformValue {
    let slot = shader
        .uniforms
        .entry(parameter.clone())
        .or_insert(*initial);
    std::mem::replace(slot, value)
}

/// Animate shader uniforms based on [`ShaderTween`] components.
pub fn shader_tween_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut EntityShader, &mut ShaderTween)>,
    mut commands: Commands,
    sink: Option<Res<ShaderEventSink>>,
    mut dirty: Option<ResMut<ShaderDirty>>,
) {
    let dt = world_time.delta.max(0.0);
    let mut queue = ShaderEventQueue::new();
    let mut finished: Vec<Entity> = Vec::new();

    for (entity, mut shader, mut tw) in query.iter_mut() {
        if !tw.playing || !shader.enabled {
            continue;
        }
        let mut time = tw.time;
        let (progress, done) = advance(&mut time, tw.duration, tw.loop_mode, dt);
        tw.time = time;

        let eased = ease(tw.easing, progress);
        let final_value = match lerp(&tw.from, &tw.to, eased) {
            Some(value) => {
                let old = write_uniform(&mut shader, &tw.parameter, &tw.from, value);
                queue.parameter_changed(entity, &shader, &tw.parameter, Some(old), value);
                value
            }
            None => {
                warn!(
                    "{}",
                    ShaderAnimError::type_mismatch(
                        entity,
                        &tw.parameter,
                        tw.from.kind(),
                        tw.to.kind()
                    )
                );
                // nothing written; report whatever the uniform holds
                shader.uniform(&tw.parameter).copied().unwrap_or(tw.from)
            }
        };

        if done {
            queue.push(ShaderAnimationCompleted {
                entity,
                parameter: tw.parameter.clone(),
                shader_key: shader.shader_key.clone(),
                layer: shader.layer,
                final_value,
            });
            finished.push(entity);
        }
    }

    for entity in finished {
        commands.entity(entity).try_remove::<ShaderTween>();
    }
    queue.flush(&mut commands, sink.as_deref(), dirty.as_deref_mut());
}
