//! Keyframe timeline system.
//!
//! [`shader_timeline_system`] advances every enabled [`ShaderTimeline`],
//! samples the entity's keyframes from the
//! [`ShaderAnimationStore`] and writes the result into the entity's
//! uniforms. A `ShaderParameterChanged` is queued only when the sampled value
//! differs from the stored one.
//!
//! # Sampling
//!
//! Before the first keyframe the first value is used verbatim; after the
//! last keyframe, the last value. In between, the bracketing pair is
//! found by a linear scan and the segment is eased with the easing of the
//! keyframe it leaves. When several keyframes share a time, the first one
//! inserted is the value produced at exactly that time.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::entityshader::EntityShader;
use crate::components::shadertimeline::{Keyframe, ShaderTimeline};
use crate::easing::ease;
use crate::error::ShaderAnimError;
use crate::events::queue::ShaderEventQueue;
use crate::resources::animationstore::ShaderAnimationStore;
use crate::resources::eventsink::ShaderEventSink;
use crate::resources::shaderdirty::ShaderDirty;
use crate::resources::worldtime::WorldTime;
use crate::uniform::{UniformValue, lerp};

/// Sample sorted `keyframes` at `time`.
pub(crate) fn sample(
    entity: Entity,
    parameter: &str,
    keyframes: &[Keyframe],
    time: f32,
) -> Result<UniformValue, ShaderAnimError> {
    let (Some(first), Some(last)) = (keyframes.first(), keyframes.last()) else {
        return Err(ShaderAnimError::MissingData {
            entity,
            what: "keyframes",
        });
    };
    if time < first.time {
        return Ok(first.value);
    }
    if time > last.time {
        return Ok(last.value);
    }
    if time == last.time {
        // trailing duplicates resolve to the first inserted
        let at = keyframes.partition_point(|k| k.time < last.time);
        return Ok(keyframes[at].value);
    }

    for pair in keyframes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.time <= time && time <= b.time {
            let span = b.time - a.time;
            let factor = if span > 0.0 {
                ((time - a.time) / span).clamp(0.0, 1.0)
            } else {
                0.0
            };
            return lerp(&a.value, &b.value, ease(a.easing, factor)).ok_or_else(|| {
                ShaderAnimError::type_mismatch(entity, parameter, a.value.kind(), b.value.kind())
            });
        }
    }
    Ok(last.value)
}

/// Advance the playback position, wrapping when looping and clamping otherwise.
pub(crate) fn advance_timeline(elapsed: f32, duration: f32, looping: bool, dt: f32) -> f32 {
    let elapsed = elapsed + dt;
    if looping && duration > 0.0 {
        elapsed.rem_euclid(duration)
    } else {
        elapsed.min(duration.max(0.0))
    }
}

/// Animate shader uniforms based on [`ShaderTimeline`] components.
pub fn shader_timeline_system(
    world_time: Res<WorldTime>,
    mut store: ResMut<ShaderAnimationStore>,
    mut query: Query<(Entity, &mut EntityShader, &mut ShaderTimeline)>,
    targets: Query<(), With<EntityShader>>,
    mut commands: Commands,
    sink: Option<Res<ShaderEventSink>>,
    mut dirty: Option<ResMut<ShaderDirty>>,
) {
    let dt = world_time.delta.max(0.0);
    let mut queue = ShaderEventQueue::new();

    for (entity, mut shader, mut timeline) in query.iter_mut() {
        if !timeline.enabled || !shader.enabled {
            continue;
        }
        let Some(track) = store.keyframes(entity).filter(|t| !t.is_empty()) else {
            debug!(
                "{}",
                ShaderAnimError::MissingData {
                    entity,
                    what: "keyframes"
                }
            );
            continue;
        };

        if timeline.duration != track.duration {
            timeline.duration = track.duration;
        }
        let elapsed = advance_timeline(timeline.elapsed, track.duration, timeline.looping, dt);
        timeline.elapsed = elapsed;

        let value = match sample(entity, &timeline.parameter, &track.keyframes, elapsed) {
            Ok(value) => value,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };

        let current = shader.uniform(&timeline.parameter).copied();
        if current == Some(value) {
            continue;
        }
        shader.uniforms.insert(timeline.parameter.clone(), value);
        queue.parameter_changed(entity, &shader, &timeline.parameter, current, value);
    }

    let pruned = store.prune_keyframes(|e| targets.contains(e));
    if pruned > 0 {
        debug!("Pruned keyframes of {} dead shader targets", pruned);
    }
    queue.flush(&mut commands, sink.as_deref(), dirty.as_deref_mut());
}
