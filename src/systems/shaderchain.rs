//! Phase chain system.
//!
//! [`shader_chain_system`] drives every playing [`ShaderChain`] through the
//! phases registered for its entity in the [`ShaderAnimationStore`].
//!
//! # Per-tick flow for one chain
//!
//! 1. Add `dt` to the phase clock.
//! 2. While the clock is inside the phase delay, nothing else happens.
//! 3. Otherwise every sub-animation of the phase is evaluated at
//!    `clock - delay` (the phase clock drives them; they keep no time of
//!    their own) and written like a tween.
//! 4. Once the clock reaches `delay + duration`, a `ShaderPhaseCompleted` is
//!    queued after the writes, and the chain moves to the next phase, wraps
//!    to the first one when looping, or completes with a
//!    `ShaderChainCompleted`.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::entityshader::EntityShader;
use crate::components::shaderchain::{ChainPlayState, ShaderChain};
use crate::easing::ease;
use crate::error::ShaderAnimError;
use crate::events::queue::ShaderEventQueue;
use crate::events::shaderanim::{ShaderChainCompleted, ShaderPhaseCompleted};
use crate::resources::animationstore::ShaderAnimationStore;
use crate::resources::eventsink::ShaderEventSink;
use crate::resources::shaderdirty::ShaderDirty;
use crate::resources::worldtime::WorldTime;
use crate::systems::shadertween::write_uniform;
use crate::uniform::lerp;

/// Normalized progress of a phase whose delay has elapsed.
pub(crate) fn phase_progress(local_time: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (local_time / duration).clamp(0.0, 1.0)
    }
}

/// Drive chains based on [`ShaderChain`] components.
pub fn shader_chain_system(
    world_time: Res<WorldTime>,
    mut store: ResMut<ShaderAnimationStore>,
    mut query: Query<(Entity, &mut EntityShader, &mut ShaderChain)>,
    targets: Query<(), With<EntityShader>>,
    mut commands: Commands,
    sink: Option<Res<ShaderEventSink>>,
    mut dirty: Option<ResMut<ShaderDirty>>,
) {
    let dt = world_time.delta.max(0.0);
    let mut queue = ShaderEventQueue::new();

    for (entity, mut shader, mut chain) in query.iter_mut() {
        if !chain.is_playing() || !shader.enabled {
            continue;
        }
        let Some(definition) = store.chain(entity).filter(|c| !c.phases.is_empty()) else {
            debug!(
                "{}",
                ShaderAnimError::MissingData {
                    entity,
                    what: "chain phases"
                }
            );
            continue;
        };
        let total_phases = definition.phases.len();

        // The phase list may have been replaced by a shorter one.
        if chain.current_phase >= total_phases {
            chain.current_phase = 0;
            chain.phase_elapsed = 0.0;
        }

        chain.phase_elapsed += dt;
        let index = chain.current_phase;
        let phase = definition.phases[index];
        if chain.phase_elapsed < phase.delay {
            continue;
        }

        let progress = phase_progress(chain.phase_elapsed - phase.delay, phase.duration);
        for anim in definition.animations_for(index) {
            let Some(value) = lerp(&anim.from, &anim.to, ease(anim.easing, progress)) else {
                warn!(
                    "{}",
                    ShaderAnimError::type_mismatch(
                        entity,
                        &anim.parameter,
                        anim.from.kind(),
                        anim.to.kind()
                    )
                );
                continue;
            };
            let old = write_uniform(&mut shader, &anim.parameter, &anim.from, value);
            queue.parameter_changed(entity, &shader, &anim.parameter, Some(old), value);
        }

        if chain.phase_elapsed < phase.total() {
            continue;
        }

        let has_more_phases = index + 1 < total_phases;
        chain.phases_executed += 1;
        queue.push(ShaderPhaseCompleted {
            entity,
            shader_key: shader.shader_key.clone(),
            phase_index: index,
            total_phases,
            has_more_phases,
        });

        if has_more_phases {
            chain.current_phase += 1;
            chain.phase_elapsed = 0.0;
        } else if chain.looping {
            chain.current_phase = 0;
            chain.phase_elapsed = 0.0;
        } else {
            chain.play_state = ChainPlayState::Completed;
            queue.push(ShaderChainCompleted {
                entity,
                shader_key: shader.shader_key.clone(),
                total_phases_executed: chain.phases_executed,
                was_looping: false,
            });
        }
    }

    let pruned = store.prune_chains(|e| targets.contains(e));
    if pruned > 0 {
        debug!("Pruned chains of {} dead shader targets", pruned);
    }
    queue.flush(&mut commands, sink.as_deref(), dirty.as_deref_mut());
}
