//! Shader animation command processing.
//!
//! [`shader_command_system`] drains [`ShaderAnimCmd`] messages and applies
//! them to the [`ShaderAnimationStore`] and the animation components. It runs
//! before the animation systems, so a command written during a tick (for
//! example by an observer reacting to a completion event) takes effect from
//! the next tick's traversal, never in the middle of one.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::entityshader::EntityShader;
use crate::components::shaderchain::ShaderChain;
use crate::components::shadertimeline::ShaderTimeline;
use crate::components::shadertween::ShaderTween;
use crate::error::ShaderAnimError;
use crate::events::shadercmd::ShaderAnimCmd;
use crate::resources::animationstore::ShaderAnimationStore;

/// Bundled system parameters for applying commands.
#[derive(SystemParam)]
pub struct ShaderCommandContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub store: ResMut<'w, ShaderAnimationStore>,
    pub targets: Query<'w, 's, (), With<EntityShader>>,
    pub timelines: Query<'w, 's, &'static mut ShaderTimeline>,
    pub chains: Query<'w, 's, &'static mut ShaderChain>,
}

/// Chains created by commands earlier in the same batch. Their insertion is
/// deferred, so later commands in the batch must see them here instead of
/// through the query.
type PendingChains = FxHashMap<Entity, ShaderChain>;

fn with_chain<R>(
    ctx: &mut ShaderCommandContext,
    pending: &mut PendingChains,
    entity: Entity,
    f: impl FnOnce(&mut ShaderChain) -> R,
) -> Option<R> {
    if let Ok(mut chain) = ctx.chains.get_mut(entity) {
        return Some(f(&mut *chain));
    }
    pending.get_mut(&entity).map(f)
}

fn transition(
    ctx: &mut ShaderCommandContext,
    pending: &mut PendingChains,
    entity: Entity,
    name: &str,
    f: impl FnOnce(&mut ShaderChain) -> bool,
) -> Result<(), ShaderAnimError> {
    match with_chain(ctx, pending, entity, f) {
        Some(true) => Ok(()),
        Some(false) => {
            debug!("{:?}: {} ignored in the chain's current state", entity, name);
            Ok(())
        }
        None => Err(ShaderAnimError::MissingData {
            entity,
            what: "chain",
        }),
    }
}

/// Apply a single command. The target must be a live shader entity.
fn apply_command(
    cmd: &ShaderAnimCmd,
    ctx: &mut ShaderCommandContext,
    pending: &mut PendingChains,
) -> Result<(), ShaderAnimError> {
    let entity = cmd.entity();
    if !ctx.targets.contains(entity) {
        return Err(ShaderAnimError::StaleTarget(entity));
    }

    match cmd {
        ShaderAnimCmd::SetChain {
            phases,
            animations,
            looping,
            ..
        } => {
            if phases.is_empty() {
                debug!("{:?}: chain set with no phases", entity);
            }
            ctx.store
                .set_chain(entity, phases.clone(), animations.clone());
            let reset = with_chain(ctx, pending, entity, |chain| {
                chain.restart_from_first_phase(*looping)
            });
            if reset.is_none() {
                pending.insert(entity, ShaderChain::new(*looping));
            }
        }
        ShaderAnimCmd::ClearChain { .. } => {
            ctx.store.clear_chain(entity);
        }
        ShaderAnimCmd::AddKeyframes { keyframes, .. } => {
            let duration = ctx.store.set_keyframes(entity, keyframes.iter().cloned());
            if let Ok(mut timeline) = ctx.timelines.get_mut(entity) {
                timeline.duration = duration;
            }
        }
        ShaderAnimCmd::RemoveKeyframes { .. } => {
            ctx.store.remove_keyframes(entity);
        }
        ShaderAnimCmd::StartChain { .. } => {
            let started = with_chain(ctx, pending, entity, ShaderChain::start);
            match started {
                Some(true) => {}
                Some(false) => debug!("{:?}: chain already running", entity),
                None => {
                    if ctx.store.chain(entity).is_none() {
                        return Err(ShaderAnimError::MissingData {
                            entity,
                            what: "chain",
                        });
                    }
                    let mut chain = ShaderChain::new(false);
                    chain.start();
                    pending.insert(entity, chain);
                }
            }
        }
        ShaderAnimCmd::StopChain { .. } => {
            transition(ctx, pending, entity, "stop", ShaderChain::stop)?;
        }
        ShaderAnimCmd::PauseChain { .. } => {
            transition(ctx, pending, entity, "pause", ShaderChain::pause)?;
        }
        ShaderAnimCmd::ResumeChain { .. } => {
            transition(ctx, pending, entity, "resume", ShaderChain::resume)?;
        }
        ShaderAnimCmd::StartTween { tween, .. } => {
            ctx.commands.entity(entity).try_insert(tween.clone());
        }
        ShaderAnimCmd::StopTween { .. } => {
            ctx.commands.entity(entity).try_remove::<ShaderTween>();
        }
        ShaderAnimCmd::StartTimeline {
            parameter, looping, ..
        } => {
            let mut timeline = ShaderTimeline::new(parameter.clone()).with_looping(*looping);
            match ctx.store.keyframes(entity) {
                Some(track) => timeline.duration = track.duration,
                None => debug!("{:?}: timeline started before any keyframes", entity),
            }
            ctx.commands.entity(entity).try_insert(timeline);
        }
        ShaderAnimCmd::StopTimeline { .. } => {
            ctx.commands.entity(entity).try_remove::<ShaderTimeline>();
        }
    }
    Ok(())
}

/// Apply every pending [`ShaderAnimCmd`] message in the order it was written.
pub fn shader_command_system(
    mut reader: MessageReader<ShaderAnimCmd>,
    mut ctx: ShaderCommandContext,
) {
    let mut pending = PendingChains::default();
    for cmd in reader.read() {
        if let Err(e) = apply_command(cmd, &mut ctx, &mut pending) {
            debug!("Dropped {:?}: {}", cmd, e);
        }
    }
    for (entity, chain) in pending {
        ctx.commands.entity(entity).try_insert(chain);
    }
}
