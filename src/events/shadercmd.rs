//! Commands accepted by the shader animation systems.
//!
//! Orchestrating code writes [`ShaderAnimCmd`] messages; the
//! [`shader_command_system`](crate::systems::shadercommands::shader_command_system)
//! applies them at the start of the next tick, before any animation system
//! iterates. Commands addressed to an entity that is not a live shader
//! target are dropped with a log line.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::components::shaderchain::{ChainPhase, ChainSubAnimation};
use crate::components::shadertimeline::Keyframe;
use crate::components::shadertween::ShaderTween;

#[derive(Message, Debug, Clone, PartialEq)]
pub enum ShaderAnimCmd {
    /// Replace the entity's chain and reset its playback to the first phase.
    SetChain {
        entity: Entity,
        phases: Vec<ChainPhase>,
        animations: FxHashMap<usize, Vec<ChainSubAnimation>>,
        looping: bool,
    },
    /// Forget the chain's phases and sub-animations. Playback state is untouched.
    ClearChain { entity: Entity },
    /// Replace the entity's keyframes.
    AddKeyframes {
        entity: Entity,
        keyframes: Vec<Keyframe>,
    },
    RemoveKeyframes { entity: Entity },
    StartChain { entity: Entity },
    StopChain { entity: Entity },
    PauseChain { entity: Entity },
    ResumeChain { entity: Entity },
    /// Attach a tween, replacing any tween already on the entity.
    StartTween { entity: Entity, tween: ShaderTween },
    StopTween { entity: Entity },
    /// Attach a timeline playing the entity's keyframes from the start.
    StartTimeline {
        entity: Entity,
        parameter: Arc<str>,
        looping: bool,
    },
    StopTimeline { entity: Entity },
}

impl ShaderAnimCmd {
    pub fn entity(&self) -> Entity {
        match self {
            ShaderAnimCmd::SetChain { entity, .. }
            | ShaderAnimCmd::ClearChain { entity }
            | ShaderAnimCmd::AddKeyframes { entity, .. }
            | ShaderAnimCmd::RemoveKeyframes { entity }
            | ShaderAnimCmd::StartChain { entity }
            | ShaderAnimCmd::StopChain { entity }
            | ShaderAnimCmd::PauseChain { entity }
            | ShaderAnimCmd::ResumeChain { entity }
            | ShaderAnimCmd::StartTween { entity, .. }
            | ShaderAnimCmd::StopTween { entity }
            | ShaderAnimCmd::StartTimeline { entity, .. }
            | ShaderAnimCmd::StopTimeline { entity } => *entity,
        }
    }
}
