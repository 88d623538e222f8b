//! Variable-length animation data keyed by entity.
//!
//! Keyframe lists and chain definitions have no fixed size, so they are kept
//! out of the components and stored here, keyed by the owning [`Entity`].
//! Entries are only created or replaced by explicit commands, removed by
//! explicit commands, or pruned by the animation systems once the owning
//! entity stops being a live shader target.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::shaderchain::{ChainPhase, ChainSubAnimation};
use crate::components::shadertimeline::Keyframe;

/// Keyframes of one timeline, sorted by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeTrack {
    pub keyframes: SmallVec<[Keyframe; 4]>,
    /// Time of the last keyframe, 0 when empty.
    pub duration: f32,
}

impl KeyframeTrack {
    /// Build a track, sorting by time. The sort is stable, so keyframes
    /// sharing a time keep their insertion order.
    pub fn new(keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut keyframes: SmallVec<[Keyframe; 4]> = keyframes.into_iter().collect();
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        let duration = keyframes
            .iter()
            .map(|k| k.time)
            .fold(0.0_f32, f32::max);
        KeyframeTrack {
            keyframes,
            duration,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}

/// Phases of one chain plus the sub-animations registered per phase index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainDefinition {
    pub phases: Vec<ChainPhase>,
    pub animations: FxHashMap<usize, Vec<ChainSubAnimation>>,
}

impl ChainDefinition {
    pub fn animations_for(&self, phase_index: usize) -> &[ChainSubAnimation] {
        self.animations
            .get(&phase_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Central registry of per-entity keyframes and chain definitions.
#[derive(Resource, Debug, Default)]
pub struct ShaderAnimationStore {
    keyframes: FxHashMap<Entity, KeyframeTrack>,
    chains: FxHashMap<Entity, ChainDefinition>,
}

impl ShaderAnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entity's keyframes. Returns the new timeline duration.
    pub fn set_keyframes(
        &mut self,
        entity: Entity,
        keyframes: impl IntoIterator<Item = Keyframe>,
    ) -> f32 {
        let track = KeyframeTrack::new(keyframes);
        let duration = track.duration;
        self.keyframes.insert(entity, track);
        duration
    }

    pub fn keyframes(&self, entity: Entity) -> Option<&KeyframeTrack> {
        self.keyframes.get(&entity)
    }

    pub fn remove_keyframes(&mut self, entity: Entity) -> bool {
        self.keyframes.remove(&entity).is_some()
    }

    pub fn set_chain(
        &mut self,
        entity: Entity,
        phases: Vec<ChainPhase>,
        animations: FxHashMap<usize, Vec<ChainSubAnimation>>,
    ) {
        self.chains
            .insert(entity, ChainDefinition { phases, animations });
    }

    pub fn chain(&self, entity: Entity) -> Option<&ChainDefinition> {
        self.chains.get(&entity)
    }

    pub fn clear_chain(&mut self, entity: Entity) -> bool {
        self.chains.remove(&entity).is_some()
    }

    /// Drop keyframe tracks whose entity is no longer alive. Returns how many were removed.
    pub fn prune_keyframes(&mut self, is_alive: impl Fn(Entity) -> bool) -> usize {
        let before = self.keyframes.len();
        self.keyframes.retain(|entity, _| is_alive(*entity));
        before - self.keyframes.len()
    }

    /// Drop chain definitions whose entity is no longer alive. Returns how many were removed.
    pub fn prune_chains(&mut self, is_alive: impl Fn(Entity) -> bool) -> usize {
        let before = self.chains.len();
        self.chains.retain(|entity, _| is_alive(*entity));
        before - self.chains.len()
    }

    pub fn keyframe_track_count(&self) -> usize {
        self.keyframes.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }
}
