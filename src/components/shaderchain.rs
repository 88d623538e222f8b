//! Multi-phase animation chain component.
//!
//! A chain is an ordered list of [`ChainPhase`]s. Each phase waits `delay`
//! seconds, then runs its [`ChainSubAnimation`]s for `duration` seconds,
//! all driven by the phase clock. Phases and sub-animations are stored in
//! the [`ShaderAnimationStore`](crate::resources::animationstore::ShaderAnimationStore);
//! the [`ShaderChain`] component holds the playback state machine.
//!
//! # State machine
//!
//! ```text
//! NotStarted --start--> Playing <--pause/resume--> Paused
//! Playing | Paused --stop--> Stopped
//! Playing --last phase done, not looping--> Completed
//! ```
//!
//! `Stopped` and `Completed` are terminal until the chain is started again
//! or replaced.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::easing::Easing;
use crate::uniform::UniformValue;

/// Timing window of one phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainPhase {
    /// Seconds to wait before the phase's animations start.
    #[serde(default)]
    pub delay: f32,
    /// Seconds the animations take once the delay has elapsed.
    pub duration: f32,
}

impl ChainPhase {
    pub fn new(delay: f32, duration: f32) -> Self {
        ChainPhase {
            delay: delay.max(0.0),
            duration: duration.max(0.0),
        }
    }

    /// Phase length including the delay.
    pub fn total(&self) -> f32 {
        self.delay + self.duration
    }
}

/// One uniform animated during a phase. Its duration is the phase duration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainSubAnimation {
    pub parameter: Arc<str>,
    pub from: UniformValue,
    pub to: UniformValue,
    #[serde(default)]
    pub easing: Easing,
}

impl ChainSubAnimation {
    pub fn new(parameter: impl Into<Arc<str>>, from: UniformValue, to: UniformValue) -> Self {
        ChainSubAnimation {
            parameter: parameter.into(),
            from,
            to,
            easing: Easing::Linear,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChainPlayState {
    #[default]
    NotStarted,
    Playing,
    Paused,
    Stopped,
    Completed,
}

/// Playback state of a phase chain.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct ShaderChain {
    pub current_phase: usize,
    /// Time spent in the current phase, delay included.
    pub phase_elapsed: f32,
    pub play_state: ChainPlayState,
    pub enabled: bool,
    pub looping: bool,
    /// Phases completed since the last start, across loop iterations.
    pub phases_executed: usize,
}

impl Default for ShaderChain {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ShaderChain {
    pub fn new(looping: bool) -> Self {
        ShaderChain {
            current_phase: 0,
            phase_elapsed: 0.0,
            play_state: ChainPlayState::NotStarted,
            enabled: true,
            looping,
            phases_executed: 0,
        }
    }

    fn rewind(&mut self) {
        self.current_phase = 0;
        self.phase_elapsed = 0.0;
        self.phases_executed = 0;
    }

    /// Start playback from the first phase.
    ///
    /// Valid from `NotStarted`, `Stopped` and `Completed`. Returns whether
    /// the transition happened.
    pub fn start(&mut self) -> bool {
        match self.play_state {
            ChainPlayState::NotStarted | ChainPlayState::Stopped | ChainPlayState::Completed => {
                self.rewind();
                self.play_state = ChainPlayState::Playing;
                true
            }
            ChainPlayState::Playing | ChainPlayState::Paused => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.play_state == ChainPlayState::Playing {
            self.play_state = ChainPlayState::Paused;
            return true;
        }
        false
    }

    pub fn resume(&mut self) -> bool {
        if self.play_state == ChainPlayState::Paused {
            self.play_state = ChainPlayState::Playing;
            return true;
        }
        false
    }

    pub fn stop(&mut self) -> bool {
        match self.play_state {
            ChainPlayState::Playing | ChainPlayState::Paused => {
                self.play_state = ChainPlayState::Stopped;
                true
            }
            _ => false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.enabled && self.play_state == ChainPlayState::Playing
    }

    /// Reset after the phase list was replaced. A playing chain keeps playing.
    pub fn restart_from_first_phase(&mut self, looping: bool) {
        self.rewind();
        self.looping = looping;
        if self.play_state != ChainPlayState::Playing {
            self.play_state = ChainPlayState::NotStarted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_new_is_not_started() {
        let chain = ShaderChain::new(true);
        assert_eq!(chain.play_state, ChainPlayState::NotStarted);
        assert!(chain.looping);
        assert!(!chain.is_playing());
    }

    #[test]
    fn test_pause_resume_only_from_playing() {
        let mut chain = ShaderChain::new(false);
        assert!(!chain.pause());
        assert!(!chain.resume());
        assert!(chain.start());
        assert!(chain.pause());
        assert_eq!(chain.play_state, ChainPlayState::Paused);
        assert!(!chain.pause());
        assert!(chain.resume());
        assert_eq!(chain.play_state, ChainPlayState::Playing);
    }

    #[test]
    fn test_stop_is_terminal_until_restart() {
        let mut chain = ShaderChain::new(false);
        assert!(!chain.stop());
        chain.start();
        chain.current_phase = 2;
        chain.phase_elapsed = 0.3;
        assert!(chain.stop());
        assert!(!chain.resume());
        assert!(!chain.pause());
        assert!(!chain.stop());
        assert!(chain.start());
        assert_eq!(chain.current_phase, 0);
        assert_eq!(chain.phase_elapsed, 0.0);
    }

    #[test]
    fn test_stop_from_paused() {
        let mut chain = ShaderChain::new(false);
        chain.start();
        chain.pause();
        assert!(chain.stop());
        assert_eq!(chain.play_state, ChainPlayState::Stopped);
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut chain = ShaderChain::new(false);
        chain.start();
        chain.current_phase = 1;
        assert!(!chain.start());
        assert_eq!(chain.current_phase, 1);
        chain.pause();
        assert!(!chain.start());
    }

    #[test]
    fn test_completed_can_restart() {
        let mut chain = ShaderChain::new(false);
        chain.play_state = ChainPlayState::Completed;
        chain.phases_executed = 3;
        assert!(chain.start());
        assert_eq!(chain.phases_executed, 0);
        assert!(chain.is_playing());
    }

    #[test]
    fn test_restart_from_first_phase_keeps_playing() {
        let mut chain = ShaderChain::new(false);
        chain.start();
        chain.current_phase = 1;
        chain.restart_from_first_phase(true);
        assert_eq!(chain.play_state, ChainPlayState::Playing);
        assert_eq!(chain.current_phase, 0);
        assert!(chain.looping);

        chain.stop();
        chain.restart_from_first_phase(false);
        assert_eq!(chain.play_state, ChainPlayState::NotStarted);
    }

    #[test]
    fn test_disabled_chain_is_not_playing() {
        let mut chain = ShaderChain::new(false);
        chain.start();
        chain.enabled = false;
        assert!(!chain.is_playing());
    }

    #[test]
    fn test_phase_new_clamps_negative() {
        let phase = ChainPhase::new(-1.0, -2.0);
        assert_eq!(phase.delay, 0.0);
        assert_eq!(phase.duration, 0.0);
        assert_eq!(ChainPhase::new(0.5, 1.0).total(), 1.5);
    }
}
