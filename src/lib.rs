//! Shader parameter animation library.
//!
//! Drives shader uniforms (floats, vectors, colors) on `bevy_ecs` entities
//! through tweens, keyframe timelines and multi-phase chains. This module
//! exposes the components, resources, systems and events for hosts and
//! integration tests; [`animator::ShaderAnimator`] bundles them into a
//! ready-to-tick schedule.

pub mod animator;
pub mod components;
pub mod easing;
pub mod error;
pub mod events;
pub mod resources;
pub mod scene;
pub mod systems;
pub mod uniform;
