//! ECS components for animated shader targets.
//!
//! Submodules overview:
//! - [`entityshader`] – shader binding and uniform map of an entity or layer
//! - [`shaderchain`] – multi-phase chain playback state
//! - [`shadertimeline`] – keyframe timeline playback state
//! - [`shadertween`] – single start→end uniform tween

pub mod entityshader;
pub mod shaderchain;
pub mod shadertimeline;
pub mod shadertween;
