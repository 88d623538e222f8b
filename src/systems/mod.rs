//! Shader animation systems.
//!
//! Submodules overview
//! - [`shaderchain`] – drive multi-phase chains and their sub-animations
//! - [`shadercommands`] – apply start/stop/set commands before any traversal
//! - [`shadertimeline`] – sample keyframe timelines
//! - [`shadertween`] – advance single start→end tweens
//! - [`time`] – update simulation time and delta

pub mod shaderchain;
pub mod shadercommands;
pub mod shadertimeline;
pub mod shadertween;
pub mod time;
