//! Event and message types of the shader animation systems.
//!
//! Submodules:
//! - [`queue`] – per-tick buffer that defers notifications until a traversal ends
//! - [`shaderanim`] – notifications produced by tweens, timelines and chains
//! - [`shadercmd`] – commands that start, stop and configure animations
pub mod queue;
pub mod shaderanim;
pub mod shadercmd;
