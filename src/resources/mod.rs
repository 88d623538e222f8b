//! ECS resources made available to the animation systems.
//!
//! Overview
//! - `animationstore` – per-entity keyframes and chain definitions
//! - `animconfig` – INI-backed time scale and runner settings
//! - `eventsink` – optional channel receiving every animation event
//! - `shaderdirty` – optional "uniforms changed" flag for the renderer
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod animconfig;
pub mod eventsink;
pub mod shaderdirty;
pub mod worldtime;
