//! Failure kinds of the shader animation systems.
//!
//! None of these are fatal. Systems build a [`ShaderAnimError`] at the
//! failure site, log it, and carry on with the next parameter or entity.

use bevy_ecs::prelude::Entity;
use thiserror::Error;

use crate::uniform::UniformKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShaderAnimError {
    /// An active animation has no keyframes, phases, or sub-animations to drive.
    #[error("{entity:?}: no {what} registered, nothing to animate")]
    MissingData { entity: Entity, what: &'static str },

    /// Interpolation was requested between two different value kinds.
    #[error("{entity:?}: cannot interpolate '{parameter}' from {from} to {to}")]
    TypeMismatch {
        entity: Entity,
        parameter: String,
        from: UniformKind,
        to: UniformKind,
    },

    /// The entity is gone or no longer carries an `EntityShader`.
    #[error("{0:?} is not a live shader target")]
    StaleTarget(Entity),
}

impl ShaderAnimError {
    pub fn type_mismatch(
        entity: Entity,
        parameter: &str,
        from: UniformKind,
        to: UniformKind,
    ) -> Self {
        ShaderAnimError::TypeMismatch {
            entity,
            parameter: parameter.to_string(),
            from,
            to,
        }
    }
}
