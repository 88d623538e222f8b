//! Shader target component.
//!
//! Every entity that owns animatable shader uniforms carries an
//! [`EntityShader`]. Per-entity shaders (sprites, text) use
//! [`ShaderLayer::Entity`]; shaders bound to a whole render layer are
//! modelled as standalone entities with one of the other layers.
//!
//! The animation systems only touch `uniforms` and read `enabled`; shader
//! compilation and binding belong to the renderer.

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::uniform::UniformValue;

/// What a shader is bound to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderLayer {
    /// A single sprite or text entity.
    #[default]
    Entity,
    /// The tile map layer.
    Tile,
    /// The sprite layer.
    Sprite,
    /// The composited tile + sprite output.
    Combined,
}

/// Component that attaches a shader to an individual entity or layer.
///
/// # Example
/// ```ignore
/// let mut shader = EntityShader::new("glow");
/// shader.set_uniform("uIntensity", UniformValue::Float(0.8));
/// ```
#[derive(Component, Clone, Debug)]
pub struct EntityShader {
    /// Disabled shaders are neither drawn nor animated.
    pub enabled: bool,
    /// Key referencing a shader in the renderer's shader store.
    pub shader_key: Arc<str>,
    pub layer: ShaderLayer,
    /// Per-entity uniform values. These are set on the shader before drawing.
    pub uniforms: FxHashMap<Arc<str>, UniformValue>,
}

impl EntityShader {
    /// Create a new enabled per-entity shader with no uniforms.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self {
            enabled: true,
            shader_key: key.into(),
            layer: ShaderLayer::Entity,
            uniforms: FxHashMap::default(),
        }
    }

    pub fn with_layer(mut self, layer: ShaderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_uniform(mut self, name: &str, value: UniformValue) -> Self {
        self.set_uniform(name, value);
        self
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Sets a uniform, returning the previous value if there was one.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> Option<UniformValue> {
        if let Some(slot) = self.uniforms.get_mut(name) {
            return Some(std::mem::replace(slot, value));
        }
        self.uniforms.insert(Arc::from(name), value);
        None
    }

    pub fn clear_uniform(&mut self, name: &str) {
        self.uniforms.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_enabled_entity_layer() {
        let shader = EntityShader::new("glow");
        assert!(shader.enabled);
        assert_eq!(&*shader.shader_key, "glow");
        assert_eq!(shader.layer, ShaderLayer::Entity);
        assert!(shader.uniforms.is_empty());
    }

    #[test]
    fn test_set_uniform_returns_previous() {
        let mut shader = EntityShader::new("glow");
        assert_eq!(shader.set_uniform("uIntensity", UniformValue::Float(0.5)), None);
        assert_eq!(
            shader.set_uniform("uIntensity", UniformValue::Float(0.9)),
            Some(UniformValue::Float(0.5))
        );
        assert_eq!(shader.uniform("uIntensity"), Some(&UniformValue::Float(0.9)));
        assert_eq!(shader.uniforms.len(), 1);
    }

    #[test]
    fn test_builder_sets_layer_and_uniforms() {
        let shader = EntityShader::new("water")
            .with_layer(ShaderLayer::Tile)
            .with_uniform("uWave", UniformValue::Float(1.0));
        assert_eq!(shader.layer, ShaderLayer::Tile);
        assert_eq!(shader.uniform("uWave"), Some(&UniformValue::Float(1.0)));
    }

    #[test]
    fn test_clear_uniform() {
        let mut shader = EntityShader::new("glow").with_uniform("a", UniformValue::Float(1.0));
        shader.clear_uniform("a");
        assert!(shader.uniform("a").is_none());
    }
}
