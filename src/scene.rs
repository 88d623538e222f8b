//! Data-driven shader animation scenes.
//!
//! A scene file is JSON describing shader targets and the animations to
//! start on them:
//!
//! ```json
//! {
//!   "targets": [
//!     {
//!       "name": "torch",
//!       "shader": "glow",
//!       "layer": "Entity",
//!       "uniforms": { "uIntensity": { "Float": 0.0 } },
//!       "tween": {
//!         "parameter": "uIntensity",
//!         "from": { "Float": 0.0 }, "to": { "Float": 1.0 },
//!         "duration": 1.0, "easing": "EaseInOut", "loop_mode": "PingPong"
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! [`SceneData::spawn`] creates one entity per target and queues the
//! commands that set up its animations. They take effect on the next tick.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::animator::ShaderAnimator;
use crate::components::entityshader::{EntityShader, ShaderLayer};
use crate::components::shaderchain::{ChainPhase, ChainSubAnimation};
use crate::components::shadertimeline::Keyframe;
use crate::components::shadertween::{LoopMode, ShaderTween};
use crate::easing::Easing;
use crate::events::shadercmd::ShaderAnimCmd;
use crate::uniform::{Color, UniformValue};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SceneData {
    pub targets: Vec<SceneTarget>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneTarget {
    /// Label used in logs.
    pub name: String,
    pub shader: String,
    #[serde(default)]
    pub layer: ShaderLayer,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub uniforms: FxHashMap<String, UniformValue>,
    #[serde(default)]
    pub tween: Option<ShaderTween>,
    #[serde(default)]
    pub timeline: Option<SceneTimeline>,
    #[serde(default)]
    pub chain: Option<SceneChain>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneTimeline {
    pub parameter: String,
    #[serde(default)]
    pub looping: bool,
    pub keyframes: Vec<Keyframe>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneChain {
    #[serde(default)]
    pub looping: bool,
    /// Start the chain right away instead of waiting for a start command.
    #[serde(default = "default_autostart")]
    pub autostart: bool,
    pub phases: Vec<ScenePhase>,
}

fn default_autostart() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenePhase {
    #[serde(default)]
    pub delay: f32,
    pub duration: f32,
    #[serde(default)]
    pub animations: Vec<ChainSubAnimation>,
}

impl SceneData {
    /// Loads scene data from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let scene: SceneData = serde_json::from_str(&file_content)?;
        Ok(scene)
    }

    /// Scene used when no file is given: a pulsing glow, a color timeline on
    /// the tile layer and a two-step fade chain.
    pub fn builtin() -> Self {
        let glow = SceneTarget {
            name: "glow".into(),
            shader: "glow".into(),
            layer: ShaderLayer::Entity,
            enabled: None,
            uniforms: FxHashMap::default(),
            tween: Some(
                ShaderTween::new(
                    "uIntensity",
                    UniformValue::Float(0.2),
                    UniformValue::Float(1.0),
                    0.75,
                )
                .with_easing(Easing::EaseInOut)
                .with_loop_mode(LoopMode::PingPong),
            ),
            timeline: None,
            chain: None,
        };

        let tint = SceneTarget {
            name: "dusk".into(),
            shader: "tint".into(),
            layer: ShaderLayer::Tile,
            enabled: None,
            uniforms: FxHashMap::default(),
            tween: None,
            timeline: Some(SceneTimeline {
                parameter: "uTint".into(),
                looping: true,
                keyframes: vec![
                    Keyframe::new(0.0, Color::WHITE.into()).with_easing(Easing::SmoothStep),
                    Keyframe::new(1.5, Color::new(255, 140, 60, 255).into()),
                    Keyframe::new(3.0, Color::new(40, 40, 120, 255).into())
                        .with_easing(Easing::EaseOut),
                    Keyframe::new(4.0, Color::WHITE.into()),
                ],
            }),
            chain: None,
        };

        let fade = SceneTarget {
            name: "fade".into(),
            shader: "fade".into(),
            layer: ShaderLayer::Combined,
            enabled: None,
            uniforms: FxHashMap::default(),
            tween: None,
            timeline: None,
            chain: Some(SceneChain {
                looping: false,
                autostart: true,
                phases: vec![
                    ScenePhase {
                        delay: 0.5,
                        duration: 1.0,
                        animations: vec![
                            ChainSubAnimation::new(
                                "uAlpha",
                                UniformValue::Float(1.0),
                                UniformValue::Float(0.0),
                            )
                            .with_easing(Easing::EaseIn),
                        ],
                    },
                    ScenePhase {
                        delay: 0.0,
                        duration: 0.5,
                        animations: vec![ChainSubAnimation::new(
                            "uOffset",
                            UniformValue::Vec2(Vec2::ZERO),
                            UniformValue::Vec2(Vec2::new(4.0, -2.0)),
                        )],
                    },
                ],
            }),
        };

        SceneData {
            targets: vec![glow, tint, fade],
        }
    }

    /// Spawn every target and queue its animation commands.
    ///
    /// The world must already have been prepared by [`ShaderAnimator::new`].
    /// Returns the spawned entities paired with their names, in file order.
    pub fn spawn(&self, world: &mut World) -> Vec<(String, Entity)> {
        let mut spawned = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            let entity = target.spawn(world);
            info!("Spawned '{}' as {:?}", target.name, entity);
            spawned.push((target.name.clone(), entity));
        }
        spawned
    }
}

impl SceneTarget {
    fn spawn(&self, world: &mut World) -> Entity {
        let mut shader = EntityShader::new(self.shader.as_str()).with_layer(self.layer);
        shader.enabled = self.enabled.unwrap_or(true);
        for (name, value) in &self.uniforms {
            shader.set_uniform(name, *value);
        }
        let entity = world.spawn(shader).id();

        for cmd in self.commands(entity) {
            ShaderAnimator::send(world, cmd);
        }
        entity
    }

    /// Commands that set up this target's animations on `entity`.
    pub fn commands(&self, entity: Entity) -> Vec<ShaderAnimCmd> {
        let mut cmds = Vec::new();
        if let Some(tween) = &self.tween {
            cmds.push(ShaderAnimCmd::StartTween {
                entity,
                tween: tween.clone(),
            });
        }
        if let Some(timeline) = &self.timeline {
            cmds.push(ShaderAnimCmd::AddKeyframes {
                entity,
                keyframes: timeline.keyframes.clone(),
            });
            cmds.push(ShaderAnimCmd::StartTimeline {
                entity,
                parameter: Arc::from(timeline.parameter.as_str()),
                looping: timeline.looping,
            });
        }
        if let Some(chain) = &self.chain {
            let phases = chain
                .phases
                .iter()
                .map(|p| ChainPhase::new(p.delay, p.duration))
                .collect();
            let animations = chain
                .phases
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.animations.is_empty())
                .map(|(i, p)| (i, p.animations.clone()))
                .collect();
            cmds.push(ShaderAnimCmd::SetChain {
                entity,
                phases,
                animations,
                looping: chain.looping,
            });
            if chain.autostart {
                cmds.push(ShaderAnimCmd::StartChain { entity });
            }
        }
        cmds
    }
}
