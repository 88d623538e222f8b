//! Headless shader animation runner.
//!
//! Loads an INI configuration and a JSON scene, spawns the scene's shader
//! targets, ticks the animation systems for a fixed number of frames and
//! logs completion events along the way.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --scene assets/scenes/pulse.json --frames 120
//! RUST_LOG=debug cargo run -- --config assets/config.ini
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use shaderanim::animator::ShaderAnimator;
use shaderanim::components::entityshader::EntityShader;
use shaderanim::events::shaderanim::{
    ShaderAnimationCompleted, ShaderChainCompleted, ShaderPhaseCompleted,
};
use shaderanim::resources::animconfig::AnimatorConfig;
use shaderanim::resources::shaderdirty::ShaderDirty;
use shaderanim::scene::SceneData;

/// Shader parameter animation runner
#[derive(Parser)]
#[command(version, about = "Runs shader uniform tweens, timelines and chains headless.")]
struct Cli {
    /// INI file with [animation] and [run] settings.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON scene to load. The built-in scene is used when omitted.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Number of ticks to run. Overrides the config file.
    #[arg(long)]
    frames: Option<u32>,

    /// Seconds per tick. Overrides the config file.
    #[arg(long)]
    dt: Option<f32>,
}

fn log_completions(world: &mut World) {
    world.add_observer(|trigger: On<ShaderAnimationCompleted>| {
        let e = trigger.event();
        info!(
            "{:?} [{}] tween on '{}' done at {:?}",
            e.entity, e.shader_key, e.parameter, e.final_value
        );
    });
    world.add_observer(|trigger: On<ShaderPhaseCompleted>| {
        let e = trigger.event();
        info!(
            "{:?} [{}] phase {}/{} done",
            e.entity,
            e.shader_key,
            e.phase_index + 1,
            e.total_phases
        );
    });
    world.add_observer(|trigger: On<ShaderChainCompleted>| {
        let e = trigger.event();
        info!(
            "{:?} [{}] chain done after {} phases",
            e.entity, e.shader_key, e.total_phases_executed
        );
    });
    world.flush();
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = AnimatorConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(dt) = cli.dt {
        config.fixed_delta = dt;
    }

    let scene = match &cli.scene {
        Some(path) => match SceneData::load_from_file(&path.to_string_lossy()) {
            Ok(scene) => scene,
            Err(e) => {
                eprintln!("Error loading scene {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => SceneData::builtin(),
    };

    let mut world = World::new();
    world.insert_resource(config.world_time());
    world.insert_resource(ShaderDirty::default());
    world.insert_resource(config.clone());
    let mut animator = ShaderAnimator::new(&mut world);
    log_completions(&mut world);

    let spawned = scene.spawn(&mut world);
    info!(
        "Running {} frames at {}s per frame",
        config.frames, config.fixed_delta
    );

    let mut dirty_frames = 0u32;
    for _ in 0..config.frames {
        animator.update(&mut world, config.fixed_delta);
        if world.resource_mut::<ShaderDirty>().take() {
            dirty_frames += 1;
        }
    }
    info!("{} of {} frames changed uniforms", dirty_frames, config.frames);

    for (name, entity) in spawned {
        let Some(shader) = world.get::<EntityShader>(entity) else {
            continue;
        };
        let mut uniforms: Vec<_> = shader.uniforms.iter().collect();
        uniforms.sort_by(|a, b| a.0.cmp(b.0));
        println!("{} ({}, {:?}):", name, shader.shader_key, shader.layer);
        for (param, value) in uniforms {
            println!("  {} = {:?}", param, value);
        }
    }
}
