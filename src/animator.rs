//! Per-frame driver for the shader animation systems.
//!
//! [`ShaderAnimator`] owns a [`Schedule`] holding the command, tween,
//! timeline and chain systems, chained in that order. One
//! [`update`](ShaderAnimator::update) call is one tick:
//!
//! 1. [`update_world_time`] clamps and scales `dt` into [`WorldTime`].
//! 2. Pending [`ShaderAnimCmd`] messages are applied.
//! 3. Tweens, timelines and chains each traverse their targets once and
//!    flush their notifications after the traversal.
//! 4. The command message buffers are advanced.
//!
//! Hosts that already run their own schedule can call
//! [`add_shader_animation_systems`] and drive [`WorldTime`] themselves.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;

use crate::events::shadercmd::ShaderAnimCmd;
use crate::resources::animationstore::ShaderAnimationStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::shaderchain::shader_chain_system;
use crate::systems::shadercommands::shader_command_system;
use crate::systems::shadertimeline::shader_timeline_system;
use crate::systems::shadertween::shader_tween_system;
use crate::systems::time::update_world_time;

/// Register the shader animation systems on `schedule`, chained so commands
/// land before any traversal.
pub fn add_shader_animation_systems(schedule: &mut Schedule) {
    schedule.add_systems(
        (
            shader_command_system,
            shader_tween_system,
            shader_timeline_system,
            shader_chain_system,
        )
            .chain(),
    );
}

pub struct ShaderAnimator {
    schedule: Schedule,
}

impl ShaderAnimator {
    /// Build the schedule and make sure the resources the systems need exist.
    ///
    /// An existing [`WorldTime`] (for example one built from
    /// [`AnimatorConfig`](crate::resources::animconfig::AnimatorConfig)) is
    /// kept as is.
    pub fn new(world: &mut World) -> Self {
        if !world.contains_resource::<WorldTime>() {
            world.insert_resource(WorldTime::default());
        }
        world.init_resource::<ShaderAnimationStore>();
        world.init_resource::<Messages<ShaderAnimCmd>>();

        let mut schedule = Schedule::default();
        add_shader_animation_systems(&mut schedule);
        ShaderAnimator { schedule }
    }

    /// Queue a command for the next tick.
    pub fn send(world: &mut World, cmd: ShaderAnimCmd) {
        world.resource_mut::<Messages<ShaderAnimCmd>>().write(cmd);
    }

    /// Advance every animation by one tick of `dt` seconds.
    pub fn update(&mut self, world: &mut World, dt: f32) {
        update_world_time(world, dt);
        self.schedule.run(world);
        world.resource_mut::<Messages<ShaderAnimCmd>>().update();
    }
}
