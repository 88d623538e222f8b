//! Channel sink for animation events.
//!
//! In-world reactions subscribe with observers. Consumers outside the ECS
//! (UI, logging threads, tests) can insert a [`ShaderEventSink`] instead and
//! drain the paired receiver. Dropping the receiver is fine: failed sends
//! are ignored.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::shaderanim::ShaderAnimationEvent;

#[derive(Resource, Clone)]
pub struct ShaderEventSink {
    tx: Sender<ShaderAnimationEvent>,
}

impl ShaderEventSink {
    pub fn new(tx: Sender<ShaderAnimationEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink and the receiver that observes it.
    pub fn channel() -> (Self, Receiver<ShaderAnimationEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }

    pub fn send(&self, event: ShaderAnimationEvent) {
        let _ = self.tx.send(event);
    }
}
