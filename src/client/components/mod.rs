use std::time::Duration;

use bevy::{animation::graph::AnimationNodeIndex, prelude::*};
use grid::Cell;

use crate::common::components::Clip;

/// Links a token to the entity carrying its `AnimationPlayer` and the graph
/// nodes for each clip.
#[derive(Clone, Component, Copy, Debug)]
pub struct Animates {
    pub player: Entity,
    pub idle: AnimationNodeIndex,
    pub walking: AnimationNodeIndex,
}

impl Animates {
    pub fn node(&self, clip: Clip) -> AnimationNodeIndex {
        match clip {
            Clip::Idle => self.idle,
            Clip::Walking => self.walking,
        }
    }
}

/// Latest clip asked for by the motion player, consumed by the animator.
#[derive(Clone, Component, Copy, Debug, Default)]
pub struct ClipRequest(pub Option<(Clip, Duration)>);

/// Translucent stand-in shown where the token would be dropped.
#[derive(Clone, Component, Copy, Debug, Default)]
pub struct Ghost;

/// One square of the board overlay.
#[derive(Clone, Component, Copy, Debug, Deref)]
pub struct Tile(pub Cell);

/// The map image under the grid.
#[derive(Clone, Component, Copy, Debug, Default)]
pub struct Board;
