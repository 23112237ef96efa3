//! Token Movement Along a Path
//!
//! The motion player walks the token through a finished path one segment
//! (cell to adjacent cell) at a time. It is an explicit state machine: the
//! frame loop calls [`Motion::tick`] with the elapsed time and the player
//! updates position, facing and animation through a [`TokenRig`], then hands
//! control back until the next frame.
//!
//! Speed is expressed the way tabletop rules do it, feet per six-second round,
//! and diagonal segments take √2 longer so the token covers ground at the same
//! real-world pace in every direction.

use std::{collections::VecDeque, f32::consts::SQRT_2, fmt, time::Duration};

use bevy::prelude::*;
use grid::{Cell, Convert, Grid};

use crate::common::{components::Clip, config::BoardConfig};

// ===== Movement Constants =====

/// Cross-fade used whenever the token switches between idle and walking
pub const CROSSFADE: Duration = Duration::from_millis(500);

/// Length of a round in milliseconds
pub const ROUND_MS: f32 = 6000.;

// ===== Collaborators =====

/// The visible token the player drives.
pub trait TokenRig {
    fn set_position(&mut self, position: Vec3);
    /// Yaw in radians about the up axis, 0 facing +Z (increasing `y` on the board).
    fn set_facing(&mut self, yaw: f32);
    fn play_animation(&mut self, clip: Clip, crossfade: Duration);
}

// ===== Pace =====

/// Movement speed in tabletop units
#[derive(Clone, Copy, Debug, PartialEq, Resource)]
pub struct Pace {
    /// Real-world distance of one cell
    pub feet_per_cell: f32,
    /// Distance covered in one round
    pub feet_per_six_seconds: f32,
}

impl Pace {
    /// Milliseconds to cross one cell orthogonally.
    pub fn cell_millis(&self) -> f32 {
        ROUND_MS * self.feet_per_cell / self.feet_per_six_seconds
    }

    /// Milliseconds to walk from `from` to the adjacent `to`.
    pub fn segment_millis(&self, from: Cell, to: Cell) -> f32 {
        let millis = self.cell_millis();
        if from.is_diagonal_to(&to) { millis * SQRT_2 } else { millis }
    }
}

/// Board movement settings that can't produce a finite segment time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidPace {
    pub feet_per_cell: f32,
    pub speed: f32,
}

impl fmt::Display for InvalidPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feet per cell ({}) and speed ({}) must both be positive", self.feet_per_cell, self.speed)
    }
}

impl std::error::Error for InvalidPace {}

impl TryFrom<&BoardConfig> for Pace {
    type Error = InvalidPace;

    fn try_from(config: &BoardConfig) -> Result<Self, Self::Error> {
        let valid = |it: f32| it.is_finite() && it > 0.;
        if !valid(config.feet_per_cell) || !valid(config.speed) {
            return Err(InvalidPace { feet_per_cell: config.feet_per_cell, speed: config.speed });
        }
        Ok(Self { feet_per_cell: config.feet_per_cell, feet_per_six_seconds: config.speed })
    }
}

/// Heading from one cell toward another as a yaw about the up axis.
pub fn facing(from: Cell, to: Cell) -> f32 {
    let dx = (to.x - from.x) as f32;
    let dy = (to.y - from.y) as f32;
    dx.atan2(dy)
}

// ===== Motion =====

/// What a tick did
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// Nothing to walk
    Idle,
    /// Still between cells
    Moving,
    /// Reached the last cell of the path this tick
    Arrived(Cell),
}

/// Walks a token along a path, segment by segment
#[derive(Clone, Component, Debug, Default)]
pub struct Motion {
    /// Remaining path; the front is the cell of the segment in progress
    path: VecDeque<Cell>,
    /// Milliseconds spent in the current segment
    elapsed: f32,
}

impl Motion {
    pub fn is_moving(&self) -> bool {
        self.path.len() >= 2
    }

    pub fn remaining(&self) -> impl Iterator<Item = &Cell> {
        self.path.iter()
    }

    /// Begin walking `path`.
    ///
    /// Paths with fewer than two cells leave the token where it is. A path
    /// already in progress always runs to completion, so this refuses to start
    /// while moving.
    ///
    /// # Returns
    /// Whether movement started.
    pub fn start(&mut self, path: Vec<Cell>, rig: &mut impl TokenRig) -> bool {
        if self.is_moving() || path.len() < 2 { return false }

        self.path = path.into();
        self.elapsed = 0.;
        rig.play_animation(Clip::Walking, CROSSFADE);
        self.face(rig);
        true
    }

    /// Advance by `dt`.
    ///
    /// Time left over when a segment completes carries into the next one, so
    /// there is no pause between cells. The final cell snaps the token to its
    /// centre and fades back to idle.
    pub fn tick(&mut self, dt: Duration, map: &Grid, pace: &Pace, rig: &mut impl TokenRig) -> Step {
        if !self.is_moving() { return Step::Idle }

        self.elapsed += dt.as_secs_f32() * 1000.;
        loop {
            let (Some(&from), Some(&to)) = (self.path.front(), self.path.get(1)) else { return Step::Idle };
            let duration = pace.segment_millis(from, to);

            if self.elapsed < duration {
                let progress = self.elapsed / duration;
                let start: Vec3 = map.convert(from);
                rig.set_position(start.lerp(map.convert(to), progress));
                return Step::Moving;
            }

            self.elapsed -= duration;
            self.path.pop_front();
            if !self.is_moving() {
                self.path.clear();
                self.elapsed = 0.;
                rig.set_position(map.convert(to));
                rig.play_animation(Clip::Idle, CROSSFADE);
                return Step::Arrived(to);
            }
            self.face(rig);
        }
    }

    fn face(&self, rig: &mut impl TokenRig) {
        let (Some(&from), Some(&to)) = (self.path.front(), self.path.get(1)) else { return };
        rig.set_facing(facing(from, to));
    }
}
