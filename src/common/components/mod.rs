use bevy::prelude::*;
use grid::Cell;

/// The piece the player drags around the board. `cell` is where it rests;
/// while a [`Motion`](crate::common::systems::movement::Motion) is running the
/// transform is between cells and `cell` still names the departure square.
#[derive(Clone, Component, Copy, Debug, Default)]
pub struct Token { pub cell: Cell }

impl Token {
    pub fn new(cell: Cell) -> Self {
        Self { cell }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Clip {
    Idle,
    Walking,
}
