use bevy::prelude::*;
use grid::Cell;
use serde::{Deserialize, Serialize};

/// Board layout and movement rules, fixed at startup
#[derive(Clone, Debug, Deserialize, PartialEq, Resource, Serialize)]
pub struct BoardConfig {
    /// Cells per side of the square board (default: 10)
    pub grid_size: u16,
    /// Side of one cell in world units (default: 1.0)
    pub cell_size: f32,
    /// Real-world distance one cell stands for (default: 5 ft)
    pub feet_per_cell: f32,
    /// Token speed in feet per six-second round (default: 50)
    pub speed: f32,
    /// Cell the token is placed on (default: board centre)
    pub start: Cell,
    /// Cells marked non-walkable when the board is built
    pub obstacles: Vec<Cell>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            cell_size: 1.,
            feet_per_cell: 5.,
            speed: 50.,
            start: Cell::new(5, 5),
            obstacles: vec![
                Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 4),
                Cell::new(3, 2), Cell::new(3, 3), Cell::new(3, 4),
                Cell::new(4, 2), Cell::new(4, 3), Cell::new(4, 4),
                Cell::new(7, 7), Cell::new(7, 8), Cell::new(8, 7), Cell::new(8, 8),
            ],
        }
    }
}
