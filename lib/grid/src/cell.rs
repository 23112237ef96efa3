use derive_more::{Add, Display, Sub};
use serde::{Deserialize, Serialize};

// orthogonal steps first so equal-cost expansions prefer straight moves
pub const DIRECTIONS: [Cell; 8] = [
        Cell { x: -1, y: 0 },  // west
        Cell { x: 1, y: 0 },   // east
        Cell { x: 0, y: -1 },  // south
        Cell { x: 0, y: 1 },   // north
        Cell { x: -1, y: -1 }, // south-west
        Cell { x: -1, y: 1 },  // north-west
        Cell { x: 1, y: -1 },  // south-east
        Cell { x: 1, y: 1 },   // north-east
];

/// A square on the board, addressed by column `x` and row `y`.
///
/// Coordinates are signed so that projections which land off the board are
/// still representable; [`crate::Grid::contains`] decides whether they are real cells.
#[derive(Add, Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Sub)]
#[display("({x}, {y})")]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// All eight surrounding cells, in [`DIRECTIONS`] order. No bounds checks.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        DIRECTIONS.into_iter().map(move |dir| self + dir)
    }

    /// Number of king moves between two cells.
    pub fn distance(&self, other: &Cell) -> i16 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn euclidean(&self, other: &Cell) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        dx.hypot(dy)
    }

    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.distance(other) == 1
    }

    pub fn is_diagonal_to(&self, other: &Cell) -> bool {
        (self.x - other.x).abs() == 1 && (self.y - other.y).abs() == 1
    }
}

impl From<(i16, i16)> for Cell {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}
