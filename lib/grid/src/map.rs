//! # Grid: Square Cell Storage with World Space Conversion
//!
//! A fixed `size × size` board of cells, each either walkable or blocked,
//! centred on the world origin and laid out on the XZ ground plane.
//!
//! ## Overview
//!
//! Every coordinate in `[0, size)` on both axes has exactly one walkable flag.
//! Anything outside that range is not a cell: lookups answer "not walkable"
//! and writes are ignored, nothing wraps.
//!
//! ## Example
//!
//! ```rust
//! use grid::{Cell, Convert, Grid};
//! use glam::Vec3;
//!
//! let grid = Grid::with_obstacles(10, 1.0, [Cell::new(2, 2)]);
//! assert!(!grid.is_walkable(Cell::new(2, 2)));
//!
//! let world: Vec3 = grid.convert(Cell::new(0, 0));
//! let back: Cell = grid.convert(world);
//! assert_eq!(back, Cell::new(0, 0));
//! ```

use glam::Vec3;

use crate::cell::Cell;

/// Trait for bidirectional coordinate conversion
pub trait Convert<T,U> {
    /// Convert from type T to type U
    fn convert(&self, it: T) -> U;
}

/// A square board of walkable/blocked cells
///
/// # Fields
///
/// - `size`: cells per side
/// - `cell_size`: side length of one cell in world units
/// - `walkable`: one flag per cell, row-major
#[derive(Clone, Debug)]
pub struct Grid {
    size: i16,
    cell_size: f32,
    walkable: Vec<bool>,
}

impl Grid {
    pub fn new(size: u16, cell_size: f32) -> Self {
        let size = size.min(i16::MAX as u16) as i16;
        let len = size as usize * size as usize;
        Self { size, cell_size, walkable: vec![true; len] }
    }

    pub fn with_obstacles(size: u16, cell_size: f32, obstacles: impl IntoIterator<Item = Cell>) -> Self {
        let mut grid = Self::new(size, cell_size);
        for cell in obstacles { grid.set_walkable(cell, false); }
        grid
    }

    pub fn size(&self) -> i16 { self.size }
    pub fn cell_size(&self) -> f32 { self.cell_size }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.walkable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkable.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.x) && (0..self.size).contains(&cell.y)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) { return None }
        Some(cell.y as usize * self.size as usize + cell.x as usize)
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.walkable[i])
    }

    /// Out of range cells are ignored.
    pub fn set_walkable(&mut self, cell: Cell, walkable: bool) {
        let Some(i) = self.index(cell) else { return };
        self.walkable[i] = walkable;
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Cell::new(x, y)))
    }

    pub fn blocked(&self) -> Vec<Cell> {
        self.cells().filter(|&cell| !self.is_walkable(cell)).collect()
    }

    /// In-bounds walkable cells around `cell`, orthogonal before diagonal.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        cell.neighbors().filter(|&it| self.is_walkable(it)).collect()
    }

    fn half(&self) -> f32 {
        self.size as f32 / 2.
    }
}

impl Convert<Vec3,Cell> for Grid {
    fn convert(&self, other: Vec3) -> Cell {
        let x = (other.x / self.cell_size + self.half()).floor();
        let y = (other.z / self.cell_size + self.half()).floor();
        Cell { x: x as i16, y: y as i16 }
    }
}

impl Convert<Cell,Vec3> for Grid {
    fn convert(&self, other: Cell) -> Vec3 {
        let x = (other.x as f32 - self.half() + 0.5) * self.cell_size;
        let z = (other.y as f32 - self.half() + 0.5) * self.cell_size;
        Vec3 { x, y: 0., z }
    }
}
