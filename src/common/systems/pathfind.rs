//! Cell path across the board.
//!
//! A* over the 8-neighbourhood. Every step costs the same whether it is
//! straight or diagonal, and the estimate is the straight-line distance to the
//! goal. That estimate overshoots the step count along diagonals, so routes are
//! fewest-step on an open board but can run a step or two long around
//! obstacles. Only neighbours are checked for walkability, so a route may leave a
//! blocked start cell, while a blocked goal is never entered (unless it is
//! the start).
//!
//! Costs are fixed point so the search can run on `pathfinding`'s integer A*.

use grid::{Cell, Grid};
use pathfinding::prelude::astar;

/// Cost of a single step in fixed-point units.
pub const STEP: u32 = 1000;

/// Path from `start` to `goal` inclusive, or `None` when the goal can't be
/// reached within one expansion per cell of the board.
pub fn find_path(map: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    find_path_within(map, start, goal, map.len())
}

/// [`find_path`] with an explicit expansion budget.
pub fn find_path_within(map: &Grid, start: Cell, goal: Cell, max_expansions: usize) -> Option<Vec<Cell>> {
    let mut expansions = 0;
    let (path, _) = astar(
        &start,
        |&cell| {
            expansions += 1;
            let neighbors = if expansions > max_expansions { Vec::new() } else { map.neighbors(cell) };
            neighbors.into_iter().map(|it| (it, STEP))
        },
        |&cell| heuristic(cell, goal),
        |&cell| cell == goal,
    )?;
    Some(path)
}

fn heuristic(from: Cell, to: Cell) -> u32 {
    (from.euclidean(&to) * STEP as f32) as u32
}
