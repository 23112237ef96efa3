use std::iter::once;

use grid::{Cell, Grid};

use crate::common::systems::pathfind::find_path;

/// Chains one search per leg through `anchors` in order.
///
/// All or nothing: the first leg that can't be walked fails the whole route.
/// Each leg after the first starts where the previous one ended, so its first
/// cell is dropped.
pub fn route(map: &Grid, start: Cell, anchors: &[Cell], goal: Cell) -> Option<Vec<Cell>> {
    let mut path = vec![start];
    let mut from = start;
    for &to in anchors.iter().chain(once(&goal)) {
        let leg = find_path(map, from, to)?;
        path.extend(leg.into_iter().skip(1));
        from = to;
    }
    Some(path)
}
