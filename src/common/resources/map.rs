use bevy::prelude::*;

use crate::common::config::BoardConfig;

/// The board every system reads. Walkability is fixed once inserted.
#[derive(Clone, Debug, Deref, DerefMut, Resource)]
pub struct Map(grid::Grid);

impl Map {
    pub fn new(grid: grid::Grid) -> Self {
        Self(grid)
    }
}

impl From<&BoardConfig> for Map {
    fn from(config: &BoardConfig) -> Self {
        Self::new(grid::Grid::with_obstacles(config.grid_size, config.cell_size, config.obstacles.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use grid::Cell;

    use super::*;

    #[test]
    fn test_map_from_default_config() {
        let config = BoardConfig::default();
        let map = Map::from(&config);
        assert_eq!(map.size(), 10);
        assert_eq!(map.blocked().len(), config.obstacles.len());
        assert!(!map.is_walkable(Cell::new(3, 3)));
        assert!(map.is_walkable(config.start), "token must start on a walkable cell");
    }
}
