mod cell;
mod map;

pub use cell::{Cell, DIRECTIONS};
pub use map::{Convert, Grid};
