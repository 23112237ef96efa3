pub mod drag;
pub mod preview;
