pub mod actor;
pub mod animator;
pub mod camera;
pub mod input;
pub mod overlay;
pub mod world;
