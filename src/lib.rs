pub mod app;
pub mod camera;
pub mod config;
pub mod events;
pub mod grid;
pub mod io;
pub mod rule_set;

pub use grid::GridError;
pub use grid::LifeGrid;
