//! World simulation engine.
//!
//! This module implements the 2D grid where ants move, reproduce and eat fruit.

pub mod grid;
pub mod ant;
pub mod fruit;
pub mod conflict;
pub mod simulation;
pub mod render;

pub use grid::Grid;
pub use ant::Ant;
pub use fruit::Fruit;
pub use conflict::{Candidate, Resolution};
pub use simulation::{RunStats, Simulation, TickReport};
pub use render::Frame;
