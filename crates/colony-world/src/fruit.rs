//! Fruit and its consumption/spawn lifecycle.

use crate::ant::Ant;
use crate::grid::Grid;
use colony_core::{Position, RandomSource};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A passive piece of food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fruit {
    pub position: Position,
}

impl Fruit {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Indices of fruits sharing a position with any ant, ascending
pub fn consumed_indices(fruits: &[Fruit], ants: &[Ant]) -> Vec<usize> {
    let occupied: HashSet<Position> = ants.iter().map(|ant| ant.position).collect();

    fruits
        .iter()
        .enumerate()
        .filter(|(_, fruit)| occupied.contains(&fruit.position))
        .map(|(index, _)| index)
        .collect()
}

/// Remove fruits by ascending index list, highest index first so earlier
/// removals never shift later ones. Returns the removed fruits.
pub fn remove_consumed(fruits: &mut Vec<Fruit>, indices: &[usize]) -> Vec<Fruit> {
    let mut removed: Vec<Fruit> = indices
        .iter()
        .rev()
        .map(|&index| fruits.remove(index))
        .collect();
    removed.reverse();
    removed
}

/// Uniformly chosen empty cell, or `None` when the grid is full
pub fn spawn_site<R: RandomSource + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Position> {
    let empty = grid.empty_positions();
    if empty.is_empty() {
        return None;
    }
    Some(empty[rng.index(empty.len())])
}
