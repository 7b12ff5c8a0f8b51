//! 2D occupancy grid for the world.

use colony_core::{Cell, Position, RandomSource, WorldConfig};
use serde::{Deserialize, Serialize};

/// A bounded, non-wrapping grid of occupancy tags.
///
/// The ant and fruit registries own positions; the grid mirrors them so
/// occupancy queries are O(1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Empty; size],
        }
    }

    /// Populate every cell with [`select_entity`], row by row
    pub fn generate<R: RandomSource>(config: &WorldConfig, rng: &mut R) -> Self {
        let mut grid = Self::new(config.width, config.height);

        for x in 0..config.height {
            for y in 0..config.width {
                let cell = select_entity(rng, config);
                grid.set(Position::new(x, y), cell);
            }
        }

        grid
    }

    /// True when `pos` is inside the grid and its cell is empty
    pub fn can_place(&self, pos: Position) -> bool {
        self.index(pos)
            .map_or(false, |index| self.cells[index].is_empty())
    }

    /// Cell at `pos`, or `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|index| self.cells[index])
    }

    /// Overwrite a cell. Callers keep the registries in sync.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(index) = self.index(pos) {
            self.cells[index] = cell;
        }
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All positions holding `cell`, in row-major order
    pub fn positions_of(&self, cell: Cell) -> Vec<Position> {
        self.iter()
            .filter(|(_, c)| *c == cell)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions_of(Cell::Empty)
    }

    /// Rows from `x = 0` down
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if 0 <= pos.x && pos.x < self.height && 0 <= pos.y && pos.y < self.width {
            Some((pos.x * self.width + pos.y) as usize)
        } else {
            None
        }
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) / self.width;
        let y = (index as i32) % self.width;
        Position::new(x, y)
    }
}

/// Pick the initial occupant of one cell.
///
/// Ant and fruit draws are scaled by their rates; if they are exactly equal
/// the cell stays empty. Otherwise the largest of ant, fruit and space wins,
/// with ties going to ant, then fruit, then space.
pub fn select_entity<R: RandomSource + ?Sized>(rng: &mut R, config: &WorldConfig) -> Cell {
    let ant_chance = rng.unit() * config.ant_rate;
    let fruit_chance = rng.unit() * config.fruit_rate;

    if ant_chance == fruit_chance {
        return Cell::Empty;
    }

    let space_chance = rng.unit() * config.space_rate;
    let chosen = ant_chance.max(fruit_chance).max(space_chance);

    if chosen == ant_chance {
        Cell::Ant
    } else if chosen == fruit_chance {
        Cell::Fruit
    } else {
        Cell::Empty
    }
}
