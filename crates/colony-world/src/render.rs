//! Text frames for display.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only snapshot of the grid as text rows.
///
/// Displayed as a dash border `width` wide, one line per row, and the border again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    width: usize,
    rows: Vec<String>,
}

impl Frame {
    pub fn capture(grid: &Grid) -> Self {
        let rows = grid
            .rows()
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect();

        Self {
            width: grid.width.max(0) as usize,
            rows,
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn border(&self) -> String {
        "-".repeat(self.width)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = self.border();
        writeln!(f, "{}", border)?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        writeln!(f, "{}", border)
    }
}
