use ratatui::style::Color;

use crate::components::{Grid, Matrix};

/// Read-only view of a session, taken once per frame for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,
    pub current_cells: Vec<(i32, i32)>,
    pub current_color: Color,
    pub next_matrix: Matrix,
    pub next_color: Color,
    pub score: u32,
    pub level: u32,
    pub game_over: bool,
}

impl Snapshot {
    /// Colour to draw at a visible board cell, with the falling piece on top
    /// of the locked cells.
    #[must_use]
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        if self.current_cells.contains(&(x, y)) {
            return Some(self.current_color);
        }
        let (col, row) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        self.grid.get(row)?.get(col).copied().flatten()
    }
}
