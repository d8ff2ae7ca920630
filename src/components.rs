#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Board dimensions are tiny, so usize <-> i32 casts never truncate or wrap
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    // Coordinates are range-checked before being used as indices
    clippy::cast_sign_loss
)]

use std::collections::HashMap;

use ratatui::style::Color;

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, MATRIX_SIZE, SPAWN_X, SPAWN_Y};

/// A 4x4 occupancy grid, indexed `[row][col]`.
pub type Matrix = [[bool; MATRIX_SIZE]; MATRIX_SIZE];

/// Board view: one optional colour per cell, indexed `[row][col]`.
pub type Grid = [[Option<Color>; BOARD_WIDTH]; BOARD_HEIGHT];

pub const SHAPE_COUNT: usize = 7;

const fn matrix(rows: [[u8; MATRIX_SIZE]; MATRIX_SIZE]) -> Matrix {
    let mut out = [[false; MATRIX_SIZE]; MATRIX_SIZE];
    let mut row = 0;
    while row < MATRIX_SIZE {
        let mut col = 0;
        while col < MATRIX_SIZE {
            out[row][col] = rows[row][col] == 1;
            col += 1;
        }
        row += 1;
    }
    out
}

const SHAPES: [Matrix; SHAPE_COUNT] = [
    // I
    matrix([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // O
    matrix([[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // T
    matrix([[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // L
    matrix([[1, 0, 0, 0], [1, 0, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
    // J
    matrix([[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
    // S
    matrix([[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // Z
    matrix([[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; SHAPE_COUNT] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Looks up a shape by catalog index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= SHAPE_COUNT`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        assert!(index < SHAPE_COUNT, "shape index {index} out of range");
        Self::ALL[index]
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn matrix(self) -> Matrix {
        SHAPES[self.index()]
    }

    #[must_use]
    pub fn get_color(self) -> Color {
        match self {
            ShapeKind::I => Color::Rgb(0, 220, 220),
            ShapeKind::O => Color::Rgb(220, 220, 0),
            ShapeKind::T => Color::Rgb(200, 0, 200),
            ShapeKind::L => Color::Rgb(255, 165, 0),
            ShapeKind::J => Color::Rgb(30, 30, 200),
            ShapeKind::S => Color::Rgb(30, 200, 30),
            ShapeKind::Z => Color::Rgb(200, 30, 30),
        }
    }

    #[must_use]
    pub fn cell_count(self) -> usize {
        popcount(&self.matrix())
    }
}

/// Supplies the shape of each newly generated piece.
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

impl ShapeSource for fastrand::Rng {
    fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::from_index(self.usize(0..SHAPE_COUNT))
    }
}

#[must_use]
pub fn popcount(matrix: &Matrix) -> usize {
    matrix.iter().flatten().filter(|&&cell| cell).count()
}

/// Clockwise quarter turn: `rotated[row][col] = original[N - 1 - col][row]`.
#[must_use]
pub fn rotate_matrix(matrix: &Matrix) -> Matrix {
    let mut rotated = [[false; MATRIX_SIZE]; MATRIX_SIZE];
    for (row, out_row) in rotated.iter_mut().enumerate() {
        for (col, cell) in out_row.iter_mut().enumerate() {
            *cell = matrix[MATRIX_SIZE - 1 - col][row];
        }
    }
    rotated
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Board coordinate of the matrix's top-left cell.
    pub origin: Position,
    pub matrix: Matrix,
    pub kind: ShapeKind,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub fn new(kind: ShapeKind, origin: Position) -> Self {
        Self {
            origin,
            matrix: kind.matrix(),
            kind,
            color: kind.get_color(),
        }
    }

    /// A fresh piece at the spawn offset.
    #[must_use]
    pub fn spawn(kind: ShapeKind) -> Self {
        Self::new(
            kind,
            Position {
                x: SPAWN_X,
                y: SPAWN_Y,
            },
        )
    }

    pub fn rotate(&mut self) {
        self.matrix = rotate_matrix(&self.matrix);
    }

    /// Absolute board coordinates of every occupied matrix cell.
    #[must_use]
    pub fn occupied_cells(&self) -> Vec<(i32, i32)> {
        let mut cells = Vec::with_capacity(MATRIX_SIZE);
        for (row, line) in self.matrix.iter().enumerate() {
            for (col, &filled) in line.iter().enumerate() {
                if filled {
                    cells.push((self.origin.x + col as i32, self.origin.y + row as i32));
                }
            }
        }
        cells
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let mut moved = self.clone();
        moved.origin.x += dx;
        moved.origin.y += dy;
        moved
    }

    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut turned = self.clone();
        turned.rotate();
        turned
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    locked: HashMap<(i32, i32), Color>,
    grid: Grid,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            locked: HashMap::new(),
            grid: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.locked.clear();
        self.refresh_grid();
    }

    #[must_use]
    pub fn locked(&self) -> &HashMap<(i32, i32), Color> {
        &self.locked
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Color> {
        self.locked.get(&(x, y)).copied()
    }

    #[must_use]
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.occupied_cells().into_iter().all(|(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                return false;
            }
            // Cells above the board only need to stay inside the side walls
            y < 0 || !self.locked.contains_key(&(x, y))
        })
    }

    pub fn lock_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_cells() {
            if y >= 0 {
                self.locked.insert((x, y), piece.color);
            }
        }
        self.refresh_grid();
    }

    /// Removes every full row, compacting the cells above it, and returns how
    /// many rows were removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut row = BOARD_HEIGHT as i32 - 1;

        while row >= 0 {
            if self.is_row_full(row) {
                for x in 0..BOARD_WIDTH as i32 {
                    self.locked.remove(&(x, row));
                }
                self.shift_down_above(row);
                cleared += 1;
                // The row that fell into this index has not been checked yet
            } else {
                row -= 1;
            }
        }

        self.refresh_grid();
        cleared
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.locked.keys().any(|&(_, y)| y < 1)
    }

    #[cfg(test)]
    pub(crate) fn fill(&mut self, cells: &[(i32, i32)], color: Color) {
        for &cell in cells {
            self.locked.insert(cell, color);
        }
        self.refresh_grid();
    }

    fn is_row_full(&self, row: i32) -> bool {
        (0..BOARD_WIDTH as i32).all(|x| self.locked.contains_key(&(x, row)))
    }

    fn shift_down_above(&mut self, row: i32) {
        let falling: Vec<((i32, i32), Color)> = self
            .locked
            .iter()
            .filter(|&(&(_, y), _)| y < row)
            .map(|(&key, &color)| (key, color))
            .collect();

        for (key, _) in &falling {
            self.locked.remove(key);
        }
        for ((x, y), color) in falling {
            self.locked.insert((x, y + 1), color);
        }
    }

    fn refresh_grid(&mut self) {
        for (y, line) in self.grid.iter_mut().enumerate() {
            for (x, cell) in line.iter_mut().enumerate() {
                *cell = self.locked.get(&(x as i32, y as i32)).copied();
            }
        }
    }
}
