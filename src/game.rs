#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Side length of a shape's occupancy matrix
pub const MATRIX_SIZE: usize = 4;

// New pieces appear horizontally centered on the top row
pub const SPAWN_X: i32 = (BOARD_WIDTH / 2) as i32 - 2;
pub const SPAWN_Y: i32 = 0;

// Line clear scoring: rows cleared squared times this base
pub const LINE_CLEAR_BASE_POINTS: u32 = 100;

// Level progression
pub const STARTING_LEVEL: u32 = 1;
pub const POINTS_PER_LEVEL: u32 = 500;

// Gravity timing in milliseconds
pub const BASE_FALL_SPEED_MS: u32 = 700;
pub const FALL_SPEED_STEP_MS: u32 = 70;
pub const MIN_FALL_SPEED_MS: u32 = 150;

/// Points awarded for clearing `rows` rows with a single lock.
#[must_use]
pub fn line_clear_points(rows: u32) -> u32 {
    rows * rows * LINE_CLEAR_BASE_POINTS
}

#[must_use]
pub fn level_for_score(score: u32) -> u32 {
    STARTING_LEVEL + score / POINTS_PER_LEVEL
}

/// Milliseconds between automatic one-row descents at `level`.
#[must_use]
pub fn fall_speed_for_level(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FALL_SPEED_STEP_MS);
    BASE_FALL_SPEED_MS
        .saturating_sub(reduction)
        .max(MIN_FALL_SPEED_MS)
}
