#![warn(clippy::all, clippy::pedantic)]

use log::{debug, info, trace};

use crate::components::{Board, Piece, ShapeSource};
use crate::game::{fall_speed_for_level, level_for_score, line_clear_points};
use crate::snapshot::Snapshot;

/// Discrete player requests forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Reset,
    Quit,
}

/// A single game session: board, falling piece, preview piece and score.
///
/// Every player intent is speculative. A candidate piece is built from a
/// clone of the current one and only committed when the board accepts it,
/// so a rejected move leaves the session untouched.
#[derive(Debug)]
pub struct Game<S: ShapeSource = fastrand::Rng> {
    board: Board,
    current: Piece,
    next: Piece,
    score: u32,
    fall_timer: u32,
    game_over: bool,
    source: S,
}

impl Game<fastrand::Rng> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(fastrand::Rng::new())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(fastrand::Rng::with_seed(seed))
    }
}

impl Default for Game<fastrand::Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ShapeSource> Game<S> {
    pub fn with_source(mut source: S) -> Self {
        let current = Piece::spawn(source.next_shape());
        let next = Piece::spawn(source.next_shape());
        debug!("New session: current {:?}, next {:?}", current.kind, next.kind);

        Self {
            board: Board::new(),
            current,
            next,
            score: 0,
            fall_timer: 0,
            game_over: false,
            source,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        level_for_score(self.score)
    }

    /// Gravity interval in milliseconds for the current level.
    #[must_use]
    pub fn fall_speed(&self) -> u32 {
        fall_speed_for_level(self.level())
    }

    #[must_use]
    pub fn fall_timer(&self) -> u32 {
        self.fall_timer
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Advances the gravity clock by `elapsed_ms`. Returns `true` when a
    /// gravity step ran this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }

        self.fall_timer = self.fall_timer.saturating_add(elapsed_ms);
        let fall_speed = self.fall_speed();
        if self.fall_timer <= fall_speed {
            return false;
        }

        trace!(
            "Gravity step after {}ms (fall speed {}ms)",
            self.fall_timer, fall_speed
        );
        self.fall_timer = 0;
        if !self.try_move(0, 1) {
            self.lock_current_piece();
        }
        true
    }

    /// Applies one player intent. Returns `true` if the session changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if self.game_over {
            return match intent {
                Intent::Reset => {
                    self.reset();
                    true
                }
                _ => false,
            };
        }

        match intent {
            Intent::MoveLeft => self.try_move(-1, 0),
            Intent::MoveRight => self.try_move(1, 0),
            Intent::SoftDrop => self.try_move(0, 1),
            Intent::Rotate => self.try_rotate(),
            Intent::HardDrop => {
                self.hard_drop();
                true
            }
            Intent::Reset | Intent::Quit => false,
        }
    }

    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let moved = self.current.translated(dx, dy);
        self.commit_if_valid(moved)
    }

    pub fn try_rotate(&mut self) -> bool {
        let rotated = self.current.rotated();
        self.commit_if_valid(rotated)
    }

    /// Drops the current piece as far as it goes and locks it at once.
    /// Returns the number of rows it fell.
    pub fn hard_drop(&mut self) -> u32 {
        let mut distance = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }
        debug!("Hard drop of {:?} fell {} rows", self.current.kind, distance);

        self.lock_current_piece();
        self.fall_timer = 0;
        distance
    }

    /// Rebuilds the session from scratch, keeping only the shape source.
    pub fn reset(&mut self) {
        info!("Resetting game (final score {})", self.score);
        self.board.clear();
        self.current = Piece::spawn(self.source.next_shape());
        self.next = Piece::spawn(self.source.next_shape());
        self.score = 0;
        self.fall_timer = 0;
        self.game_over = false;
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: *self.board.grid(),
            current_cells: self.current.occupied_cells(),
            current_color: self.current.color,
            next_matrix: self.next.matrix,
            next_color: self.next.color,
            score: self.score,
            level: self.level(),
            game_over: self.game_over,
        }
    }

    fn commit_if_valid(&mut self, candidate: Piece) -> bool {
        if self.board.is_valid_position(&candidate) {
            self.current = candidate;
            true
        } else {
            false
        }
    }

    fn lock_current_piece(&mut self) -> u32 {
        self.board.lock_piece(&self.current);
        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.score += line_clear_points(cleared);
            info!(
                "Cleared {} rows, score {} (level {})",
                cleared,
                self.score,
                self.level()
            );
        } else {
            debug!("Locked {:?} without clearing rows", self.current.kind);
        }

        self.spawn_next();
        cleared
    }

    fn spawn_next(&mut self) {
        let fresh = Piece::spawn(self.source.next_shape());
        self.current = std::mem::replace(&mut self.next, fresh);
        debug!(
            "Spawned {:?}, next is {:?}",
            self.current.kind, self.next.kind
        );

        if self.board.is_game_over() || !self.board.is_valid_position(&self.current) {
            info!("Game over with score {}", self.score);
            self.game_over = true;
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_current_piece(&mut self, piece: Piece) {
        self.current = piece;
    }
}
