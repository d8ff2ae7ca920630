#[cfg(test)]
mod tests {
    use crate::components::{Piece, Position, ShapeKind};
    use crate::engine::{Game, Intent};
    use crate::game::{SPAWN_X, SPAWN_Y};
    use crate::tests::test_utils::{assert_grid_matches, row_cells, scripted_game};
    use ratatui::style::Color;

    fn spawn_origin() -> Position {
        Position {
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    #[test]
    fn test_new_game() {
        let game = scripted_game(&[ShapeKind::I, ShapeKind::O]);

        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.fall_speed(), 700);
        assert_eq!(game.fall_timer(), 0);
        assert!(!game.is_game_over());
        assert!(game.board().locked().is_empty());

        assert_eq!(game.current_piece().kind, ShapeKind::I);
        assert_eq!(game.current_piece().origin, spawn_origin());
        assert_eq!(game.next_piece().kind, ShapeKind::O);
        assert_eq!(game.next_piece().origin, spawn_origin());
    }

    #[test]
    fn test_random_game_starts_cleanly() {
        let game = Game::with_seed(1234);
        assert!(!game.is_game_over());
        assert_eq!(game.current_piece().origin, spawn_origin());
        assert!(game.board().is_valid_position(game.current_piece()));
    }

    #[test]
    fn test_horizontal_moves_stop_at_walls() {
        let mut game = scripted_game(&[ShapeKind::O]);

        // O spans board columns 4 and 5 at spawn
        for _ in 0..4 {
            assert!(game.apply(Intent::MoveLeft));
        }
        assert!(!game.apply(Intent::MoveLeft));
        assert_eq!(game.current_piece().origin.x, -1);
        assert_eq!(
            game.current_piece().occupied_cells(),
            vec![(0, 0), (1, 0), (0, 1), (1, 1)]
        );

        for _ in 0..8 {
            assert!(game.apply(Intent::MoveRight));
        }
        assert!(!game.apply(Intent::MoveRight));
        assert_eq!(game.current_piece().origin.x, 7);
    }

    #[test]
    fn test_soft_drop_stops_at_floor_without_locking() {
        let mut game = scripted_game(&[ShapeKind::O]);

        for _ in 0..18 {
            assert!(game.apply(Intent::SoftDrop));
        }
        assert!(!game.apply(Intent::SoftDrop));

        assert_eq!(game.current_piece().origin.y, 18);
        assert!(game.board().locked().is_empty());
    }

    #[test]
    fn test_rotate_commits_valid_rotation() {
        let mut game = scripted_game(&[ShapeKind::T]);
        let expected = game.current_piece().rotated();

        assert!(game.apply(Intent::Rotate));
        assert_eq!(game.current_piece(), &expected);
    }

    #[test]
    fn test_rotation_into_wall_is_rejected() {
        let mut game = scripted_game(&[ShapeKind::I]);

        // Vertical I in the last column; turning it again would poke past the wall
        let vertical = Piece::new(ShapeKind::I, Position { x: 7, y: 5 }).rotated();
        assert!(game.board().is_valid_position(&vertical));
        game.set_current_piece(vertical.clone());

        assert!(!game.apply(Intent::Rotate));
        assert_eq!(game.current_piece(), &vertical);
    }

    #[test]
    fn test_rotation_into_locked_cells_is_rejected() {
        let mut game = scripted_game(&[ShapeKind::I]);
        game.board_mut().fill(&[(5, 3)], Color::White);

        // Horizontal I at row 1 would become vertical through (5, 3)
        let before = game.current_piece().clone();
        assert!(!game.apply(Intent::Rotate));
        assert_eq!(game.current_piece(), &before);
    }

    #[test]
    fn test_hard_drop_o_on_empty_board() {
        let mut game = scripted_game(&[ShapeKind::O, ShapeKind::T, ShapeKind::S]);

        assert!(game.apply(Intent::HardDrop));

        let color = ShapeKind::O.get_color();
        let board = game.board();
        assert_eq!(board.locked().len(), 4);
        for cell in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(board.cell(cell.0, cell.1), Some(color));
        }
        assert_grid_matches(board);

        assert_eq!(game.score(), 0);
        assert!(!game.is_game_over());
        assert_eq!(game.current_piece().kind, ShapeKind::T);
        assert_eq!(game.current_piece().origin, spawn_origin());
        assert_eq!(game.next_piece().kind, ShapeKind::S);
    }

    #[test]
    fn test_hard_drop_reports_distance_and_resets_timer() {
        let mut game = scripted_game(&[ShapeKind::O]);
        game.tick(300);
        assert_eq!(game.fall_timer(), 300);

        assert_eq!(game.hard_drop(), 18);
        assert_eq!(game.fall_timer(), 0);
    }

    #[test]
    fn test_single_line_clear() {
        let mut game = scripted_game(&[ShapeKind::O]);
        game.board_mut().fill(&row_cells([19], &[8, 9]), Color::White);
        game.set_current_piece(Piece::new(ShapeKind::O, Position { x: 7, y: 0 }));

        game.apply(Intent::HardDrop);

        assert_eq!(game.score(), 100);
        // Top half of the O fell into the cleared row
        let board = game.board();
        assert_eq!(board.locked().len(), 2);
        assert_eq!(board.cell(8, 19), Some(ShapeKind::O.get_color()));
        assert_eq!(board.cell(9, 19), Some(ShapeKind::O.get_color()));
        assert_grid_matches(board);
    }

    #[test]
    fn test_double_line_clear() {
        let mut game = scripted_game(&[ShapeKind::O]);
        game.board_mut().fill(&row_cells([18, 19], &[8, 9]), Color::White);
        game.set_current_piece(Piece::new(ShapeKind::O, Position { x: 7, y: 0 }));

        game.apply(Intent::HardDrop);

        assert_eq!(game.score(), 400);
        assert!(game.board().locked().is_empty());
    }

    #[test]
    fn test_triple_line_clear() {
        let mut game = scripted_game(&[ShapeKind::I]);
        game.board_mut().fill(&row_cells(17..20, &[9]), Color::White);
        let vertical = Piece::new(ShapeKind::I, Position { x: 7, y: 0 }).rotated();
        game.set_current_piece(vertical);

        game.apply(Intent::HardDrop);

        assert_eq!(game.score(), 900);
        assert_eq!(game.board().locked().len(), 1);
        assert_eq!(game.board().cell(9, 19), Some(ShapeKind::I.get_color()));
    }

    #[test]
    fn test_four_line_clear() {
        let mut game = scripted_game(&[ShapeKind::I]);
        game.board_mut().fill(&row_cells(16..20, &[9]), Color::White);
        let vertical = Piece::new(ShapeKind::I, Position { x: 7, y: 0 }).rotated();
        game.set_current_piece(vertical);

        game.apply(Intent::HardDrop);

        assert_eq!(game.score(), 1600);
        assert_eq!(game.level(), 4);
        assert!(game.board().locked().is_empty());
    }

    #[test]
    fn test_scores_add_across_locks() {
        let mut game = scripted_game(&[ShapeKind::O]);
        game.board_mut().fill(&row_cells([19], &[8, 9]), Color::White);
        game.set_current_piece(Piece::new(ShapeKind::O, Position { x: 7, y: 0 }));
        game.apply(Intent::HardDrop);
        assert_eq!(game.score(), 100);

        // Row 19 now only holds (8, 19) and (9, 19); the next O rests on them
        game.board_mut().fill(&row_cells([18], &[8, 9]), Color::White);
        game.set_current_piece(Piece::new(ShapeKind::O, Position { x: 7, y: 0 }));
        game.apply(Intent::HardDrop);

        assert_eq!(game.score(), 200);
        assert_eq!(game.level(), 1);
        assert_eq!(game.board().locked().len(), 4);
    }

    #[test]
    fn test_gravity_waits_for_threshold() {
        let mut game = scripted_game(&[ShapeKind::T]);

        assert!(!game.tick(400));
        assert!(!game.tick(300));
        assert_eq!(game.current_piece().origin.y, 0);
        assert_eq!(game.fall_timer(), 700);

        assert!(game.tick(1));
        assert_eq!(game.current_piece().origin.y, 1);
        assert_eq!(game.fall_timer(), 0);
    }

    #[test]
    fn test_gravity_runs_one_step_per_tick() {
        let mut game = scripted_game(&[ShapeKind::T]);

        assert!(game.tick(5_000));
        assert_eq!(game.current_piece().origin.y, 1);
    }

    #[test]
    fn test_gravity_locks_blocked_piece() {
        let mut game = scripted_game(&[ShapeKind::O, ShapeKind::Z]);
        game.set_current_piece(Piece::new(ShapeKind::O, Position { x: 3, y: 18 }));

        assert!(game.tick(701));

        assert_eq!(game.board().locked().len(), 4);
        assert_eq!(game.current_piece().kind, ShapeKind::Z);
        assert_eq!(game.current_piece().origin, spawn_origin());
    }

    #[test]
    fn test_gravity_speeds_up_with_level() {
        let mut game = scripted_game(&[ShapeKind::I]);
        game.board_mut().fill(&row_cells(16..20, &[9]), Color::White);
        let vertical = Piece::new(ShapeKind::I, Position { x: 7, y: 0 }).rotated();
        game.set_current_piece(vertical);
        game.apply(Intent::HardDrop);

        assert_eq!(game.level(), 4);
        assert_eq!(game.fall_speed(), 490);
        assert!(!game.tick(490));
        assert!(game.tick(1));
    }

    #[test]
    fn test_top_out_after_lock_ends_game() {
        let mut game = scripted_game(&[ShapeKind::O]);
        game.board_mut().fill(&row_cells(2..20, &[0]), Color::White);

        // The O cannot fall and locks across rows 0 and 1
        game.apply(Intent::HardDrop);

        assert!(game.board().is_game_over());
        assert!(game.is_game_over());
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut game = scripted_game(&[ShapeKind::O]);
        let stack: Vec<(i32, i32)> = (1..20).map(|y| (4, y)).collect();
        game.board_mut().fill(&stack, Color::White);
        game.set_current_piece(Piece::new(ShapeKind::O, Position { x: -1, y: 0 }));

        game.apply(Intent::HardDrop);

        // Nothing reached row 0, but the next O overlaps the stack
        assert!(!game.board().is_game_over());
        assert!(game.is_game_over());
    }

    #[test]
    fn test_game_over_rejects_everything_but_reset() {
        let mut game = scripted_game(&[ShapeKind::O]);
        game.board_mut().fill(&row_cells(2..20, &[0]), Color::White);
        game.apply(Intent::HardDrop);
        assert!(game.is_game_over());

        let before = game.snapshot();
        for intent in [
            Intent::MoveLeft,
            Intent::MoveRight,
            Intent::SoftDrop,
            Intent::Rotate,
            Intent::HardDrop,
            Intent::Quit,
        ] {
            assert!(!game.apply(intent), "{intent:?} accepted after game over");
        }
        assert!(!game.tick(10_000));
        assert_eq!(game.snapshot(), before);

        assert!(game.apply(Intent::Reset));
        assert!(!game.is_game_over());
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert!(game.board().locked().is_empty());
        assert_eq!(game.current_piece().origin, spawn_origin());
    }

    #[test]
    fn test_reset_ignored_while_playing() {
        let mut game = scripted_game(&[ShapeKind::O]);
        game.apply(Intent::HardDrop);

        assert!(!game.apply(Intent::Reset));
        assert_eq!(game.board().locked().len(), 4);
    }

    #[test]
    fn test_quit_is_not_an_engine_action() {
        let mut game = scripted_game(&[ShapeKind::L]);
        let before = game.snapshot();
        assert!(!game.apply(Intent::Quit));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut game = scripted_game(&[ShapeKind::J, ShapeKind::S]);
        game.board_mut().fill(&[(0, 19)], Color::White);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.grid[19][0], Some(Color::White));
        assert_eq!(snapshot.current_cells, game.current_piece().occupied_cells());
        assert_eq!(snapshot.current_color, ShapeKind::J.get_color());
        assert_eq!(snapshot.next_matrix, ShapeKind::S.matrix());
        assert_eq!(snapshot.next_color, ShapeKind::S.get_color());
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.level, 1);
        assert!(!snapshot.game_over);

        assert_eq!(snapshot.color_at(0, 19), Some(Color::White));
        let (x, y) = snapshot.current_cells[0];
        assert_eq!(snapshot.color_at(x, y), Some(ShapeKind::J.get_color()));
        assert_eq!(snapshot.color_at(9, 10), None);
        assert_eq!(snapshot.color_at(-1, 0), None);
    }

    #[test]
    fn test_seeded_games_match() {
        let mut a = Game::with_seed(99);
        let mut b = Game::with_seed(99);
        for _ in 0..5 {
            assert_eq!(a.current_piece().kind, b.current_piece().kind);
            assert_eq!(a.next_piece().kind, b.next_piece().kind);
            a.hard_drop();
            b.hard_drop();
        }
    }
}
