#[cfg(test)]
mod tests {
    use crate::components::{ActivePiece, Board, Position, TetrominoType};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::session::{GameSession, MoveOutcome, Phase};
    use crate::tests::test_utils::{
        fall_until_locked, fill_rows_except_first_column, session_with_piece,
        vertical_i_in_first_column,
    };

    fn clear_one_line(session: &mut GameSession) -> MoveOutcome {
        session.board_mut().clear();
        fill_rows_except_first_column(session.board_mut(), [19]);
        session.set_active(vertical_i_in_first_column());
        fall_until_locked(session).1
    }

    fn no_full_rows(board: &Board) -> bool {
        (0..BOARD_HEIGHT).all(|y| !board.is_row_full(y))
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(42);

        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 42);
        assert_eq!(session.lines_cleared(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.phase(), Phase::Falling);
        assert_eq!(session.active().position, GameSession::spawn_position());
        assert_eq!(session.active().shape, session.active().kind.shape());
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_spawn_position() {
        assert_eq!(GameSession::spawn_position(), Position { x: 3, y: 0 });
    }

    #[test]
    fn test_spawn_promotes_next_piece() {
        let mut session = GameSession::new(0);
        session.queue_next(TetrominoType::Z);

        session.spawn_piece();

        assert_eq!(session.active().kind, TetrominoType::Z);
        assert_eq!(session.active().shape, TetrominoType::Z.shape());
        assert_eq!(session.active().position, GameSession::spawn_position());
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_o_piece_falls_and_locks() {
        let mut session = session_with_piece(TetrominoType::O, 4, 0);

        let (moves, outcome) = fall_until_locked(&mut session);

        // O's cells sit on mask rows 1 and 2, so the anchor stops at y = 17
        assert_eq!(moves, 17);
        assert_eq!(outcome, MoveOutcome::Locked { lines: 0 });

        let board = session.board();
        assert_eq!(board.filled_count(), 4);
        for (x, y) in [(5, 18), (6, 18), (5, 19), (6, 19)] {
            assert_eq!(board.get(x, y), Some(Some(TetrominoType::O)));
        }
        assert_eq!(session.score(), 0);
        assert_eq!(session.active().position, GameSession::spawn_position());
    }

    #[test]
    fn test_horizontal_collision_is_rejected() {
        let mut session = session_with_piece(TetrominoType::O, -1, 5);

        assert_eq!(session.move_piece(-1, 0), MoveOutcome::Blocked);
        assert_eq!(session.active().position, Position { x: -1, y: 5 });

        assert_eq!(session.move_piece(1, 0), MoveOutcome::Moved);
        assert_eq!(session.active().position, Position { x: 0, y: 5 });
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_single_line_clear() {
        let mut session = session_with_piece(TetrominoType::O, 4, 0);
        for x in 0..BOARD_WIDTH as i32 {
            if x != 5 && x != 6 {
                session.board_mut().set(x, 19, Some(TetrominoType::J));
            }
        }

        let (_, outcome) = fall_until_locked(&mut session);

        assert_eq!(outcome, MoveOutcome::Locked { lines: 1 });
        assert_eq!(session.score(), 100);
        assert_eq!(session.lines_cleared(), 1);

        // The top half of the O dropped into the cleared row
        let board = session.board();
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(5, 19), Some(Some(TetrominoType::O)));
        assert_eq!(board.get(6, 19), Some(Some(TetrominoType::O)));
        assert!(no_full_rows(board));
    }

    #[test]
    fn test_four_line_clear() {
        let mut session = GameSession::new(0);
        fill_rows_except_first_column(session.board_mut(), 16..20);
        session.set_active(vertical_i_in_first_column());

        let (moves, outcome) = fall_until_locked(&mut session);

        assert_eq!(moves, 16);
        assert_eq!(outcome, MoveOutcome::Locked { lines: 4 });
        assert_eq!(session.score(), 800);
        assert_eq!(session.lines_cleared(), 4);
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_clear_lines_rescans_shifted_row() {
        let mut session = GameSession::new(0);
        {
            let board = session.board_mut();
            board.fill_row(19, Some(TetrominoType::S));
            board.fill_row(18, Some(TetrominoType::S));
            board.set(0, 17, Some(TetrominoType::Z));
        }

        assert_eq!(session.clear_lines(), 2);

        assert_eq!(session.score(), 300);
        assert_eq!(session.board().filled_count(), 1);
        assert_eq!(session.board().get(0, 19), Some(Some(TetrominoType::Z)));
    }

    #[test]
    fn test_clear_lines_non_adjacent_rows() {
        let mut session = GameSession::new(0);
        {
            let board = session.board_mut();
            board.fill_row(19, Some(TetrominoType::L));
            board.set(3, 18, Some(TetrominoType::T));
            board.fill_row(17, Some(TetrominoType::L));
        }

        assert_eq!(session.clear_lines(), 2);

        assert_eq!(session.board().filled_count(), 1);
        assert_eq!(session.board().get(3, 19), Some(Some(TetrominoType::T)));
        assert_eq!(session.lines_cleared(), 2);
        assert_eq!(session.score(), 300);
    }

    #[test]
    fn test_clear_lines_with_nothing_full() {
        let mut session = GameSession::new(0);
        fill_rows_except_first_column(session.board_mut(), 10..20);

        assert_eq!(session.clear_lines(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.board().filled_count(), 90);
    }

    #[test]
    fn test_level_progression_and_multiplier() {
        let mut session = GameSession::new(0);
        let mut last_lines = 0;

        for _ in 0..10 {
            assert_eq!(clear_one_line(&mut session), MoveOutcome::Locked { lines: 1 });
            assert!(session.lines_cleared() > last_lines);
            last_lines = session.lines_cleared();
            assert_eq!(session.level(), 1 + session.lines_cleared() / 10);
        }

        // Ten singles at level 1, then the level ticks over
        assert_eq!(session.score(), 1000);
        assert_eq!(session.level(), 2);

        assert_eq!(clear_one_line(&mut session), MoveOutcome::Locked { lines: 1 });
        assert_eq!(session.score(), 1200);
        assert_eq!(session.lines_cleared(), 11);
    }

    #[test]
    fn test_soft_drop_scores_per_step() {
        let mut session = session_with_piece(TetrominoType::O, 4, 0);

        assert_eq!(session.soft_drop(), MoveOutcome::Moved);
        assert_eq!(session.soft_drop(), MoveOutcome::Moved);
        assert_eq!(session.score(), 2);
        assert_eq!(session.active().position, Position { x: 4, y: 2 });
    }

    #[test]
    fn test_soft_drop_onto_floor_locks_without_bonus() {
        let mut session = session_with_piece(TetrominoType::O, 4, 17);

        assert_eq!(session.soft_drop(), MoveOutcome::Locked { lines: 0 });
        assert_eq!(session.score(), 0);
        assert_eq!(session.board().filled_count(), 4);
    }

    #[test]
    fn test_hard_drop() {
        let mut session = session_with_piece(TetrominoType::O, 4, 0);

        assert_eq!(session.hard_drop(), MoveOutcome::Locked { lines: 0 });

        // 17 rows at 2 points each
        assert_eq!(session.score(), 34);
        assert_eq!(session.board().get(5, 19), Some(Some(TetrominoType::O)));
        assert_eq!(session.board().filled_count(), 4);
    }

    #[test]
    fn test_hard_drop_with_line_clear() {
        let mut session = GameSession::new(0);
        fill_rows_except_first_column(session.board_mut(), 16..20);
        session.set_active(vertical_i_in_first_column());

        assert_eq!(session.hard_drop(), MoveOutcome::Locked { lines: 4 });
        assert_eq!(session.score(), 16 * 2 + 800);
    }

    #[test]
    fn test_rotation() {
        let mut session = session_with_piece(TetrominoType::I, 3, 0);

        assert!(session.rotate_piece());
        assert_eq!(session.active().shape, TetrominoType::I.shape().rotated());

        for _ in 0..3 {
            assert!(session.rotate_piece());
        }
        assert_eq!(session.active().shape, TetrominoType::I.shape());
    }

    #[test]
    fn test_blocked_rotation_keeps_shape() {
        let mut session = session_with_piece(TetrominoType::I, 3, 0);
        // The vertical I would cover column 5, rows 0 to 3
        session.board_mut().set(5, 3, Some(TetrominoType::T));

        assert!(!session.rotate_piece());
        assert_eq!(session.active().shape, TetrominoType::I.shape());
        assert_eq!(session.active().position, Position { x: 3, y: 0 });
    }

    #[test]
    fn test_rotation_against_wall_has_no_kick() {
        let mut session = GameSession::new(0);
        session.set_active(vertical_i_in_first_column());

        // Flat again it would stick out past the left wall
        assert!(!session.rotate_piece());
        assert_eq!(session.active().position, Position { x: -2, y: 0 });
    }

    #[test]
    fn test_merge_piece_tags_cells_and_skips_off_board() {
        let mut session = GameSession::new(0);
        session.set_active(ActivePiece::new(TetrominoType::I, Position { x: 3, y: -1 }));
        session.merge_piece();
        assert_eq!(session.board().filled_count(), 4);

        session.board_mut().clear();
        session.set_active(ActivePiece::new(TetrominoType::I, Position { x: 3, y: -2 }));
        session.merge_piece();
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut board = Board::new();
        for y in 1..=2 {
            for x in 3..=6 {
                board.set(x, y, Some(TetrominoType::T));
            }
        }

        let mut session = GameSession::with_board(board, 0);

        assert!(session.is_game_over());
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.move_piece(1, 0), MoveOutcome::Blocked);
        assert_eq!(session.move_piece(0, 1), MoveOutcome::Blocked);
        assert_eq!(session.hard_drop(), MoveOutcome::Blocked);
        assert!(!session.rotate_piece());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_game_over_raises_high_score() {
        let mut session = session_with_piece(TetrominoType::O, 4, 0);
        session.hard_drop();
        session.end();
        assert_eq!(session.high_score(), 34);

        let mut session = GameSession::new(500);
        session.set_active(ActivePiece::new(TetrominoType::O, Position { x: 4, y: 0 }));
        session.hard_drop();
        session.end();
        assert_eq!(session.high_score(), 500);
    }

    #[test]
    fn test_pause_blocks_moves() {
        let mut session = session_with_piece(TetrominoType::T, 3, 0);

        assert!(session.toggle_pause());
        assert_eq!(session.phase(), Phase::Paused);
        assert_eq!(session.move_piece(1, 0), MoveOutcome::Blocked);
        assert_eq!(session.move_piece(0, 1), MoveOutcome::Blocked);
        assert_eq!(session.hard_drop(), MoveOutcome::Blocked);
        assert!(!session.rotate_piece());
        assert_eq!(session.active().position, Position { x: 3, y: 0 });

        assert!(!session.toggle_pause());
        assert_eq!(session.phase(), Phase::Falling);
        assert_eq!(session.move_piece(1, 0), MoveOutcome::Moved);
    }

    #[test]
    fn test_pause_ignored_after_game_over() {
        let mut session = GameSession::new(0);
        session.end();
        assert!(!session.toggle_pause());
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn test_restart_resets_everything_but_high_score() {
        let mut session = GameSession::new(0);
        clear_one_line(&mut session);
        session.end();
        assert_eq!(session.high_score(), 100);

        session.restart();

        assert_eq!(session.score(), 0);
        assert_eq!(session.lines_cleared(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.high_score(), 100);
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.phase(), Phase::Falling);
        assert_eq!(session.active().position, GameSession::spawn_position());
    }

    #[test]
    fn test_ghost_position() {
        let mut session = session_with_piece(TetrominoType::O, 4, 0);
        assert_eq!(session.ghost_position(), Position { x: 4, y: 17 });

        session.board_mut().set(5, 10, Some(TetrominoType::I));
        assert_eq!(session.ghost_position(), Position { x: 4, y: 7 });

        // Computed the same way while paused
        session.toggle_pause();
        assert_eq!(session.ghost_position(), Position { x: 4, y: 7 });
    }
}
