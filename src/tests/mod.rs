#![warn(clippy::all, clippy::pedantic)]

pub mod session_tests;

// Shared helpers for building known game positions
#[cfg(test)]
pub mod test_utils {
    use crate::components::{ActivePiece, Board, Position, TetrominoType};
    use crate::game::BOARD_WIDTH;
    use crate::session::{GameSession, MoveOutcome};

    /// A session on an empty board whose active piece is `kind` at `(x, y)`.
    #[must_use]
    pub fn session_with_piece(kind: TetrominoType, x: i32, y: i32) -> GameSession {
        let mut session = GameSession::new(0);
        session.set_active(ActivePiece::new(kind, Position { x, y }));
        session
    }

    /// A vertical I piece whose column sits on board column 0.
    #[must_use]
    pub fn vertical_i_in_first_column() -> ActivePiece {
        let mut piece = ActivePiece::new(TetrominoType::I, Position { x: -2, y: 0 });
        piece.shape = piece.shape.rotated();
        piece
    }

    /// Fills columns `1..` of `rows`, leaving column 0 as a well.
    pub fn fill_rows_except_first_column(board: &mut Board, rows: impl IntoIterator<Item = i32>) {
        for y in rows {
            for x in 1..BOARD_WIDTH as i32 {
                board.set(x, y, Some(TetrominoType::T));
            }
        }
    }

    /// Steps the active piece down until it locks and returns the outcome.
    pub fn fall_until_locked(session: &mut GameSession) -> (usize, MoveOutcome) {
        let mut moves = 0;
        loop {
            match session.move_piece(0, 1) {
                MoveOutcome::Moved => moves += 1,
                outcome => return (moves, outcome),
            }
        }
    }
}
