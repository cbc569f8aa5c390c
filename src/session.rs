#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation and wrapping when casting board dimensions to i32 since they are always small
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use log::{debug, info};

use crate::collision::{collides, landing_row, rotate};
use crate::components::{ActivePiece, Board, NextPiece, Position, TetrominoType};
use crate::game::{
    BOARD_HEIGHT, BOARD_WIDTH, HARD_DROP_POINTS, SOFT_DROP_POINTS, STARTING_LEVEL,
    level_for_lines, line_clear_score,
};

const STAY: Position = Position { x: 0, y: 0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Paused,
    GameOver,
}

/// What happened to the active piece after a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Rejected without any state change.
    Blocked,
    /// The piece could not fall, was merged into the board and replaced.
    Locked { lines: usize },
}

/// One play-through: board, falling piece, queued piece and stats.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: ActivePiece,
    next: NextPiece,
    score: u32,
    high_score: u32,
    lines_cleared: u32,
    level: u32,
    game_over: bool,
    paused: bool,
}

impl GameSession {
    /// Starts a session on an empty board with a freshly spawned piece.
    #[must_use]
    pub fn new(high_score: u32) -> Self {
        Self::with_board(Board::new(), high_score)
    }

    /// Starts a session on a prepared board. Spawning may end the game at once.
    #[must_use]
    pub fn with_board(board: Board, high_score: u32) -> Self {
        let first = TetrominoType::random();
        let mut session = Self {
            board,
            active: ActivePiece::new(first, Self::spawn_position()),
            next: NextPiece::new(first),
            score: 0,
            high_score,
            lines_cleared: 0,
            level: STARTING_LEVEL,
            game_over: false,
            paused: false,
        };
        session.spawn_piece();
        session
    }

    #[must_use]
    pub fn spawn_position() -> Position {
        Position {
            x: (BOARD_WIDTH / 2) as i32 - 2,
            y: 0,
        }
    }

    /// Promotes the queued piece, queues a random one and checks for a blocked spawn.
    pub fn spawn_piece(&mut self) {
        let upcoming = std::mem::replace(&mut self.next, NextPiece::random());
        self.active = ActivePiece {
            kind: upcoming.kind,
            shape: upcoming.shape,
            position: Self::spawn_position(),
        };
        debug!("Spawned {:?}, next {:?}", self.active.kind, self.next.kind);

        if collides(&self.board, &self.active.shape, self.active.position, STAY) {
            info!("Spawn point blocked, game over at score {}", self.score);
            self.end();
        }
    }

    /// Translates the active piece. A blocked downward step locks it instead.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        if self.game_over || self.paused {
            return MoveOutcome::Blocked;
        }

        let offset = Position { x: dx, y: dy };
        if !collides(&self.board, &self.active.shape, self.active.position, offset) {
            self.active.position = self.active.position.offset(dx, dy);
            MoveOutcome::Moved
        } else if dy > 0 {
            MoveOutcome::Locked { lines: self.lock() }
        } else {
            MoveOutcome::Blocked
        }
    }

    /// One player-driven step down, worth [`SOFT_DROP_POINTS`] when it moves.
    pub fn soft_drop(&mut self) -> MoveOutcome {
        let outcome = self.move_piece(0, 1);
        if outcome == MoveOutcome::Moved {
            self.score = self.score.saturating_add(SOFT_DROP_POINTS);
        }
        outcome
    }

    /// Drops the piece to its landing row, scoring per row, then locks it.
    pub fn hard_drop(&mut self) -> MoveOutcome {
        if self.game_over || self.paused {
            return MoveOutcome::Blocked;
        }

        let mut rows = 0;
        while !collides(
            &self.board,
            &self.active.shape,
            self.active.position,
            Position { x: 0, y: 1 },
        ) {
            self.active.position.y += 1;
            self.score = self.score.saturating_add(HARD_DROP_POINTS);
            rows += 1;
        }
        debug!("Hard drop fell {rows} rows");

        MoveOutcome::Locked { lines: self.lock() }
    }

    /// Rotates in place if the turned shape fits; otherwise leaves the piece alone.
    pub fn rotate_piece(&mut self) -> bool {
        if self.game_over || self.paused {
            return false;
        }

        let turned = rotate(&self.active.shape);
        if collides(&self.board, &turned, self.active.position, STAY) {
            return false;
        }
        self.active.shape = turned;
        true
    }

    /// Writes the active piece into the board, skipping cells off the grid.
    pub fn merge_piece(&mut self) {
        let kind = self.active.kind;
        for block in self.active.blocks() {
            self.board.set(block.x, block.y, Some(kind));
        }
    }

    /// Removes full rows bottom-up, rescanning a row after the ones above shift
    /// into it, and applies line scoring and level progression.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            if self.board.is_row_full(y - 1) {
                self.board.remove_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        if cleared > 0 {
            let points = line_clear_score(cleared, self.level);
            self.score = self.score.saturating_add(points);
            self.lines_cleared += u32::try_from(cleared).unwrap_or(u32::MAX);
            self.level = level_for_lines(self.lines_cleared);
            info!(
                "Cleared {cleared} lines for {points} points (total lines {}, level {})",
                self.lines_cleared, self.level
            );
        }

        cleared
    }

    fn lock(&mut self) -> usize {
        debug!(
            "Locking {:?} at ({}, {})",
            self.active.kind, self.active.position.x, self.active.position.y
        );
        self.merge_piece();
        let lines = self.clear_lines();
        self.spawn_piece();
        lines
    }

    /// Flips the pause overlay. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.game_over {
            self.paused = !self.paused;
            info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }
        self.paused
    }

    /// Ends the session early, as on quit.
    pub fn end(&mut self) {
        self.game_over = true;
        self.paused = false;
        if self.score > self.high_score {
            info!("New high score {} (was {})", self.score, self.high_score);
            self.high_score = self.score;
        }
    }

    /// Resets the board and stats for a new play-through, keeping the high score.
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.board.clear();
        self.score = 0;
        self.lines_cleared = 0;
        self.level = STARTING_LEVEL;
        self.game_over = false;
        self.paused = false;
        self.next = NextPiece::random();
        self.spawn_piece();
    }

    /// Where the active piece would land if hard dropped now.
    #[must_use]
    pub fn ghost_position(&self) -> Position {
        Position {
            x: self.active.position.x,
            y: landing_row(&self.board, &self.active.shape, self.active.position),
        }
    }

    /// Replaces the active piece, e.g. to set up a known position.
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = piece;
    }

    /// Replaces the queued piece.
    pub fn queue_next(&mut self, kind: TetrominoType) {
        self.next = NextPiece::new(kind);
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Falling
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    #[must_use]
    pub fn next(&self) -> &NextPiece {
        &self.next
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
