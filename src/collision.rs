#![allow(
    // Allow potential wrapping when casting board dimensions into signed coordinates
    clippy::cast_possible_wrap
)]

use crate::components::{Board, Position, Shape};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};

/// Returns true when `shape` anchored at `anchor + offset` leaves the board
/// sideways, reaches past the floor, or overlaps a locked cell.
///
/// Cells above the top edge are allowed so pieces can spawn partly hidden.
#[must_use]
pub fn collides(board: &Board, shape: &Shape, anchor: Position, offset: Position) -> bool {
    shape.cells().any(|(col, row)| {
        let x = anchor.x + col + offset.x;
        let y = anchor.y + row + offset.y;

        if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            return true;
        }

        y >= 0 && board.is_occupied(x, y)
    })
}

/// Quarter-turn rotation of a mask; callers decide whether it fits.
#[must_use]
pub fn rotate(shape: &Shape) -> Shape {
    shape.rotated()
}

/// Lowest anchor row `shape` can reach by falling straight down from `anchor`.
#[must_use]
pub fn landing_row(board: &Board, shape: &Shape, anchor: Position) -> i32 {
    let mut y = anchor.y;
    // Bounded so an empty mask cannot fall forever
    while y < BOARD_HEIGHT as i32
        && !collides(board, shape, Position { x: anchor.x, y }, Position { x: 0, y: 1 })
    {
        y += 1;
    }
    y
}
