#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, SHAPE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::J,
        TetrominoType::L,
    ];

    #[must_use]
    pub fn random() -> Self {
        Self::ALL[fastrand::usize(..Self::ALL.len())]
    }

    /// Table index in `0..7`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The spawn orientation of this piece.
    #[must_use]
    pub fn shape(self) -> Shape {
        SHAPES[self.index()]
    }

    #[must_use]
    pub fn get_color(self) -> ratatui::style::Color {
        match self {
            TetrominoType::I => ratatui::style::Color::Cyan,
            TetrominoType::O => ratatui::style::Color::Yellow,
            TetrominoType::T => ratatui::style::Color::Magenta,
            TetrominoType::S => ratatui::style::Color::Green,
            TetrominoType::Z => ratatui::style::Color::Red,
            TetrominoType::J => ratatui::style::Color::Blue,
            TetrominoType::L => ratatui::style::Color::LightYellow,
        }
    }
}

/// One rotation state of a tetromino as a 4x4 mask, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape(pub [[bool; SHAPE_SIZE]; SHAPE_SIZE]);

impl Shape {
    const fn from_rows(rows: [[u8; SHAPE_SIZE]; SHAPE_SIZE]) -> Self {
        let mut mask = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        let mut row = 0;
        while row < SHAPE_SIZE {
            let mut col = 0;
            while col < SHAPE_SIZE {
                mask[row][col] = rows[row][col] != 0;
                col += 1;
            }
            row += 1;
        }
        Self(mask)
    }

    #[must_use]
    pub fn is_set(&self, col: usize, row: usize) -> bool {
        row < SHAPE_SIZE && col < SHAPE_SIZE && self.0[row][col]
    }

    /// Set cells as `(col, row)` offsets from the mask's top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, set)| **set)
                .map(move |(col, _)| (col as i32, row as i32))
        })
    }

    /// Quarter turn: transpose, then reverse the columns.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut mask = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for (y, row) in mask.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.0[SHAPE_SIZE - 1 - x][y];
            }
        }
        Self(mask)
    }
}

static SHAPES: [Shape; 7] = [
    // I
    Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // O
    Shape::from_rows([[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
    // T
    Shape::from_rows([[0, 0, 0, 0], [0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]]),
    // S
    Shape::from_rows([[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
    // Z
    Shape::from_rows([[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
    // J
    Shape::from_rows([[0, 0, 0, 0], [1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]]),
    // L
    Shape::from_rows([[0, 0, 0, 0], [0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0]]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// `None` is empty; `Some` remembers which piece filled the cell.
pub type Cell = Option<TetrominoType>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(None);
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    #[must_use]
    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Returns `None` when `(x, y)` lies off the board.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if Self::in_bounds(x, y) {
            Some(self.cells[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Writes `cell` at `(x, y)`; returns false if the coordinate is off the board.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if Self::in_bounds(x, y) {
            self.cells[y as usize][x as usize] = cell;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    #[must_use]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_WIDTH as i32 && y >= 0 && y < BOARD_HEIGHT as i32
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells
            .get(y)
            .is_some_and(|row| row.iter().all(Option::is_some))
    }

    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[Cell; BOARD_WIDTH]> {
        self.cells.get(y)
    }

    pub fn fill_row(&mut self, y: usize, cell: Cell) {
        if let Some(row) = self.cells.get_mut(y) {
            row.fill(cell);
        }
    }

    /// Drops every row above `y` down by one and empties the top row.
    pub fn remove_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT {
            return;
        }
        for row in (1..=y).rev() {
            self.cells[row] = self.cells[row - 1];
        }
        self.cells[0] = [None; BOARD_WIDTH];
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// The piece currently under player control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: TetrominoType,
    pub shape: Shape,
    pub position: Position,
}

impl ActivePiece {
    #[must_use]
    pub fn new(kind: TetrominoType, position: Position) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            position,
        }
    }

    /// Absolute board coordinates of the piece's cells.
    pub fn blocks(&self) -> impl Iterator<Item = Position> + '_ {
        self.shape
            .cells()
            .map(move |(col, row)| self.position.offset(col, row))
    }
}

/// The piece queued to spawn after the active one locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPiece {
    pub kind: TetrominoType,
    pub shape: Shape,
}

impl NextPiece {
    #[must_use]
    pub fn new(kind: TetrominoType) -> Self {
        Self {
            kind,
            shape: kind.shape(),
        }
    }

    #[must_use]
    pub fn random() -> Self {
        Self::new(TetrominoType::random())
    }
}
