#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Side length of every shape mask
pub const SHAPE_SIZE: usize = 4;

// Base points for clearing 0..=4 lines in a single lock, multiplied by level
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];
pub const SOFT_DROP_POINTS: u32 = 1; // Points per successful soft drop step
pub const HARD_DROP_POINTS: u32 = 2; // Points per row travelled by a hard drop

// Level progression
pub const LINES_PER_LEVEL: u32 = 10;
pub const STARTING_LEVEL: u32 = 1;

// Gravity timing, in seconds
pub const BASE_FALL_INTERVAL: f64 = 0.5;
pub const FALL_INTERVAL_STEP: f64 = 0.05;
pub const MIN_FALL_INTERVAL: f64 = 0.1;

// Loop pacing
pub const TICK_RATE: Duration = Duration::from_millis(50);

/// Level reached after clearing `lines` lines in total.
#[must_use]
pub fn level_for_lines(lines: u32) -> u32 {
    STARTING_LEVEL + lines / LINES_PER_LEVEL
}

/// Time between gravity steps at `level`, floored at [`MIN_FALL_INTERVAL`].
#[must_use]
pub fn fall_interval(level: u32) -> Duration {
    let steps = f64::from(level.saturating_sub(STARTING_LEVEL));
    let seconds = (BASE_FALL_INTERVAL - steps * FALL_INTERVAL_STEP).max(MIN_FALL_INTERVAL);
    Duration::from_secs_f64(seconds)
}

/// Points awarded for clearing `lines` rows in one lock at `level`.
#[must_use]
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_CLEAR_POINTS
        .get(lines)
        .copied()
        .unwrap_or(LINE_CLEAR_POINTS[LINE_CLEAR_POINTS.len() - 1])
        * level
}
