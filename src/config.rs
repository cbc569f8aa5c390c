use std::path::PathBuf;
use std::time::Duration;

use crate::game::TICK_RATE;

// File names used when no platform data directory is available
const HIGH_SCORE_FILE_NAME: &str = "highscore.txt";
const FALLBACK_HIGH_SCORE_PATH: &str = "blockfall_highscore.txt";
const LOG_FILE_PATH: &str = "blockfall.log";

/// Runtime settings. Nothing here is read from or written to disk.
#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            high_score_path: default_high_score_path(),
            log_path: PathBuf::from(LOG_FILE_PATH),
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_high_score_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.high_score_path = path.into();
        self
    }

    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }
}

// Prefer the user's data directory, fall back to the working directory
fn default_high_score_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("blockfall").join(HIGH_SCORE_FILE_NAME)
    } else {
        PathBuf::from(FALLBACK_HIGH_SCORE_PATH)
    }
}
