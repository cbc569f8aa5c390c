#![warn(clippy::all, clippy::pedantic)]

use std::fmt;
use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// A single best score kept as a decimal integer in a plain text file.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored score. A missing file holds zero.
    pub fn try_load(&self) -> Result<u32, HighScoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.trim().parse()?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(err) => Err(err.into()),
        }
    }

    /// Like [`try_load`](Self::try_load), but any failure reads as zero.
    #[must_use]
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => {
                debug!("Loaded high score {score} from {}", self.path.display());
                score
            }
            Err(err) => {
                warn!("Ignoring high score file {}: {err}", self.path.display());
                0
            }
        }
    }

    /// Overwrites the file when `score` beats what is stored. Returns whether it wrote.
    pub fn save_if_higher(&self, score: u32) -> Result<bool, HighScoreError> {
        // An unreadable file should not block recording a new best
        let stored = self.try_load().unwrap_or(0);
        if score <= stored {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, score.to_string())?;
        debug!("Saved high score {score} to {}", self.path.display());
        Ok(true)
    }
}

#[derive(Debug)]
pub enum HighScoreError {
    Io(io::Error),
    Parse(ParseIntError),
}

impl fmt::Display for HighScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighScoreError::Io(err) => write!(f, "i/o error: {err}"),
            HighScoreError::Parse(err) => write!(f, "not a score: {err}"),
        }
    }
}

impl std::error::Error for HighScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HighScoreError::Io(err) => Some(err),
            HighScoreError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for HighScoreError {
    fn from(err: io::Error) -> Self {
        HighScoreError::Io(err)
    }
}

impl From<ParseIntError> for HighScoreError {
    fn from(err: ParseIntError) -> Self {
        HighScoreError::Parse(err)
    }
}
