use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::session::Phase;

/// A player request decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    TogglePause,
    Quit,
    Restart,
}

/// Source of keystrokes that never waits for one to arrive.
pub trait KeySource {
    /// Returns the next pending key press, or `None` if nothing is waiting.
    fn poll_key(&mut self) -> io::Result<Option<KeyCode>>;
}

/// Reads the real terminal through crossterm's event queue.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn poll_key(&mut self) -> io::Result<Option<KeyCode>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                // Release and repeat events from enhanced terminals are not presses
                if kind == KeyEventKind::Press {
                    return Ok(Some(code));
                }
            }
        }
        Ok(None)
    }
}

/// Replays a fixed list of keys, one per poll.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyCode>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn push(&mut self, key: KeyCode) {
        self.keys.push_back(key);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self) -> io::Result<Option<KeyCode>> {
        Ok(self.keys.pop_front())
    }
}

/// Maps a key to the command it means in the current phase.
///
/// While paused only the pause key does anything; after game over only
/// restart and quit are accepted.
#[must_use]
pub fn map_key(key: KeyCode, phase: Phase) -> Option<Command> {
    let key = match key {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match phase {
        Phase::Paused => match key {
            KeyCode::Char('p') => Some(Command::TogglePause),
            _ => None,
        },
        Phase::GameOver => match key {
            KeyCode::Char('r') | KeyCode::Enter => Some(Command::Restart),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        Phase::Falling => match key {
            KeyCode::Left | KeyCode::Char('a') => Some(Command::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') => Some(Command::MoveRight),
            KeyCode::Up | KeyCode::Char('w') => Some(Command::Rotate),
            KeyCode::Down | KeyCode::Char('s') => Some(Command::SoftDrop),
            KeyCode::Char(' ') => Some(Command::HardDrop),
            KeyCode::Char('p') => Some(Command::TogglePause),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        },
    }
}
