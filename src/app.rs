#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::time::Instant;

use log::{debug, error, info};

use crate::GravityTimer;
use crate::config::Config;
use crate::game::fall_interval;
use crate::highscore::HighScoreStore;
use crate::input::{Command, KeySource, map_key};
use crate::session::{GameSession, Phase};

/// Drives one session: input dispatch, gravity and high-score persistence.
pub struct App {
    pub session: GameSession,
    pub store: HighScoreStore,
    pub config: Config,
    pub should_quit: bool,
    gravity: GravityTimer,
    high_score_saved: bool,
}

impl App {
    /// Reads the stored high score and starts a fresh session.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let store = HighScoreStore::new(config.high_score_path.clone());
        let high_score = store.load();
        info!("Starting session with high score {high_score}");
        Self::with_session(config, store, GameSession::new(high_score), Instant::now())
    }

    #[must_use]
    pub fn with_session(
        config: Config,
        store: HighScoreStore,
        session: GameSession,
        now: Instant,
    ) -> Self {
        Self {
            session,
            store,
            config,
            should_quit: false,
            gravity: GravityTimer::new(now),
            high_score_saved: false,
        }
    }

    /// One loop iteration minus rendering: poll a key, dispatch it, apply gravity.
    pub fn tick(&mut self, keys: &mut impl KeySource, now: Instant) -> io::Result<()> {
        // A session ended outside the loop must be recorded before a restart
        self.persist_on_game_over();

        if let Some(key) = keys.poll_key()? {
            debug!("Key: {key:?}");
            if let Some(command) = map_key(key, self.session.phase()) {
                self.handle_command(command, now);
            }
        }

        self.apply_gravity(now);
        self.persist_on_game_over();
        Ok(())
    }

    pub fn handle_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::MoveLeft => {
                self.session.move_piece(-1, 0);
            }
            Command::MoveRight => {
                self.session.move_piece(1, 0);
            }
            Command::Rotate => {
                self.session.rotate_piece();
            }
            Command::SoftDrop => {
                self.session.soft_drop();
            }
            Command::HardDrop => {
                self.session.hard_drop();
            }
            Command::TogglePause => {
                if !self.session.toggle_pause() {
                    // Do not count paused time toward the next fall
                    self.gravity.reset(now);
                }
            }
            Command::Restart => {
                self.session.restart();
                self.gravity.reset(now);
                self.high_score_saved = false;
            }
            Command::Quit => {
                self.session.end();
                self.should_quit = true;
            }
        }
        self.persist_on_game_over();
    }

    /// Steps the piece down once the level's fall interval has elapsed.
    pub fn apply_gravity(&mut self, now: Instant) {
        if self.session.phase() != Phase::Falling {
            return;
        }

        if self.gravity.due(fall_interval(self.session.level()), now) {
            self.session.move_piece(0, 1);
            self.gravity.reset(now);
        }
    }

    fn persist_on_game_over(&mut self) {
        if !self.session.is_game_over() || self.high_score_saved {
            return;
        }
        self.high_score_saved = true;

        match self.store.save_if_higher(self.session.score()) {
            Ok(true) => info!("High score {} saved", self.session.score()),
            Ok(false) => debug!("Score {} did not beat stored high score", self.session.score()),
            // Not persisting is acceptable; the game carries on
            Err(err) => error!(
                "Could not write high score to {}: {err}",
                self.store.path().display()
            ),
        }
    }

    /// Final report printed after the terminal is restored.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Game Over! Final Score: {}\nHigh Score: {}\nLines: {}\nLevel: {}",
            self.session.score(),
            self.session.high_score(),
            self.session.lines_cleared(),
            self.session.level(),
        )
    }
}
