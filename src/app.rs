#![warn(clippy::all, clippy::pedantic)]

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{debug, info};

use crate::config::Config;
use crate::engine::{Game, Intent};

pub type AppResult<T> = anyhow::Result<T>;

pub struct App {
    pub game: Game,
    pub config: Config,
    pub should_quit: bool,
    pending: Vec<Intent>,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let game = match config.game.seed {
            Some(seed) => {
                info!("Using fixed shape seed {seed}");
                Game::with_seed(seed)
            }
            None => Game::new(),
        };

        Self {
            game,
            config,
            should_quit: false,
            pending: Vec::new(),
        }
    }

    /// Translates a key press into an intent and queues it for the next
    /// frame. Releases and repeats are ignored.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        debug!("Key event: {key:?}");

        if let Some(intent) = intent_for_key(key.code) {
            self.pending.push(intent);
        }
    }

    /// Runs one frame of simulation: at most one gravity step, then every
    /// queued intent in arrival order.
    pub fn on_tick(&mut self, elapsed_ms: u32) {
        self.game.tick(elapsed_ms);

        for intent in std::mem::take(&mut self.pending) {
            if intent == Intent::Quit {
                info!("Quit requested");
                self.should_quit = true;
                continue;
            }
            self.game.apply(intent);
        }
    }

    #[must_use]
    pub fn pending_intents(&self) -> &[Intent] {
        &self.pending
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[must_use]
pub fn intent_for_key(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Down => Some(Intent::SoftDrop),
        KeyCode::Up => Some(Intent::Rotate),
        KeyCode::Char(' ') => Some(Intent::HardDrop),
        KeyCode::Enter => Some(Intent::Reset),
        KeyCode::Esc | KeyCode::Char('q') => Some(Intent::Quit),
        _ => None,
    }
}
