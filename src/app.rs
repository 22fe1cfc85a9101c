use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::autopilot::Autopilot;
use crate::error::GameError;
use crate::events::{GameEvent, Observers};
use crate::game::{GameConfig, GameState, GameStatus};
use crate::input::GameInput;
use crate::score::HighScores;

/// HUD values kept current by the session's event stream.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct HudFeed {
    pub speed: u32,
    pub score: u32,
    pub finished: bool,
}

impl HudFeed {
    fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SpeedChanged(speed) => self.speed = *speed,
            GameEvent::ScoreChanged(score) => self.score = *score,
            GameEvent::GameOver => self.finished = true,
            GameEvent::CellChanged { .. } => {}
        }
    }
}

/// Front-end context: the current session plus everything that outlives it.
#[derive(Debug)]
pub struct App {
    config: GameConfig,
    seed: Option<u64>,
    sessions_started: u64,
    game: GameState,
    autopilot: Option<Autopilot>,
    feed: Rc<RefCell<HudFeed>>,
    high_scores: HighScores,
    reference_high_score: u32,
    finish_handled: bool,
    scores_unsaved: bool,
}

impl App {
    /// Creates the app with a paused session on the start screen.
    pub fn new(
        config: GameConfig,
        seed: Option<u64>,
        demo: bool,
        high_scores: HighScores,
    ) -> Result<Self, GameError> {
        let feed = Rc::new(RefCell::new(HudFeed::default()));
        let game = start_session(&config, seed, &feed)?;
        let reference_high_score = high_scores.get(&config);

        let mut app = Self {
            config,
            seed,
            sessions_started: 1,
            autopilot: demo.then(|| Autopilot::attach(&game)),
            game,
            feed,
            high_scores,
            reference_high_score,
            finish_handled: false,
            scores_unsaved: false,
        };
        app.game.set_paused(true);
        Ok(app)
    }

    /// Applies one input event. Returns `false` when the app should quit.
    pub fn handle_input(&mut self, input: GameInput) -> Result<bool, GameError> {
        match input {
            GameInput::Quit => return Ok(false),
            GameInput::Confirm if self.game.is_over() => self.restart(self.is_demo())?,
            GameInput::Confirm if self.game.status() == GameStatus::Paused => {
                self.game.set_paused(false);
            }
            GameInput::Confirm => {}
            GameInput::Pause => self.game.toggle_pause(),
            GameInput::Restart => self.restart(false)?,
            GameInput::ToggleDemo => self.restart(!self.is_demo())?,
            GameInput::Direction(direction) => {
                if !self.is_demo() && self.game.status() == GameStatus::Playing {
                    self.game.change_direction(direction);
                }
            }
        }
        Ok(true)
    }

    /// Advances the session by one tick, letting the autopilot steer in demo mode.
    pub fn advance(&mut self) {
        match self.autopilot.as_mut() {
            Some(autopilot) => {
                let _ = autopilot.step(&mut self.game);
            }
            None => self.game.tick(),
        }

        if self.feed.borrow().finished && !self.finish_handled {
            self.finish_handled = true;
            self.record_finished_game();
        }
    }

    /// Wall-clock time between ticks at the current speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        let speed = self.feed.borrow().speed.max(1);
        Duration::from_millis(1000 / u64::from(speed))
    }

    /// Returns the score table once after it changed, for persisting.
    pub fn take_unsaved_scores(&mut self) -> Option<&HighScores> {
        if !self.scores_unsaved {
            return None;
        }
        self.scores_unsaved = false;
        Some(&self.high_scores)
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[must_use]
    pub fn feed(&self) -> HudFeed {
        *self.feed.borrow()
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.autopilot.is_some()
    }

    /// Best score for the current layout.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_scores.get(&self.config)
    }

    /// Best score as it stood when the current session started.
    #[must_use]
    pub fn reference_high_score(&self) -> u32 {
        self.reference_high_score
    }

    /// True before the first tick of the initial session.
    #[must_use]
    pub fn is_start_screen(&self) -> bool {
        self.sessions_started == 1
            && self.game.status() == GameStatus::Paused
            && self.game.tick_count() == 0
    }

    fn restart(&mut self, demo: bool) -> Result<(), GameError> {
        let seed = self
            .seed
            .map(|seed| seed.wrapping_add(self.sessions_started));
        let feed = Rc::new(RefCell::new(HudFeed::default()));
        self.game = start_session(&self.config, seed, &feed)?;
        self.feed = feed;
        self.autopilot = demo.then(|| Autopilot::attach(&self.game));
        self.sessions_started += 1;
        self.reference_high_score = self.high_scores.get(&self.config);
        self.finish_handled = false;
        info!("new {} session started", if demo { "demo" } else { "player" });
        Ok(())
    }

    fn record_finished_game(&mut self) {
        // Demo games never count towards the high score.
        if self.is_demo() {
            return;
        }
        if self.high_scores.record(&self.config, self.game.score()) {
            info!("new high score {}", self.game.score());
            self.scores_unsaved = true;
        }
    }
}

fn start_session(
    config: &GameConfig,
    seed: Option<u64>,
    feed: &Rc<RefCell<HudFeed>>,
) -> Result<GameState, GameError> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut observers = Observers::new();
    let sink = Rc::clone(feed);
    observers.subscribe(move |event: &GameEvent| sink.borrow_mut().apply(event));

    let game = GameState::with_observers(config, rng, observers)?;
    feed.borrow_mut().score = game.score();
    Ok(game)
}
