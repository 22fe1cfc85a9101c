use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{
    GridSize, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MAX_SPEED, MIN_GRID_DIMENSION, MIN_SPEED,
    SPEED_UP_EVERY,
};
use crate::error::GameError;
use crate::events::{GameEvent, GameObserver, Observers};
use crate::food::spawn_position;
use crate::grid::{Cell, Grid};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
    /// The snake filled the whole board.
    Victory,
}

/// What ended a lost game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Session construction parameters.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub size: GridSize,
    pub initial_speed: u32,
    pub start: Position,
    pub wraparound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            initial_speed: MIN_SPEED,
            start: Position { x: 0, y: 0 },
            wraparound: false,
        }
    }
}

impl GameConfig {
    /// Checks the parameters a session needs to start.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.size.width < MIN_GRID_DIMENSION || self.size.height < MIN_GRID_DIMENSION {
            return Err(GameError::GridTooSmall {
                width: self.size.width,
                height: self.size.height,
            });
        }
        if !self.start.is_within_bounds(self.size) {
            return Err(GameError::StartOutOfBounds {
                x: self.start.x,
                y: self.start.y,
            });
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.initial_speed) {
            return Err(GameError::InvalidSpeed(self.initial_speed));
        }
        Ok(())
    }
}

/// Complete mutable game state for one session.
///
/// The grid and the snake body describe the snake twice. Both are only
/// mutated inside [`GameState::tick`], which leaves every body segment
/// painted `Snake` and no other cell painted `Snake`.
#[derive(Debug)]
pub struct GameState {
    grid: Grid,
    snake: Snake,
    direction: Direction,
    requested_direction: Option<Direction>,
    forbidden_direction: Direction,
    speed: u32,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    rng: StdRng,
    observers: Observers,
}

impl GameState {
    /// Creates a session seeded from system entropy.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_observers(config, StdRng::from_entropy(), Observers::new())
    }

    /// Creates a deterministic session for tests and reproducible simulations.
    pub fn new_with_seed(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_observers(config, StdRng::seed_from_u64(seed), Observers::new())
    }

    /// Creates a session whose observers also see the start-up events
    /// (initial speed, start cell, first fruit).
    pub fn with_observers(
        config: &GameConfig,
        rng: StdRng,
        observers: Observers,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let mut state = Self {
            grid: Grid::new(config.size, config.wraparound),
            snake: Snake::new(config.start),
            direction: Direction::Right,
            requested_direction: None,
            forbidden_direction: Direction::Left,
            speed: MIN_SPEED,
            status: GameStatus::Playing,
            death_reason: None,
            tick_count: 0,
            rng,
            observers,
        };

        state.change_speed(config.initial_speed);
        state
            .grid
            .set_cell(config.start, Cell::Snake, &mut state.observers);
        state.spawn_fruit();

        Ok(state)
    }

    /// Registers an observer for all later events.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: GameObserver + 'static,
    {
        self.observers.subscribe(observer);
    }

    /// Requests a direction for the next tick; the latest request wins.
    pub fn change_direction(&mut self, direction: Direction) {
        self.requested_direction = Some(direction);
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Does nothing while paused or after the game ended.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.tick_count += 1;
        self.commit_requested_direction();

        let next_head = self.grid.neighbor(self.snake.head(), self.direction);
        self.forbidden_direction = self.direction.opposite();

        match self.grid.cell(next_head) {
            None => {
                self.end(GameStatus::GameOver, Some(DeathReason::WallCollision));
                return;
            }
            Some(Cell::Snake) => {
                // Moving into the cell the tail leaves this very tick is legal.
                if next_head != self.snake.tail() {
                    self.end(GameStatus::GameOver, Some(DeathReason::SelfCollision));
                    return;
                }
                self.snake.push_head(next_head);
                let _ = self.snake.pop_tail();
            }
            Some(Cell::Empty) => {
                self.snake.push_head(next_head);
                if let Some(tail) = self.snake.pop_tail() {
                    self.grid.set_cell(tail, Cell::Empty, &mut self.observers);
                }
            }
            Some(Cell::Fruit) => {
                self.snake.push_head(next_head);
                self.eat_fruit();
            }
        }

        self.grid
            .set_cell(next_head, Cell::Snake, &mut self.observers);

        if self.snake.len() == self.grid.size().total_cells() {
            self.end(GameStatus::Victory, None);
        }
    }

    /// Pauses or resumes a running game. Has no effect once the game ended.
    pub fn set_paused(&mut self, paused: bool) {
        self.status = match (self.status, paused) {
            (GameStatus::Playing, true) => GameStatus::Paused,
            (GameStatus::Paused, false) => GameStatus::Playing,
            (other, _) => other,
        };
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(self.status == GameStatus::Playing);
    }

    /// Moves the fruit to `position`.
    ///
    /// Returns `false` and changes nothing when `position` is outside the
    /// grid or occupied by the snake.
    pub fn place_fruit(&mut self, position: Position) -> bool {
        match self.grid.cell(position) {
            Some(Cell::Empty) => {}
            Some(Cell::Fruit) => return true,
            Some(Cell::Snake) | None => return false,
        }

        let fruits: Vec<Position> = self
            .grid
            .cells()
            .filter(|(_, cell)| *cell == Cell::Fruit)
            .map(|(position, _)| position)
            .collect();
        for fruit in fruits {
            self.grid.set_cell(fruit, Cell::Empty, &mut self.observers);
        }

        self.grid.set_cell(position, Cell::Fruit, &mut self.observers);
        true
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.grid.size()
    }

    /// Score equals the snake length.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.snake.len()).unwrap_or(u32::MAX)
    }

    /// Ticks per second.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Direction committed on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Reverse of the last committed direction.
    #[must_use]
    pub fn forbidden_direction(&self) -> Direction {
        self.forbidden_direction
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver | GameStatus::Victory)
    }

    fn commit_requested_direction(&mut self) {
        let Some(requested) = self.requested_direction.take() else {
            return;
        };

        if self.snake.len() == 1 || requested != self.direction.opposite() {
            self.direction = requested;
        }
    }

    fn eat_fruit(&mut self) {
        self.spawn_fruit();
        let score = self.score();
        self.observers.publish(GameEvent::ScoreChanged(score));

        if self.snake.len() % SPEED_UP_EVERY == 0 {
            self.change_speed(self.speed + 1);
        }
    }

    fn spawn_fruit(&mut self) {
        if self.snake.len() >= self.grid.size().total_cells() {
            return;
        }

        if let Some(position) = spawn_position(&mut self.rng, &self.grid) {
            debug!("fruit placed at ({}, {})", position.x, position.y);
            self.grid.set_cell(position, Cell::Fruit, &mut self.observers);
        }
    }

    fn change_speed(&mut self, speed: u32) {
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return;
        }

        self.speed = speed;
        debug!("speed changed to {speed}");
        self.observers.publish(GameEvent::SpeedChanged(speed));
    }

    fn end(&mut self, status: GameStatus, reason: Option<DeathReason>) {
        self.status = status;
        self.death_reason = reason;
        info!(
            "game ended after {} ticks with score {} ({:?})",
            self.tick_count,
            self.score(),
            reason
        );
        self.observers.publish(GameEvent::GameOver);
    }
}
