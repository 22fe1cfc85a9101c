//! Autopilot that plays a session on its own.
//!
//! The driver replays a cached breadth-first route to the fruit one move per
//! tick and plans a new one once it runs out. It also tracks a virtual tail:
//! the cell the real tail will have moved off by the time the head reaches
//! it, which the planner may route through.

pub mod pathfinder;

use std::collections::VecDeque;

use log::debug;

use crate::game::{GameState, GameStatus};
use crate::grid::Grid;
use crate::input::Direction;
use crate::snake::Position;

pub use pathfinder::{fallback_direction, Path, Pathfinder};

/// Drives a [`GameState`] one tick at a time.
#[derive(Debug)]
pub struct Autopilot {
    pathfinder: Pathfinder,
    path: Option<Path>,
    /// Committed moves not yet retraced by the tail, oldest first.
    issued: VecDeque<Direction>,
    virtual_tail: Position,
}

impl Autopilot {
    /// Takes over `game` in its current state.
    ///
    /// The moves leading from the tail to the head are recovered from the
    /// body, so a game already in progress can be handed over.
    #[must_use]
    pub fn attach(game: &GameState) -> Self {
        let grid = game.grid();
        let segments: Vec<Position> = game.snake().segments().copied().collect();
        let issued = segments
            .windows(2)
            .filter_map(|pair| direction_between(grid, pair[0], pair[1]))
            .collect();

        Self {
            pathfinder: Pathfinder::new(),
            path: None,
            issued,
            virtual_tail: game.snake().tail(),
        }
    }

    /// Chooses a move, applies it and advances the game by one tick.
    ///
    /// Returns the direction the engine committed, or `None` when the game
    /// is not running.
    pub fn step(&mut self, game: &mut GameState) -> Option<Direction> {
        if game.status() != GameStatus::Playing {
            return None;
        }

        let head = game.snake().head();
        if self.path.is_none() {
            self.path = self
                .pathfinder
                .find_path(game.grid(), head, self.virtual_tail);
            match &self.path {
                Some(path) => debug!("planned {} moves to the fruit", path.len()),
                None => debug!("no route to the fruit from ({}, {})", head.x, head.y),
            }
        }

        let requested = match self.path.as_mut().and_then(Path::next_step) {
            Some(direction) => direction,
            None => fallback_direction(
                game.grid(),
                head,
                self.virtual_tail,
                game.forbidden_direction(),
            ),
        };
        if self.path.as_ref().is_some_and(Path::is_empty) {
            self.path = None;
        }

        game.change_direction(requested);
        game.tick();

        let committed = game.direction();
        if committed != requested {
            // The engine refused a reversal; the cached route no longer applies.
            self.path = None;
        }

        self.issued.push_back(committed);
        if self.issued.len() == game.snake().len() {
            if let Some(oldest) = self.issued.pop_front() {
                self.virtual_tail = game.grid().neighbor(self.virtual_tail, oldest);
            }
        }

        Some(committed)
    }

    /// Cell the planner treats as free even though the snake occupies it.
    #[must_use]
    pub fn virtual_tail(&self) -> Position {
        self.virtual_tail
    }

    /// Moves left on the cached route.
    #[must_use]
    pub fn planned_steps(&self) -> usize {
        self.path.as_ref().map_or(0, Path::len)
    }
}

fn direction_between(grid: &Grid, from: Position, to: Position) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .find(|direction| grid.neighbor(from, *direction) == to)
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::game::{GameConfig, GameState};
    use crate::grid::Cell;
    use crate::input::Direction;
    use crate::snake::Position;

    use super::Autopilot;

    fn game(width: u16, height: u16, wraparound: bool, seed: u64) -> GameState {
        GameState::new_with_seed(
            &GameConfig {
                size: GridSize { width, height },
                wraparound,
                ..GameConfig::default()
            },
            seed,
        )
        .expect("valid config")
    }

    fn assert_session_consistent(game: &GameState, autopilot: &Autopilot) {
        let grid = game.grid();
        assert!(game.snake().len() <= grid.size().total_cells());
        assert_eq!(grid.count(Cell::Snake), game.snake().len());
        assert_eq!(autopilot.virtual_tail(), game.snake().tail());
        if !game.is_over() {
            assert_eq!(grid.count(Cell::Fruit), 1);
        }
    }

    #[test]
    fn autopilot_keeps_session_consistent() {
        for (wraparound, seed) in [(false, 1), (true, 2), (false, 3)] {
            let mut game = game(6, 6, wraparound, seed);
            let mut autopilot = Autopilot::attach(&game);

            for _ in 0..2_000 {
                if autopilot.step(&mut game).is_none() {
                    break;
                }
                if game.is_over() {
                    break;
                }
                assert_session_consistent(&game, &autopilot);
            }

            assert!(game.score() > 1, "autopilot should reach the first fruit");
        }
    }

    #[test]
    fn cached_route_is_consumed_one_move_per_tick() {
        let mut game = game(8, 8, false, 4);
        assert!(game.place_fruit(Position { x: 3, y: 3 }));
        let mut autopilot = Autopilot::attach(&game);

        autopilot.step(&mut game);
        let planned = autopilot.planned_steps();
        assert!(planned > 0);

        autopilot.step(&mut game);
        assert_eq!(autopilot.planned_steps(), planned - 1);
    }

    #[test]
    fn attach_recovers_tail_moves_from_the_body() {
        let mut game = game(8, 8, false, 5);
        for x in 1..4 {
            assert!(game.place_fruit(Position { x, y: 0 }));
            game.tick();
        }
        assert!(game.place_fruit(Position { x: 7, y: 7 }));
        game.change_direction(Direction::Down);
        game.tick();
        assert_eq!(game.snake().len(), 4);

        let mut autopilot = Autopilot::attach(&game);
        assert_eq!(autopilot.virtual_tail(), game.snake().tail());

        for _ in 0..10 {
            if autopilot.step(&mut game).is_none() || game.is_over() {
                break;
            }
            assert_eq!(autopilot.virtual_tail(), game.snake().tail());
        }
    }

    #[test]
    fn step_is_a_no_op_once_the_game_ended() {
        let mut game = game(2, 2, false, 6);
        game.change_direction(Direction::Up);
        game.tick();
        assert!(game.is_over());

        let mut autopilot = Autopilot::attach(&game);
        assert_eq!(autopilot.step(&mut game), None);
    }
}
