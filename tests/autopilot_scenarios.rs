use std::cell::RefCell;
use std::rc::Rc;

use autopilot_snake::autopilot::{Autopilot, Pathfinder};
use autopilot_snake::config::GridSize;
use autopilot_snake::events::GameEvent;
use autopilot_snake::game::{GameConfig, GameState};
use autopilot_snake::grid::Cell;
use autopilot_snake::snake::Position;

fn session(width: u16, height: u16, wraparound: bool, seed: u64) -> GameState {
    GameState::new_with_seed(
        &GameConfig {
            size: GridSize { width, height },
            wraparound,
            start: Position { x: 2, y: 2 },
            ..GameConfig::default()
        },
        seed,
    )
    .expect("valid config")
}

#[test]
fn first_fruit_is_reached_along_the_planned_route() {
    for (wraparound, seed) in [(false, 11), (true, 12)] {
        let mut game = session(9, 7, wraparound, seed);
        let head = game.snake().head();
        let route = Pathfinder::new()
            .find_path(game.grid(), head, head)
            .expect("open board has a route");
        let mut autopilot = Autopilot::attach(&game);

        for (tick, expected) in route.steps().enumerate() {
            assert_eq!(game.score(), 1, "fruit eaten early at tick {tick}");
            assert_eq!(autopilot.step(&mut game), Some(expected));
        }

        assert_eq!(game.score(), 2);
        assert!(!game.is_over());
    }
}

#[test]
fn autopilot_game_over_is_reported_like_any_other() {
    let mut game = session(5, 5, false, 21);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    game.subscribe(move |event: &GameEvent| sink.borrow_mut().push(*event));
    let mut autopilot = Autopilot::attach(&game);

    for _ in 0..5_000 {
        if autopilot.step(&mut game).is_none() {
            break;
        }
        assert!(game.snake().len() <= 25);
    }

    assert!(game.is_over(), "autopilot should lose on a 5x5 board");

    let recorded = log.borrow().len();
    assert_eq!(autopilot.step(&mut game), None);
    game.tick();
    assert_eq!(log.borrow().len(), recorded);

    let log = log.borrow();
    let game_overs = log
        .iter()
        .filter(|event| **event == GameEvent::GameOver)
        .count();
    assert_eq!(game_overs, 1);
    assert_eq!(log.last(), Some(&GameEvent::GameOver));
}

#[test]
fn every_score_event_matches_the_snake_length() {
    let mut game = session(8, 8, true, 31);
    let scores = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&scores);
    game.subscribe(move |event: &GameEvent| {
        if let GameEvent::ScoreChanged(score) = event {
            sink.borrow_mut().push(*score);
        }
    });
    let mut autopilot = Autopilot::attach(&game);

    for _ in 0..1_000 {
        if autopilot.step(&mut game).is_none() {
            break;
        }
        if !game.is_over() {
            assert_eq!(game.grid().count(Cell::Fruit), 1);
        }
    }

    let scores = scores.borrow();
    let expected: Vec<u32> = (2..).take(scores.len()).collect();
    assert_eq!(*scores, expected);
    assert_eq!(scores.last().copied().unwrap_or(1), game.score());
}
