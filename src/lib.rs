//! Grid snake simulation with a breadth-first autopilot.
//!
//! The simulation core (`grid`, `snake`, `game`, `food`, `autopilot`) is
//! independent of the terminal front-end (`app`, `renderer`, `ui`,
//! `terminal_runtime`), which only talks to it through [`game::GameState`]
//! and the [`events`] observer surface.

pub mod app;
pub mod autopilot;
pub mod config;
pub mod error;
pub mod events;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
