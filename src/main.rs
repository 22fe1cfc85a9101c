use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use autopilot_snake::app::App;
use autopilot_snake::config::{
    GridSize, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, FRAME_INTERVAL_MS, MAX_GRID_DIMENSION,
    MAX_SPEED, MIN_GRID_DIMENSION, MIN_SPEED,
};
use autopilot_snake::game::GameConfig;
use autopilot_snake::input::InputHandler;
use autopilot_snake::renderer;
use autopilot_snake::score::{load_high_scores, save_high_scores, HighScores};
use autopilot_snake::snake::Position;
use autopilot_snake::terminal_runtime::TerminalSession;
use clap::Parser;
use log::{info, warn};

const GRID_DIMENSIONS: std::ops::RangeInclusive<i64> =
    MIN_GRID_DIMENSION as i64..=MAX_GRID_DIMENSION as i64;
const SPEEDS: std::ops::RangeInclusive<i64> = MIN_SPEED as i64..=MAX_SPEED as i64;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH,
          value_parser = clap::value_parser!(u16).range(GRID_DIMENSIONS))]
    width: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT,
          value_parser = clap::value_parser!(u16).range(GRID_DIMENSIONS))]
    height: u16,

    /// Initial speed in ticks per second.
    #[arg(long, default_value_t = MIN_SPEED,
          value_parser = clap::value_parser!(u32).range(SPEEDS))]
    speed: u32,

    /// Column of the starting cell.
    #[arg(long = "start-x", default_value_t = 0)]
    start_x: i32,

    /// Row of the starting cell.
    #[arg(long = "start-y", default_value_t = 0)]
    start_y: i32,

    /// Let the snake pass through the edges instead of dying.
    #[arg(long)]
    wrap: bool,

    /// Start in autopilot demo mode.
    #[arg(long)]
    demo: bool,

    /// Seed for reproducible fruit placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (default filter `debug`, override with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            size: GridSize {
                width: self.width,
                height: self.height,
            },
            initial_speed: self.speed,
            start: Position {
                x: self.start_x,
                y: self.start_y,
            },
            wraparound: self.wrap,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config();
    let high_scores = load_high_scores().unwrap_or_else(|error| {
        eprintln!("Warning: ignoring unreadable high scores: {error}");
        HighScores::default()
    });

    let mut app = App::new(config, cli.seed, cli.demo, high_scores)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    info!(
        "starting {}x{} board (wrap: {}, demo: {})",
        config.size.width, config.size.height, config.wraparound, cli.demo
    );
    run(&mut app)
}

fn run(app: &mut App) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut last_tick = Instant::now();

    loop {
        let view: &App = app;
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, view))?;

        if let Some(game_input) = input.poll_input(Duration::from_millis(FRAME_INTERVAL_MS))? {
            let keep_running = app
                .handle_input(game_input)
                .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
            if !keep_running {
                break;
            }
        }

        if last_tick.elapsed() >= app.tick_interval() {
            app.advance();
            last_tick = Instant::now();
        }

        if let Some(scores) = app.take_unsaved_scores() {
            if let Err(error) = save_high_scores(scores) {
                warn!("failed to save high scores: {error}");
            }
        }
    }

    Ok(())
}

/// Logs go to `log_file` when given; the terminal belongs to the game, so
/// without a file no logger is installed at all.
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::init_logging;

    #[test]
    fn logging_stays_off_without_a_log_file() {
        init_logging(None).expect("no file to create");

        assert_eq!(log::max_level(), LevelFilter::Off);
        assert!(!log::log_enabled!(log::Level::Error));
    }
}
