use thiserror::Error;

/// Invalid session construction parameters.
///
/// Gameplay itself never fails; these are only raised before a session
/// exists.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("grid must be at least 2x2, got {width}x{height}")]
    GridTooSmall { width: u16, height: u16 },
    #[error("start position ({x}, {y}) lies outside the grid")]
    StartOutOfBounds { x: i32, y: i32 },
    #[error("speed {0} is outside 1..=1000")]
    InvalidSpeed(u32),
}
