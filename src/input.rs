use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions, in their cyclic order.
///
/// The order matters: `opposite` rotates by two positions and the
/// pathfinder explores neighbors in exactly this order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All directions in cyclic order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        self.rotated(2)
    }

    /// Returns this direction rotated clockwise by `steps` quarter turns.
    #[must_use]
    pub fn rotated(self, steps: usize) -> Self {
        Self::ALL[(self.index() + steps) % Self::ALL.len()]
    }

    /// Returns true for Left and Right.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Unit movement delta; y grows downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Up => (0, -1),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Up => 3,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
    ToggleDemo,
    Confirm,
    Quit,
}

/// Polls the terminal for key presses and maps them to [`GameInput`].
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one mapped key press.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Maps one key event to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(GameInput::Quit),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Char('p' | 'P') | KeyCode::Esc => GameInput::Pause,
        KeyCode::Char('r' | 'R') => GameInput::Restart,
        KeyCode::Tab => GameInput::ToggleDemo,
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{map_key, Direction, GameInput};

    #[test]
    fn opposite_direction_is_two_rotations_away() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);

        for direction in Direction::ALL {
            assert_eq!(direction.opposite(), direction.rotated(2));
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn cyclic_order_is_right_down_left_up() {
        assert_eq!(Direction::Right.rotated(1), Direction::Down);
        assert_eq!(Direction::Down.rotated(1), Direction::Left);
        assert_eq!(Direction::Left.rotated(1), Direction::Up);
        assert_eq!(Direction::Up.rotated(1), Direction::Right);
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key(key(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('d'))),
            Some(GameInput::Direction(Direction::Right))
        );
        assert_eq!(map_key(key(KeyCode::Esc)), Some(GameInput::Pause));
        assert_eq!(map_key(key(KeyCode::Tab)), Some(GameInput::ToggleDemo));
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(GameInput::Quit));
    }
}
