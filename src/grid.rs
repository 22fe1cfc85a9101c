use crate::config::GridSize;
use crate::events::{GameEvent, Observers};
use crate::input::Direction;
use crate::snake::Position;

/// State of one grid cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Snake,
    Fruit,
}

/// Fixed-size cell storage; the single source of truth for the board.
#[derive(Debug, Clone)]
pub struct Grid {
    size: GridSize,
    wraparound: bool,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid.
    #[must_use]
    pub fn new(size: GridSize, wraparound: bool) -> Self {
        Self {
            size,
            wraparound,
            cells: vec![Cell::Empty; size.total_cells()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn wraparound(&self) -> bool {
        self.wraparound
    }

    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        position.is_within_bounds(self.size)
    }

    #[must_use]
    pub fn wrap(&self, position: Position) -> Position {
        position.wrapped(self.size)
    }

    /// Neighbor of `position` in `direction`, wrapped when wraparound is on.
    ///
    /// Without wraparound the result may lie outside the grid.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Position {
        let next = position.step(direction);
        if self.wraparound { self.wrap(next) } else { next }
    }

    /// Inverse of [`Grid::neighbor`].
    #[must_use]
    pub fn previous(&self, position: Position, direction: Direction) -> Position {
        let previous = position.step_back(direction);
        if self.wraparound {
            self.wrap(previous)
        } else {
            previous
        }
    }

    /// Returns the cell state, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    /// True when `position` cannot be entered: outside the grid, or occupied
    /// by the snake and not the `passable` cell.
    #[must_use]
    pub fn is_blocked(&self, position: Position, passable: Position) -> bool {
        match self.cell(position) {
            None => true,
            Some(Cell::Snake) => position != passable,
            Some(_) => false,
        }
    }

    /// True for cells on the outermost row or column.
    #[must_use]
    pub fn is_on_border(&self, position: Position) -> bool {
        position.x == 0
            || position.y == 0
            || position.x == i32::from(self.size.width) - 1
            || position.y == i32::from(self.size.height) - 1
    }

    /// Sets one cell and publishes the change.
    ///
    /// Out-of-bounds positions are ignored and publish nothing.
    pub fn set_cell(&mut self, position: Position, cell: Cell, observers: &mut Observers) {
        let Some(index) = self.index(position) else {
            return;
        };

        self.cells[index] = cell;
        observers.publish(GameEvent::CellChanged {
            x: position.x,
            y: position.y,
            cell,
        });
    }

    /// Counts cells in the given state.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|candidate| **candidate == cell).count()
    }

    /// Iterates over `(position, cell)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = usize::from(self.size.width);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let position = Position {
                x: (index % width) as i32,
                y: (index / width) as i32,
            };
            (position, *cell)
        })
    }

    /// Row-major index of an in-bounds position.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.in_bounds(position) {
            return None;
        }
        let (x, y) = (position.x as usize, position.y as usize);
        Some(y * usize::from(self.size.width) + x)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::config::GridSize;
    use crate::events::{GameEvent, Observers};
    use crate::input::Direction;
    use crate::snake::Position;

    use super::{Cell, Grid};

    fn size(width: u16, height: u16) -> GridSize {
        GridSize { width, height }
    }

    #[test]
    fn set_cell_publishes_once_for_in_bounds_targets() {
        let mut grid = Grid::new(size(3, 3), false);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let mut observers = Observers::new();
        observers.subscribe(move |event: &GameEvent| sink.borrow_mut().push(*event));

        grid.set_cell(Position { x: 1, y: 2 }, Cell::Fruit, &mut observers);
        grid.set_cell(Position { x: 3, y: 0 }, Cell::Snake, &mut observers);
        grid.set_cell(Position { x: -1, y: 0 }, Cell::Snake, &mut observers);

        assert_eq!(grid.cell(Position { x: 1, y: 2 }), Some(Cell::Fruit));
        assert_eq!(grid.count(Cell::Snake), 0);
        assert_eq!(
            *log.borrow(),
            vec![GameEvent::CellChanged {
                x: 1,
                y: 2,
                cell: Cell::Fruit
            }]
        );
    }

    #[test]
    fn neighbor_wraps_only_when_enabled() {
        let bounded = Grid::new(size(4, 3), false);
        let torus = Grid::new(size(4, 3), true);
        let corner = Position { x: 3, y: 0 };

        assert_eq!(
            bounded.neighbor(corner, Direction::Right),
            Position { x: 4, y: 0 }
        );
        assert_eq!(torus.neighbor(corner, Direction::Right), Position { x: 0, y: 0 });
        assert_eq!(torus.neighbor(corner, Direction::Up), Position { x: 3, y: 2 });
        assert_eq!(
            torus.previous(Position { x: 0, y: 0 }, Direction::Right),
            corner
        );
    }

    #[test]
    fn blocked_cells_respect_passable_tail() {
        let mut grid = Grid::new(size(3, 3), false);
        let tail = Position { x: 1, y: 1 };
        grid.set_cell(tail, Cell::Snake, &mut Observers::new());

        assert!(grid.is_blocked(tail, Position { x: 0, y: 0 }));
        assert!(!grid.is_blocked(tail, tail));
        assert!(grid.is_blocked(Position { x: 0, y: 3 }, tail));
        assert!(!grid.is_blocked(Position { x: 0, y: 0 }, tail));
    }

    #[test]
    fn border_detection_covers_all_edges() {
        let grid = Grid::new(size(4, 4), false);

        assert!(grid.is_on_border(Position { x: 0, y: 2 }));
        assert!(grid.is_on_border(Position { x: 3, y: 1 }));
        assert!(grid.is_on_border(Position { x: 2, y: 3 }));
        assert!(!grid.is_on_border(Position { x: 1, y: 2 }));
    }
}
