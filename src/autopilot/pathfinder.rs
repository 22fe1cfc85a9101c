use std::collections::VecDeque;

use crate::grid::{Cell, Grid};
use crate::input::Direction;
use crate::snake::Position;

/// Best known way of reaching one cell during a search.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Waypoint {
    cost: u32,
    /// Move that entered the cell; `None` only for the start cell.
    arrival: Option<Direction>,
}

/// Route to the fruit, consumed one move per tick.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Path {
    // Stored last move first so the next move is popped off the end.
    steps: Vec<Direction>,
}

impl Path {
    /// Removes and returns the next move.
    pub fn next_step(&mut self) -> Option<Direction> {
        self.steps.pop()
    }

    /// Remaining moves in travel order.
    pub fn steps(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.iter().rev().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Breadth-first search from the snake head to the fruit.
///
/// Each move costs 1, plus 1 when it enters a border cell. Snake cells are
/// impassable except the `virtual_tail` cell, which will be vacated by the
/// time the head gets there. The waypoint arena and queue are kept between
/// calls only to reuse their allocations; every search starts from scratch.
#[derive(Debug, Default)]
pub struct Pathfinder {
    waypoints: Vec<Option<Waypoint>>,
    queue: VecDeque<Position>,
}

impl Pathfinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches for a route from `start` to the fruit cell.
    ///
    /// Returns `None` when no fruit cell is reachable.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        start: Position,
        virtual_tail: Position,
    ) -> Option<Path> {
        self.reset(grid);

        let start_index = grid.index(start)?;
        self.waypoints[start_index] = Some(Waypoint {
            cost: 0,
            arrival: None,
        });
        self.queue.push_back(start);

        while let Some(current) = self.queue.pop_front() {
            let Some(waypoint) = grid.index(current).and_then(|index| self.waypoints[index])
            else {
                continue;
            };

            if grid.cell(current) == Some(Cell::Fruit) {
                return Some(self.trace_back(grid, current));
            }

            for direction in Direction::ALL {
                let next = grid.neighbor(current, direction);
                let Some(next_index) = grid.index(next) else {
                    continue;
                };

                let mut cost = waypoint.cost + 1;
                if grid.is_on_border(next) {
                    cost += 1;
                }

                let improves = self.waypoints[next_index].is_none_or(|known| known.cost > cost);
                if improves && !grid.is_blocked(next, virtual_tail) {
                    self.waypoints[next_index] = Some(Waypoint {
                        cost,
                        arrival: Some(direction),
                    });
                    self.queue.push_back(next);
                }
            }
        }

        None
    }

    fn reset(&mut self, grid: &Grid) {
        self.queue.clear();
        self.waypoints.clear();
        self.waypoints.resize(grid.size().total_cells(), None);
    }

    fn trace_back(&self, grid: &Grid, goal: Position) -> Path {
        let mut steps = Vec::new();
        let mut position = goal;

        // Costs strictly decrease along arrival links, so this ends at the start.
        while let Some(Waypoint {
            arrival: Some(direction),
            ..
        }) = grid.index(position).and_then(|index| self.waypoints[index])
        {
            steps.push(direction);
            position = grid.previous(position, direction);
        }

        Path { steps }
    }
}

/// Local move choice used when no route to the fruit exists.
///
/// Prefers Up when the next two cells upward are free, otherwise the first
/// free of Down, Right and Left, falling back to Up. A horizontal heading
/// that would turn Down while the cell straight ahead is blocked turns Up
/// instead whenever the cell above is free.
#[must_use]
pub fn fallback_direction(
    grid: &Grid,
    head: Position,
    virtual_tail: Position,
    forbidden: Direction,
) -> Direction {
    let blocked = |position: Position| grid.is_blocked(position, virtual_tail);

    let above = grid.neighbor(head, Direction::Up);
    let two_above = grid.neighbor(above, Direction::Up);

    let mut choice = Direction::Up;
    if blocked(above) || blocked(two_above) {
        choice = [Direction::Down, Direction::Right, Direction::Left]
            .into_iter()
            .find(|direction| !blocked(grid.neighbor(head, *direction)))
            .unwrap_or(Direction::Up);
    }

    if forbidden.is_horizontal() && choice == Direction::Down {
        let ahead = grid.previous(head, forbidden);
        if blocked(ahead) && !blocked(above) {
            choice = Direction::Up;
        }
    }

    choice
}
