use rand::Rng;

use crate::grid::{Cell, Grid};
use crate::snake::Position;

/// Picks the cell for the next fruit.
///
/// Starts from a random cell and scans row by row, wrapping on both axes,
/// until it finds an empty cell. Returns `None` when the board has no empty
/// cell left.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Option<Position> {
    let size = grid.size();
    let width = i32::from(size.width);
    let height = i32::from(size.height);

    // Start range excludes the last row and column.
    let start_x = rng.gen_range(0..(width - 1).max(1));
    let start_y = rng.gen_range(0..(height - 1).max(1));

    for row in 0..height {
        for column in 0..width {
            let position = Position {
                x: (start_x + column) % width,
                y: (start_y + row) % height,
            };
            if grid.cell(position) == Some(Cell::Empty) {
                return Some(position);
            }
        }
    }

    None
}
