use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::App;
use crate::config::{BORDER_HALF_BLOCK, CELL_COLUMNS, GLYPH_CELL, PALETTE};
use crate::game::GameStatus;
use crate::grid::{Cell, Grid};
use crate::snake::Position;
use crate::ui::hud::{render_hud, HUD_HEIGHT};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let [board_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(frame.area());

    render_hud(frame, hud_area, app);

    let grid = app.game().grid();
    let play_area = centered_board(board_area, grid);
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(PALETTE.border_fg).bg(PALETTE.border_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_cells(frame, inner, grid, app.game().snake().head());

    if app.is_start_screen() {
        render_start_menu(frame, play_area, app.high_score());
        return;
    }

    match app.game().status() {
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::GameOver | GameStatus::Victory => render_game_over_menu(frame, play_area, app),
        GameStatus::Playing => {}
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, grid: &Grid, head: Position) {
    let buffer = frame.buffer_mut();
    for (position, cell) in grid.cells() {
        let Some((x, y)) = logical_to_terminal(inner, position) else {
            continue;
        };

        let color = match cell {
            Cell::Empty => PALETTE.empty,
            Cell::Snake if position == head => PALETTE.snake_head,
            Cell::Snake => PALETTE.snake,
            Cell::Fruit => PALETTE.fruit,
        };
        buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(color));
    }
}

/// Board rectangle including its border, centered in `area`.
fn centered_board(area: Rect, grid: &Grid) -> Rect {
    let size = grid.size();
    let width = size.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = size.height.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::snake::Position;

    use super::logical_to_terminal;

    #[test]
    fn cells_map_to_two_columns_each() {
        let inner = Rect::new(1, 1, 10, 5);

        assert_eq!(logical_to_terminal(inner, Position { x: 0, y: 0 }), Some((1, 1)));
        assert_eq!(logical_to_terminal(inner, Position { x: 4, y: 4 }), Some((9, 5)));
        assert_eq!(logical_to_terminal(inner, Position { x: 5, y: 0 }), None);
        assert_eq!(logical_to_terminal(inner, Position { x: 0, y: 5 }), None);
        assert_eq!(logical_to_terminal(inner, Position { x: -1, y: 0 }), None);
    }
}
