use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::config::PALETTE;
use crate::game::GameStatus;

/// Rows reserved below the board.
pub const HUD_HEIGHT: u16 = 2;

const KEY_HINTS: &str = "[P] pause  [R] restart  [Tab] demo  [Q] quit";

/// Renders the value row and the status row.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let [values_area, status_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let feed = app.feed();
    let values = Line::from(vec![
        label("Speed: "),
        value(feed.speed.to_string()),
        label("  Score: "),
        value(feed.score.to_string()),
        label("  High Score: "),
        value(app.high_score().to_string()),
    ]);
    frame.render_widget(
        Paragraph::new(values).alignment(Alignment::Center),
        values_area,
    );

    frame.render_widget(
        Paragraph::new(status_line(app))
            .alignment(Alignment::Center)
            .style(Style::default().fg(PALETTE.hud_label)),
        status_area,
    );
}

fn status_line(app: &App) -> Line<'static> {
    let size = app.game().bounds();
    let wrap = if app.game().grid().wraparound() {
        " wrap"
    } else {
        ""
    };
    let status = match app.game().status() {
        GameStatus::GameOver => "Game Over!",
        GameStatus::Victory => "Board filled!",
        GameStatus::Paused => "Pause",
        GameStatus::Playing if app.is_demo() => "Demo",
        GameStatus::Playing => "",
    };

    let board = format!("{}x{}{wrap}", size.width, size.height);
    let line = [status, board.as_str(), KEY_HINTS]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("  ");
    Line::from(line)
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(PALETTE.hud_label))
}

fn value(text: String) -> Span<'static> {
    Span::styled(
        text,
        Style::default()
            .fg(PALETTE.hud_value)
            .add_modifier(Modifier::BOLD),
    )
}
