use ratatui::style::Color;
use ratatui::symbols::border;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Cell colors used by the terminal renderer.
#[derive(Debug)]
pub struct Palette {
    pub empty: Color,
    pub snake: Color,
    pub snake_head: Color,
    pub fruit: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Beige field, green snake, orange fruit.
pub const PALETTE: Palette = Palette {
    empty: Color::Rgb(245, 245, 220),
    snake: Color::Green,
    snake_head: Color::LightGreen,
    fruit: Color::Rgb(255, 165, 0),
    border_fg: Color::Gray,
    border_bg: Color::DarkGray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Glyph painted for one logical cell; each cell is two terminal columns wide.
pub const GLYPH_CELL: &str = "██";

/// Terminal columns per logical cell.
pub const CELL_COLUMNS: u16 = 2;

/// Default grid width.
pub const DEFAULT_GRID_WIDTH: u16 = 10;

/// Default grid height.
pub const DEFAULT_GRID_HEIGHT: u16 = 10;

/// Smallest grid dimension the simulation supports.
pub const MIN_GRID_DIMENSION: u16 = 2;

/// Largest grid dimension the front-end accepts.
pub const MAX_GRID_DIMENSION: u16 = 100;

/// Slowest game speed in ticks per second.
pub const MIN_SPEED: u32 = 1;

/// Fastest game speed in ticks per second.
pub const MAX_SPEED: u32 = 1000;

/// Snake length multiple at which the speed goes up by one.
pub const SPEED_UP_EVERY: usize = 5;

/// Frame poll interval of the terminal loop in milliseconds.
pub const FRAME_INTERVAL_MS: u64 = 16;
