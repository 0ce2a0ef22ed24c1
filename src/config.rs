use std::time::Duration;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// The fixed board the game is played on.
    pub const BOARD: Self = Self {
        width: BOARD_WIDTH,
        height: BOARD_HEIGHT,
    };

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Board width in cells.
pub const BOARD_WIDTH: u16 = 20;

/// Board height in cells.
pub const BOARD_HEIGHT: u16 = 12;

/// Tick length at speed factor 1.0.
pub const BASE_TICK_DELAY: Duration = Duration::from_millis(200);

/// Poll interval while waiting for restart or quit after a game over.
/// Never shorter than a playing tick.
pub const GAME_OVER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Segment count of a freshly reset snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Multiplier applied to the speed factor per food eaten.
pub const SPEED_DECAY: f64 = 0.95;

/// Lowest speed factor the game accelerates to.
pub const MIN_SPEED_FACTOR: f64 = 0.3;

/// Random draws tried before food placement scans the board.
pub const MAX_RANDOM_SPAWN_ATTEMPTS: usize = 256;

pub const GLYPH_BORDER: &str = "⬜";
pub const GLYPH_SNAKE_HEAD: &str = "🐍";
pub const GLYPH_SNAKE_BODY: &str = "🟩";
pub const GLYPH_FOOD: &str = "🍎";
pub const GLYPH_EMPTY: &str = "⬛";
