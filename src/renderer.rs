use std::io;

use unicode_width::UnicodeWidthStr;

use crate::config::{GLYPH_BORDER, GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD};
use crate::game::{EndReason, GameState};
use crate::snake::Position;

/// Surface a composed frame is written to.
pub trait Display {
    /// Replaces everything on the surface with `frame`.
    fn present(&mut self, frame: &BoardFrame) -> io::Result<()>;
}

/// One full redraw: bordered grid rows followed by status lines.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BoardFrame {
    lines: Vec<String>,
}

impl BoardFrame {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Widest line in terminal columns; emoji glyphs count as two.
    #[must_use]
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Composes the frame for `state`.
#[must_use]
pub fn compose(state: &GameState) -> BoardFrame {
    let bounds = state.bounds();
    let width = i32::from(bounds.width);
    let height = i32::from(bounds.height);

    let border_row = GLYPH_BORDER.repeat(usize::from(bounds.width) + 2);
    let mut lines = Vec::with_capacity(usize::from(bounds.height) + 4);
    lines.push(border_row.clone());

    for y in 0..height {
        let mut row = String::from(GLYPH_BORDER);
        for x in 0..width {
            row.push_str(cell_glyph(state, Position { x, y }));
        }
        row.push_str(GLYPH_BORDER);
        lines.push(row);
    }

    lines.push(border_row);
    lines.push(format!("Score: {}  High: {}", state.score, state.high_score));

    if let Some(reason) = state.end_reason.filter(|_| state.is_game_over()) {
        lines.push(format!(
            "{}  [r] restart  [q] quit",
            end_reason_text(reason)
        ));
    }

    BoardFrame { lines }
}

fn cell_glyph(state: &GameState, position: Position) -> &'static str {
    if position == state.snake.head() {
        GLYPH_SNAKE_HEAD
    } else if state.snake.occupies(position) {
        GLYPH_SNAKE_BODY
    } else if position == state.food.position {
        GLYPH_FOOD
    } else {
        GLYPH_EMPTY
    }
}

fn end_reason_text(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Wall => "GAME OVER: hit the wall",
        EndReason::SelfCollision => "GAME OVER: bit yourself",
        EndReason::BoardFilled => "YOU WIN: the board is full",
    }
}
