use std::collections::VecDeque;

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body (head first) plus its facing and pending directions.
///
/// The body is never empty. Bounds and self-collision are not checked here;
/// the game state does that after each move.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates the starting snake for `bounds`: three cells in a row,
    /// head at the board centre, facing right.
    #[must_use]
    pub fn centered(bounds: GridSize) -> Self {
        let head = Position {
            x: i32::from(bounds.width / 2),
            y: i32::from(bounds.height / 2),
        };
        let body = (0..INITIAL_SNAKE_LENGTH as i32)
            .map(|offset| Position {
                x: head.x - offset,
                y: head.y,
            })
            .collect();

        Self {
            body,
            direction: Direction::Right,
            pending_direction: Direction::Right,
        }
    }

    /// Creates a snake from an explicit head and the segments behind it.
    #[must_use]
    pub fn from_segments(
        head: Position,
        tail: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Self {
        let mut body = VecDeque::from([head]);
        body.extend(tail);

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// Puts the snake back into its starting layout for `bounds`.
    pub fn reset(&mut self, bounds: GridSize) {
        *self = Self::centered(bounds);
    }

    /// Requests a new heading for the next move. A 180° reversal of the
    /// current heading is ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = direction;
    }

    /// Advances one cell in the pending direction. Unless `grow` is set the
    /// tail cell is released.
    pub fn advance(&mut self, grow: bool) {
        self.direction = self.pending_direction;
        let next_head = self.head().step(self.direction);

        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the head position the next [`Snake::advance`] will produce.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.pending_direction)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction of the last move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction the next move will take.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
