use rand::Rng;
use tracing::warn;

use crate::config::{GridSize, MAX_RANDOM_SPAWN_ATTEMPTS};
use crate::error::SpawnError;
use crate::snake::{Position, Snake};

/// Food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell the snake does not occupy.
    ///
    /// Draws uniformly random cells first and falls back to a row-major scan
    /// once the attempt budget is spent. Fails only when every cell is
    /// covered by the snake.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Result<Self, SpawnError> {
        if bounds.total_cells() == 0 {
            return Err(SpawnError::BoardFull);
        }

        for _ in 0..MAX_RANDOM_SPAWN_ATTEMPTS {
            let candidate = Position {
                x: rng.gen_range(0..i32::from(bounds.width)),
                y: rng.gen_range(0..i32::from(bounds.height)),
            };
            if !snake.occupies(candidate) {
                return Ok(Self::new(candidate));
            }
        }

        warn!(
            snake_len = snake.len(),
            "random food placement exhausted, scanning for a free cell"
        );
        first_free_cell(bounds, snake)
            .map(Self::new)
            .ok_or(SpawnError::BoardFull)
    }
}

fn first_free_cell(bounds: GridSize, snake: &Snake) -> Option<Position> {
    (0..i32::from(bounds.height))
        .flat_map(|y| (0..i32::from(bounds.width)).map(move |x| Position { x, y }))
        .find(|position| !snake.occupies(*position))
}
