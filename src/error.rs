use thiserror::Error;

/// Failure to place food on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("no free cell left on the board")]
    BoardFull,
}

/// Failure to set up a game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("board {width}x{height} cannot hold the starting snake and one food")]
    BoardTooSmall { width: u16, height: u16 },

    #[error("food placement failed: {0}")]
    Spawn(#[from] SpawnError),
}

/// Top-level error surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}
