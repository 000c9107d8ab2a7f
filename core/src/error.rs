use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board size is outside the supported range")]
    InvalidSize,
    #[error("Difficulty must be a percentage between 0 and 1")]
    InvalidDifficulty,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Game must be won to create stat")]
    NotWon,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum ScoreboardError {
    #[error("Could not encode or decode scores: {0}")]
    Json(#[from] serde_json::Error),
}
