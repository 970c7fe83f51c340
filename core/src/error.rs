use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be a non-empty rectangle of at most 255 by 255 cells")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Game is still loading, no moves are accepted yet")]
    NotReady,
}

pub type Result<T> = core::result::Result<T, GameError>;
