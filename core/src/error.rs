use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Masks differ in size")]
    MaskSizeMismatch,
    #[error("At least one mask is required")]
    NoMasks,
    #[error("Mine probability must be within [0, 1]")]
    InvalidProbability,
    #[error("Board must be a non-empty square with matching masks")]
    InvalidBoardShape,
    #[error("Board size must be at least 1")]
    InvalidSize,
}

pub type Result<T> = core::result::Result<T, GameError>;
