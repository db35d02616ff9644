//! Centralized error types for the simulation.
//!
//! The running simulation never fails: bad direction requests and stale timer keys are
//! rejected silently. Errors only arise while building a simulation from a layout.

/// Main error type for the simulation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),

    #[error("Board has no rows")]
    Empty,

    #[error("Invalid board width at row {row}: expected {expected}, got {found}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("{what} position {pos} is not an open tile")]
    OutOfBounds { what: &'static str, pos: glam::IVec2 },
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
