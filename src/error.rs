//! Error types for lbcollision.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollisionError {
    #[error("Field shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("The grid must have at least one cell in each direction")]
    EmptyGrid,

    #[error("Entropic search at cell ({x}, {y}) exceeded the iteration bound of {iterations}")]
    EntropicSearchExceeded {
        x: usize,
        y: usize,
        iterations: usize,
    },

    #[error("Entropic search at cell ({x}, {y}) produced a non-finite step length")]
    NonFiniteEntropicStep { x: usize, y: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, CollisionError>;
