#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! The state of a 3x3x3 twisty puzzle and the moves that act on it.

pub mod algorithm;
pub mod color;
pub mod cube;
pub mod geometry;
pub mod rotation;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use color::Color;
pub use cube::{Cube, Piece, PieceId, PieceKind, Square, SquareId};
pub use geometry::{Axis, Direction, Face, INNER, MIDDLE, OUTER, SIZE};
pub use rotation::Rotation;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("Cannot turn layer {depth} about the {axis} axis, layers range from 0 to {}", SIZE - 1)]
    InvalidMove { axis: Axis, depth: usize },
    #[error("No {color} square was found")]
    ColorNotFound { color: Color },
    #[error("Expected a {expected} piece but found a {found} piece")]
    UnexpectedPieceKind {
        expected: PieceKind,
        found: PieceKind,
    },
}
