use std::fmt;

use log::trace;

use crate::{
    CubeError,
    algorithm::Algorithm,
    cube::Cube,
    geometry::{Axis, Coord, Direction, SIZE},
};

/// A quarter turn of a single slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation {
    pub axis: Axis,
    pub direction: Direction,
    pub depth: usize,
}

impl Rotation {
    pub const fn new(axis: Axis, direction: Direction, depth: usize) -> Self {
        Rotation {
            axis,
            direction,
            depth,
        }
    }

    /// The same slice turned the other way
    #[must_use]
    pub const fn inverse(self) -> Self {
        Rotation {
            direction: self.direction.reversed(),
            ..self
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} layer {}", self.axis, self.direction, self.depth)
    }
}

impl Cube {
    /// Turn one slice a quarter turn. Pieces in the slice move to their turned
    /// positions and their squares are relabeled through the face cycle of the
    /// axis. Nothing is changed if the depth is out of range.
    pub fn apply(&mut self, rotation: Rotation) -> Result<(), CubeError> {
        let Rotation {
            axis,
            direction,
            depth,
        } = rotation;

        if depth >= SIZE {
            return Err(CubeError::InvalidMove { axis, depth });
        }
        trace!("Applying {rotation}");

        let before = self.positions;
        for a in 0..SIZE {
            for b in 0..SIZE {
                let from = slice_cell(axis, depth, a, b);
                let Some(piece) = before[from.get(Axis::X)][from.get(Axis::Y)][from.get(Axis::Z)]
                else {
                    continue;
                };

                let to = from.rotated(axis, direction);
                self.positions[to.get(Axis::X)][to.get(Axis::Y)][to.get(Axis::Z)] = Some(piece);

                for square in self.piece(piece).squares().to_vec() {
                    let face = self.square(square).face();
                    self.relabel(square, face.rotated(axis, direction));
                }
            }
        }

        Ok(())
    }

    /// Apply every step of an algorithm in order, stopping at the first
    /// invalid step
    pub fn apply_algorithm(&mut self, algorithm: &Algorithm) -> Result<(), CubeError> {
        for &rotation in algorithm {
            self.apply(rotation)?;
        }

        Ok(())
    }
}

/// The position in layer `depth` along `axis` whose other two coordinates are
/// `a` and `b`
fn slice_cell(axis: Axis, depth: usize, a: usize, b: usize) -> Coord {
    match axis {
        Axis::X => Coord::new(depth, a, b),
        Axis::Y => Coord::new(a, depth, b),
        Axis::Z => Coord::new(a, b, depth),
    }
}
