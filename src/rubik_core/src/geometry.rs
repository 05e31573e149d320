//! Faces, axes and the fixed tables that relate them.
//!
//! Positions are `(x, y, z)` coordinates in `0..SIZE` where `x` grows from the
//! left face to the right face, `y` from the bottom face to the top face and
//! `z` from the back face to the front face. A clockwise turn is the positive
//! (right hand rule) quarter turn about an axis, so it looks clockwise when
//! seen from the `INNER` end of the axis.

use std::fmt;

/// Number of layers along every axis
pub const SIZE: usize = 3;

/// The layer at the left, bottom or back end of an axis
pub const INNER: usize = 0;
/// The layer between `INNER` and `OUTER`
pub const MIDDLE: usize = 1;
/// The layer at the right, top or front end of an axis
pub const OUTER: usize = SIZE - 1;

/// Row-major indices into a 3x3 face or slice grid, named by compass point
/// with north being row zero.
pub mod grid {
    pub const NW: usize = 0;
    pub const N: usize = 1;
    pub const NE: usize = 2;
    pub const W: usize = 3;
    pub const CENTER: usize = 4;
    pub const E: usize = 5;
    pub const SW: usize = 6;
    pub const S: usize = 7;
    pub const SE: usize = 8;

    pub const CORNERS: [usize; 4] = [NW, NE, SW, SE];
    pub const EDGES: [usize; 4] = [N, W, E, S];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Self; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The side faces a clockwise turn about this axis carries squares
    /// through. Each face moves onto the next one in the cycle.
    const fn face_cycle(self) -> [Face; 4] {
        match self {
            Axis::X => [Face::Top, Face::Front, Face::Bottom, Face::Back],
            Axis::Y => [Face::Front, Face::Right, Face::Back, Face::Left],
            Axis::Z => [Face::Right, Face::Top, Face::Left, Face::Bottom],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub const ALL: [Self; 2] = [Direction::Clockwise, Direction::CounterClockwise];

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// How far one quarter turn in this direction advances a position in a
    /// four long cycle
    const fn cycle_step(self) -> usize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Clockwise => "clockwise",
            Direction::CounterClockwise => "counter-clockwise",
        })
    }
}

/// A side of the cube. The first four variants are the side faces, ordered so
/// that a clockwise turn about the Y axis moves a square from one to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Front = 0,
    Right = 1,
    Back = 2,
    Left = 3,
    Top = 4,
    Bottom = 5,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [Front, Right, Back, Left, Top, Bottom];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    pub const SIDES: [Self; 4] = [Face::Front, Face::Right, Face::Back, Face::Left];

    /// The axis this face is perpendicular to
    pub const fn axis(self) -> Axis {
        match self {
            Face::Front | Face::Back => Axis::Z,
            Face::Right | Face::Left => Axis::X,
            Face::Top | Face::Bottom => Axis::Y,
        }
    }

    /// The layer of `self.axis()` that this face belongs to
    pub const fn depth(self) -> usize {
        match self {
            Face::Front | Face::Right | Face::Top => OUTER,
            Face::Back | Face::Left | Face::Bottom => INNER,
        }
    }

    pub const fn inner_end(axis: Axis) -> Self {
        match axis {
            Axis::X => Face::Left,
            Axis::Y => Face::Bottom,
            Axis::Z => Face::Back,
        }
    }

    pub const fn outer_end(axis: Axis) -> Self {
        match axis {
            Axis::X => Face::Right,
            Axis::Y => Face::Top,
            Axis::Z => Face::Front,
        }
    }

    /// Position of a side face in `Face::SIDES`, `None` for the top and bottom
    pub const fn side_index(self) -> Option<usize> {
        match self {
            Face::Top | Face::Bottom => None,
            side => Some(side as usize),
        }
    }

    /// The side face at `index`, wrapping around the four sides
    pub const fn side(index: usize) -> Self {
        Face::SIDES[index % 4]
    }

    /// Where a square on this face ends up after a quarter turn of its layer
    #[must_use]
    pub fn rotated(self, axis: Axis, direction: Direction) -> Self {
        let cycle = axis.face_cycle();
        match cycle.iter().position(|&face| face == self) {
            Some(i) => cycle[(i + direction.cycle_step()) % cycle.len()],
            None => self,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Right => "right",
            Face::Back => "back",
            Face::Left => "left",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }

    /// The position behind grid cell `index` of this face as seen from
    /// outside the cube. Top has the back edge as row zero, bottom has the
    /// front edge as row zero and the side faces have the top edge as row
    /// zero.
    pub const fn grid_coord(self, index: usize) -> Coord {
        let (row, col) = (index / SIZE, index % SIZE);
        let last = SIZE - 1;
        match self {
            Face::Top => Coord::new(col, last, row),
            Face::Bottom => Coord::new(col, 0, last - row),
            Face::Front => Coord::new(col, last - row, last),
            Face::Back => Coord::new(last - col, last - row, 0),
            Face::Right => Coord::new(last, last - row, last - col),
            Face::Left => Coord::new(0, last - row, col),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord([usize; 3]);

impl Coord {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Coord([x, y, z])
    }

    pub const fn get(self, axis: Axis) -> usize {
        self.0[axis as usize]
    }

    #[must_use]
    pub const fn with(mut self, axis: Axis, value: usize) -> Self {
        self.0[axis as usize] = value;
        self
    }

    /// The grid cell `index` of slice `depth` along `axis`. The `INNER` slice
    /// is indexed like the face at the inner end of the axis, the others like
    /// the face at the outer end.
    pub const fn in_slice(axis: Axis, depth: usize, index: usize) -> Self {
        let face = if depth == INNER {
            Face::inner_end(axis)
        } else {
            Face::outer_end(axis)
        };
        face.grid_coord(index).with(axis, depth)
    }

    /// The faces this position shows squares on, in `Face::ALL` order
    pub fn faces(self) -> impl Iterator<Item = Face> {
        Face::ALL
            .into_iter()
            .filter(move |face| self.get(face.axis()) == face.depth())
    }

    /// Where the piece at this position ends up after a quarter turn about
    /// `axis`. The caller checks that the position is in the turning layer.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn rotated(self, axis: Axis, direction: Direction) -> Self {
        const HALF: isize = (SIZE / 2) as isize;

        let [x, y, z] = self.0.map(|v| v as isize - HALF);
        let turned = match (axis, direction) {
            (Axis::X, Direction::Clockwise) => [x, -z, y],
            (Axis::X, Direction::CounterClockwise) => [x, z, -y],
            (Axis::Y, Direction::Clockwise) => [z, y, -x],
            (Axis::Y, Direction::CounterClockwise) => [-z, y, x],
            (Axis::Z, Direction::Clockwise) => [-y, x, z],
            (Axis::Z, Direction::CounterClockwise) => [y, -x, z],
        };
        Coord(turned.map(|v| (v + HALF) as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clockwise_y_carries_front_to_right() {
        let order = [Face::Front, Face::Right, Face::Back, Face::Left, Face::Front];
        for pair in order.windows(2) {
            assert_eq!(pair[0].rotated(Axis::Y, Direction::Clockwise), pair[1]);
            assert_eq!(
                pair[1].rotated(Axis::Y, Direction::CounterClockwise),
                pair[0]
            );
        }
        assert_eq!(Face::Top.rotated(Axis::Y, Direction::Clockwise), Face::Top);
    }

    #[test]
    fn side_indices_follow_clockwise_y() {
        for face in Face::SIDES {
            let index = face.side_index().unwrap();
            assert_eq!(
                face.rotated(Axis::Y, Direction::Clockwise),
                Face::side(index + 1)
            );
        }
        assert_eq!(Face::Top.side_index(), None);
    }

    #[test]
    fn coordinate_turns_agree_with_face_cycle() {
        // A square on a face sits on the outward side of its position, so
        // turning the position must move it onto the turned face.
        for axis in Axis::ALL {
            for direction in Direction::ALL {
                for face in Face::ALL {
                    if face.axis() == axis {
                        continue;
                    }
                    let coord = face.grid_coord(grid::CENTER);
                    let turned = coord.rotated(axis, direction);
                    let expected = face.rotated(axis, direction);
                    assert_eq!(turned, expected.grid_coord(grid::CENTER));
                }
            }
        }
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let coord = Coord::new(2, 0, 1);
        for axis in Axis::ALL {
            let mut turned = coord;
            for _ in 0..4 {
                turned = turned.rotated(axis, Direction::Clockwise);
            }
            assert_eq!(turned, coord);
        }
    }

    #[test]
    fn slices_are_indexed_like_their_end_faces() {
        assert_eq!(
            Coord::in_slice(Axis::Y, OUTER, grid::S),
            Face::Top.grid_coord(grid::S)
        );
        assert_eq!(
            Coord::in_slice(Axis::Y, INNER, grid::N),
            Face::Bottom.grid_coord(grid::N)
        );
        // Top near edge and bottom near edge are both at the front
        assert_eq!(Coord::in_slice(Axis::Y, OUTER, grid::S).get(Axis::Z), OUTER);
        assert_eq!(Coord::in_slice(Axis::Y, INNER, grid::N).get(Axis::Z), OUTER);
        assert_eq!(Coord::in_slice(Axis::Y, MIDDLE, grid::SE), Coord::new(2, 1, 2));
    }
}
