use std::fmt;

use itertools::Itertools;

use crate::{
    CubeError,
    color::Color,
    geometry::{Axis, Coord, Face, SIZE, grid},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(usize);

/// A single sticker. Its color never changes; the face it shows on does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    color: Color,
    face: Face,
}

impl Square {
    pub fn color(&self) -> Color {
        self.color
    }

    /// The face this square currently shows on
    pub fn face(&self) -> Face {
        self.face
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Center,
    Edge,
    Corner,
}

impl PieceKind {
    fn from_square_count(count: usize) -> Self {
        match count {
            1 => PieceKind::Center,
            2 => PieceKind::Edge,
            3 => PieceKind::Corner,
            _ => unreachable!("a piece shows one to three squares, not {count}"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PieceKind::Center => "center",
            PieceKind::Edge => "edge",
            PieceKind::Corner => "corner",
        })
    }
}

/// A physical cubie. It owns its squares for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    squares: Vec<SquareId>,
}

impl Piece {
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn squares(&self) -> &[SquareId] {
        &self.squares
    }
}

type Positions = [[[Option<PieceId>; SIZE]; SIZE]; SIZE];

/// The cube state model: an arena of squares and pieces plus a table of which
/// piece sits at every position. Face grids and slices are views computed from
/// that table, so a rotation only ever updates the arena and the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cube {
    pub(crate) squares: Vec<Square>,
    pieces: Vec<Piece>,
    pub(crate) positions: Positions,
}

impl Default for Cube {
    fn default() -> Self {
        Cube::new()
    }
}

impl Cube {
    /// Build a solved cube. The hidden core position holds no piece.
    pub fn new() -> Cube {
        let mut squares = Vec::with_capacity(6 * SIZE * SIZE);
        let mut pieces = Vec::with_capacity(SIZE * SIZE * SIZE - 1);
        let mut positions: Positions = [[[None; SIZE]; SIZE]; SIZE];

        for x in 0..SIZE {
            for y in 0..SIZE {
                for z in 0..SIZE {
                    let piece_squares = Coord::new(x, y, z)
                        .faces()
                        .map(|face| {
                            squares.push(Square {
                                color: Color::solved_on(face),
                                face,
                            });
                            SquareId(squares.len() - 1)
                        })
                        .collect_vec();

                    if piece_squares.is_empty() {
                        continue;
                    }

                    pieces.push(Piece {
                        kind: PieceKind::from_square_count(piece_squares.len()),
                        squares: piece_squares,
                    });
                    positions[x][y][z] = Some(PieceId(pieces.len() - 1));
                }
            }
        }

        Cube {
            squares,
            pieces,
            positions,
        }
    }

    pub fn square(&self, id: SquareId) -> &Square {
        &self.squares[id.0]
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, piece)| (PieceId(i), piece))
    }

    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    /// The squares of a piece, in construction order
    pub fn squares_of(&self, id: PieceId) -> impl Iterator<Item = &Square> {
        self.piece(id)
            .squares
            .iter()
            .map(|&square| self.square(square))
    }

    pub(crate) fn relabel(&mut self, id: SquareId, face: Face) {
        self.squares[id.0].face = face;
    }

    pub fn piece_at(&self, coord: Coord) -> Option<PieceId> {
        self.positions[coord.get(Axis::X)][coord.get(Axis::Y)][coord.get(Axis::Z)]
    }

    /// The piece at grid cell `index` of slice `depth` along `axis`
    pub fn slice_piece(&self, axis: Axis, depth: usize, index: usize) -> Option<PieceId> {
        self.piece_at(Coord::in_slice(axis, depth, index))
    }

    /// The positional list of one slice, indexed like a face grid
    pub fn slice(&self, axis: Axis, depth: usize) -> [Option<PieceId>; SIZE * SIZE] {
        std::array::from_fn(|index| self.slice_piece(axis, depth, index))
    }

    /// The square showing in grid cell `index` of `face`
    pub fn square_on(&self, face: Face, index: usize) -> &Square {
        let piece = self
            .piece_at(face.grid_coord(index))
            .expect("every surface position holds a piece");

        self.squares_of(piece)
            .find(|square| square.face == face)
            .expect("the piece at a surface position shows a square on that face")
    }

    pub fn color_at(&self, face: Face, index: usize) -> Color {
        self.square_on(face, index).color
    }

    pub fn face_colors(&self, face: Face) -> [Color; SIZE * SIZE] {
        std::array::from_fn(|index| self.color_at(face, index))
    }

    pub fn center_color(&self, face: Face) -> Color {
        self.color_at(face, grid::CENTER)
    }

    /// The face whose center currently carries `color`
    pub fn home_face_of(&self, color: Color) -> Result<Face, CubeError> {
        Face::ALL
            .into_iter()
            .find(|&face| self.center_color(face) == color)
            .ok_or(CubeError::ColorNotFound { color })
    }

    /// The square of `piece` that has `color`
    pub fn square_with_color(&self, piece: PieceId, color: Color) -> Result<&Square, CubeError> {
        self.squares_of(piece)
            .find(|square| square.color == color)
            .ok_or(CubeError::ColorNotFound { color })
    }

    /// Find the grid index of the piece in a slice whose colors are exactly
    /// `colors`, in any order
    pub fn locate_piece_by_color_set(
        &self,
        axis: Axis,
        depth: usize,
        colors: &[Color],
    ) -> Option<usize> {
        let wanted = colors.iter().copied().sorted().collect_vec();

        (0..SIZE * SIZE).find(|&index| {
            self.slice_piece(axis, depth, index).is_some_and(|piece| {
                self.squares_of(piece)
                    .map(Square::color)
                    .sorted()
                    .eq(wanted.iter().copied())
            })
        })
    }

    /// Whether every square of a corner matches the center of the face it
    /// shows on
    pub fn is_corner_solved(&self, piece: PieceId) -> Result<bool, CubeError> {
        let kind = self.piece(piece).kind;
        if kind != PieceKind::Corner {
            return Err(CubeError::UnexpectedPieceKind {
                expected: PieceKind::Corner,
                found: kind,
            });
        }

        Ok(self
            .squares_of(piece)
            .all(|square| self.center_color(square.face) == square.color))
    }

    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            let center = self.center_color(face);
            self.face_colors(face).iter().all(|&color| color == center)
        })
    }

    /// How many squares carry each color, indexed by `Color as usize`
    pub fn color_counts(&self) -> [usize; 6] {
        let counts = self.squares.iter().map(|square| square.color).counts();
        Color::ALL.map(|color| counts.get(&color).copied().unwrap_or(0))
    }

    /// Human readable name of a piece, e.g. `white-green-red`
    pub fn describe_piece(&self, piece: PieceId) -> String {
        self.squares_of(piece).map(Square::color).join("-")
    }
}

/// Prints the unfolded net: top above, then left, front, right and back, then
/// bottom.
impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |face: Face, row: usize| -> String {
            (0..SIZE)
                .map(|col| self.color_at(face, row * SIZE + col).letter())
                .collect()
        };
        let pad = " ".repeat(SIZE + 1);

        for r in 0..SIZE {
            writeln!(f, "{pad}{}", row(Face::Top, r))?;
        }
        for r in 0..SIZE {
            writeln!(
                f,
                "{}",
                [Face::Left, Face::Front, Face::Right, Face::Back]
                    .into_iter()
                    .map(|face| row(face, r))
                    .join(" ")
            )?;
        }
        for r in 0..SIZE {
            writeln!(f, "{pad}{}", row(Face::Bottom, r))?;
        }

        Ok(())
    }
}
