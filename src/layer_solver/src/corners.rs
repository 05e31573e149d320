use log::debug;
use rubik_core::{
    Algorithm, Axis, Cube, Direction, Face, INNER, OUTER, PieceId, PieceKind, Rotation, Square,
    geometry::grid,
};

use crate::{
    Poles, SolverError, Status, Step,
    cross::{D, D_PRIME},
};

/// Bottom corner slots indexed like the bottom face: back-right, back-left,
/// front-left, front-right
const BOTTOM_SLOTS: [usize; 4] = [grid::SE, grid::SW, grid::NW, grid::NE];

/// Top corner slots indexed like the top face, each with the side face on its
/// left when looking at the corner: front-right, front-left, back-left,
/// back-right
const TOP_SLOTS: [(usize, Face); 4] = [
    (grid::SE, Face::Front),
    (grid::SW, Face::Left),
    (grid::NW, Face::Back),
    (grid::NE, Face::Right),
];

pub(crate) fn first_face_corners(
    poles: Poles,
    cube: &Cube,
    status: &mut Status<'_>,
) -> Result<Step, SolverError> {
    // Corners with the top color on a side face go first
    for index in BOTTOM_SLOTS {
        let piece = corner_at(cube, INNER, index)?;
        let Ok(top) = cube.square_with_color(piece, poles.top) else {
            continue;
        };
        if top.face() == Face::Bottom {
            continue;
        }

        status.say(format!(
            "Found the {} corner with {} facing {}",
            cube.describe_piece(piece),
            poles.top,
            top.face()
        ));
        return corner_sideways(poles, cube, piece).map(Step::Apply);
    }

    for index in BOTTOM_SLOTS {
        let piece = corner_at(cube, INNER, index)?;
        let Ok(top) = cube.square_with_color(piece, poles.top) else {
            continue;
        };
        if top.face() != Face::Bottom {
            return Err(SolverError::AssertionFailure(format!(
                "the {} corner should have been inserted already",
                cube.describe_piece(piece)
            )));
        }

        status.say(format!(
            "The {} corner is facing down",
            cube.describe_piece(piece)
        ));
        return corner_facing_down(cube, piece).map(Step::Apply);
    }

    for (index, left) in TOP_SLOTS {
        let piece = corner_at(cube, OUTER, index)?;
        if cube.is_corner_solved(piece)? {
            continue;
        }

        status.say(format!(
            "The {} corner is in the top layer but not aligned",
            cube.describe_piece(piece)
        ));
        return corner_from_top(poles, cube, piece, left).map(Step::Apply);
    }

    status.say("We have a perfect first layer..!");
    Ok(Step::Advance)
}

fn corner_at(cube: &Cube, depth: usize, index: usize) -> Result<PieceId, SolverError> {
    let piece = cube.slice_piece(Axis::Y, depth, index).ok_or_else(|| {
        SolverError::AssertionFailure(format!("nothing at index {index} of layer {depth}"))
    })?;

    let kind = cube.piece(piece).kind();
    if kind != PieceKind::Corner {
        return Err(SolverError::AssertionFailure(format!(
            "found a {kind} at corner index {index} of layer {depth}"
        )));
    }

    Ok(piece)
}

fn side_index(face: Face) -> Result<usize, SolverError> {
    face.side_index().ok_or_else(|| {
        SolverError::AssertionFailure(format!("expected a side face but got the {face}"))
    })
}

/// Of two neighbouring side faces, the one a clockwise Y turn moves onto the
/// other
fn left_of(a: usize, b: usize) -> usize {
    if (a + 1) % 4 == b { a } else { b }
}

/// Turn the bottom layer so a side square moves `count` faces clockwise
fn bottom_turns(count: usize) -> Algorithm {
    let mut algorithm = Algorithm::new();
    match count % 4 {
        0 => {}
        1 => {
            algorithm.add_step(D);
        }
        2 => {
            algorithm.add_step(D).repeat_last_step();
        }
        _ => {
            algorithm.add_step(D_PRIME);
        }
    }
    algorithm
}

/// The quarter turn of `face` that carries the top face onto `target`
fn turn_face_sending(face: Face, target: Face) -> Result<Rotation, SolverError> {
    Direction::ALL
        .into_iter()
        .map(|direction| Rotation::new(face.axis(), direction, face.depth()))
        .find(|turn| Face::Top.rotated(turn.axis, turn.direction) == target)
        .ok_or_else(|| {
            SolverError::AssertionFailure(format!(
                "turning the {face} never moves the top onto the {target}"
            ))
        })
}

/// Lift `turn`'s face out of the way, turn the bottom and put the face back
fn trigger(turn: Rotation, bottom: Rotation) -> Algorithm {
    [turn, bottom, turn.inverse()].into_iter().collect()
}

/// A bottom corner with the top color on a side face. Line its other side
/// color up with its center, then pull it into the top layer from the side
/// the top color is on.
fn corner_sideways(poles: Poles, cube: &Cube, piece: PieceId) -> Result<Algorithm, SolverError> {
    let top = cube.square_with_color(piece, poles.top)?;
    let side = cube
        .squares_of(piece)
        .find(|square| square.color() != poles.top && square.face() != Face::Bottom)
        .ok_or_else(|| {
            SolverError::AssertionFailure(format!(
                "the {} corner has no second side square",
                cube.describe_piece(piece)
            ))
        })?;

    let home = side_index(cube.home_face_of(side.color())?)?;
    let current = side_index(side.face())?;
    debug!(
        "{} belongs {} faces clockwise of where it is",
        side.color(),
        (home + 4 - current) % 4
    );

    let (lifted, bottom) = match (side_index(top.face())? + 4 - current) % 4 {
        1 => (Face::side(home + 1), D_PRIME),
        3 => (Face::side(home + 3), D),
        _ => {
            return Err(SolverError::AssertionFailure(format!(
                "the {} corner shows {} and {} on opposite faces",
                cube.describe_piece(piece),
                top.color(),
                side.color()
            )));
        }
    };

    let mut algorithm = bottom_turns(home + 4 - current);
    algorithm.extend_from(&trigger(
        turn_face_sending(lifted, Face::side(home))?,
        bottom,
    ));

    Ok(algorithm)
}

/// A bottom corner with the top color facing down. Move it under its slot and
/// turn it out with a half turn of the bottom.
fn corner_facing_down(cube: &Cube, piece: PieceId) -> Result<Algorithm, SolverError> {
    let sides: Vec<&Square> = cube
        .squares_of(piece)
        .filter(|square| square.face() != Face::Bottom)
        .collect();
    let [first, second] = sides.as_slice() else {
        return Err(SolverError::AssertionFailure(format!(
            "the {} corner does not show two side squares",
            cube.describe_piece(piece)
        )));
    };

    let left_current = left_of(side_index(first.face())?, side_index(second.face())?);
    let left_home = left_of(
        side_index(cube.home_face_of(first.color())?)?,
        side_index(cube.home_face_of(second.color())?)?,
    );

    let mut algorithm = bottom_turns(left_home + 4 - left_current);
    let turn = turn_face_sending(Face::side(left_home + 1), Face::side(left_home))?;
    algorithm
        .add_step(turn)
        .add_step(D)
        .repeat_last_step()
        .add_step(turn.inverse());

    Ok(algorithm)
}

/// A top corner that is in the wrong place or twisted. Drop it into the bottom
/// layer so one of the other passes can pick it up.
fn corner_from_top(
    poles: Poles,
    cube: &Cube,
    piece: PieceId,
    left: Face,
) -> Result<Algorithm, SolverError> {
    let right = Face::side(side_index(left)? + 1);
    let top_face = cube
        .square_with_color(piece, poles.top)
        .map_or(Face::Top, Square::face);

    Ok(if top_face == right {
        trigger(turn_face_sending(right, left)?, D_PRIME)
    } else {
        trigger(turn_face_sending(left, right)?, D)
    })
}
