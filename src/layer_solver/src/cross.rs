//! The first stage: the cross of edges around the top face.
//!
//! Top edges are checked near, right, left, far. An unsolved edge anywhere
//! but the near slot is brought to the front with a whole cube turn, so every
//! insertion below only ever works on the near slot.

use log::debug;
use rubik_core::{
    Algorithm, Axis, Cube,
    Direction::{Clockwise, CounterClockwise},
    Face, INNER, MIDDLE, OUTER, Rotation,
    geometry::grid,
};

use crate::{Poles, SolverError, Status, Step};

/// Top face slots of the cross with the side face each one borders, in the
/// order they are checked
const SLOTS: [(usize, Face); 4] = [
    (grid::S, Face::Front),
    (grid::E, Face::Right),
    (grid::W, Face::Left),
    (grid::N, Face::Back),
];

const U: Rotation = Rotation::new(Axis::Y, CounterClockwise, OUTER);
const U_PRIME: Rotation = Rotation::new(Axis::Y, Clockwise, OUTER);
pub(crate) const D: Rotation = Rotation::new(Axis::Y, Clockwise, INNER);
pub(crate) const D_PRIME: Rotation = Rotation::new(Axis::Y, CounterClockwise, INNER);
const R: Rotation = Rotation::new(Axis::X, CounterClockwise, OUTER);
const R_PRIME: Rotation = Rotation::new(Axis::X, Clockwise, OUTER);
const L: Rotation = Rotation::new(Axis::X, Clockwise, INNER);
const L_PRIME: Rotation = Rotation::new(Axis::X, CounterClockwise, INNER);
const F: Rotation = Rotation::new(Axis::Z, CounterClockwise, OUTER);
const F_PRIME: Rotation = Rotation::new(Axis::Z, Clockwise, OUTER);
const B: Rotation = Rotation::new(Axis::Z, Clockwise, INNER);
const B_PRIME: Rotation = Rotation::new(Axis::Z, CounterClockwise, INNER);

/// Whether the top edge at `index` shows the top color on top and matches the
/// center of `side`
fn edge_solved(poles: Poles, cube: &Cube, index: usize, side: Face) -> bool {
    cube.color_at(Face::Top, index) == poles.top
        && cube.color_at(side, grid::N) == cube.center_color(side)
}

pub(crate) fn first_face_cross(
    poles: Poles,
    cube: &Cube,
    status: &mut Status<'_>,
) -> Result<Step, SolverError> {
    let Some(&(_, side)) = SLOTS
        .iter()
        .find(|&&(index, side)| !edge_solved(poles, cube, index, side))
    else {
        status.say("Top cross is done, cutting corners now");
        return Ok(Step::Advance);
    };

    let mut algorithm = Algorithm::new();
    match side {
        Face::Right => {
            algorithm.add_whole_cube(Axis::Y, CounterClockwise);
        }
        Face::Left => {
            algorithm.add_whole_cube(Axis::Y, Clockwise);
        }
        Face::Back => {
            algorithm
                .add_whole_cube(Axis::Y, Clockwise)
                .add_whole_cube(Axis::Y, Clockwise);
        }
        _ => return fix_near_edge(poles, cube, status),
    }

    status.say(format!("Turning the {side} top edge to the front"));
    Ok(Step::Apply(algorithm))
}

/// Bring the edge of the top color and the front center color into the near
/// top slot
fn fix_near_edge(
    poles: Poles,
    cube: &Cube,
    status: &mut Status<'_>,
) -> Result<Step, SolverError> {
    let colors = [poles.top, cube.center_color(Face::Front)];

    let (depth, index) = [INNER, MIDDLE, OUTER]
        .into_iter()
        .find_map(|depth| {
            cube.locate_piece_by_color_set(Axis::Y, depth, &colors)
                .map(|index| (depth, index))
        })
        .ok_or_else(|| SolverError::PieceNotFound {
            colors: colors.to_vec(),
        })?;

    let piece = cube.slice_piece(Axis::Y, depth, index).ok_or_else(|| {
        SolverError::AssertionFailure(format!("nothing at index {index} of layer {depth}"))
    })?;
    let top_face = cube.square_with_color(piece, poles.top)?.face();
    debug!(
        "Found {} at index {index} of layer {depth} with {} facing {top_face}",
        cube.describe_piece(piece),
        poles.top
    );

    let algorithm = match depth {
        INNER if top_face == Face::Bottom => {
            status.say("Edge is on the bottom face");
            edge_from_bottom_face(index)
        }
        INNER => {
            status.say("Edge is in the bottom layer");
            edge_from_lower_layer(poles, cube, index)
        }
        MIDDLE => {
            status.say("Edge is in the middle layer");
            middle_to_top(index, top_face)?
        }
        _ => {
            status.say("Edge is in the top layer");
            edge_from_top_layer(index, top_face)?
        }
    };

    Ok(Step::Apply(algorithm))
}

/// The edge lies with the top color facing down. Turn it under the near slot
/// and flip it up with a half turn of the front.
fn edge_from_bottom_face(index: usize) -> Algorithm {
    let mut algorithm = Algorithm::new();

    match index {
        grid::W => {
            algorithm.add_step(D);
        }
        grid::E => {
            algorithm.add_step(D_PRIME);
        }
        grid::S => {
            algorithm.add_step(D).repeat_last_step();
        }
        _ => {}
    }
    algorithm.add_step(F).repeat_last_step();

    algorithm
}

/// The edge is in the bottom layer with the top color on a side face
fn edge_from_lower_layer(poles: Poles, cube: &Cube, index: usize) -> Algorithm {
    let mut algorithm = Algorithm::new();

    // Near and far edges can't be inserted directly
    let index = match index {
        grid::N => {
            algorithm.add_step(D);
            grid::E
        }
        grid::S => {
            algorithm.add_step(D);
            grid::W
        }
        other => other,
    };

    if index == grid::E {
        let restore = edge_solved(poles, cube, grid::E, Face::Right);
        algorithm.add_step(R).add_step(F_PRIME);
        if restore {
            algorithm.add_step(R_PRIME);
        }
    } else {
        let restore = edge_solved(poles, cube, grid::W, Face::Left);
        algorithm.add_step(L_PRIME).add_step(F);
        if restore {
            algorithm.add_step(L);
        }
    }

    algorithm
}

/// Lift an edge out of the middle layer into the near top slot. `slot` indexes
/// the middle layer like the top face and `face` holds the top color.
fn middle_to_top(slot: usize, face: Face) -> Result<Algorithm, SolverError> {
    let steps: &[Rotation] = match (slot, face) {
        (grid::SW, Face::Left) => &[F],
        (grid::SW, Face::Front) => &[U, L_PRIME, U_PRIME],
        (grid::SE, Face::Right) => &[F_PRIME],
        (grid::SE, Face::Front) => &[U_PRIME, R, U],
        (grid::NE, Face::Right) => &[U, U, B, U, U],
        (grid::NE, Face::Back) => &[U_PRIME, R_PRIME, U],
        (grid::NW, Face::Left) => &[U, U, B_PRIME, U, U],
        (grid::NW, Face::Back) => &[U, L, U_PRIME],
        _ => {
            return Err(SolverError::AssertionFailure(format!(
                "no middle layer edge at slot {slot} can show the top color on the {face}"
            )));
        }
    };

    Ok(steps.iter().copied().collect())
}

/// Drop a top layer edge into the middle layer, then lift it into place
fn edge_from_top_layer(index: usize, top_face: Face) -> Result<Algorithm, SolverError> {
    let (drop, slot) = match index {
        grid::S => (F_PRIME, grid::SW),
        grid::N => (B, grid::NW),
        grid::W => (L, grid::SW),
        grid::E => (R_PRIME, grid::SE),
        _ => {
            return Err(SolverError::AssertionFailure(format!(
                "index {index} of the top layer does not hold an edge"
            )));
        }
    };

    let mut algorithm = Algorithm::new();
    algorithm.add_step(drop).extend_from(&middle_to_top(
        slot,
        top_face.rotated(drop.axis, drop.direction),
    )?);

    Ok(algorithm)
}
