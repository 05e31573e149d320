use layer_solver::{Mode, SolveState, Solver, SolverError};
use rubik_core::{Algorithm, Axis, Cube, Direction, Face, geometry::grid};

fn scrambled(notation: &str) -> Cube {
    let mut cube = Cube::new();
    cube.apply_algorithm(&notation.parse().unwrap()).unwrap();
    cube
}

/// The top face and the top row of every side face match their centers
fn first_layer_done(cube: &Cube) -> bool {
    let top = cube.center_color(Face::Top);
    cube.face_colors(Face::Top).iter().all(|&color| color == top)
        && Face::SIDES.into_iter().all(|face| {
            let center = cube.center_color(face);
            [grid::NW, grid::N, grid::NE]
                .into_iter()
                .all(|index| cube.color_at(face, index) == center)
        })
}

fn play_current(solver: &mut Solver, cube: &mut Cube) {
    cube.apply_algorithm(solver.current_algorithm()).unwrap();
    solver.on_algorithm_applied(cube).unwrap();
}

#[test_log::test]
fn far_edge_is_turned_to_the_front_then_inserted() {
    // A far top edge that was lifted into the top layer sideways
    let mut cube = scrambled("y2 U L U' F y2");
    let mut solver = Solver::new();

    solver.solve(&cube).unwrap();
    assert_eq!(solver.mode(), Mode::Solving(SolveState::FirstFaceCross));
    let turn = solver.current_algorithm().clone();
    assert_eq!(turn.len(), 6);
    assert!(
        turn.iter()
            .all(|step| step.axis == Axis::Y && step.direction == Direction::Clockwise)
    );
    assert_eq!(turn.to_string(), "y2'");

    play_current(&mut solver, &mut cube);
    assert_eq!(solver.current_algorithm().to_string(), "F' U L' U'");

    play_current(&mut solver, &mut cube);
    assert_eq!(cube.color_at(Face::Top, grid::S), cube.center_color(Face::Top));
    assert_eq!(
        cube.color_at(Face::Front, grid::N),
        cube.center_color(Face::Front)
    );

    solver.step_until_idle(&mut cube).unwrap();
    assert_eq!(solver.mode(), Mode::Idle);
    assert!(first_layer_done(&cube));
}

#[test_log::test]
fn sideways_back_left_corner_is_inserted_first() {
    let mut cube = scrambled("L' D L");
    let mut solver = Solver::new();

    solver.solve(&cube).unwrap();
    assert_eq!(
        solver.mode(),
        Mode::Solving(SolveState::FirstFaceCorners)
    );
    assert_eq!(solver.current_algorithm().to_string(), "L' D' L");
    assert_eq!(solver.current_algorithm().len(), 3);

    play_current(&mut solver, &mut cube);
    assert!(cube.is_solved());
    assert_eq!(solver.mode(), Mode::Idle);
    assert_eq!(
        solver.messages().back().map(String::as_str),
        Some("That's all I can do now")
    );
}

#[test_log::test]
fn solve_while_solving_is_rejected() {
    let cube = scrambled("R U F");
    let mut solver = Solver::new();

    solver.solve(&cube).unwrap();
    let mode = solver.mode();
    let algorithm = solver.current_algorithm().clone();
    assert!(matches!(mode, Mode::Solving(_)));

    assert_eq!(
        solver.solve(&cube),
        Err(SolverError::InvalidState { mode })
    );
    assert_eq!(solver.mode(), mode);
    assert_eq!(solver.current_algorithm(), &algorithm);
    assert_eq!(
        solver.messages().back().cloned(),
        Some(format!("Invalid state to solve: {mode}"))
    );
}

#[test_log::test]
fn random_scrambles_finish_the_first_layer() {
    let mut rng = fastrand::Rng::with_seed(2024);

    for _ in 0..300 {
        let length = rng.usize(..40);
        let mut cube = Cube::new();
        cube.apply_algorithm(&Algorithm::random(length, &mut rng))
            .unwrap();
        let top = cube.center_color(Face::Top);

        let mut solver = Solver::new();
        solver.solve(&cube).unwrap();
        solver.step_until_idle(&mut cube).unwrap();

        assert_eq!(solver.mode(), Mode::Idle);
        assert_eq!(cube.center_color(Face::Top), top);
        assert!(first_layer_done(&cube), "\n{cube}");
        assert_eq!(cube.color_counts(), [9; 6]);
    }
}

#[test_log::test]
fn scramble_then_solve() {
    let mut rng = fastrand::Rng::with_seed(99);
    let mut cube = Cube::new();
    let mut solver = Solver::new();

    let scramble = solver.scramble(30, &mut rng).unwrap().clone();
    assert_eq!(solver.mode(), Mode::Testing);

    // Playing a scramble never triggers the solver
    assert_eq!(solver.step_until_idle(&mut cube).unwrap(), scramble.len());
    assert_eq!(solver.mode(), Mode::Testing);
    assert!(solver.current_algorithm().is_empty());

    solver.solve(&cube).unwrap();
    solver.step_until_idle(&mut cube).unwrap();
    assert!(first_layer_done(&cube));
}

#[test_log::test]
fn reset_drops_the_algorithm_in_flight() {
    let cube = scrambled("F R");
    let mut solver = Solver::new();

    solver.solve(&cube).unwrap();
    assert!(!solver.current_algorithm().is_empty());

    solver.reset();
    assert_eq!(solver.mode(), Mode::Idle);
    assert!(solver.current_algorithm().is_empty());

    // A fresh solve is accepted again
    solver.solve(&cube).unwrap();
}

#[test_log::test]
fn turning_the_whole_cube_behind_the_solvers_back_aborts() {
    let mut cube = scrambled("R U F");
    let mut solver = Solver::new();

    solver.solve(&cube).unwrap();
    assert!(matches!(solver.mode(), Mode::Solving(_)));

    // The top color is no longer on top, so its pieces cannot be placed
    cube.apply_algorithm(&"x".parse().unwrap()).unwrap();
    let err = solver.on_algorithm_applied(&cube).unwrap_err();

    assert!(matches!(err, SolverError::PieceNotFound { .. }), "{err}");
    assert_eq!(solver.mode(), Mode::Idle);
    assert!(solver.current_algorithm().is_empty());
    let message = solver.messages().back().cloned().unwrap();
    assert_eq!(message, format!("Aborted: {err}"));
    assert!(message.starts_with("Aborted: Could not find the piece colored"));

    // Nothing is handed out after an abort, and a new solve is accepted
    solver.on_algorithm_applied(&cube).unwrap();
    assert!(solver.current_algorithm().is_empty());
    solver.solve(&cube).unwrap();
}
