use rubik_core::{
    Algorithm, Axis, Color, Cube, CubeError, Direction, Face, INNER, MIDDLE, OUTER, Rotation,
    SIZE, geometry::grid,
};

fn center_faces(cube: &Cube) -> Vec<Face> {
    Color::ALL
        .into_iter()
        .map(|color| cube.home_face_of(color).unwrap())
        .collect()
}

#[test_log::test]
fn color_counts_survive_random_sequences() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);

    for _ in 0..50 {
        let mut cube = Cube::new();
        cube.apply_algorithm(&Algorithm::random(40, &mut rng))
            .unwrap();
        assert_eq!(cube.color_counts(), [9; 6]);
    }
}

#[test_log::test]
fn inverse_restores_the_exact_state() {
    let mut rng = fastrand::Rng::with_seed(42);

    for _ in 0..50 {
        let mut cube = Cube::new();
        cube.apply_algorithm(&Algorithm::random(10, &mut rng))
            .unwrap();
        let before = cube.clone();

        let algorithm = Algorithm::random(30, &mut rng);
        cube.apply_algorithm(&algorithm).unwrap();
        cube.apply_algorithm(&algorithm.inverse()).unwrap();

        assert_eq!(cube, before);
    }
}

#[test_log::test]
fn four_quarter_turns_are_identity() {
    let mut rng = fastrand::Rng::with_seed(3);
    let mut cube = Cube::new();
    cube.apply_algorithm(&Algorithm::random(20, &mut rng))
        .unwrap();
    let before = cube.clone();

    for axis in Axis::ALL {
        for direction in Direction::ALL {
            for depth in 0..SIZE {
                for _ in 0..4 {
                    cube.apply(Rotation::new(axis, direction, depth)).unwrap();
                }
                assert_eq!(cube, before, "{axis} {direction} layer {depth}");
            }

            let mut whole = Algorithm::new();
            whole.add_whole_cube(axis, direction);
            for _ in 0..4 {
                cube.apply_algorithm(&whole).unwrap();
            }
            assert_eq!(cube, before, "whole cube {axis} {direction}");
        }
    }
}

#[test_log::test]
fn outer_turns_leave_centers_in_place() {
    let mut rng = fastrand::Rng::with_seed(11);
    let mut cube = Cube::new();
    let solved_centers = center_faces(&cube);

    for _ in 0..200 {
        let rotation = Rotation::new(
            Axis::ALL[rng.usize(..3)],
            Direction::ALL[rng.usize(..2)],
            if rng.bool() { INNER } else { OUTER },
        );
        cube.apply(rotation).unwrap();
        assert_eq!(center_faces(&cube), solved_centers);
    }
}

#[test_log::test]
fn whole_cube_rotation_keeps_one_center_per_face() {
    let mut cube = Cube::new();
    let mut algorithm = Algorithm::new();
    algorithm.add_whole_cube(Axis::Y, Direction::Clockwise);
    cube.apply_algorithm(&algorithm).unwrap();

    assert_eq!(cube.center_color(Face::Right), Color::Green);
    assert_eq!(cube.center_color(Face::Top), Color::White);
    assert!(cube.is_solved());

    let mut faces = center_faces(&cube);
    faces.sort();
    assert_eq!(faces, Face::ALL.to_vec());
}

#[test_log::test]
fn middle_slice_follows_the_left_face() {
    let mut cube = Cube::new();
    cube.apply_algorithm(&"M".parse().unwrap()).unwrap();

    // M turns like L, carrying the top middle column onto the front
    assert_eq!(cube.color_at(Face::Front, grid::N), Color::White);
    assert_eq!(cube.center_color(Face::Front), Color::White);
    assert_eq!(cube.color_at(Face::Front, grid::NW), Color::Green);
    assert_eq!(cube.slice_piece(Axis::X, MIDDLE, grid::CENTER), None);
}

#[test_log::test]
fn sexy_move_has_order_six() {
    let mut cube = Cube::new();
    let algorithm: Algorithm = "R U R' U'".parse().unwrap();

    for i in 1..=6 {
        cube.apply_algorithm(&algorithm).unwrap();
        assert_eq!(cube.is_solved(), i == 6);
    }
}

#[test_log::test]
fn invalid_depth_stops_an_algorithm() {
    let mut cube = Cube::new();
    let mut algorithm = Algorithm::new();
    algorithm
        .add_turn(Axis::X, Direction::Clockwise, SIZE + 1)
        .add_turn(Axis::Y, Direction::Clockwise, OUTER);

    assert_eq!(
        cube.apply_algorithm(&algorithm),
        Err(CubeError::InvalidMove {
            axis: Axis::X,
            depth: SIZE + 1
        })
    );
    assert!(cube.is_solved());
}
