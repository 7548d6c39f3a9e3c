use cuboid_core::{Algorithm, Axis, Color, Cube, Direction, Face, Move, new_cube};
use itertools::Itertools;

const SHAPES: [[usize; 3]; 10] = [
    [3, 3, 3],
    [2, 2, 2],
    [4, 4, 4],
    [5, 5, 5],
    [2, 3, 4],
    [1, 3, 3],
    [3, 1, 3],
    [3, 3, 1],
    [4, 1, 2],
    [1, 1, 1],
];

const DIRECTIONS: [Direction; 3] = [
    Direction::Clockwise,
    Direction::CounterClockwise,
    Direction::Half,
];

fn colors(cube: &Cube) -> Vec<Color> {
    cube.squares().iter().map(|square| square.color()).collect()
}

fn histogram(cube: &Cube) -> Vec<(Color, usize)> {
    colors(cube).into_iter().counts().into_iter().sorted().collect()
}

/// Every legal move on a cube of the given shape.
fn all_moves(dims: [usize; 3]) -> Vec<Move> {
    let mut moves = vec![];
    for axis in Axis::ALL {
        let size = dims[axis.index()];
        for start in 0..size {
            for count in 1..=size - start {
                for direction in DIRECTIONS {
                    moves.push(Move::new(axis, direction, start, count));
                }
            }
        }
    }
    moves
}

/// Paint every sticker a distinct color so that any misplaced sticker shows.
fn painted(dims: [usize; 3]) -> Cube {
    let mut cube = Cube::new(dims).unwrap();
    let mut next = 0_u8;
    for face in Face::ALL {
        let (rows, cols) = face.shape(dims);
        for (row, col) in (0..rows).cartesian_product(0..cols) {
            cube.set_square_color(face, row, col, Color(next)).unwrap();
            next = next.wrapping_add(1);
        }
    }
    cube
}

#[test_log::test]
fn test_front_quarter_four_times() {
    let mut cube = new_cube(3, 3, 3).unwrap();
    let mv = Move::single(Axis::Z, Direction::Clockwise, 2);
    for i in 0..4 {
        assert_eq!(cube.is_solved(), i == 0);
        cube.apply(&mv).unwrap();
    }
    assert!(cube.is_solved());
}

#[test_log::test]
fn test_permutation_closure() {
    for dims in SHAPES {
        let mut cube = painted(dims);
        let before = histogram(&cube);
        for mv in all_moves(dims) {
            cube.apply(&mv).unwrap();
            assert_eq!(histogram(&cube), before, "{dims:?} {mv}");
        }
    }
}

#[test_log::test]
fn test_inverse_law() {
    for dims in SHAPES {
        let mut cube = painted(dims);
        // Start from a mixed state so both solved and unsolved layouts are hit
        for mv in all_moves(dims).into_iter().step_by(5) {
            cube.apply(&mv).unwrap();
        }
        for mv in all_moves(dims) {
            let before = cube.clone();
            cube.apply(&mv).unwrap();
            cube.apply(&mv.inverse()).unwrap();
            assert_eq!(cube, before, "{dims:?} {mv}");
        }
    }
}

#[test_log::test]
fn test_full_rotations_are_identity() {
    for dims in SHAPES {
        let mut cube = painted(dims);
        for axis in Axis::ALL {
            let (direction, times) = if cube.is_symmetric(axis) {
                (Direction::Clockwise, 4)
            } else {
                (Direction::Half, 2)
            };
            for layer in 0..cube.size(axis) {
                let before = colors(&cube);
                for _ in 0..times {
                    cube.rotate_layer(axis, direction, layer).unwrap();
                }
                assert_eq!(colors(&cube), before, "{dims:?} {axis} layer {layer}");
            }
        }
    }
}

#[test_log::test]
fn test_whole_cube_reorientation_round_trip() {
    for dims in [[2, 3, 4], [1, 2, 3], [4, 1, 2]] {
        for axis in Axis::ALL {
            let mut cube = painted(dims);
            let before = cube.clone();
            let size = cube.size(axis);
            cube.apply(&Move::whole(axis, Direction::Clockwise, size)).unwrap();
            cube.apply(&Move::whole(axis, Direction::Clockwise, size)).unwrap();
            cube.apply(&Move::whole(axis, Direction::Half, size)).unwrap();
            assert_eq!(cube, before, "{dims:?} about {axis}");
        }
    }
}

#[test_log::test]
fn test_degenerate_axes_turn_both_faces() {
    for axis in Axis::ALL {
        let mut dims = [3, 3, 3];
        dims[axis.index()] = 1;
        let mut cube = painted(dims);
        let positive = Face::from_axis(axis, true);
        let negative = Face::from_axis(axis, false);
        let before_positive = cube.face_colors(positive);
        let before_negative = cube.face_colors(negative);

        cube.rotate_layer(axis, Direction::Clockwise, 0).unwrap();
        assert_ne!(cube.face_colors(positive), before_positive, "{axis}");
        assert_ne!(cube.face_colors(negative), before_negative, "{axis}");

        // The center of each face stays put
        assert_eq!(cube.reference_color(positive), before_positive[4]);
        assert_eq!(cube.reference_color(negative), before_negative[4]);

        cube.rotate_layer(axis, Direction::CounterClockwise, 0).unwrap();
        assert_eq!(cube.face_colors(positive), before_positive);
        assert_eq!(cube.face_colors(negative), before_negative);
    }
}

#[test_log::test]
fn test_flat_cube_pieces() {
    let cube = Cube::new([3, 1, 3]).unwrap();
    // Every cubie shows on top and bottom; border cubies also on the sides
    assert_eq!(cube.pieces().len(), 9);
    let corner = cube
        .pieces()
        .iter()
        .find(|piece| piece.cubie() == [0, 0, 0])
        .unwrap();
    assert_eq!(corner.squares().len(), 4);
}

#[test_log::test]
fn test_sexy_move_has_order_six() {
    let mut cube = Cube::cube3();
    let alg = Algorithm::parse("R U R' U'", cube.dims()).unwrap();
    for i in 1..=6 {
        for mv in alg.moves() {
            cube.apply(mv).unwrap();
        }
        assert_eq!(cube.is_solved(), i == 6);
    }
}

#[test_log::test]
fn test_slice_moves_carry_centers() {
    let mut cube = Cube::cube3();
    let alg = Algorithm::parse("M", cube.dims()).unwrap();
    cube.apply(&alg.moves()[0]).unwrap();
    // M follows L: the top center moves to the front
    assert_eq!(cube.reference_color(Face::Front), Color::WHITE);
    assert_eq!(cube.reference_color(Face::Bottom), Color::GREEN);
    assert!(!cube.is_solved());
}
