//! Axes, faces, turn directions, and the sticker coordinate model.
//!
//! Every square is addressed in two ways. Storage uses `(face, row, col)`,
//! row-major, where each face is laid out as seen from outside the cube with
//! rows running top to bottom. Geometry uses doubled, center-relative integer
//! points: the cubie at `c` along an axis of size `n` sits at `2c - (n - 1)`,
//! and a sticker is pushed one more unit along its face normal so that it lies
//! on the surface at `±n`. Rotations act on these points exactly, which is what
//! strips, reorientation and piece grouping are derived from.

#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `x` axis runs left to right, `y` bottom to top, and `z` back to front.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The four faces around this axis, in the order a clockwise turn (looking
    /// from the positive end of the axis) carries stickers through them.
    #[must_use]
    pub const fn side_faces(self) -> [Face; 4] {
        match self {
            Axis::X => [Face::Top, Face::Back, Face::Bottom, Face::Front],
            Axis::Y => [Face::Front, Face::Left, Face::Back, Face::Right],
            Axis::Z => [Face::Top, Face::Right, Face::Bottom, Face::Left],
        }
    }

    /// The two axes orthogonal to this one.
    #[must_use]
    pub const fn orthogonal(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// The six faces with their fixed indices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    Front,
    Right,
    Back,
    Left,
    Top,
    Bottom,
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

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The axis this face is perpendicular to.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Face::Right | Face::Left => Axis::X,
            Face::Top | Face::Bottom => Axis::Y,
            Face::Front | Face::Back => Axis::Z,
        }
    }

    /// Whether the outward normal points along the positive axis.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Face::Right | Face::Top | Face::Front)
    }

    #[must_use]
    pub const fn from_axis(axis: Axis, positive: bool) -> Face {
        match (axis, positive) {
            (Axis::X, true) => Face::Right,
            (Axis::X, false) => Face::Left,
            (Axis::Y, true) => Face::Top,
            (Axis::Y, false) => Face::Bottom,
            (Axis::Z, true) => Face::Front,
            (Axis::Z, false) => Face::Back,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Face {
        Face::from_axis(self.axis(), !self.is_positive())
    }

    /// `(rows, cols)` of this face on a cube with the given dimensions.
    #[must_use]
    pub const fn shape(self, dims: [usize; 3]) -> (usize, usize) {
        let [x, y, z] = dims;
        match self {
            Face::Front | Face::Back => (y, x),
            Face::Right | Face::Left => (y, z),
            Face::Top | Face::Bottom => (z, x),
        }
    }

    /// The cubie behind the square at `(row, col)`.
    #[must_use]
    pub const fn cubie(self, dims: [usize; 3], row: usize, col: usize) -> [usize; 3] {
        let [x, y, z] = dims;
        match self {
            Face::Front => [col, y - 1 - row, z - 1],
            Face::Right => [x - 1, y - 1 - row, z - 1 - col],
            Face::Back => [x - 1 - col, y - 1 - row, 0],
            Face::Left => [0, y - 1 - row, col],
            Face::Top => [col, y - 1, row],
            Face::Bottom => [col, 0, z - 1 - row],
        }
    }

    /// Inverse of [`Face::cubie`]: where the cubie shows on this face, if it
    /// shows on it at all.
    #[must_use]
    pub fn position(self, dims: [usize; 3], cubie: [usize; 3]) -> Option<(usize, usize)> {
        let [x, y, z] = dims;
        let [cx, cy, cz] = cubie;
        if cx >= x || cy >= y || cz >= z {
            return None;
        }
        match self {
            Face::Front => (cz == z - 1).then_some((y - 1 - cy, cx)),
            Face::Right => (cx == x - 1).then_some((y - 1 - cy, z - 1 - cz)),
            Face::Back => (cz == 0).then_some((y - 1 - cy, x - 1 - cx)),
            Face::Left => (cx == 0).then_some((y - 1 - cy, cz)),
            Face::Top => (cy == y - 1).then_some((cz, cx)),
            Face::Bottom => (cy == 0).then_some((z - 1 - cz, cx)),
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Right => 'R',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Top => 'U',
            Face::Bottom => 'D',
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Face::Front => "front",
            Face::Right => "right",
            Face::Back => "back",
            Face::Left => "left",
            Face::Top => "top",
            Face::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Turn direction, as seen looking at the cube from the positive end of the
/// turning axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Direction {
    #[must_use]
    pub const fn inverse(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
            Direction::Half => Direction::Half,
        }
    }

    /// Number of clockwise quarter turns this direction amounts to.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Direction::Clockwise => 1,
            Direction::Half => 2,
            Direction::CounterClockwise => 3,
        }
    }
}

/// A doubled, center-relative sticker coordinate.
pub(crate) type Point = [i64; 3];

/// The surface point of the square at `(row, col)` on `face`.
pub(crate) fn sticker_point(face: Face, dims: [usize; 3], row: usize, col: usize) -> Point {
    let cubie = face.cubie(dims, row, col);
    let mut point = [0; 3];
    for k in 0..3 {
        point[k] = 2 * cubie[k] as i64 - (dims[k] as i64 - 1);
    }
    let normal = face.axis().index();
    point[normal] = if face.is_positive() {
        dims[normal] as i64
    } else {
        -(dims[normal] as i64)
    };
    point
}

/// The square whose surface point is `point`, if the point lies on the
/// surface of a cube with the given dimensions.
pub(crate) fn locate(dims: [usize; 3], point: Point) -> Option<(Face, usize, usize)> {
    let normal = (0..3).find(|&k| point[k].abs() == dims[k] as i64)?;
    let positive = point[normal] > 0;
    let mut cubie = [0; 3];
    for k in 0..3 {
        cubie[k] = if k == normal {
            if positive { dims[k] - 1 } else { 0 }
        } else {
            let doubled = point[k] + dims[k] as i64 - 1;
            if doubled < 0 || doubled % 2 != 0 {
                return None;
            }
            (doubled / 2) as usize
        };
    }
    let face = Face::from_axis(Axis::ALL[normal], positive);
    let (row, col) = face.position(dims, cubie)?;
    Some((face, row, col))
}

/// Rotate a point clockwise about `axis` (looking from its positive end) by
/// the given number of quarter turns.
pub(crate) fn rotate_point(axis: Axis, point: Point, quarter_turns: u8) -> Point {
    let mut p = point;
    for _ in 0..quarter_turns % 4 {
        let [x, y, z] = p;
        p = match axis {
            Axis::X => [x, z, -y],
            Axis::Y => [-z, y, x],
            Axis::Z => [y, -x, z],
        };
    }
    p
}

/// Dimensions of the cube after rotating it as a whole about `axis`.
pub(crate) fn rotated_dims(dims: [usize; 3], axis: Axis, quarter_turns: u8) -> [usize; 3] {
    if quarter_turns % 2 == 0 {
        return dims;
    }
    let [x, y, z] = dims;
    match axis {
        Axis::X => [x, z, y],
        Axis::Y => [z, y, x],
        Axis::Z => [y, x, z],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: [[usize; 3]; 5] = [[3, 3, 3], [2, 3, 4], [1, 3, 3], [4, 1, 2], [1, 1, 1]];

    #[test_log::test]
    fn locate_inverts_sticker_point() {
        for dims in DIMS {
            for face in Face::ALL {
                let (rows, cols) = face.shape(dims);
                for row in 0..rows {
                    for col in 0..cols {
                        let point = sticker_point(face, dims, row, col);
                        assert_eq!(locate(dims, point), Some((face, row, col)));
                    }
                }
            }
        }
    }

    #[test_log::test]
    fn side_faces_follow_rotation_of_normals() {
        for axis in Axis::ALL {
            let sides = axis.side_faces();
            for (i, face) in sides.iter().enumerate() {
                let mut normal = [0; 3];
                normal[face.axis().index()] = if face.is_positive() { 1 } else { -1 };
                let rotated = rotate_point(axis, normal, 1);
                let k = (0..3).find(|&k| rotated[k] != 0).unwrap();
                let next = Face::from_axis(Axis::ALL[k], rotated[k] > 0);
                assert_eq!(next, sides[(i + 1) % 4]);
            }
        }
    }

    #[test_log::test]
    fn whole_rotation_keeps_stickers_on_the_surface() {
        for dims in DIMS {
            for axis in Axis::ALL {
                for quarter_turns in 1..4 {
                    let new_dims = rotated_dims(dims, axis, quarter_turns);
                    for face in Face::ALL {
                        let (rows, cols) = face.shape(dims);
                        for row in 0..rows {
                            for col in 0..cols {
                                let point = sticker_point(face, dims, row, col);
                                let rotated = rotate_point(axis, point, quarter_turns);
                                assert!(locate(new_dims, rotated).is_some());
                            }
                        }
                    }
                }
            }
        }
    }

    #[test_log::test]
    fn four_quarter_turns_are_identity() {
        let point = [3, -1, 5];
        for axis in Axis::ALL {
            assert_eq!(rotate_point(axis, point, 4), point);
            assert_eq!(
                rotate_point(axis, rotate_point(axis, point, 1), 3),
                point
            );
        }
    }
}
