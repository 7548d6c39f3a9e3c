//! Read-only slot queries on a 3x3x3.
//!
//! Sides are numbered like the side faces, `0..4` for front, right, back and
//! left, so that turning the top layer clockwise carries slot `s` to `s - 1`
//! and turning the bottom layer clockwise carries it to `s + 1`. Corner slot
//! `s` sits between sides `s` and `s + 1`.

use crate::{
    cube::{Color, Cube},
    geometry::Face,
};

pub(super) const TOP: usize = 2;
pub(super) const BOTTOM: usize = 0;

/// Outward `(dx, dz)` of each side.
const OFFSETS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub(super) fn side_face(side: usize) -> Face {
    Face::ALL[side % 4]
}

fn cubie(dx: isize, y: usize, dz: isize) -> [usize; 3] {
    [1_usize.wrapping_add_signed(dx), y, 1_usize.wrapping_add_signed(dz)]
}

fn vertical_face(y: usize) -> Face {
    if y == TOP { Face::Top } else { Face::Bottom }
}

pub(super) struct View<'a> {
    cube: &'a Cube,
}

impl<'a> View<'a> {
    pub(super) fn new(cube: &'a Cube) -> View<'a> {
        View { cube }
    }

    fn sticker(&self, face: Face, cubie: [usize; 3]) -> Color {
        self.cube
            .sticker(face, cubie)
            .unwrap_or_else(|| panic!("cubie {cubie:?} shows no sticker on the {face} face"))
    }

    pub(super) fn center(&self, face: Face) -> Color {
        self.cube.reference_color(face)
    }

    pub(super) fn side_color(&self, side: usize) -> Color {
        self.center(side_face(side))
    }

    pub(super) fn side_of_color(&self, color: Color) -> Option<usize> {
        (0..4).find(|&side| self.side_color(side) == color)
    }

    /// `(side sticker, vertical sticker)` of the top or bottom edge at `side`.
    pub(super) fn edge(&self, side: usize, y: usize) -> (Color, Color) {
        let (dx, dz) = OFFSETS[side % 4];
        let cubie = cubie(dx, y, dz);
        (
            self.sticker(side_face(side), cubie),
            self.sticker(vertical_face(y), cubie),
        )
    }

    /// Stickers of the middle edge between sides `s` and `s + 1`, in that
    /// order.
    pub(super) fn middle_edge(&self, side: usize) -> (Color, Color) {
        let (ax, az) = OFFSETS[side % 4];
        let (bx, bz) = OFFSETS[(side + 1) % 4];
        let cubie = cubie(ax + bx, 1, az + bz);
        (
            self.sticker(side_face(side), cubie),
            self.sticker(side_face(side + 1), cubie),
        )
    }

    /// `[vertical, side s, side s + 1]` stickers of a top or bottom corner.
    pub(super) fn corner(&self, slot: usize, y: usize) -> [Color; 3] {
        let (ax, az) = OFFSETS[slot % 4];
        let (bx, bz) = OFFSETS[(slot + 1) % 4];
        let cubie = cubie(ax + bx, y, az + bz);
        [
            self.sticker(vertical_face(y), cubie),
            self.sticker(side_face(slot), cubie),
            self.sticker(side_face(slot + 1), cubie),
        ]
    }
}

/// Whether two stickers show the same pair of colors, in any order.
pub(super) fn same_pair(a: (Color, Color), b: (Color, Color)) -> bool {
    a == b || a == (b.1, b.0)
}

/// Whether two corners carry the same three colors, in any order.
pub(super) fn same_corner(a: [Color; 3], b: [Color; 3]) -> bool {
    let mut a = a;
    let mut b = b;
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn solved_slots() {
        let cube = Cube::cube3();
        let view = View::new(&cube);
        assert_eq!(view.edge(0, TOP), (Color::GREEN, Color::WHITE));
        assert_eq!(view.edge(3, BOTTOM), (Color::ORANGE, Color::YELLOW));
        assert_eq!(view.middle_edge(1), (Color::RED, Color::BLUE));
        assert_eq!(view.corner(3, TOP), [Color::WHITE, Color::ORANGE, Color::GREEN]);
        assert_eq!(view.side_of_color(Color::BLUE), Some(2));
        assert_eq!(view.side_of_color(Color::WHITE), None);
    }

    #[test_log::test]
    fn pair_and_corner_matching_ignore_order() {
        assert!(same_pair((Color(1), Color(2)), (Color(2), Color(1))));
        assert!(!same_pair((Color(1), Color(2)), (Color(1), Color(3))));
        assert!(same_corner(
            [Color(1), Color(2), Color(3)],
            [Color(3), Color(1), Color(2)]
        ));
    }
}
