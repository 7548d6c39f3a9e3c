use crate::geometry::{Axis, Direction};
use std::{fmt, ops::Range};

/// Turn `count` consecutive layers along `axis`, starting at layer `start`.
///
/// Directions are always as seen from the positive end of the axis, so `L`
/// (the first x layer turned clockwise as seen from the left) is stored as a
/// counter-clockwise turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub axis: Axis,
    pub direction: Direction,
    pub start: usize,
    pub count: usize,
}

impl Move {
    #[must_use]
    pub const fn new(axis: Axis, direction: Direction, start: usize, count: usize) -> Move {
        Move {
            axis,
            direction,
            start,
            count,
        }
    }

    /// A turn of one layer.
    #[must_use]
    pub const fn single(axis: Axis, direction: Direction, layer: usize) -> Move {
        Move::new(axis, direction, layer, 1)
    }

    /// A turn of every layer of an axis of the given size.
    #[must_use]
    pub const fn whole(axis: Axis, direction: Direction, size: usize) -> Move {
        Move::new(axis, direction, 0, size)
    }

    #[must_use]
    pub const fn inverse(self) -> Move {
        Move {
            direction: self.direction.inverse(),
            ..self
        }
    }

    #[must_use]
    pub fn layers(&self) -> Range<usize> {
        self.start..self.start + self.count
    }

    /// Face-turn notation for this move on a cube of the given dimensions.
    #[must_use]
    pub fn notation(&self, dims: [usize; 3]) -> String {
        let size = dims[self.axis.index()];
        let (upper, lower) = letters(self.axis);
        let forward = suffix(self.direction);
        let mirrored = suffix(self.direction.inverse());

        if self.start == 0 && self.count == size {
            return format!("{lower}{forward}");
        }
        if self.count == 1 {
            if self.start + 1 == size {
                return format!("{}{forward}", upper[0]);
            }
            if self.start == 0 {
                return format!("{}{mirrored}", upper[1]);
            }
            if size % 2 == 1 && self.start == size / 2 {
                // S follows F, while M and E follow L and D
                return if self.axis == Axis::Z {
                    format!("{}{forward}", upper[2])
                } else {
                    format!("{}{mirrored}", upper[2])
                };
            }
        }
        self.to_string()
    }
}

/// `([last, first, middle], whole)` letters for an axis.
fn letters(axis: Axis) -> ([char; 3], char) {
    match axis {
        Axis::X => (['R', 'L', 'M'], 'x'),
        Axis::Y => (['U', 'D', 'E'], 'y'),
        Axis::Z => (['F', 'B', 'S'], 'z'),
    }
}

fn suffix(direction: Direction) -> &'static str {
    match direction {
        Direction::Clockwise => "",
        Direction::CounterClockwise => "'",
        Direction::Half => "2",
    }
}

impl fmt::Display for Move {
    /// Size-independent form: `X[start..end]` with the usual suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}..{}]{}",
            self.axis,
            self.start,
            self.start + self.count,
            suffix(self.direction)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn notation_names_outer_and_middle_layers() {
        let dims = [3, 3, 3];
        let cw = Direction::Clockwise;
        let ccw = Direction::CounterClockwise;
        assert_eq!(Move::single(Axis::X, cw, 2).notation(dims), "R");
        assert_eq!(Move::single(Axis::X, ccw, 0).notation(dims), "L");
        assert_eq!(Move::single(Axis::Y, cw, 0).notation(dims), "D'");
        assert_eq!(Move::single(Axis::Z, Direction::Half, 0).notation(dims), "B2");
        assert_eq!(Move::single(Axis::X, ccw, 1).notation(dims), "M");
        assert_eq!(Move::single(Axis::Z, cw, 1).notation(dims), "S");
        assert_eq!(Move::whole(Axis::Y, ccw, 3).notation(dims), "y'");
    }

    #[test_log::test]
    fn inner_blocks_fall_back_to_ranges() {
        let mv = Move::new(Axis::Y, Direction::CounterClockwise, 1, 2);
        assert_eq!(mv.notation([4, 4, 4]), "Y[1..3]'");
        assert_eq!(mv.layers(), 1..3);
    }

    #[test_log::test]
    fn inverse_flips_direction_only() {
        let mv = Move::new(Axis::Z, Direction::Clockwise, 1, 2);
        assert_eq!(mv.inverse(), Move::new(Axis::Z, Direction::CounterClockwise, 1, 2));
        assert_eq!(mv.inverse().inverse(), mv);
        let half = Move::single(Axis::X, Direction::Half, 0);
        assert_eq!(half.inverse(), half);
    }
}
