//! Move sequences with a read cursor, and the face-turn notation parser.

use crate::{
    geometry::{Axis, Direction},
    moves::Move,
};
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown move `{0}`")]
    UnknownMove(String),
    #[error("`{token}` needs an odd number of layers along {axis}, but there are {size}")]
    NoMiddleLayer {
        token: String,
        axis: Axis,
        size: usize,
    },
    #[error("The algorithm is empty")]
    Empty,
}

/// An ordered, replayable sequence of moves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Algorithm {
    moves: Vec<Move>,
    cursor: usize,
}

impl Algorithm {
    #[must_use]
    pub fn new(moves: Vec<Move>) -> Algorithm {
        Algorithm { moves, cursor: 0 }
    }

    /// Parse whitespace separated face-turn notation for a cube of the given
    /// dimensions.
    ///
    /// `R U F` turn the last layer of x, y and z, `L D B` the first layer,
    /// `M E S` the middle layer of an odd axis, and `x y z` the whole cube.
    /// Each may be followed by `'`, `2` or `2'`.
    ///
    /// # Errors
    ///
    /// If a token is not a move, a middle layer is asked of an even axis, or
    /// the text has no moves at all.
    pub fn parse(text: &str, dims: [usize; 3]) -> Result<Algorithm, ParseError> {
        let moves = text
            .split_whitespace()
            .map(|token| parse_move(token, dims))
            .collect::<Result<Vec<_>, _>>()?;
        if moves.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(Algorithm::new(moves))
    }

    /// The next move, or `None` once every move has been handed out.
    pub fn next_move(&mut self) -> Option<Move> {
        let mv = *self.moves.get(self.cursor)?;
        self.cursor += 1;
        Some(mv)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.cursor >= self.moves.len()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The moves that undo this algorithm, with a fresh cursor.
    #[must_use]
    pub fn inverse(&self) -> Algorithm {
        self.moves.iter().rev().map(|mv| mv.inverse()).collect()
    }

    /// Render in face-turn notation for a cube of the given dimensions.
    #[must_use]
    pub fn notation(&self, dims: [usize; 3]) -> String {
        self.moves.iter().map(|mv| mv.notation(dims)).join(" ")
    }
}

impl FromIterator<Move> for Algorithm {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        Algorithm::new(iter.into_iter().collect())
    }
}

impl Extend<Move> for Algorithm {
    fn extend<T: IntoIterator<Item = Move>>(&mut self, iter: T) {
        self.moves.extend(iter);
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves.iter().join(" "))
    }
}

fn parse_move(token: &str, dims: [usize; 3]) -> Result<Move, ParseError> {
    let unknown = || ParseError::UnknownMove(token.to_owned());
    let mut chars = token.chars();
    let letter = chars.next().ok_or_else(unknown)?;
    let direction = match chars.as_str() {
        "" => Direction::Clockwise,
        "'" => Direction::CounterClockwise,
        "2" | "2'" => Direction::Half,
        _ => return Err(unknown()),
    };

    let (axis, which) = match letter {
        'R' => (Axis::X, Span::Last),
        'L' => (Axis::X, Span::First),
        'M' => (Axis::X, Span::Middle { mirrored: true }),
        'x' => (Axis::X, Span::Whole),
        'U' => (Axis::Y, Span::Last),
        'D' => (Axis::Y, Span::First),
        'E' => (Axis::Y, Span::Middle { mirrored: true }),
        'y' => (Axis::Y, Span::Whole),
        'F' => (Axis::Z, Span::Last),
        'B' => (Axis::Z, Span::First),
        'S' => (Axis::Z, Span::Middle { mirrored: false }),
        'z' => (Axis::Z, Span::Whole),
        _ => return Err(unknown()),
    };

    let size = dims[axis.index()];
    let mv = match which {
        Span::Last => Move::single(axis, direction, size - 1),
        Span::First => Move::single(axis, direction.inverse(), 0),
        Span::Whole => Move::whole(axis, direction, size),
        Span::Middle { mirrored } => {
            if size % 2 == 0 {
                return Err(ParseError::NoMiddleLayer {
                    token: token.to_owned(),
                    axis,
                    size,
                });
            }
            let direction = if mirrored { direction.inverse() } else { direction };
            Move::single(axis, direction, size / 2)
        }
    };
    Ok(mv)
}

enum Span {
    Last,
    First,
    Middle { mirrored: bool },
    Whole,
}
