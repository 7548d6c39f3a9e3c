//! Canonical fixes for each case the planner recognizes.
//!
//! Templates are written for the front side; [`algorithm`] relabels them for
//! any other side by turning the side letters, leaving `U` and `D` alone.

use crate::algorithm::Algorithm;
use itertools::Itertools;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum Case {
    /// A cross edge sits in the top layer, anywhere but solved.
    CrossEdgeOnTop,
    /// A cross edge sits in the middle slot to the right of the front.
    CrossEdgeInMiddle,
    /// A cross edge under its slot with the cross color facing down.
    CrossEdgeFacingDown,
    /// A cross edge under its slot with the cross color on the side.
    CrossEdgeFacingSide,
    /// A first-layer corner in its slot, twisted; also lifts one from below.
    CornerInsert,
    /// A first-layer corner stuck in the wrong top slot.
    CornerKickOut,
    FlipCube,
    InsertRight,
    InsertLeft,
    OrientCross,
    SwapEdges,
    CycleCorners,
    TwistCorner,
}

impl Case {
    pub(super) const fn template(self) -> &'static str {
        match self {
            Case::CrossEdgeOnTop | Case::CrossEdgeFacingDown => "F2",
            Case::CrossEdgeInMiddle => "R' D R",
            Case::CrossEdgeFacingSide => "D R F' R'",
            Case::CornerInsert => "R' D' R D",
            Case::CornerKickOut => "R' D' R",
            Case::FlipCube => "z2",
            Case::InsertRight => "U R U' R' U' F' U F",
            Case::InsertLeft => "U' L' U L U F U' F'",
            Case::OrientCross => "F R U R' U' F'",
            Case::SwapEdges => "R U R' U R U2 R' U",
            Case::CycleCorners => "U R U' L' U R' U' L",
            Case::TwistCorner => "R' D' R D R' D' R D",
        }
    }
}

const SIDES: [char; 4] = ['F', 'R', 'B', 'L'];

/// A template with the front relabeled to `side`.
pub(super) fn relabel(case: Case, side: usize) -> String {
    case.template()
        .chars()
        .map(|c| match SIDES.iter().position(|&s| s == c) {
            Some(i) => SIDES[(i + side) % 4],
            None => c,
        })
        .collect()
}

/// `n` quarter turns of a layer, taking the short way round.
pub(super) fn turns(letter: char, n: usize) -> String {
    match n % 4 {
        0 => String::new(),
        1 => letter.to_string(),
        2 => format!("{letter}2"),
        _ => format!("{letter}'"),
    }
}

/// Join notation fragments into one algorithm for the 3x3x3.
pub(super) fn algorithm<S: AsRef<str>>(parts: &[S]) -> Algorithm {
    let text = parts.iter().map(AsRef::as_ref).join(" ");
    Algorithm::parse(&text, [3; 3]).unwrap_or_else(|e| panic!("bad solver table entry `{text}`: {e}"))
}
