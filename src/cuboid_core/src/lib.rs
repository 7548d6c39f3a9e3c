#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines, clippy::module_name_repetitions)]

//! The logical core of a cuboid twisty-puzzle simulator: a sticker-level cube
//! model supporting arbitrary `X×Y×Z` dimensions, a move player with undo and
//! scrambling, and a layer-by-layer planner for the 3x3x3.

pub mod algorithm;
pub mod config;
pub mod cube;
pub mod engine;
pub mod geometry;
pub mod listener;
pub mod moves;
pub mod solver;

pub use algorithm::{Algorithm, ParseError};
pub use config::EngineConfig;
pub use cube::{Color, Cube, CubeError, Layer, Piece, PieceKind, Square};
pub use engine::{CubeEngine, EngineError, EngineState, Mode, Step};
pub use geometry::{Axis, Direction, Face};
pub use listener::{CubeListener, LogListener, Notification};
pub use moves::Move;
pub use solver::{SolveError, Solver, Stage};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

/// Create a cube of the given dimensions in the solved layout.
///
/// # Errors
///
/// If any dimension is zero.
pub fn new_cube(size_x: usize, size_y: usize, size_z: usize) -> Result<Cube, CubeError> {
    Cube::new([size_x, size_y, size_z])
}

/// Create a solver driving a fresh 3x3x3 cube with the default configuration.
#[must_use]
pub fn new_3x3x3_solver() -> Solver {
    Solver::cube3(EngineConfig::default())
}
