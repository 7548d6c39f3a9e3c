//! A layer-by-layer planner for the 3x3x3.
//!
//! The planner builds a cross on the top face, fills in the top corners,
//! turns the cube over, inserts the middle edges, and then finishes the new
//! top layer: cross, cross alignment, corner placement and corner twisting.
//! Each stage inspects a handful of fixed slots, classifies the first one
//! that is wrong into a [`Case`](tables::Case) and plays that case's table
//! entry. A stage with nothing left to fix hands over to the next one without
//! moving the cube.

mod tables;
mod view;

use crate::{
    algorithm::Algorithm,
    config::EngineConfig,
    cube::{Color, Cube},
    engine::{CubeEngine, EngineState, Step},
    geometry::Face,
    start, success, working,
};
use log::{debug, info};
use tables::{Case, algorithm, relabel, turns};
use thiserror::Error;
use view::{BOTTOM, TOP, View, same_corner, same_pair};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("Solving is only supported for the 3x3x3, not {}x{}x{}", dims[0], dims[1], dims[2])]
    Unsupported { dims: [usize; 3] },
    #[error("Already solving")]
    AlreadySolving,
    #[error("The cube is busy")]
    Busy,
    #[error("Not solving")]
    NotSolving,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    None,
    FirstFaceCross,
    FirstFaceCorners,
    MiddleLayer,
    LastFaceCross,
    LastFaceCrossAlign,
    LastFaceCorners,
    LastFaceCornerAlign,
}

impl Stage {
    fn next(self) -> Stage {
        match self {
            Stage::None | Stage::LastFaceCornerAlign => Stage::None,
            Stage::FirstFaceCross => Stage::FirstFaceCorners,
            Stage::FirstFaceCorners => Stage::MiddleLayer,
            Stage::MiddleLayer => Stage::LastFaceCross,
            Stage::LastFaceCross => Stage::LastFaceCrossAlign,
            Stage::LastFaceCrossAlign => Stage::LastFaceCorners,
            Stage::LastFaceCorners => Stage::LastFaceCornerAlign,
        }
    }
}

/// Drives a [`CubeEngine`] through the stages of a solve, one algorithm at a
/// time.
pub struct Solver {
    engine: CubeEngine,
    stage: Stage,
    first_color: Color,
    last_color: Color,
    algorithms_emitted: usize,
}

impl Solver {
    /// A solver on a fresh 3x3x3.
    #[must_use]
    pub fn cube3(config: EngineConfig) -> Solver {
        Solver::with_engine(CubeEngine::new(Cube::cube3(), config))
    }

    #[must_use]
    pub fn with_engine(engine: CubeEngine) -> Solver {
        Solver {
            engine,
            stage: Stage::None,
            first_color: Color::WHITE,
            last_color: Color::YELLOW,
            algorithms_emitted: 0,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &CubeEngine {
        &self.engine
    }

    /// Manual commands go through the engine; its guards reject them while a
    /// solve is running.
    pub fn engine_mut(&mut self) -> &mut CubeEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn cube(&self) -> &Cube {
        self.engine.cube()
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        if self.is_solving() {
            self.stage
        } else {
            Stage::None
        }
    }

    /// A reset or cancel issued on the engine itself also ends the solve.
    #[must_use]
    pub fn is_solving(&self) -> bool {
        self.stage != Stage::None && self.engine.state() == EngineState::Solving
    }

    fn drop_stale_stage(&mut self) {
        if self.stage != Stage::None && !self.is_solving() {
            info!("Solve abandoned in {:?}", self.stage);
            self.stage = Stage::None;
        }
    }

    /// Start solving. Moves are produced as the engine is stepped.
    ///
    /// # Errors
    ///
    /// If the cube is not a 3x3x3, a solve is already running, or the engine
    /// is busy with something else.
    pub fn solve(&mut self) -> Result<(), SolveError> {
        self.drop_stale_stage();
        let dims = self.engine.cube().dims();
        if dims != [3; 3] {
            return Err(self.engine.reject(SolveError::Unsupported { dims }));
        }
        if self.engine.state() == EngineState::Solving {
            return Err(self.engine.reject(SolveError::AlreadySolving));
        }
        if self.engine.is_busy() || self.engine.state() != EngineState::Idle {
            return Err(self.engine.reject(SolveError::Busy));
        }

        let view = View::new(self.engine.cube());
        self.first_color = view.center(Face::Top);
        self.last_color = view.center(Face::Bottom);
        self.algorithms_emitted = 0;
        info!(start!("Solving"));

        self.engine.set_state(EngineState::Solving);
        self.stage = Stage::FirstFaceCross;
        self.advance();
        Ok(())
    }

    /// Stop after the in-flight move; the cube is left where it is.
    ///
    /// # Errors
    ///
    /// If no solve is running.
    pub fn cancel_solving(&mut self) -> Result<(), SolveError> {
        self.drop_stale_stage();
        if !self.is_solving() {
            return Err(self.engine.reject(SolveError::NotSolving));
        }
        info!("Solve cancelled in {:?}", self.stage);
        self.stage = Stage::None;
        self.engine.cancel();
        Ok(())
    }

    /// Reset the cube and abandon any solve.
    pub fn reset(&mut self) {
        self.stage = Stage::None;
        self.engine.reset();
    }

    /// One frame: complete the in-flight move and plan ahead when an
    /// algorithm has run out.
    pub fn step(&mut self) -> Step {
        let step = self.engine.step();
        self.drop_stale_stage();
        if step == Step::AlgorithmFinished && self.is_solving() {
            self.advance();
        }
        step
    }

    /// Solve to completion without yielding between frames.
    ///
    /// # Errors
    ///
    /// See [`Solver::solve`].
    pub fn solve_blocking(&mut self) -> Result<(), SolveError> {
        self.solve()?;
        while self.is_solving() || self.engine.is_busy() {
            self.step();
        }
        Ok(())
    }

    /// Run stage handlers until one of them has something to play. A solved
    /// cube ends the solve whatever stage it is in.
    fn advance(&mut self) {
        while self.is_solving() {
            if self.engine.cube().is_solved() {
                debug!(working!("Solved during {:?}"), self.stage);
                self.stage = Stage::None;
                self.finish();
                return;
            }
            let plan = match self.stage {
                Stage::None => None,
                Stage::FirstFaceCross => self.first_face_cross(),
                Stage::FirstFaceCorners => self.first_face_corners(),
                Stage::MiddleLayer => self.middle_layer(),
                Stage::LastFaceCross => self.last_face_cross(),
                Stage::LastFaceCrossAlign => self.last_face_cross_align(),
                Stage::LastFaceCorners => self.last_face_corners(),
                Stage::LastFaceCornerAlign => self.last_face_corner_align(),
            };
            match plan {
                Some(algorithm) => {
                    self.emit(algorithm);
                    return;
                }
                None => self.proceed_to_next_stage(),
            }
        }
    }

    fn proceed_to_next_stage(&mut self) {
        let next = self.stage.next();
        debug!(working!("{:?} done, entering {:?}"), self.stage, next);
        self.stage = next;
        if next == Stage::None {
            self.finish();
        }
    }

    fn finish(&mut self) {
        assert!(
            self.engine.cube().is_solved(),
            "every stage passed but the cube is not solved:\n{}",
            self.engine.cube()
        );
        self.engine.set_state(EngineState::Idle);
        info!(
            success!("Solved with {} algorithms, move count {}"),
            self.algorithms_emitted,
            self.engine.move_count()
        );
        self.engine.notify_solve_finished();
    }

    fn emit(&mut self, algorithm: Algorithm) {
        self.algorithms_emitted += 1;
        let limit = self.engine.config().max_solver_algorithms;
        assert!(
            self.algorithms_emitted <= limit,
            "{:?} emitted more than {limit} algorithms without solving the cube",
            self.stage
        );
        debug!(
            "{:?}: {}",
            self.stage,
            algorithm.notation(self.engine.cube().dims())
        );
        self.engine.queue_algorithm(algorithm);
    }

    fn view(&self) -> View<'_> {
        View::new(self.engine.cube())
    }

    fn side_of(&self, color: Color) -> usize {
        self.view().side_of_color(color).unwrap_or_else(|| {
            panic!(
                "{:?}: no side center is {color}:\n{}",
                self.stage,
                self.engine.cube()
            )
        })
    }

    /// Top edges matching the top color and their side center.
    fn first_face_cross(&self) -> Option<Algorithm> {
        let view = self.view();
        let first = self.first_color;

        for side in 0..4 {
            let target = (view.side_color(side), first);
            if view.edge(side, TOP) == target {
                continue;
            }

            if let Some(u) = (0..4).find(|&u| same_pair(view.edge(u, TOP), target)) {
                return Some(algorithm(&[relabel(Case::CrossEdgeOnTop, u)]));
            }
            if let Some(u) = (0..4).find(|&u| same_pair(view.middle_edge(u), target)) {
                return Some(algorithm(&[relabel(Case::CrossEdgeInMiddle, u)]));
            }
            if let Some(u) = (0..4).find(|&u| same_pair(view.edge(u, BOTTOM), target)) {
                let align = turns('D', (side + 4 - u) % 4);
                let case = if view.edge(u, BOTTOM).1 == first {
                    Case::CrossEdgeFacingDown
                } else {
                    Case::CrossEdgeFacingSide
                };
                return Some(algorithm(&[align, relabel(case, side)]));
            }
            panic!(
                "FirstFaceCross: edge {target:?} is nowhere on the cube:\n{}",
                self.engine.cube()
            );
        }
        None
    }

    /// Top corners between each pair of adjacent sides.
    fn first_face_corners(&self) -> Option<Algorithm> {
        let view = self.view();
        let first = self.first_color;

        for slot in 0..4 {
            let target = [first, view.side_color(slot), view.side_color(slot + 1)];
            if view.corner(slot, TOP) == target {
                continue;
            }

            if let Some(u) = (0..4).find(|&u| same_corner(view.corner(u, TOP), target)) {
                let case = if u == slot {
                    Case::CornerInsert
                } else {
                    Case::CornerKickOut
                };
                return Some(algorithm(&[relabel(case, u)]));
            }
            if let Some(u) = (0..4).find(|&u| same_corner(view.corner(u, BOTTOM), target)) {
                let align = turns('D', (slot + 4 - u) % 4);
                return Some(algorithm(&[align, relabel(Case::CornerInsert, slot)]));
            }
            panic!(
                "FirstFaceCorners: corner {target:?} is nowhere on the cube:\n{}",
                self.engine.cube()
            );
        }
        None
    }

    /// Flips the finished first layer to the bottom, then inserts the middle
    /// edges from the top.
    fn middle_layer(&self) -> Option<Algorithm> {
        let view = self.view();
        if view.center(Face::Top) == self.first_color {
            return Some(algorithm(&[relabel(Case::FlipCube, 0)]));
        }

        let last = self.last_color;
        let solved = |slot: usize| {
            view.middle_edge(slot) == (view.side_color(slot), view.side_color(slot + 1))
        };
        if (0..4).all(solved) {
            return None;
        }

        for u in 0..4 {
            let (side_sticker, top_sticker) = view.edge(u, TOP);
            if side_sticker == last || top_sticker == last {
                continue;
            }
            let k = self.side_of(side_sticker);
            let align = turns('U', (u + 4 - k) % 4);
            let case = if top_sticker == view.side_color(k + 1) {
                Case::InsertRight
            } else if top_sticker == view.side_color(k + 3) {
                Case::InsertLeft
            } else {
                panic!(
                    "MiddleLayer: edge ({side_sticker}, {top_sticker}) fits no slot next to side {k}:\n{}",
                    self.engine.cube()
                );
            };
            return Some(algorithm(&[align, relabel(case, k)]));
        }

        // Every middle edge left is stuck in the wrong slot
        let u = (0..4).find(|&u| !solved(u))?;
        Some(algorithm(&[relabel(Case::InsertRight, u)]))
    }

    fn last_face_cross(&self) -> Option<Algorithm> {
        let view = self.view();
        let up: Vec<usize> = (0..4)
            .filter(|&side| view.edge(side, TOP).1 == self.last_color)
            .collect();

        let orient = relabel(Case::OrientCross, 0);
        match up.as_slice() {
            [_, _, _, _] => None,
            [] => Some(algorithm(&[orient])),
            &[a, b] if b - a == 2 => {
                // A line: lay it from left to right
                let align = if a == 0 { "U" } else { "" };
                Some(algorithm(&[align, orient.as_str()]))
            }
            &[a, b] => {
                // An L: put it at the back and the left
                let t = if b == a + 1 { a } else { b };
                Some(algorithm(&[turns('U', (t + 2) % 4), orient]))
            }
            _ => panic!(
                "LastFaceCross: {} edges facing up is impossible:\n{}",
                up.len(),
                self.engine.cube()
            ),
        }
    }

    fn last_face_cross_align(&self) -> Option<Algorithm> {
        let view = self.view();
        let homes: Vec<usize> = (0..4)
            .map(|side| self.side_of(view.edge(side, TOP).0))
            .collect();
        let matches = |n: usize| (0..4).filter(|&s| homes[(s + n) % 4] == s).count();

        let n = [1, 3, 2]
            .into_iter()
            .fold(0, |best, n| if matches(n) > matches(best) { n } else { best });
        let align = turns('U', n);
        if matches(n) == 4 {
            return (n != 0).then(|| algorithm(&[align]));
        }

        let wrong: Vec<usize> = (0..4).filter(|&s| homes[(s + n) % 4] != s).collect();
        let &[a, b] = wrong.as_slice() else {
            panic!(
                "LastFaceCrossAlign: {} misplaced edges after {align}:\n{}",
                wrong.len(),
                self.engine.cube()
            );
        };
        // Swaps the edge at side `k` with the one at `k - 1`
        let k = if (a + 1) % 4 == b || b - a == 2 { a + 1 } else { a };
        Some(algorithm(&[align, relabel(Case::SwapEdges, k % 4)]))
    }

    fn last_face_corners(&self) -> Option<Algorithm> {
        let view = self.view();
        let placed: Vec<usize> = (0..4)
            .filter(|&slot| {
                let target = [self.last_color, view.side_color(slot), view.side_color(slot + 1)];
                same_corner(view.corner(slot, TOP), target)
            })
            .collect();

        match placed.as_slice() {
            [_, _, _, _] => None,
            [] => Some(algorithm(&[relabel(Case::CycleCorners, 0)])),
            &[t] => Some(algorithm(&[relabel(Case::CycleCorners, t)])),
            _ => panic!(
                "LastFaceCorners: {} corners in place is impossible:\n{}",
                placed.len(),
                self.engine.cube()
            ),
        }
    }

    fn last_face_corner_align(&self) -> Option<Algorithm> {
        let view = self.view();
        let last = self.last_color;
        if view.corner(0, TOP)[0] != last {
            return Some(algorithm(&[relabel(Case::TwistCorner, 0)]));
        }
        if let Some(t) = (1..4).find(|&t| view.corner(t, TOP)[0] != last) {
            return Some(algorithm(&[turns('U', t)]));
        }

        let k = self.side_of(view.edge(0, TOP).0);
        let n = (4 - k) % 4;
        (n != 0).then(|| algorithm(&[turns('U', n)]))
    }
}
