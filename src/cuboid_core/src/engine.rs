//! The move player: applies one discrete move per frame and decides what
//! comes next.

use crate::{
    algorithm::Algorithm,
    config::EngineConfig,
    cube::{Color, Cube, CubeError},
    geometry::{Axis, Direction, Face},
    listener::{CubeListener, LogListener},
    moves::Move,
    start, success,
};
use log::{debug, info, trace, warn};
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("The cube is busy")]
    Busy,
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("The cube is not randomizing")]
    NotRandomizing,
    #[error("The cube is not testing")]
    NotTesting,
    #[error(transparent)]
    Cube(#[from] CubeError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Randomizing,
    Solving,
    Testing,
}

/// What happens when the in-flight move completes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    None,
    Manual,
    Random,
    Algorithm,
    Repeat,
}

/// Outcome of one frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing was in flight.
    Idle,
    Moved,
    /// The last move of an algorithm was applied.
    AlgorithmFinished,
}

/// Drives a [`Cube`] one discrete move at a time.
///
/// Commands only queue work; [`CubeEngine::step`] completes the in-flight move
/// and picks the next one according to the current [`Mode`]. A command issued
/// while something is in flight is rejected rather than interleaved.
pub struct CubeEngine {
    cube: Cube,
    initial_dims: [usize; 3],
    config: EngineConfig,
    mode: Mode,
    state: EngineState,
    current: Option<Move>,
    algorithm: Option<Algorithm>,
    undo_stack: VecDeque<Move>,
    undoing: bool,
    stop_requested: bool,
    move_count: usize,
    rng: fastrand::Rng,
    listener: Box<dyn CubeListener + Send>,
}

impl CubeEngine {
    #[must_use]
    pub fn new(cube: Cube, config: EngineConfig) -> CubeEngine {
        CubeEngine::with_listener(cube, config, Box::new(LogListener))
    }

    #[must_use]
    pub fn with_listener(
        cube: Cube,
        config: EngineConfig,
        listener: Box<dyn CubeListener + Send>,
    ) -> CubeEngine {
        CubeEngine {
            initial_dims: cube.dims(),
            cube,
            rng: config.rng(),
            config,
            mode: Mode::None,
            state: EngineState::Idle,
            current: None,
            algorithm: None,
            undo_stack: VecDeque::new(),
            undoing: false,
            stop_requested: false,
            move_count: 0,
            listener,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn CubeListener + Send>) {
        self.listener = listener;
    }

    #[must_use]
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// The move that the next [`CubeEngine::step`] completes.
    #[must_use]
    pub fn current_move(&self) -> Option<Move> {
        self.current
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cube.is_solved()
    }

    /// Whether a move or sequence is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.mode != Mode::None || self.current.is_some()
    }

    /// Report a refused command to the log and the listener, then hand the
    /// error back.
    pub(crate) fn reject<E: ToString>(&mut self, error: E) -> E {
        let message = error.to_string();
        warn!("{message}");
        self.listener.on_message(&message);
        error
    }

    fn ensure_idle(&mut self) -> Result<(), EngineError> {
        if self.is_busy() || self.state != EngineState::Idle {
            return Err(self.reject(EngineError::Busy));
        }
        Ok(())
    }

    fn ensure_valid(&mut self, mv: &Move) -> Result<(), EngineError> {
        if let Err(e) = self.cube.check_move(mv) {
            return Err(self.reject(EngineError::from(e)));
        }
        Ok(())
    }

    fn push_undo(&mut self, mv: &Move) {
        if self.config.undo_limit == 0 {
            return;
        }
        if self.undo_stack.len() == self.config.undo_limit {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(mv.inverse());
    }

    /// Queue a manual move.
    ///
    /// # Errors
    ///
    /// If something is in flight or the move does not fit the cube.
    pub fn rotate(&mut self, mv: Move) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.ensure_valid(&mv)?;
        self.push_undo(&mv);
        self.mode = Mode::Manual;
        self.current = Some(mv);
        Ok(())
    }

    /// Queue the inverse of the most recent recorded move.
    ///
    /// # Errors
    ///
    /// If something is in flight or there is nothing to undo.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        self.ensure_idle()?;
        let Some(mv) = self.undo_stack.pop_back() else {
            return Err(self.reject(EngineError::NothingToUndo));
        };
        self.undoing = true;
        self.mode = Mode::Manual;
        self.current = Some(mv);
        Ok(())
    }

    fn random_move(&mut self) -> Move {
        let axis = Axis::ALL[self.rng.usize(..Axis::ALL.len())];
        let direction = [
            Direction::Clockwise,
            Direction::CounterClockwise,
            Direction::Half,
        ][self.rng.usize(..3)];
        let layer = self.rng.usize(..self.cube.size(axis));
        Move::single(axis, direction, layer)
    }

    /// Apply `count` random single-layer moves at once. The moves count and
    /// can be undone like manual ones, but no notifications are sent.
    ///
    /// # Errors
    ///
    /// If something is in flight.
    pub fn randomize(&mut self, count: usize) -> Result<(), EngineError> {
        self.ensure_idle()?;
        info!(start!("Scrambling with {} moves"), count);
        for _ in 0..count {
            let mv = self.random_move();
            let whole = self.cube.is_whole_cube(&mv);
            self.cube.apply(&mv)?;
            self.push_undo(&mv);
            if !whole {
                self.move_count += 1;
            }
            trace!("Scramble move {}", mv.notation(self.cube.dims()));
        }
        Ok(())
    }

    /// Scramble with the configured length.
    ///
    /// # Errors
    ///
    /// If something is in flight.
    pub fn scramble(&mut self) -> Result<(), EngineError> {
        self.randomize(self.config.scramble_length)
    }

    /// Start scrambling one move per frame until [`CubeEngine::stop_randomize`].
    ///
    /// # Errors
    ///
    /// If something is in flight.
    pub fn start_randomize(&mut self) -> Result<(), EngineError> {
        self.ensure_idle()?;
        info!(start!("Randomizing"));
        self.undo_stack.clear();
        self.mode = Mode::Random;
        self.state = EngineState::Randomizing;
        self.current = Some(self.random_move());
        Ok(())
    }

    /// Stop scrambling once the in-flight move completes.
    ///
    /// # Errors
    ///
    /// If the cube is not randomizing.
    pub fn stop_randomize(&mut self) -> Result<(), EngineError> {
        if self.state != EngineState::Randomizing {
            return Err(self.reject(EngineError::NotRandomizing));
        }
        self.stop_requested = true;
        Ok(())
    }

    /// Repeat `mv` every frame until [`CubeEngine::stop_testing`].
    ///
    /// # Errors
    ///
    /// If something is in flight or the move does not fit the cube.
    pub fn start_testing(&mut self, mv: Move) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.ensure_valid(&mv)?;
        info!(start!("Repeating {}"), mv.notation(self.cube.dims()));
        self.mode = Mode::Repeat;
        self.state = EngineState::Testing;
        self.current = Some(mv);
        Ok(())
    }

    /// Stop repeating once the in-flight move completes.
    ///
    /// # Errors
    ///
    /// If the cube is not testing.
    pub fn stop_testing(&mut self) -> Result<(), EngineError> {
        if self.state != EngineState::Testing {
            return Err(self.reject(EngineError::NotTesting));
        }
        self.stop_requested = true;
        Ok(())
    }

    /// Play an algorithm, one move per frame.
    ///
    /// # Errors
    ///
    /// If something is in flight.
    pub fn play(&mut self, algorithm: Algorithm) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.queue_algorithm(algorithm);
        Ok(())
    }

    pub(crate) fn queue_algorithm(&mut self, mut algorithm: Algorithm) {
        algorithm.reset();
        self.mode = Mode::Algorithm;
        self.current = algorithm.next_move();
        self.algorithm = Some(algorithm);
    }

    /// Drop whatever is queued after the in-flight move. The engine returns
    /// to idle when that move completes.
    pub fn cancel(&mut self) {
        self.algorithm = None;
        self.stop_requested = false;
        if self.current.is_some() {
            self.mode = Mode::Manual;
        } else {
            self.mode = Mode::None;
            self.state = EngineState::Idle;
        }
    }

    /// Back to the solved layout of the original dimensions, dropping
    /// anything in flight, the undo history and the move counter.
    pub fn reset(&mut self) {
        self.cube = Cube::build(self.initial_dims);
        self.mode = Mode::None;
        self.state = EngineState::Idle;
        self.current = None;
        self.algorithm = None;
        self.undo_stack.clear();
        self.undoing = false;
        self.stop_requested = false;
        self.move_count = 0;
    }

    pub(crate) fn set_state(&mut self, state: EngineState) {
        self.state = state;
    }

    pub(crate) fn notify_solve_finished(&mut self) {
        self.listener.on_move_sequence_completed();
        self.listener.on_solved();
    }

    /// Complete the in-flight move and queue the next one.
    pub fn step(&mut self) -> Step {
        let Some(mv) = self.current.take() else {
            if self.mode == Mode::Algorithm {
                return self.finish_algorithm();
            }
            return Step::Idle;
        };

        let whole = self.cube.is_whole_cube(&mv);
        if let Err(e) = self.cube.apply(&mv) {
            // Earlier moves of a sequence may have reoriented the cube
            let error = self.reject(e);
            debug!("Dropped {mv}: {error}");
            self.cancel();
            return Step::Idle;
        }
        if !whole {
            if self.undoing {
                self.move_count = self.move_count.saturating_sub(1);
            } else {
                self.move_count += 1;
            }
        }
        self.undoing = false;
        debug!(
            "Applied {} (move count {})",
            mv.notation(self.cube.dims()),
            self.move_count
        );

        match self.mode {
            Mode::None | Mode::Manual => {
                self.mode = Mode::None;
                self.state = EngineState::Idle;
                self.notify_if_solved();
                Step::Moved
            }
            Mode::Random => {
                if self.stop_requested {
                    self.finish_endless();
                } else {
                    self.current = Some(self.random_move());
                }
                Step::Moved
            }
            Mode::Repeat => {
                if self.stop_requested {
                    self.finish_endless();
                } else {
                    self.current = Some(mv);
                }
                Step::Moved
            }
            Mode::Algorithm => {
                match self.algorithm.as_mut().and_then(Algorithm::next_move) {
                    Some(next) => {
                        self.current = Some(next);
                        Step::Moved
                    }
                    None => self.finish_algorithm(),
                }
            }
        }
    }

    fn finish_endless(&mut self) {
        self.stop_requested = false;
        self.mode = Mode::None;
        self.state = EngineState::Idle;
        self.listener.on_move_sequence_completed();
        self.notify_if_solved();
    }

    fn finish_algorithm(&mut self) -> Step {
        self.algorithm = None;
        self.mode = Mode::None;
        if self.state != EngineState::Solving {
            self.state = EngineState::Idle;
            info!(success!("Algorithm finished"));
            self.listener.on_move_sequence_completed();
            self.notify_if_solved();
        }
        Step::AlgorithmFinished
    }

    fn notify_if_solved(&mut self) {
        if self.state == EngineState::Idle && self.cube.is_solved() {
            self.listener.on_solved();
        }
    }

    /// Step until the queued manual move or algorithm has completed. Endless
    /// modes are only driven to their end once a stop was requested.
    pub fn settle(&mut self) {
        loop {
            let endless = matches!(self.mode, Mode::Random | Mode::Repeat);
            if endless && !self.stop_requested {
                return;
            }
            if self.step() != Step::Moved {
                return;
            }
        }
    }

    /// Paint every sticker.
    ///
    /// # Errors
    ///
    /// If something is in flight.
    pub fn set_color(&mut self, color: Color) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.cube.set_color(color);
        Ok(())
    }

    /// # Errors
    ///
    /// If something is in flight.
    pub fn set_face_color(&mut self, face: Face, color: Color) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.cube.set_face_color(face, color);
        Ok(())
    }

    /// # Errors
    ///
    /// If something is in flight or the layer does not exist.
    pub fn set_layer_color(
        &mut self,
        axis: Axis,
        layer: usize,
        color: Color,
    ) -> Result<(), EngineError> {
        self.ensure_idle()?;
        if let Err(e) = self.cube.set_layer_color(axis, layer, color) {
            return Err(self.reject(EngineError::from(e)));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// If something is in flight or the square does not exist.
    pub fn set_square_color(
        &mut self,
        face: Face,
        row: usize,
        col: usize,
        color: Color,
    ) -> Result<(), EngineError> {
        self.ensure_idle()?;
        if let Err(e) = self.cube.set_square_color(face, row, col, color) {
            return Err(self.reject(EngineError::from(e)));
        }
        Ok(())
    }
}
