use crossbeam_channel::Receiver;
use cuboid_core::{
    Algorithm, Cube, CubeEngine, EngineConfig, EngineError, EngineState, Notification,
    SolveError, Solver, Stage, Step, new_3x3x3_solver,
};
use log::info;

fn finished() -> Vec<Notification> {
    vec![Notification::MoveSequenceCompleted, Notification::Solved]
}

fn message(text: &str) -> Notification {
    Notification::Message(text.to_owned())
}

fn seeded_solver(seed: u64) -> (Solver, Receiver<Notification>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let config = EngineConfig {
        seed: Some(seed),
        ..EngineConfig::default()
    };
    let engine = CubeEngine::with_listener(Cube::cube3(), config, Box::new(tx));
    (Solver::with_engine(engine), rx)
}

#[test_log::test]
fn test_solves_many_scrambles() {
    let mut total_moves = 0;
    for seed in 0..200 {
        let (mut solver, rx) = seeded_solver(seed);
        solver.engine_mut().scramble().unwrap();
        let scrambled_count = solver.engine().move_count();

        solver.solve_blocking().unwrap();

        assert!(solver.cube().is_solved(), "seed {seed}");
        assert_eq!(solver.stage(), Stage::None);
        assert_eq!(solver.engine().state(), EngineState::Idle);
        assert!(!solver.engine().is_busy());
        // Any rejected move would have shown up as a message
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), finished());
        total_moves += solver.engine().move_count() - scrambled_count;
    }
    info!("Solved 200 scrambles in {total_moves} moves");
}

#[test_log::test]
fn test_solves_scrambles_with_slice_moves() {
    for seed in 0..20 {
        let (mut solver, _rx) = seeded_solver(seed);
        let scramble = Algorithm::parse("M E S R U2 M' F E2 S' D L", [3; 3]).unwrap();
        solver.engine_mut().play(scramble).unwrap();
        solver.engine_mut().settle();
        solver.engine_mut().randomize(usize::try_from(seed).unwrap()).unwrap();

        solver.solve_blocking().unwrap();
        assert!(solver.cube().is_solved(), "seed {seed}");
    }
}

#[test_log::test]
fn test_frame_by_frame() {
    let (mut solver, rx) = seeded_solver(1234);
    solver.engine_mut().randomize(30).unwrap();
    solver.solve().unwrap();
    assert!(solver.is_solving());
    assert_eq!(solver.engine().state(), EngineState::Solving);

    let mut frames = 0;
    while solver.is_solving() || solver.engine().is_busy() {
        assert_ne!(solver.step(), Step::Idle);
        frames += 1;
        assert!(frames < 10_000);
    }
    assert!(solver.cube().is_solved());
    assert_eq!(rx.try_iter().last(), Some(Notification::Solved));
}

#[test_log::test]
fn test_already_solved_cube() {
    let (mut solver, rx) = seeded_solver(0);
    solver.solve().unwrap();
    assert!(!solver.is_solving());
    assert_eq!(solver.stage(), Stage::None);
    assert!(!solver.engine().is_busy());
    assert_eq!(solver.engine().current_move(), None);
    assert_eq!(solver.engine().state(), EngineState::Idle);
    assert_eq!(solver.engine().move_count(), 0);
    assert_eq!(solver.cube(), &Cube::cube3());
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), finished());
}

#[test_log::test]
fn test_reoriented_solved_cube_needs_no_moves() {
    let (mut solver, rx) = seeded_solver(0);
    let turn_over = Algorithm::parse("x2 y", [3; 3]).unwrap();
    solver.engine_mut().play(turn_over).unwrap();
    solver.engine_mut().settle();
    let oriented = solver.cube().clone();
    rx.try_iter().for_each(drop);

    solver.solve_blocking().unwrap();
    assert_eq!(solver.cube(), &oriented);
    assert_eq!(solver.engine().move_count(), 0);
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), finished());
}

#[test_log::test]
fn test_only_3x3x3_is_supported() {
    for dims in [[2, 2, 2], [4, 4, 4], [3, 3, 2]] {
        let (tx, rx) = crossbeam_channel::unbounded();
        let cube = Cube::new(dims).unwrap();
        let engine = CubeEngine::with_listener(cube, EngineConfig::default(), Box::new(tx));
        let mut solver = Solver::with_engine(engine);
        assert_eq!(solver.solve(), Err(SolveError::Unsupported { dims }));
        assert!(!solver.is_solving());
        let [x, y, z] = dims;
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![message(&format!(
                "Solving is only supported for the 3x3x3, not {x}x{y}x{z}"
            ))]
        );
    }
}

#[test_log::test]
fn test_guards() {
    let (mut solver, rx) = seeded_solver(5);
    solver.engine_mut().randomize(20).unwrap();
    solver.solve().unwrap();
    assert_eq!(solver.solve(), Err(SolveError::AlreadySolving));
    assert_eq!(solver.engine_mut().undo(), Err(EngineError::Busy));
    assert_eq!(solver.engine_mut().randomize(3), Err(EngineError::Busy));
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![
            message("Already solving"),
            message("The cube is busy"),
            message("The cube is busy"),
        ]
    );

    let (mut solver, rx) = seeded_solver(5);
    solver.engine_mut().start_randomize().unwrap();
    assert_eq!(solver.solve(), Err(SolveError::Busy));
    assert_eq!(solver.cancel_solving(), Err(SolveError::NotSolving));
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![message("The cube is busy"), message("Not solving")]
    );
}

#[test_log::test]
fn test_engine_reset_ends_the_solve() {
    let (mut solver, _rx) = seeded_solver(21);
    solver.engine_mut().randomize(20).unwrap();
    solver.solve().unwrap();
    solver.step();

    solver.engine_mut().reset();
    assert!(!solver.is_solving());
    assert_eq!(solver.stage(), Stage::None);
    assert_eq!(solver.step(), Step::Idle);

    solver.engine_mut().randomize(20).unwrap();
    solver.solve_blocking().unwrap();
    assert!(solver.cube().is_solved());
}

#[test_log::test]
fn test_engine_cancel_ends_the_solve() {
    let (mut solver, _rx) = seeded_solver(22);
    solver.engine_mut().randomize(20).unwrap();
    solver.solve().unwrap();
    solver.step();

    solver.engine_mut().cancel();
    // Manual commands stay locked out until the in-flight move lands
    assert_eq!(solver.engine_mut().undo(), Err(EngineError::Busy));
    assert_eq!(solver.step(), Step::Moved);
    assert!(!solver.is_solving());
    assert_eq!(solver.stage(), Stage::None);
    assert_eq!(solver.engine().state(), EngineState::Idle);
    assert_eq!(solver.step(), Step::Idle);

    solver.solve_blocking().unwrap();
    assert!(solver.cube().is_solved());
}

#[test_log::test]
fn test_cancel_solving() {
    let (mut solver, _rx) = seeded_solver(77);
    solver.engine_mut().randomize(20).unwrap();
    solver.solve().unwrap();
    for _ in 0..3 {
        solver.step();
    }
    let count = solver.engine().move_count();

    solver.cancel_solving().unwrap();
    assert!(!solver.is_solving());
    // The move in flight still lands
    assert_eq!(solver.step(), Step::Moved);
    assert_eq!(solver.engine().move_count(), count + 1);
    assert_eq!(solver.engine().state(), EngineState::Idle);
    assert_eq!(solver.step(), Step::Idle);

    // And a new solve picks up from there
    solver.solve_blocking().unwrap();
    assert!(solver.cube().is_solved());
}

#[test_log::test]
fn test_default_solver() {
    let mut solver = new_3x3x3_solver();
    solver.engine_mut().randomize(25).unwrap();
    solver.solve_blocking().unwrap();
    assert!(solver.cube().is_solved());

    solver.reset();
    assert_eq!(solver.engine().move_count(), 0);
}
