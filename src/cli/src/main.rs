#![warn(clippy::pedantic)]

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Instant,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use crossbeam_channel::Receiver;
use cuboid_core::{Algorithm, Cube, CubeEngine, EngineConfig, Notification, Solver};
use env_logger::TimestampPrecision;
use log::{LevelFilter, debug, info};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

/// Plays with cuboid twisty puzzles in the terminal
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file in TOML format
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn, scramble and solve a cube interactively
    Repl,
    /// Scramble a 3x3x3 and solve it
    Solve {
        /// Number of scramble moves; defaults to the configured length
        #[arg(long, short = 's')]
        scramble: Option<usize>,
    },
    /// Apply an algorithm to a solved cube and print the result
    Play {
        /// The algorithm to play, e.g. "R U R' U'"
        algorithm: String,
    },
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct CuboidConfig {
    cube: CubeConfig,
    engine: EngineConfig,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
struct CubeConfig {
    size: [usize; 3],
}

impl Default for CubeConfig {
    fn default() -> Self {
        CubeConfig { size: [3; 3] }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read configuration file {path:?}"))?;
            toml::from_str::<CuboidConfig>(&text)
                .wrap_err_with(|| format!("Failed to parse configuration file {path:?}"))?
        }
        None => CuboidConfig::default(),
    };
    debug!("{config:?}");

    match cli.command {
        Commands::Repl => run_repl(&config),
        Commands::Solve { scramble } => run_solve(&config, scramble),
        Commands::Play { algorithm } => run_play(&config, &algorithm),
    }
}

fn new_solver(config: &CuboidConfig) -> color_eyre::Result<(Solver, Receiver<Notification>)> {
    let cube = Cube::new(config.cube.size)?;
    let (tx, rx) = crossbeam_channel::unbounded();
    let engine = CubeEngine::with_listener(cube, config.engine.clone(), Box::new(tx));
    Ok((Solver::with_engine(engine), rx))
}

fn print_net(cube: &Cube) {
    for line in cube.to_string().lines() {
        for c in line.chars() {
            match c {
                'G' => print!("{}", c.green()),
                'R' => print!("{}", c.red()),
                'B' => print!("{}", c.blue()),
                'O' => print!("{}", c.truecolor(255, 140, 0)),
                'W' => print!("{}", c.white()),
                'Y' => print!("{}", c.yellow()),
                _ => print!("{c}"),
            }
        }
        println!();
    }
}

fn print_notifications(rx: &Receiver<Notification>) {
    for notification in rx.try_iter() {
        match notification {
            Notification::Message(message) => eprintln!("{}", message.red()),
            Notification::MoveSequenceCompleted => {}
            Notification::Solved => println!("{}", "Solved!".green().bold()),
        }
    }
}

fn run_solve(config: &CuboidConfig, scramble: Option<usize>) -> color_eyre::Result<()> {
    let (mut solver, rx) = new_solver(config)?;
    let length = scramble.unwrap_or(config.engine.scramble_length);

    solver.engine_mut().randomize(length)?;
    println!("Scrambled with {length} moves:");
    print_net(solver.cube());
    let scrambled = solver.engine().move_count();

    let started = Instant::now();
    solver.solve_blocking()?;
    let elapsed = started.elapsed();

    print_net(solver.cube());
    print_notifications(&rx);
    println!(
        "Solved in {} moves, {:.3}ms",
        solver.engine().move_count() - scrambled,
        elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}

fn run_play(config: &CuboidConfig, text: &str) -> color_eyre::Result<()> {
    let (mut solver, rx) = new_solver(config)?;
    let algorithm = Algorithm::parse(text, solver.cube().dims())?;
    info!("Playing {}", algorithm.notation(solver.cube().dims()));

    solver.engine_mut().play(algorithm)?;
    solver.engine_mut().settle();
    print_net(solver.cube());
    print_notifications(&rx);
    println!("Move count: {}", solver.engine().move_count());
    Ok(())
}

const HELP: &str = "\
commands:
  move <alg>     turn the cube, e.g. `move R U R' U'`
  undo           undo the last move
  scramble [n]   apply n random moves
  solve          solve a 3x3x3
  reset          back to the solved cube
  show           print the cube
  quit           leave";

fn run_repl(config: &CuboidConfig) -> color_eyre::Result<()> {
    let (mut solver, rx) = new_solver(config)?;
    println!("{HELP}");
    print_net(solver.cube());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let (command, rest) = line
            .trim()
            .split_once(' ')
            .unwrap_or((line.trim(), ""));

        let result = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP}");
                continue;
            }
            "show" => Ok(()),
            "move" => repl_move(&mut solver, rest),
            "undo" => solver.engine_mut().undo().map_err(Into::into),
            "scramble" => repl_scramble(&mut solver, rest),
            "solve" => solver.solve_blocking().map_err(Into::into),
            "reset" => {
                solver.reset();
                Ok(())
            }
            other => Err(eyre!("Unknown command `{other}`, try `help`")),
        };

        solver.engine_mut().settle();
        print_notifications(&rx);
        match result {
            Ok(()) => {
                print_net(solver.cube());
                println!("Move count: {}", solver.engine().move_count());
            }
            Err(e) => eprintln!("{}", e.red()),
        }
    }

    println!("Exiting");
    Ok(())
}

fn repl_move(solver: &mut Solver, text: &str) -> color_eyre::Result<()> {
    let algorithm = Algorithm::parse(text, solver.cube().dims())?;
    for &mv in algorithm.moves() {
        solver.engine_mut().rotate(mv)?;
        solver.engine_mut().settle();
    }
    Ok(())
}

fn repl_scramble(solver: &mut Solver, count: &str) -> color_eyre::Result<()> {
    let count = match count.trim() {
        "" => solver.engine().config().scramble_length,
        n => n
            .parse()
            .wrap_err_with(|| format!("`{n}` is not a move count"))?,
    };
    solver.engine_mut().randomize(count)?;
    Ok(())
}
