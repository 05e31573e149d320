#![warn(clippy::pedantic)]

mod config;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use config::Config;
use itertools::Itertools;
use layer_solver::Solver;
use log::{LevelFilter, debug};
use owo_colors::OwoColorize;
use rubik_core::{Algorithm, Color, Cube};

/// Scrambles a 3x3x3 cube and solves its first layer one algorithm at a time
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file to use, in TOML format
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scramble a cube and solve it
    Solve {
        /// The scramble to apply, e.g. "R U' F2 y"
        #[arg(long, conflicts_with = "random")]
        scramble: Option<String>,
        /// Apply a random scramble of this many quarter turns
        #[arg(long)]
        random: Option<usize>,
        /// Seed for the random scramble
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a random scramble
    Scramble {
        /// Number of quarter turns
        #[arg(long)]
        length: Option<usize>,
        /// Seed for the random scramble
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let config = Config::load(cli.config.as_deref())?;
    debug!("Using {config:?}");

    match cli.command {
        Commands::Solve {
            scramble,
            random,
            seed,
        } => {
            let mut rng = rng(seed.or(config.seed));
            solve(&config, scramble.as_deref(), random, &mut rng)?;
        }
        Commands::Scramble { length, seed } => {
            let mut rng = rng(seed.or(config.seed));
            let length = length.unwrap_or(config.scramble_length);
            println!("{}", Algorithm::random(length, &mut rng));
        }
    }

    Ok(())
}

fn rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

fn solve(
    config: &Config,
    scramble: Option<&str>,
    random: Option<usize>,
    rng: &mut fastrand::Rng,
) -> color_eyre::Result<()> {
    let mut cube = Cube::new();
    let mut solver = Solver::new();

    if let Some(scramble) = scramble {
        let algorithm = scramble
            .parse::<Algorithm>()
            .wrap_err("Could not read the scramble")?;
        cube.apply_algorithm(&algorithm)?;
        println!("{} {algorithm}", "Scramble:".bold());
    } else {
        solver.scramble(random.unwrap_or(config.scramble_length), rng)?;
        println!("{} {}", "Scramble:".bold(), solver.current_algorithm());
        solver.step_until_idle(&mut cube)?;
        solver.messages().clear();
    }

    if config.show_net {
        println!("{}", colored_net(&cube));
    }

    solver.solve(&cube)?;
    let mut played = 0;
    loop {
        print_messages(&mut solver);

        let algorithm = solver.current_algorithm().clone();
        if algorithm.is_empty() {
            break;
        }

        println!("{} {algorithm}", "Playing".bold());
        cube.apply_algorithm(&algorithm)?;
        played += algorithm.len();
        solver.on_algorithm_applied(&cube)?;
    }

    println!("Played {played} quarter turns");
    if config.show_net {
        println!("{}", colored_net(&cube));
    }

    Ok(())
}

fn print_messages(solver: &mut Solver) {
    while let Some(message) = solver.messages().pop_front() {
        println!("{}", message.dimmed());
    }
}

/// The cube net with each square painted in its own color
fn colored_net(cube: &Cube) -> String {
    cube.to_string()
        .lines()
        .map(|line| {
            line.chars()
                .map(|c| match Color::ALL.into_iter().find(|color| color.letter() == c) {
                    Some(color) => paint(color),
                    None => c.to_string(),
                })
                .collect::<String>()
        })
        .join("\n")
}

fn paint(color: Color) -> String {
    let square = "■";
    match color {
        Color::White => square.white().to_string(),
        Color::Yellow => square.yellow().to_string(),
        Color::Green => square.green().to_string(),
        Color::Blue => square.blue().to_string(),
        Color::Red => square.red().to_string(),
        Color::Orange => square.truecolor(255, 140, 0).to_string(),
    }
}
