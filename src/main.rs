//! Morris-Rust: rules engine and computer opponent for men's morris.
//!
//! ## Usage
//!
//! - `morris-rust` - Play one computer-vs-computer demo game
//! - `morris-rust mtp` - Start the text protocol on stdin/stdout
//! - `morris-rust demo` - Run the demo game
//!
//! `--variant`, `--seed` and `--verbose` apply to every command.

use anyhow::Context;
use clap::{Parser, Subcommand};

use morris_rust::board::{Color, Variant};
use morris_rust::constants::MAX_GAME_PLIES;
use morris_rust::protocol::MtpEngine;
use morris_rust::rules::RulesEngine;
use morris_rust::selfplay::{play_game, Outcome};

/// Morris-Rust: men's morris rules engine and computer opponent
#[derive(Parser)]
#[command(name = "morris-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board variant: six, nine or twelve
    #[arg(long, global = true, default_value_t = Variant::SIX)]
    variant: Variant,

    /// Seed for every random choice (first player, opponent tie-breaks)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log each applied action to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Morris Text Protocol server on stdin/stdout
    Mtp,
    /// Play the computer against itself
    Demo {
        /// Stop after this many actions
        #[arg(long, default_value_t = MAX_GAME_PLIES)]
        max_plies: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    match cli.command {
        Some(Commands::Mtp) => {
            let mut engine = MtpEngine::new(cli.variant, rng).with_verbose(cli.verbose);
            engine.run_stdio().context("text protocol session failed")?;
        }
        Some(Commands::Demo { max_plies }) => run_demo(cli.variant, rng, max_plies, cli.verbose)?,
        None => run_demo(cli.variant, rng, MAX_GAME_PLIES, cli.verbose)?,
    }
    Ok(())
}

fn run_demo(
    variant: Variant,
    mut rng: fastrand::Rng,
    max_plies: usize,
    verbose: bool,
) -> anyhow::Result<()> {
    println!("Morris-Rust: {variant} men's morris, computer vs computer\n");

    // First player is drawn at random, as when a board is handed over from setup.
    let first = Color::random(&mut rng);
    let mut engine = RulesEngine::new(variant, first);
    println!("{first} moves first");

    let record = play_game(&mut engine, &mut rng, max_plies, verbose)
        .context("opponent produced an action the rules engine rejected")?;

    println!("{}", record.board);
    match record.outcome {
        Outcome::Winner(color) => println!("{color} wins after {} actions", record.plies.len()),
        Outcome::Unfinished => println!("no result after {} actions", record.plies.len()),
    }
    Ok(())
}
