//! CLI frontend for the Wavelength party game.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "wl",
    about = "Wavelength: read your psychic's mind on a spectrum",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game at this terminal
    Play {
        /// Number of players; everyone is the psychic once
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Spectrum-pair dataset (default: built-in pairs)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// RNG seed for the spectrum draws
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Start with this category already chosen
        #[arg(short, long)]
        category: Option<String>,

        /// Animate the reveal instead of jumping to the result
        #[arg(short, long)]
        animate: bool,
    },

    /// List the categories in a dataset
    Categories {
        /// Spectrum-pair dataset (default: built-in pairs)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },

    /// Score a guess against a target, both as percentages (0-100)
    Score {
        /// Where the guess landed
        guess: f64,

        /// Where the target was
        target: f64,
    },

    /// Write a starter dataset you can edit
    Init {
        /// Output file
        #[arg(default_value = "spectrum-pairs.json")]
        path: PathBuf,
    },
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout belongs to the game; logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            players,
            dataset,
            seed,
            category,
            animate,
        } => commands::play::run(
            dataset.as_deref(),
            players,
            seed,
            category.as_deref(),
            animate,
        ),
        Commands::Categories { dataset } => commands::categories::run(dataset.as_deref()),
        Commands::Score { guess, target } => commands::score::run(guess, target),
        Commands::Init { path } => commands::init::run(&path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
