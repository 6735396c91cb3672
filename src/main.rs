#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hotseat::{color::Color, fen::Fen, fuzz::fuzz, game_state::GameState, repl::repl};

/// Two-player chess on the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Side shown at the bottom of the board
    #[arg(long, default_value_t = Color::White)]
    view: Color,
    /// Start from this position instead of the standard one
    #[arg(long)]
    fen: Option<Fen>,
    #[command(subcommand)]
    command: Option<Command>,
}
#[derive(Debug, Subcommand)]
enum Command {
    /// Play random games and compare every legal move set with the `chess`
    /// crate
    Fuzz {
        #[arg(long, default_value_t = 10_000)]
        plies: u64,
        /// Seed for reproducible runs, random when left out
        #[arg(long)]
        seed: Option<u64>,
    },
}
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Fuzz { plies, seed }) => {
            if let Err(err) = fuzz(plies, seed) {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            }
        }
        None => {
            let start = match cli.fen.map(GameState::try_from).transpose() {
                Ok(start) => start.unwrap_or_default(),
                Err(err) => {
                    eprintln!("Error: {err}");
                    return ExitCode::FAILURE;
                }
            };
            log::debug!("starting from {}", Fen::from(start));
            if let Err(err) = repl(cli.view, start) {
                log::error!("terminal error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
