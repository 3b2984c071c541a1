//! Command-line interface for strictly_minimax.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Minimax - exhaustively solved tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "strictly_minimax")]
#[command(about = "Tic-tac-toe solved by full game-tree enumeration", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Memo table file (overrides the config file)
    #[arg(long, global = true)]
    pub cache: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enumerate every position from the empty board and save the memo table
    Solve,

    /// Show the value and best reply for a position
    Query {
        /// Board as 9 cells in row-major order: X, O, and ' ', '.' or '_' for blanks
        board: String,
    },

    /// Play as X against the engine in the terminal
    Play,

    /// Count memo table positions by outcome
    Stats {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}
