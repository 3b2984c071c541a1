//! Strictly Minimax - command-line front end.
//!
//! Builds, inspects and plays from the memo table.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Write};
use strictly_minimax::{
    Board, Cell, Engine, GameStatus, MemoStore, MemoTable, Position, SolverConfig,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => SolverConfig::from_file(path)?,
        None => SolverConfig::default(),
    };
    if let Some(cache) = cli.cache {
        config = config.with_cache_path(cache);
    }
    let store = MemoStore::new(config.cache_path().clone());

    match cli.command {
        Command::Solve => run_solve(&store),
        Command::Query { board } => run_query(&open_engine(&store, &config)?, &board),
        Command::Play => run_play(&open_engine(&store, &config)?),
        Command::Stats { json } => run_stats(&open_engine(&store, &config)?, json),
    }
}

fn open_engine(store: &MemoStore, config: &SolverConfig) -> Result<Engine> {
    let engine = Engine::open(store)
        .with_context(|| format!("Failed to prepare memo table at {}", store.path().display()))?;
    Ok(engine.with_search_depth(*config.search_depth()))
}

/// Rebuild the memo table from scratch and save it
#[instrument(skip_all, fields(path = %store.path().display()))]
fn run_solve(store: &MemoStore) -> Result<()> {
    let table = MemoTable::build();
    store
        .save(&table)
        .with_context(|| format!("Failed to save memo table to {}", store.path().display()))?;

    let summary = table.summary();
    info!(entries = summary.positions, "Solve finished");
    println!(
        "Solved {} positions; saved to {}",
        summary.positions,
        store.path().display()
    );
    Ok(())
}

/// Print value and best reply for a single board
fn run_query(engine: &Engine, board: &str) -> Result<()> {
    let board: Board = board.parse().context("Invalid board")?;
    let pos = Position::from_board(board)?;

    println!("{}\n", board.display());
    println!("To move: {}", pos.to_move());

    if let GameStatus::Won(_) | GameStatus::Draw = pos.status() {
        println!("Status: {}", describe_status(pos.status()));
        return Ok(());
    }

    match engine.value(&pos) {
        Some(value) => println!("Value: {} ({})", value, describe_value(value)),
        None => println!("Value: not in memo table"),
    }

    let reply = engine.reply(&pos)?;
    if let Some(mv) = pos.move_to(&reply) {
        println!("Best move: {} (cell {})", mv.cell(), mv.cell().to_index() + 1);
    }
    println!("\n{}", reply.board().display());

    let line = engine.table().principal_line(&pos);
    println!("\nPerfect play continues for {} plies", line.len() - 1);
    Ok(())
}

/// Interactive game: human plays X, engine plays O
fn run_play(engine: &Engine) -> Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut pos = Position::new();

    println!("You are X. Enter a cell number (1-9), or q to quit.\n");
    while !pos.is_terminal() {
        println!("{}\n", pos.board().display());
        print!("Your move: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            bail!("Input closed before the game ended");
        };
        let line = line?;
        if line.trim().eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let Some(cell) = Cell::from_label_or_number(&line) else {
            println!("Not a cell: {:?}\n", line.trim());
            continue;
        };

        match engine.respond(&pos, cell) {
            Ok(exchange) => {
                if let Some((mv, _)) = exchange.reply {
                    println!("Engine plays {} (cell {})\n", mv.cell(), mv.cell().to_index() + 1);
                }
                pos = exchange.position();
            }
            Err(e) => println!("{}\n", e),
        }
    }

    println!("{}\n", pos.board().display());
    println!("{}", describe_status(pos.status()));
    Ok(())
}

/// Print outcome counts for the memo table
fn run_stats(engine: &Engine, json: bool) -> Result<()> {
    let summary = engine.table().summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Positions: {}", summary.positions);
    println!("Leaves:    {}", summary.leaves);
    println!("O wins:    {}", summary.o_wins);
    println!("Draws:     {}", summary.draws);
    println!("X wins:    {}", summary.x_wins);
    let root = engine
        .value(&Position::new())
        .map_or_else(|| "unknown".to_string(), |v| describe_value(v).to_string());
    println!("Empty board: {}", root);
    Ok(())
}

fn describe_value(value: i32) -> &'static str {
    match value.signum() {
        1 => "O wins",
        -1 => "X wins",
        _ => "draw",
    }
}

fn describe_status(status: GameStatus) -> String {
    match status {
        GameStatus::Won(player) => format!("{} wins!", player),
        GameStatus::Draw => "It's a draw!".to_string(),
        GameStatus::InProgress => "Game in progress".to_string(),
    }
}
