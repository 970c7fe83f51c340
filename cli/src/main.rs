//! Terminal front end: list boards, inspect them, and play either one move per
//! invocation or interactively. Progress is kept in a directory of JSON files.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use twostars_core::{BoardInfo, Coord};
use twostars_session::{BoardStatus, FileStorage, GameStateStore, Session};

use crate::catalog::Catalog;
use crate::config::{FileConfig, Settings};

mod catalog;
mod config;
mod play;
mod render;

/// Play "two stars" puzzles in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory saved games are kept in
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// TOML board catalog to use instead of the built-in boards
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Settings file (defaults to ./twostars.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List boards with their status
    List,
    /// Print a board with its saved progress
    Show { board: String },
    /// Place or remove one star and save right away
    Toggle {
        board: String,
        #[arg(value_parser = clap::value_parser!(Coord).range(1..))]
        row: Coord,
        #[arg(value_parser = clap::value_parser!(Coord).range(1..))]
        col: Coord,
    },
    /// Forget the progress of one board
    Reset { board: String },
    /// Forget the progress of every board
    ResetAll,
    /// Play a board interactively
    Play { board: String },
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    env_logger::Builder::new()
        .filter_level(verbose.log_level_filter())
        .parse_default_env()
        .init();
}

fn format_last_played(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::from_timestamp_millis)
        .map(|time| time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn open_session<'a>(
    board: &BoardInfo,
    storage: &'a FileStorage,
    settings: &Settings,
) -> Session<&'a FileStorage> {
    Session::open(
        board.id.as_str(),
        board.layout.clone(),
        storage,
        &settings.session,
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let file_config = FileConfig::discover(args.config.as_deref())?;
    let settings = Settings::resolve(args.data_dir, args.catalog, file_config);
    log::debug!("settings: {settings:?}");

    let catalog = match &settings.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    let storage = FileStorage::new(&settings.data_dir);
    let stdout = io::stdout();

    match args.command {
        Command::List => {
            let store = GameStateStore::new(&storage);
            let statuses = store.list_board_statuses();
            for board in catalog.boards() {
                let record = statuses.iter().find(|record| record.board_id == board.id);
                let status = record.map_or(BoardStatus::NotStarted, |record| record.status);
                let last_played = format_last_played(record.and_then(|record| record.last_played));
                println!(
                    "{:<12} {:<20} {:<12} {}",
                    board.id, board.name, status, last_played
                );
            }
        }
        Command::Show { board } => {
            let board = catalog.find(&board)?;
            let session = open_session(board, &storage, &settings);
            play::print_session(&session, stdout.lock())?;
        }
        Command::Toggle { board, row, col } => {
            let board = catalog.find(&board)?;
            let mut session = open_session(board, &storage, &settings);
            let outcome = session
                .toggle((row - 1, col - 1))
                .with_context(|| format!("toggling row {row}, column {col}"))?;
            if outcome.has_update() {
                session.flush();
            }
            play::print_session(&session, stdout.lock())?;
            println!("{}", play::describe(outcome, session.game().is_finished()));
        }
        Command::Reset { board } => {
            let board = catalog.find(&board)?;
            GameStateStore::new(&storage)
                .clear(&board.id)
                .with_context(|| format!("resetting {}", board.id))?;
            println!("{} reset.", board.name);
        }
        Command::ResetAll => {
            GameStateStore::new(&storage)
                .clear_all()
                .context("resetting all boards")?;
            println!("All boards reset.");
        }
        Command::Play { board } => {
            let board = catalog.find(&board)?;
            let mut session = open_session(board, &storage, &settings);
            play::run(&mut session, io::stdin().lock(), stdout.lock())?;
        }
    }
    Ok(())
}
