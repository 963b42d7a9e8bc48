//! CLI entry point for taskboard.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use taskboard_app::{ProjectConfig, SeedConfig, TaskBoard};
use taskboard_core::{ListSelector, SystemClock};
use taskboard_store::{Latency, MemoryTaskStore};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use commands::LsFormat;
use shell::Shell;

mod commands;
mod render;
mod shell;

/// Task board with lists, search and simulated store latency.
#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "taskboard: an in-memory task board")]
struct Cli {
    /// Directory holding `.taskboard/config.toml` (defaults to current).
    #[arg(long)]
    workdir: Option<PathBuf>,

    /// Seed JSON file, overriding the configured one.
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Resolve store calls immediately.
    #[arg(long)]
    no_latency: bool,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print the display list.
    Ls {
        /// `all`, `today` or a list id.
        #[arg(long)]
        list: Option<ListSelector>,
        /// Case-insensitive search text.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
    },

    /// Print selectors with task counts.
    Lists,

    /// Print total, completed and due-today counters.
    Stats,

    /// Interactive shell (default).
    Shell,
}

fn main() -> Result<()> {
    let Cli {
        workdir,
        seed,
        no_latency,
        cmd,
    } = Cli::parse();
    install_tracing();

    // Read the local offset before the runtime starts any threads.
    let clock = SystemClock::local();
    let workdir = workdir.unwrap_or_else(|| PathBuf::from("."));
    let config = load_config(&workdir, seed, no_latency)?;
    let command = cmd.unwrap_or(Command::Shell);
    tokio::runtime::Runtime::new()?.block_on(execute_command(&config, clock, command))
}

fn load_config(
    workdir: &Path,
    seed: Option<PathBuf>,
    no_latency: bool,
) -> Result<ProjectConfig> {
    let mut config = ProjectConfig::from_workdir(workdir)?;
    if let Some(path) = seed {
        config.seed = SeedConfig::from_path(path);
    }
    if no_latency {
        config.latency = Latency::none();
    }
    Ok(config)
}

async fn execute_command(
    config: &ProjectConfig,
    clock: SystemClock,
    command: Command,
) -> Result<()> {
    let store = MemoryTaskStore::new(config.load_seed()?)
        .with_latency(config.latency.clone())
        .with_clock(clock);
    let mut board = TaskBoard::new(store, clock, config.board.initial_selector());
    info!(command = ?command, "starting taskboard");

    let mut out = io::stdout().lock();
    match command {
        Command::Ls {
            list,
            search,
            format,
        } => commands::ls(&mut board, list, search, format, &mut out).await,
        Command::Lists => commands::lists(&mut board, &mut out).await,
        Command::Stats => commands::stats(&mut board, &mut out).await,
        Command::Shell => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            Shell::new(board, out).run(input).await.map(|_| ())
        }
    }
}

fn install_tracing() {
    // RUST_LOG overrides the WARN default; the shell owns stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
