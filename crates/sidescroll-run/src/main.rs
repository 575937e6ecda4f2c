//! Headless host for the sidescroll engine.
//!
//! Builds a game from optional JSON config and level files, drives it with a
//! scripted or autopilot input source and prints render frames and a run
//! summary as JSON lines. `--batch` runs several seeds in parallel.

mod driver;
mod runner;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use sidescroll_core::{Game, GameConfig, LevelTable};
use tracing::{info, Level};

use crate::driver::{Autopilot, Script};
use crate::runner::{RunOptions, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "sidescroll-run", about = "Run the sidescroll engine headless")]
struct Cli {
    /// JSON file overriding the default configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON level table. Defaults to the seeded reference layout.
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Seed for the reference layout. With `--batch`, the first seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum ticks per game.
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// JSON input script (`[{"ticks": 60, "keys": "RIGHT | JUMP"}, ...]`).
    /// Without one the autopilot plays.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print a render frame every N ticks. Zero prints none.
    #[arg(long, default_value_t = 0)]
    frames_every: u64,

    /// Pace ticks at the fixed tick rate instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Run this many consecutive seeds in parallel and print one summary each.
    #[arg(long, default_value_t = 1)]
    batch: u64,

    /// Log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    GameConfig::from_json(&read(path)?)
        .with_context(|| format!("loading config {}", path.display()))
}

fn load_levels(path: Option<&Path>) -> Result<Option<LevelTable>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let table = LevelTable::from_json(&read(path)?)
        .with_context(|| format!("loading levels {}", path.display()))?;
    Ok(Some(table))
}

fn load_script(path: &Path) -> Result<Script> {
    let script = Script::from_json(&read(path)?)
        .with_context(|| format!("loading script {}", path.display()))?;
    info!(path = %path.display(), ticks = script.total_ticks(), "script loaded");
    Ok(script)
}

fn build_game(config: GameConfig, levels: Option<&LevelTable>, seed: u64) -> Result<Game> {
    let game = match levels {
        Some(table) => Game::with_levels(config, table.clone(), seed),
        None => Game::new(config, seed),
    };
    game.with_context(|| format!("creating game for seed {seed}"))
}

fn play<W: Write>(
    game: &mut Game,
    script: Option<&Script>,
    options: RunOptions,
    out: &mut W,
) -> Result<RunSummary> {
    match script {
        Some(script) => runner::run(game, &mut script.clone(), options, out),
        None => runner::run(game, &mut Autopilot::new(), options, out),
    }
}

fn print_summary<W: Write>(out: &mut W, summary: &RunSummary) -> Result<()> {
    serde_json::to_writer(&mut *out, summary).context("writing summary")?;
    writeln!(out).context("writing summary")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let levels = load_levels(cli.levels.as_deref())?;
    let script = cli.script.as_deref().map(load_script).transpose()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.batch > 1 {
        let options = RunOptions {
            max_ticks: cli.ticks,
            frames_every: 0,
            realtime: false,
        };
        info!(first_seed = cli.seed, games = cli.batch, "batch run");
        let summaries: Vec<RunSummary> = (cli.seed..cli.seed.saturating_add(cli.batch))
            .into_par_iter()
            .map(|seed| {
                let mut game = build_game(config, levels.as_ref(), seed)?;
                play(&mut game, script.as_ref(), options, &mut io::sink())
            })
            .collect::<Result<_>>()?;
        for summary in &summaries {
            print_summary(&mut out, summary)?;
        }
    } else {
        let options = RunOptions {
            max_ticks: cli.ticks,
            frames_every: cli.frames_every,
            realtime: cli.realtime,
        };
        let mut game = build_game(config, levels.as_ref(), cli.seed)?;
        let summary = play(&mut game, script.as_ref(), options, &mut out)?;
        print_summary(&mut out, &summary)?;
    }

    out.flush().context("flushing stdout")?;
    Ok(())
}
