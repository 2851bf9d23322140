use std::path::PathBuf;

use anyhow::Context as _;
use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::Serialize;
use stackfall_engine::{ConfigError, Direction, Game, GameConfig, GameVariant, SpawnSeed};

use crate::{command::GameArg, util};

/// PCG stream for the simulated input, kept apart from the spawner's stream.
const INPUT_STREAM: u64 = 0x5f3a_9c1e_d2b4_7a61;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(super) game: GameArg,
    /// Maximum number of ticks to run
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Outcome of a headless game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SimulationReport {
    variant: GameVariant,
    seed: SpawnSeed,
    ticks: u64,
    locked_pieces: usize,
    lines_cleared: usize,
    game_over: bool,
    /// Final board, one `#`/`.` string per row.
    board: Vec<String>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        game,
        max_ticks,
        output,
    } = arg;

    let config = game.load_config()?;
    eprintln!(
        "Simulating {} game for up to {max_ticks} ticks...",
        config.variant
    );
    let report = simulate(&config, *max_ticks).context("Failed to start game")?;
    eprintln!(
        "Finished after {} ticks: {} pieces locked, {} lines cleared{}",
        report.ticks,
        report.locked_pieces,
        report.lines_cleared,
        if report.game_over { ", game over" } else { "" }
    );

    util::save_json(&report, output.as_deref())?;
    Ok(())
}

/// Plays a game with random left/right/no-op input before every tick.
///
/// Stops when the game ends or after `max_ticks` ticks. The run is fully
/// determined by the config's seed; a config without one gets a fresh seed.
pub(crate) fn simulate(config: &GameConfig, max_ticks: u64) -> Result<SimulationReport, ConfigError> {
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let config = GameConfig {
        seed: Some(seed),
        ..config.clone()
    };
    let mut game = Game::new(&config)?;
    let mut input = input_rng(seed);

    while game.tick_handle().is_running() && game.stats().ticks() < max_ticks {
        match input.random_range(0..3) {
            0 => _ = game.move_horizontal(Direction::Left),
            1 => _ = game.move_horizontal(Direction::Right),
            _ => {}
        }
        game.descend();
    }
    let stats = game.stats();
    Ok(SimulationReport {
        variant: game.variant(),
        seed,
        ticks: stats.ticks(),
        locked_pieces: stats.locked_pieces(),
        lines_cleared: stats.lines_cleared(),
        game_over: game.state().is_game_over(),
        board: game.board().to_string().lines().map(String::from).collect(),
    })
}

/// Folds all 128 seed bits into the input generator's state.
fn input_rng(seed: SpawnSeed) -> Pcg32 {
    let bytes = seed.to_bytes();
    let (mut high, mut low) = ([0; 8], [0; 8]);
    high.copy_from_slice(&bytes[..8]);
    low.copy_from_slice(&bytes[8..]);
    Pcg32::new(u64::from_be_bytes(high) ^ u64::from_be_bytes(low), INPUT_STREAM)
}
