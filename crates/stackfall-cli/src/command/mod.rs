use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stackfall_engine::{GameConfig, GameVariant, SpawnSeed};

use crate::util;

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a seeded game with random moves and print a JSON report
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

/// Game options shared by every mode.
///
/// A config file, when given, is loaded first; the remaining flags override
/// its fields.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    /// Path to a game config file (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Game variant: simple or extended
    #[clap(long)]
    variant: Option<GameVariant>,
    /// Tick interval in milliseconds
    #[clap(long)]
    tick_ms: Option<u64>,
    /// Seed for the shape sequence
    #[clap(long)]
    seed: Option<u64>,
}

impl GameArg {
    pub(crate) fn load_config(&self) -> anyhow::Result<GameConfig> {
        let base = match &self.config {
            Some(path) => {
                let config: GameConfig = util::read_json_file("game config", path)?;
                eprintln!("Loaded game config from {}", path.display());
                config
            }
            None => GameConfig::for_variant(self.variant.unwrap_or_default()),
        };
        let config = self.apply_overrides(base);
        config.validate().context("Invalid game config")?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: GameConfig) -> GameConfig {
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = Some(tick_ms);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(SpawnSeed::from_u64(seed));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, time::Duration};

    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate_flags() {
        let args = CommandArgs::try_parse_from([
            "stackfall",
            "simulate",
            "--variant",
            "extended",
            "--seed",
            "7",
            "--max-ticks",
            "50",
        ])
        .unwrap();
        let Some(Mode::Simulate(arg)) = args.mode else {
            panic!("expected simulate mode");
        };
        let config = arg.game.load_config().unwrap();
        assert_eq!(config.variant, GameVariant::Extended);
        assert_eq!(config.seed, Some(SpawnSeed::from_u64(7)));
        assert_eq!(config.tick_interval(), Duration::from_millis(400));
    }

    #[test]
    fn test_no_subcommand_defaults_to_play() {
        let args = CommandArgs::try_parse_from(["stackfall"]).unwrap();
        assert!(args.mode.is_none());
        assert!(CommandArgs::try_parse_from(["stackfall", "--variant", "simple"]).is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let arg = GameArg {
            tick_ms: Some(250),
            seed: Some(3),
            ..GameArg::default()
        };
        let config = arg.apply_overrides(GameConfig::for_variant(GameVariant::Extended));
        assert_eq!(config.variant, GameVariant::Extended);
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.seed, Some(SpawnSeed::from_u64(3)));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let arg = GameArg {
            tick_ms: Some(0),
            ..GameArg::default()
        };
        let err = arg.load_config().unwrap_err();
        assert!(err.to_string().contains("Invalid game config"));
    }

    #[test]
    fn test_load_config_file() {
        let path = std::env::temp_dir().join(format!(
            "stackfall-config-test-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "variant": "extended", "columns": 12 }"#).unwrap();

        let arg = GameArg {
            config: Some(path.clone()),
            variant: Some(GameVariant::Simple),
            ..GameArg::default()
        };
        let config = arg.load_config();
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.variant, GameVariant::Simple);
        assert_eq!(config.columns, 12);
        assert_eq!(config.rows, 20);
    }

    #[test]
    fn test_missing_config_file() {
        let arg = GameArg {
            config: Some(PathBuf::from("/nonexistent/stackfall.json")),
            ..GameArg::default()
        };
        let err = arg.load_config().unwrap_err();
        assert!(err.to_string().contains("Failed to open game config file"));
    }
}
