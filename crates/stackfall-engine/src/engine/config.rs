use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Board, ConfigError, ShapePosition, SpawnSeed};

/// Game flavor.
///
/// - `Simple`: shapes keep their natural matrix sizes, no lookahead, 100ms ticks
/// - `Extended`: shapes normalized to 4×4, 2-slot lookahead with preview, 400ms ticks
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::FromStr,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum GameVariant {
    #[default]
    #[display("simple")]
    Simple,
    #[display("extended")]
    Extended,
}

impl GameVariant {
    #[must_use]
    pub const fn default_tick_interval(self) -> Duration {
        match self {
            GameVariant::Simple => Duration::from_millis(100),
            GameVariant::Extended => Duration::from_millis(400),
        }
    }

    #[must_use]
    pub const fn has_lookahead(self) -> bool {
        matches!(self, GameVariant::Extended)
    }
}

/// Parameters of a game.
///
/// Missing fields in a JSON config take the simple-variant defaults.
///
/// # Example
///
/// ```
/// use stackfall_engine::{GameConfig, GameVariant};
///
/// let config: GameConfig = serde_json::from_str(r#"{ "variant": "extended" }"#).unwrap();
/// assert_eq!(config.variant, GameVariant::Extended);
/// assert_eq!(config.rows, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: GameVariant,
    pub rows: usize,
    pub columns: usize,
    pub spawn_column: i32,
    /// Tick interval in milliseconds; `None` uses the variant's default.
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<SpawnSeed>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_variant(GameVariant::default())
    }
}

impl GameConfig {
    pub const DEFAULT_SPAWN_COLUMN: i32 = 4;

    #[must_use]
    pub fn for_variant(variant: GameVariant) -> Self {
        Self {
            variant,
            rows: Board::DEFAULT_ROWS,
            columns: Board::DEFAULT_COLUMNS,
            spawn_column: Self::DEFAULT_SPAWN_COLUMN,
            tick_interval_ms: None,
            seed: None,
        }
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval_ms
            .map_or(self.variant.default_tick_interval(), Duration::from_millis)
    }

    #[must_use]
    pub fn spawn_position(&self) -> ShapePosition {
        ShapePosition::new(self.spawn_column, 0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::ZeroDimension {
                rows: self.rows,
                columns: self.columns,
            });
        }
        let in_board = usize::try_from(self.spawn_column).is_ok_and(|col| col < self.columns);
        if !in_board {
            return Err(ConfigError::SpawnOutsideBoard {
                spawn_column: self.spawn_column,
                columns: self.columns,
            });
        }
        if self.tick_interval_ms == Some(0) {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}
