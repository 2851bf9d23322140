//! Game state machine built on the [`core`](crate::core) primitives.
//!
//! - [`Game`] - board, falling shape, spawning, descent and game over
//! - [`GameConfig`] / [`GameVariant`] - board size, tick interval, lookahead
//! - [`Spawner`] / [`LookaheadQueue`] - random shape selection with optional preview
//! - [`SpawnSeed`] - seed for reproducible shape sequences
//! - [`TickHandle`] - the tick interval the host drives, stopped on game over
//! - [`GameStats`] - tick, lock and line counters
//!
//! # Game Flow
//!
//! 1. Build a [`GameConfig`] and start a [`Game`]; the first shape is placed
//! 2. The host calls [`Game::descend`] every [`TickHandle::interval`]
//! 3. Input calls [`Game::move_left`] / [`Game::move_right`]
//! 4. The host drains [`GameEvent`]s and stops ticking on [`GameEvent::GameOver`]

pub use self::{config::*, game::*, lookahead::*, spawner::*, stats::*, tick::*};

mod config;
mod game;
mod lookahead;
mod spawner;
mod stats;
mod tick;
