use serde::Serialize;

/// Counters accumulated over a game.
///
/// # Example
///
/// ```
/// use stackfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_tick();
/// stats.record_lock(2);
///
/// assert_eq!(stats.ticks(), 1);
/// assert_eq!(stats.locked_pieces(), 1);
/// assert_eq!(stats.lines_cleared(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    ticks: u64,
    locked_pieces: usize,
    lines_cleared: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            locked_pieces: 0,
            lines_cleared: 0,
        }
    }

    /// Number of descend ticks processed while playing.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    pub fn record_lock(&mut self, lines_cleared: usize) {
        self.locked_pieces += 1;
        self.lines_cleared += lines_cleared;
    }
}
