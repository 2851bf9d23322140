use std::{collections::VecDeque, sync::Arc};

use crate::{
    Board, ConfigError, GameConfig, GameVariant, NORMALIZED_SIZE, Shape, ShapeCatalog,
    ShapeDefinition, ShapePosition, Spawner,
};

use super::{stats::GameStats, tick::TickHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Notification emitted by the engine, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// The falling shape locked; full rows were cleared.
    PieceLocked { lines_cleared: usize },
    /// A freshly spawned shape collided; the tick handle has been stopped.
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub const fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    Moved,
    /// The target cells were occupied or outside the board; nothing changed.
    Blocked,
    /// No falling shape, or the game is over.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DescendOutcome {
    Descended,
    Locked { lines_cleared: usize },
    GameOver,
    /// The game was already over; nothing changed.
    Halted,
}

/// Falling-shape game state machine.
///
/// Owns the board, the spawner (and its lookahead), the falling shape and the
/// tick handle. The falling shape is kept placed on the board between calls,
/// so the board always shows it.
///
/// Every operation runs to completion synchronously. The host calls
/// [`descend`](Self::descend) on each tick and
/// [`move_left`](Self::move_left)/[`move_right`](Self::move_right) on input.
///
/// # Game Flow
///
/// 1. [`Game::new`] spawns and places the first shape
/// 2. Moves shift the shape sideways when the target cells are free
/// 3. Each tick moves it down one row, or locks it when it cannot move
/// 4. After a lock, full rows clear and the next shape spawns
/// 5. A spawn that collides ends the game and stops the tick handle
///
/// # Example
///
/// ```
/// use stackfall_engine::{Game, GameConfig, GameEvent, GameVariant};
///
/// let mut game = Game::new(&GameConfig::for_variant(GameVariant::Extended)).unwrap();
/// game.move_left();
///
/// while game.state().is_playing() {
///     game.descend();
/// }
///
/// assert!(!game.tick_handle().is_running());
/// assert_eq!(game.drain_events().filter(|e| e.is_game_over()).count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    variant: GameVariant,
    board: Board,
    spawner: Spawner,
    active: Option<Shape>,
    state: GameState,
    tick: TickHandle,
    events: VecDeque<GameEvent>,
    stats: GameStats,
}

impl Game {
    /// Starts a game with the variant's catalog on an empty board.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_catalog(config, ShapeCatalog::for_variant(config.variant))
    }

    /// Starts a game drawing from a custom catalog.
    pub fn with_catalog(config: &GameConfig, catalog: ShapeCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.rows, config.columns);
        Ok(Self::start(config, catalog, board))
    }

    /// Starts a game on a pre-filled board.
    ///
    /// The board's dimensions replace the configured ones.
    pub fn with_board(
        config: &GameConfig,
        catalog: ShapeCatalog,
        board: Board,
    ) -> Result<Self, ConfigError> {
        let config = GameConfig {
            rows: board.row_count(),
            columns: board.column_count(),
            ..config.clone()
        };
        config.validate()?;
        Ok(Self::start(&config, catalog, board))
    }

    fn start(config: &GameConfig, catalog: ShapeCatalog, board: Board) -> Self {
        let lookahead = config.variant.has_lookahead();
        let spawner = match config.seed {
            Some(seed) => Spawner::with_seed(catalog, lookahead, config.spawn_position(), seed),
            None => Spawner::new(catalog, lookahead, config.spawn_position()),
        };
        let mut game = Self {
            variant: config.variant,
            board,
            spawner,
            active: None,
            state: GameState::Playing,
            tick: TickHandle::new(config.tick_interval()),
            events: VecDeque::new(),
            stats: GameStats::new(),
        };
        game.spawn_active();
        game
    }

    #[must_use]
    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    /// The occupancy grid, including the placed falling shape.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active(&self) -> Option<&Shape> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn tick_handle(&self) -> &TickHandle {
        &self.tick
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn spawn_position(&self) -> ShapePosition {
        self.spawner.spawn_position()
    }

    /// The template that spawns next, when the variant has lookahead.
    #[must_use]
    pub fn next(&self) -> Option<&Arc<ShapeDefinition>> {
        self.spawner.next()
    }

    /// A 4×4 grid with the next template placed at its top-left corner.
    #[must_use]
    pub fn preview(&self) -> Option<Board> {
        let next = self.next()?;
        let size = NORMALIZED_SIZE.max(next.width()).max(next.height());
        let mut grid = Board::new(size, size);
        grid.place(&Shape::new(Arc::clone(next), ShapePosition::new(0, 0)));
        Some(grid)
    }

    /// Removes and returns the pending events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.move_horizontal(Direction::Left)
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.move_horizontal(Direction::Right)
    }

    /// Shifts the falling shape one column, or leaves it where it is.
    ///
    /// The shape is lifted off the board, shifted, checked, shifted back if
    /// it collides, and placed again; the board never ends up partially
    /// shifted.
    pub fn move_horizontal(&mut self, direction: Direction) -> MoveOutcome {
        if self.state.is_game_over() {
            return MoveOutcome::Ignored;
        }
        let Some(shape) = self.active.as_mut() else {
            return MoveOutcome::Ignored;
        };

        self.board.remove(shape);
        shape.shift(direction.dx(), 0);
        let outcome = if self.board.check_collision(shape) {
            shape.shift(-direction.dx(), 0);
            MoveOutcome::Blocked
        } else {
            MoveOutcome::Moved
        };
        self.board.place(shape);
        outcome
    }

    /// Advances the game by one tick.
    ///
    /// Moves the falling shape down one row. If it cannot move, it locks in
    /// place, full rows are cleared, and the next shape spawns. A spawn that
    /// collides immediately ends the game.
    pub fn descend(&mut self) -> DescendOutcome {
        if self.state.is_game_over() {
            return DescendOutcome::Halted;
        }
        let Some(mut shape) = self.active.take() else {
            return DescendOutcome::Halted;
        };
        self.stats.record_tick();

        self.board.remove(&shape);
        shape.shift(0, 1);
        if !self.board.check_collision(&shape) {
            self.board.place(&shape);
            self.active = Some(shape);
            return DescendOutcome::Descended;
        }

        shape.shift(0, -1);
        self.board.place(&shape);
        let lines_cleared = self.board.clear_filled_lines();
        self.stats.record_lock(lines_cleared);
        self.events
            .push_back(GameEvent::PieceLocked { lines_cleared });

        if self.spawn_active() {
            DescendOutcome::Locked { lines_cleared }
        } else {
            DescendOutcome::GameOver
        }
    }

    /// Spawns the next shape and places it, or ends the game if it collides.
    fn spawn_active(&mut self) -> bool {
        let shape = self.spawner.spawn();
        if self.board.check_collision(&shape) {
            self.state = GameState::GameOver;
            self.tick.stop();
            self.events.push_back(GameEvent::GameOver);
            return false;
        }
        self.board.place(&shape);
        self.active = Some(shape);
        true
    }
}
