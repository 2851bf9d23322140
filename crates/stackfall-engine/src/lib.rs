pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({row}, {col}) is outside the {rows}x{columns} board")]
pub struct OutOfBoundsError {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("shape catalog must contain at least one shape")]
pub struct EmptyCatalogError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeDefinitionError {
    #[display("shape `{name}` has no cells")]
    Empty { name: String },
    #[display("shape `{name}` row {row} has {len} cells, expected {expected}")]
    Ragged {
        name: String,
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("shape `{name}` has non-binary value {value} at ({row}, {col})")]
    NonBinary {
        name: String,
        row: usize,
        col: usize,
        value: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardPatternError {
    #[display("board pattern has no rows")]
    Empty,
    #[display("board pattern row {row} has {len} columns, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("unexpected character {ch:?} at ({row}, {col}), expected '#' or '.'")]
    InvalidChar { row: usize, col: usize, ch: char },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board dimensions must be non-zero, got {rows}x{columns}")]
    ZeroDimension { rows: usize, columns: usize },
    #[display("spawn column {spawn_column} is outside a board {columns} columns wide")]
    SpawnOutsideBoard { spawn_column: i32, columns: usize },
    #[display("tick interval must be at least 1ms")]
    ZeroTickInterval,
}
