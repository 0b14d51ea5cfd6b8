//! Error types for grid_astar

use thiserror::Error;

use crate::coord::Coord;

/// Failure reported by a [SearchObserver](crate::observer::SearchObserver).
pub type ObserverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Input rejected before any search work is done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("start {start} lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        start: Coord,
        width: usize,
        height: usize,
    },

    #[error("goal {goal} lies outside the {width}x{height} grid")]
    GoalOutOfBounds {
        goal: Coord,
        width: usize,
        height: usize,
    },
}

/// Search error type. An unreachable goal is not an error; it yields an empty path.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("search cancelled by observer after {expanded} expansions")]
    Cancelled { expanded: usize },

    #[error("expansion limit of {limit} reached")]
    ExpansionLimit { limit: usize },

    #[error("observer failed: {0}")]
    Observer(#[source] ObserverError),
}

/// Errors building a [PathingGrid](crate::pathing_grid::PathingGrid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell {cell:?} at row {row}, column {col}")]
    UnknownCell { cell: char, row: usize, col: usize },
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
