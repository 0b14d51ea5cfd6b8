//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on grids of
//! walkable and blocked cells. Movement is 8-directional by default and every step,
//! straight or diagonal, costs 1. The heuristic is pluggable; the default squared
//! Euclidean distance heads for the goal aggressively but does not guarantee
//! shortest paths, use [Chebyshev](solver::heuristic::Chebyshev) when that matters.
//!
//! A search can be watched step by step through a
//! [SearchObserver](observer::SearchObserver), which keeps rendering and pacing out
//! of the algorithm:
//!
//! ```
//! use grid_astar::{Coord, PathFinder, PathingGrid};
//!
//! let grid: PathingGrid = "\
//!     ....
//!     .##.
//!     ...."
//!     .parse()
//!     .unwrap();
//! let path = PathFinder::new()
//!     .search(&grid, Coord::new(0, 0), Coord::new(2, 3))
//!     .unwrap();
//! assert_eq!(path.first(), Some(&Coord::new(0, 0)));
//! assert_eq!(path.last(), Some(&Coord::new(2, 3)));
//! ```
pub mod coord;
pub mod error;
pub mod node;
pub mod observer;
mod open_set;
pub mod pathing_grid;
pub mod solver;

use itertools::Itertools;

pub use coord::Coord;
pub use error::{InvalidInput, SearchError};
pub use node::SearchNode;
pub use pathing_grid::{PathingGrid, WalkGrid};
pub use solver::{DuplicatePolicy, PathFinder, SearchConfig, SearchOutcome};

/// Path cost unit. Signed so that squared distances of far-apart cells fit.
pub type Cost = i64;

/// Cost of following `path`, one per step.
pub fn path_cost(path: &[Coord]) -> Cost {
    path.len().saturating_sub(1) as Cost
}

/// Checks that `path` is non-empty, only visits walkable cells and only makes single
/// steps (diagonal ones only if `allow_diagonal`).
pub fn is_valid_path<G: WalkGrid + ?Sized>(grid: &G, path: &[Coord], allow_diagonal: bool) -> bool {
    !path.is_empty()
        && path.iter().all(|&c| grid.is_walkable(c))
        && path
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.is_adjacent(b, allow_diagonal))
}
