use std::ops::ControlFlow;

use fxhash::FxHashMap;
use log::{debug, info, trace, warn};

use crate::coord::Coord;
use crate::error::{InvalidInput, Result, SearchError};
use crate::node::{NodeArena, NodeId, NodeState, SearchNode};
use crate::observer::{NoObserver, SearchObserver, SearchStep};
use crate::open_set::{ClosedSet, OpenSet};
use crate::pathing_grid::WalkGrid;
use crate::Cost;

pub mod heuristic;

use heuristic::{Heuristic, SquaredEuclidean};

/// What happens to a neighbour whose cell is already known to the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Skip cells that are closed or already open with an equal or lower `g`; a
    /// cheaper route to an open cell supersedes the old entry. Every cell is expanded
    /// at most once.
    #[default]
    Filter,
    /// Push every candidate. Cells can be expanded repeatedly, and with an
    /// unreachable goal the search does not terminate unless
    /// [SearchConfig::max_expansions] is set.
    Retain,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub duplicates: DuplicatePolicy,
    /// Moves along the four diagonals in addition to the four orthogonal ones. Both
    /// kinds of step cost 1.
    pub allow_diagonal: bool,
    /// Fails with [SearchError::ExpansionLimit] once this many nodes were expanded.
    pub max_expansions: Option<usize>,
    /// Returns an empty path without searching if the grid reports the start and goal
    /// to be on different connected components.
    pub prune_unreachable: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            duplicates: DuplicatePolicy::Filter,
            allow_diagonal: true,
            max_expansions: None,
            prune_unreachable: false,
        }
    }
}

/// Result of a finished search. An empty `path` means the goal is unreachable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub path: Vec<Coord>,
    /// `g` of the goal node, 0 if no path was found.
    pub cost: Cost,
    /// Number of nodes whose neighbours were generated.
    pub expanded: usize,
    /// Number of nodes created, the start included.
    pub generated: usize,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// A* over a [WalkGrid]. Holds configuration only; every call owns its own search
/// state, so a finder can be reused freely.
#[derive(Clone, Debug, Default)]
pub struct PathFinder<H = SquaredEuclidean> {
    pub heuristic: H,
    pub config: SearchConfig,
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder::default()
    }
}

impl<H: Heuristic> PathFinder<H> {
    pub fn with_heuristic(heuristic: H) -> PathFinder<H> {
        PathFinder {
            heuristic,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> PathFinder<H> {
        self.config = config;
        self
    }

    /// Computes a path from `start` to `goal`, both included. The path is empty if
    /// the goal cannot be reached, including when either end is blocked.
    pub fn search<G: WalkGrid>(&self, grid: &G, start: Coord, goal: Coord) -> Result<Vec<Coord>> {
        self.solve(grid, start, goal, &mut NoObserver)
            .map(|outcome| outcome.path)
    }

    /// Like [search](Self::search), calling `observer` after every expansion.
    pub fn search_observed<G, O>(
        &self,
        grid: &G,
        start: Coord,
        goal: Coord,
        observer: &mut O,
    ) -> Result<Vec<Coord>>
    where
        G: WalkGrid,
        O: SearchObserver + ?Sized,
    {
        self.solve(grid, start, goal, observer)
            .map(|outcome| outcome.path)
    }

    /// Runs the search and reports the path together with its cost and the amount
    /// of work done.
    pub fn solve<G, O>(
        &self,
        grid: &G,
        start: Coord,
        goal: Coord,
        observer: &mut O,
    ) -> Result<SearchOutcome>
    where
        G: WalkGrid,
        O: SearchObserver + ?Sized,
    {
        validate(grid, start, goal)?;
        if !grid.is_walkable(start) || !grid.is_walkable(goal) {
            info!("{} or {} is blocked, no path exists", start, goal);
            return Ok(SearchOutcome::default());
        }
        if self.config.prune_unreachable
            && grid.same_component(start, goal, self.config.allow_diagonal) == Some(false)
        {
            info!("{} is not reachable from {}", goal, start);
            return Ok(SearchOutcome::default());
        }

        let filter = self.config.duplicates == DuplicatePolicy::Filter;
        let mut arena = NodeArena::default();
        let mut open = OpenSet::default();
        let mut closed = ClosedSet::default();
        // Open node per cell; only maintained when filtering.
        let mut open_index: FxHashMap<Coord, NodeId> = FxHashMap::default();
        let mut expanded = 0;

        let start_id = arena.push(SearchNode::start(start));
        open.push(start_id, 0);
        if filter {
            open_index.insert(start, start_id);
        }

        while let Some(id) = open.pop() {
            if arena.state(id) != NodeState::Open {
                continue;
            }
            arena.set_state(id, NodeState::Closed);
            let position = arena[id].position;
            let g = arena[id].g;
            if filter {
                open_index.remove(&position);
            }
            closed.settle(position, id);

            if position == goal {
                let path = arena.path_to(id);
                debug!(
                    "Found path of cost {} from {} to {}: {} expanded, {} generated",
                    g,
                    start,
                    goal,
                    expanded,
                    arena.len()
                );
                return Ok(SearchOutcome {
                    path,
                    cost: g,
                    expanded,
                    generated: arena.len(),
                });
            }

            if let Some(limit) = self.config.max_expansions {
                if expanded >= limit {
                    warn!("Expansion limit of {} reached searching {} -> {}", limit, start, goal);
                    return Err(SearchError::ExpansionLimit { limit });
                }
            }
            expanded += 1;
            trace!("Expanding {} (g={}, f={})", position, g, arena[id].f);

            let new_g = g + 1;
            for next in position.neighbours(self.config.allow_diagonal) {
                if !grid.is_walkable(next) {
                    continue;
                }
                if filter {
                    if closed.contains(&next) {
                        continue;
                    }
                    if let Some(&other) = open_index.get(&next) {
                        if arena[other].g <= new_g {
                            continue;
                        }
                        arena.set_state(other, NodeState::Superseded);
                    }
                }
                let h = self.heuristic.estimate(next, goal);
                let child = arena.push(SearchNode::child(next, id, new_g, h));
                open.push(child, arena[child].f);
                if filter {
                    open_index.insert(next, child);
                }
            }

            let step = SearchStep {
                grid,
                arena: &arena,
                open: &open,
                closed: &closed,
                current: id,
                expanded,
            };
            match observer.on_step(&step) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => {
                    info!("Search {} -> {} cancelled after {} expansions", start, goal, expanded);
                    return Err(SearchError::Cancelled { expanded });
                }
                Err(e) => return Err(SearchError::Observer(e)),
            }
        }

        debug!(
            "Open set exhausted: {} is unreachable from {} ({} expanded)",
            goal, start, expanded
        );
        Ok(SearchOutcome {
            path: Vec::new(),
            cost: 0,
            expanded,
            generated: arena.len(),
        })
    }
}

fn validate<G: WalkGrid>(grid: &G, start: Coord, goal: Coord) -> Result<(), InvalidInput> {
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        return Err(InvalidInput::EmptyGrid { width, height });
    }
    if !grid.in_bounds(start) {
        return Err(InvalidInput::StartOutOfBounds {
            start,
            width,
            height,
        });
    }
    if !grid.in_bounds(goal) {
        return Err(InvalidInput::GoalOutOfBounds {
            goal,
            width,
            height,
        });
    }
    Ok(())
}
