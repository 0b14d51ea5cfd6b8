//! Hooks for watching a search while it runs.
//!
//! An observer is called synchronously once per expansion, after the expanded
//! node's neighbours have been pushed. It only sees read-only views of the search
//! state. Returning [ControlFlow::Break] stops the search with
//! [SearchError::Cancelled](crate::error::SearchError::Cancelled), and returning an
//! error aborts it with [SearchError::Observer](crate::error::SearchError::Observer).
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::coord::Coord;
use crate::error::ObserverError;
use crate::node::{NodeArena, NodeId, NodeState, SearchNode};
use crate::open_set::{ClosedSet, OpenSet};
use crate::pathing_grid::WalkGrid;

pub type StepResult = Result<ControlFlow<()>, ObserverError>;

/// Snapshot of the search after one expansion.
pub struct SearchStep<'a> {
    pub(crate) grid: &'a dyn WalkGrid,
    pub(crate) arena: &'a NodeArena,
    pub(crate) open: &'a OpenSet,
    pub(crate) closed: &'a ClosedSet,
    pub(crate) current: NodeId,
    pub(crate) expanded: usize,
}

impl<'a> SearchStep<'a> {
    pub fn grid(&self) -> &'a dyn WalkGrid {
        self.grid
    }

    /// The node that was just expanded.
    pub fn current(&self) -> &'a SearchNode {
        let arena: &'a NodeArena = self.arena;
        &arena[self.current]
    }

    /// Number of expansions so far, this one included.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Live open nodes in no particular order.
    pub fn open_nodes(&self) -> impl Iterator<Item = &'a SearchNode> + 'a {
        let arena: &'a NodeArena = self.arena;
        let open: &'a OpenSet = self.open;
        open.ids()
            .filter(move |&id| arena.state(id) == NodeState::Open)
            .map(move |id| &arena[id])
    }

    /// Settled nodes in the order they were settled.
    pub fn closed_nodes(&self) -> impl Iterator<Item = &'a SearchNode> + 'a {
        let arena: &'a NodeArena = self.arena;
        let closed: &'a ClosedSet = self.closed;
        closed.ids().map(move |id| &arena[id])
    }

    pub fn open_len(&self) -> usize {
        self.open_nodes().count()
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    pub fn is_open(&self, coord: Coord) -> bool {
        self.open_nodes().any(|node| node.position == coord)
    }

    pub fn is_closed(&self, coord: Coord) -> bool {
        self.closed.contains(&coord)
    }
}

pub trait SearchObserver {
    fn on_step(&mut self, step: &SearchStep<'_>) -> StepResult;
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_step(&mut self, step: &SearchStep<'_>) -> StepResult {
        (**self).on_step(step)
    }
}

/// Observes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObserver;

impl SearchObserver for NoObserver {
    fn on_step(&mut self, _: &SearchStep<'_>) -> StepResult {
        Ok(ControlFlow::Continue(()))
    }
}

/// Wraps an infallible closure, see [from_fn].
#[derive(Clone, Debug)]
pub struct FnObserver<F>(F);

/// Builds an observer from a closure that decides whether the search continues.
pub fn from_fn<F>(f: F) -> FnObserver<F>
where
    F: FnMut(&SearchStep<'_>) -> ControlFlow<()>,
{
    FnObserver(f)
}

impl<F> SearchObserver for FnObserver<F>
where
    F: FnMut(&SearchStep<'_>) -> ControlFlow<()>,
{
    fn on_step(&mut self, step: &SearchStep<'_>) -> StepResult {
        Ok((self.0)(step))
    }
}

/// Stops the search at the next step once the shared flag is raised.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> CancelFlag {
        CancelFlag::default()
    }

    /// Shared handle; storing `true` cancels the search.
    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl SearchObserver for CancelFlag {
    fn on_step(&mut self, _: &SearchStep<'_>) -> StepResult {
        if self.flag.load(Ordering::Relaxed) {
            Ok(ControlFlow::Break(()))
        } else {
            Ok(ControlFlow::Continue(()))
        }
    }
}

/// Logs every step at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceObserver;

impl SearchObserver for TraceObserver {
    fn on_step(&mut self, step: &SearchStep<'_>) -> StepResult {
        let current = step.current();
        debug!(
            "step {}: expanded {} (g={}, h={}, f={}), open: {}, closed: {}",
            step.expanded(),
            current.position,
            current.g,
            current.h,
            current.f,
            step.open_len(),
            step.closed_len()
        );
        Ok(ControlFlow::Continue(()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRecord {
    pub expanded: usize,
    pub current: Coord,
    pub open_len: usize,
    pub closed_len: usize,
}

/// Keeps a [StepRecord] per step, e.g. for replaying a search.
#[derive(Clone, Debug, Default)]
pub struct StepRecorder {
    pub steps: Vec<StepRecord>,
}

impl SearchObserver for StepRecorder {
    fn on_step(&mut self, step: &SearchStep<'_>) -> StepResult {
        self.steps.push(StepRecord {
            expanded: step.expanded(),
            current: step.current().position,
            open_len: step.open_len(),
            closed_len: step.closed_len(),
        });
        Ok(ControlFlow::Continue(()))
    }
}
