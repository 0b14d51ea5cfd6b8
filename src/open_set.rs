use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::coord::Coord;
use crate::node::NodeId;
use crate::Cost;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Copy, Debug)]
struct SmallestCostHolder {
    estimated_cost: Cost,
    index: NodeId,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.index == other.index
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: lowest estimated cost first, then the node that
        // was inserted first.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Frontier of the search. Entries are never removed eagerly; entries whose node
/// has been superseded or closed are skipped by the caller when popped.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<SmallestCostHolder>,
}

impl OpenSet {
    pub fn push(&mut self, index: NodeId, estimated_cost: Cost) {
        self.heap.push(SmallestCostHolder {
            estimated_cost,
            index,
        });
    }

    /// Removes the entry with minimum `f`, earliest insertion first among equals.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|holder| holder.index)
    }

    /// Raw entries in arbitrary order, stale ones included.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.heap.iter().map(|holder| holder.index)
    }
}

/// Settled cells in the order they were settled, each mapped to the node that
/// settled it.
#[derive(Debug, Default)]
pub(crate) struct ClosedSet {
    settled: FxIndexMap<Coord, NodeId>,
}

impl ClosedSet {
    /// Records `position` as settled by `id` unless it already is. Returns whether
    /// this was the first settlement.
    pub fn settle(&mut self, position: Coord, id: NodeId) -> bool {
        match self.settled.entry(position) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(e) => {
                e.insert(id);
                true
            }
        }
    }

    pub fn contains(&self, position: &Coord) -> bool {
        self.settled.contains_key(position)
    }

    pub fn len(&self) -> usize {
        self.settled.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.settled.values().copied()
    }
}
