use std::ops::Index;

use crate::coord::Coord;
use crate::Cost;

/// Index of a [SearchNode] in the arena of a single search. Ids increase with
/// insertion order, which the open set uses to break ties.
pub type NodeId = usize;

/// One explored cell. Parents are arena indices, so nodes never own each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub position: Coord,
    pub parent: Option<NodeId>,
    pub g: Cost,
    pub h: Cost,
    pub f: Cost,
}

impl SearchNode {
    pub fn start(position: Coord) -> SearchNode {
        SearchNode {
            position,
            parent: None,
            g: 0,
            h: 0,
            f: 0,
        }
    }

    pub fn child(position: Coord, parent: NodeId, g: Cost, h: Cost) -> SearchNode {
        SearchNode {
            position,
            parent: Some(parent),
            g,
            h,
            f: g.saturating_add(h),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeState {
    Open,
    /// Replaced in the open set by a node for the same cell with lower `g`.
    Superseded,
    Closed,
}

/// Owns every node created during one search.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<SearchNode>,
    states: Vec<NodeState>,
}

impl NodeArena {
    pub fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        self.states.push(NodeState::Open);
        self.nodes.len() - 1
    }

    pub fn state(&self, id: NodeId) -> NodeState {
        self.states[id]
    }

    pub fn set_state(&mut self, id: NodeId, state: NodeState) {
        self.states[id] = state;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Walks parent links from `id` back to the start and returns the cells in
    /// start-to-`id` order.
    pub fn path_to(&self, id: NodeId) -> Vec<Coord> {
        let mut path: Vec<Coord> = std::iter::successors(Some(id), |&i| self.nodes[i].parent)
            .map(|i| self.nodes[i].position)
            .collect();
        path.reverse();
        path
    }
}

impl Index<NodeId> for NodeArena {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_sums_f() {
        let node = SearchNode::child(Coord::new(1, 1), 0, 3, 4);
        assert_eq!(node.f, 7);
        assert_eq!(node.parent, Some(0));
        assert_eq!(SearchNode::start(Coord::new(0, 0)).f, 0);
    }

    #[test]
    fn child_f_saturates() {
        let node = SearchNode::child(Coord::new(0, 1), 0, 1, Cost::MAX);
        assert_eq!(node.f, Cost::MAX);
        assert_eq!(node.h, Cost::MAX);
    }

    #[test]
    fn path_follows_parents() {
        let mut arena = NodeArena::default();
        let a = arena.push(SearchNode::start(Coord::new(0, 0)));
        let b = arena.push(SearchNode::child(Coord::new(1, 1), a, 1, 0));
        let _stray = arena.push(SearchNode::child(Coord::new(0, 1), a, 1, 0));
        let c = arena.push(SearchNode::child(Coord::new(2, 1), b, 2, 0));
        assert_eq!(
            arena.path_to(c),
            vec![Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 1)]
        );
        assert_eq!(arena.path_to(a), vec![Coord::new(0, 0)]);
        assert_eq!(arena.state(c), NodeState::Open);
        assert_eq!(arena.len(), 4);
    }
}
