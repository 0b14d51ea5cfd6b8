use crate::coord::Coord;
use crate::Cost;

/// Estimate of the remaining cost from a cell to the goal.
pub trait Heuristic {
    fn estimate(&self, from: Coord, goal: Coord) -> Cost;
}

/// `dr² + dc²`. Overestimates on unit-cost grids, so paths are not guaranteed to be
/// shortest, but the search heads for the goal aggressively.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquaredEuclidean;

impl Heuristic for SquaredEuclidean {
    fn estimate(&self, from: Coord, goal: Coord) -> Cost {
        from.squared_distance(&goal)
    }
}

/// Exact distance on an obstacle-free 8-grid where diagonal steps cost the same as
/// straight ones. Admissible and consistent for such grids.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chebyshev;

impl Heuristic for Chebyshev {
    fn estimate(&self, from: Coord, goal: Coord) -> Cost {
        from.chebyshev_distance(&goal)
    }
}

/// Admissible and consistent when diagonal moves are disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, from: Coord, goal: Coord) -> Cost {
        from.manhattan_distance(&goal)
    }
}

/// Always zero, which turns the search into Dijkstra's algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHeuristic;

impl Heuristic for NoHeuristic {
    fn estimate(&self, _: Coord, _: Coord) -> Cost {
        0
    }
}

/// Scales another heuristic. Factors above 1 give weighted A*, which favours cells
/// close to the goal and usually expands fewer nodes at the price of optimality.
#[derive(Clone, Copy, Debug)]
pub struct Weighted<H> {
    pub inner: H,
    pub factor: f32,
}

impl<H> Weighted<H> {
    pub fn new(inner: H, factor: f32) -> Weighted<H> {
        Weighted { inner, factor }
    }
}

impl<H: Heuristic> Heuristic for Weighted<H> {
    fn estimate(&self, from: Coord, goal: Coord) -> Cost {
        (self.inner.estimate(from, goal) as f32 * self.factor) as Cost
    }
}

impl<F> Heuristic for F
where
    F: Fn(Coord, Coord) -> Cost,
{
    fn estimate(&self, from: Coord, goal: Coord) -> Cost {
        self(from, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimates() {
        let from = Coord::new(1, 2);
        let goal = Coord::new(4, 6);
        assert_eq!(SquaredEuclidean.estimate(from, goal), 25);
        assert_eq!(Chebyshev.estimate(from, goal), 4);
        assert_eq!(Manhattan.estimate(from, goal), 7);
        assert_eq!(NoHeuristic.estimate(from, goal), 0);
        assert_eq!(Weighted::new(Chebyshev, 1.5).estimate(from, goal), 6);
        let closure = |a: Coord, b: Coord| (a.row - b.row).abs() as Cost;
        assert_eq!(closure.estimate(from, goal), 3);
    }
}
