use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

use crate::Cost;

/// Neighbour offsets as `(row, col)` deltas. The first four are the orthogonal moves, the
/// remaining four the diagonal ones. Expansion follows this order, which matters for
/// tie-breaking since earlier insertions win among equal `f` values.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// A grid cell addressed by row and column. Coordinates may be negative so that
/// candidates past the grid edge can be represented before being rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Coord {
        Coord::new(self.row + d_row, self.col + d_col)
    }

    /// Candidate neighbours in expansion order, without any bounds filtering.
    pub fn neighbours(self, allow_diagonal: bool) -> SmallVec<[Coord; 8]> {
        let n = if allow_diagonal { 8 } else { 4 };
        NEIGHBOUR_OFFSETS[..n]
            .iter()
            .map(|&(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    pub fn squared_distance(&self, other: &Coord) -> Cost {
        let dr = (self.row - other.row) as Cost;
        let dc = (self.col - other.col) as Cost;
        dr * dr + dc * dc
    }

    pub fn chebyshev_distance(&self, other: &Coord) -> Cost {
        let dr = (self.row - other.row).abs() as Cost;
        let dc = (self.col - other.col).abs() as Cost;
        dr.max(dc)
    }

    pub fn manhattan_distance(&self, other: &Coord) -> Cost {
        ((self.row - other.row).abs() + (self.col - other.col).abs()) as Cost
    }

    /// True if `other` is one king move away.
    pub fn is_adjacent(&self, other: &Coord, allow_diagonal: bool) -> bool {
        if allow_diagonal {
            self.chebyshev_distance(other) == 1
        } else {
            self.manhattan_distance(other) == 1
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Coord {
        Coord::new(row, col)
    }
}

/// [Point] uses `x` for the column and `y` for the row.
impl From<Point> for Coord {
    fn from(p: Point) -> Coord {
        Coord::new(p.y, p.x)
    }
}

impl From<Coord> for Point {
    fn from(c: Coord) -> Point {
        Point::new(c.col, c.row)
    }
}
