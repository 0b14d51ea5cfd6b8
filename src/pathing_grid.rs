use core::fmt;
use std::str::FromStr;

use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};
use petgraph::unionfind::UnionFind;

use crate::coord::Coord;
use crate::error::GridError;

/// The view of a grid the search needs. Implementations must be immutable for the
/// duration of a search.
pub trait WalkGrid {
    /// Number of columns.
    fn width(&self) -> usize;
    /// Number of rows.
    fn height(&self) -> usize;
    /// False for blocked cells and for anything outside the grid.
    fn is_walkable(&self, coord: Coord) -> bool;

    fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.height()
            && (coord.col as usize) < self.width()
    }

    /// Whether `a` and `b` are in the same connected component, if the grid tracks
    /// components for the requested connectivity. `None` means unknown.
    fn same_component(&self, _a: Coord, _b: Coord, _diagonal: bool) -> Option<bool> {
        None
    }
}

/// [PathingGrid] stores which cells are blocked ([true]) or free ([false]) in a
/// [BoolGrid] and maintains connected components in a [UnionFind] so that unreachable
/// goals can be detected without flood-filling.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    components_diagonal: bool,
}

impl PathingGrid {
    /// Creates a grid with every cell set to `blocked`. Components are generated for
    /// 8-connectivity.
    pub fn new(width: usize, height: usize, blocked: bool) -> Result<PathingGrid, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        Ok(PathingGrid::from_grid(BoolGrid::new(width, height, blocked)))
    }

    /// Builds a grid from rows of cells where zero is free and anything else blocked.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<PathingGrid, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let mut grid = BoolGrid::new(width, height, false);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            for (col, &v) in cells.iter().enumerate() {
                grid.set(col, row, v != 0);
            }
        }
        Ok(PathingGrid::from_grid(grid))
    }

    /// Wraps an existing [BoolGrid] and generates its components for 8-connectivity.
    pub fn from_grid(grid: BoolGrid) -> PathingGrid {
        let mut pathing_grid = PathingGrid {
            components: UnionFind::new(grid.width * grid.height),
            grid,
            components_dirty: false,
            components_diagonal: true,
        };
        pathing_grid.generate_components(true);
        pathing_grid
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        let point = Point::from(coord);
        self.grid
            .point_in_bounds(point)
            .then(|| self.grid.get_ix_point(&point))
    }

    fn is_free(&self, coord: Coord) -> bool {
        let point = Point::from(coord);
        self.grid.point_in_bounds(point) && !self.grid.get_point(point)
    }

    /// Whether a cell is blocked. Cells outside the grid count as blocked.
    pub fn get(&self, coord: Coord) -> bool {
        !self.is_free(coord)
    }

    /// Updates a cell. Joins newly connected components and flags the components as
    /// dirty if they are (potentially) broken apart into multiple.
    pub fn set(&mut self, coord: Coord, blocked: bool) {
        let Some(ix) = self.index(coord) else {
            warn!("Ignoring update of {} outside the grid", coord);
            return;
        };
        let point = Point::from(coord);
        let was_blocked = self.grid.get_point(point);
        self.grid.set_point(point, blocked);
        if blocked && !was_blocked {
            self.components_dirty = true;
        } else if !blocked && was_blocked {
            for n in coord.neighbours(self.components_diagonal) {
                if self.is_free(n) {
                    let n_ix = self.grid.get_ix_point(&n.into());
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Retrieves the component id a given cell belongs to.
    pub fn get_component(&self, coord: Coord) -> Option<usize> {
        self.index(coord).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are free and on the same component.
    pub fn reachable(&self, start: Coord, goal: Coord) -> bool {
        if !self.is_free(start) || !self.is_free(goal) {
            return false;
        }
        let start_ix = self.grid.get_ix_point(&start.into());
        let goal_ix = self.grid.get_ix_point(&goal.into());
        self.components.equiv(start_ix, goal_ix)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: Coord, goal: Coord) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components(self.components_diagonal);
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours, using
    /// 8-connectivity if `diagonal` is set and 4-connectivity otherwise.
    pub fn generate_components(&mut self, diagonal: bool) {
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        self.components_diagonal = diagonal;
        // Forward half of the neighbourhood; the other half is covered from the other side.
        let forward: &[(i32, i32)] = if diagonal {
            &[(0, 1), (1, -1), (1, 0), (1, 1)]
        } else {
            &[(0, 1), (1, 0)]
        };
        for row in 0..h as i32 {
            for col in 0..w as i32 {
                let point = Coord::new(row, col);
                if !self.is_free(point) {
                    continue;
                }
                let ix = self.grid.get_ix_point(&point.into());
                for &(dr, dc) in forward {
                    let n = point.offset(dr, dc);
                    if self.is_free(n) {
                        let n_ix = self.grid.get_ix_point(&n.into());
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }
}

impl WalkGrid for PathingGrid {
    fn width(&self) -> usize {
        self.grid.width
    }
    fn height(&self) -> usize {
        self.grid.height
    }
    fn is_walkable(&self, coord: Coord) -> bool {
        self.is_free(coord)
    }
    fn in_bounds(&self, coord: Coord) -> bool {
        self.grid.point_in_bounds(coord.into())
    }
    fn same_component(&self, a: Coord, b: Coord, diagonal: bool) -> Option<bool> {
        if self.components_dirty || diagonal != self.components_diagonal {
            return None;
        }
        Some(self.reachable(a, b))
    }
}

/// `x` is the column and `y` the row, as for [Point]. Writes go through
/// [PathingGrid::set] so the components stay up to date.
impl Grid<bool> for PathingGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        PathingGrid::from_grid(BoolGrid::new(width, height, default_value))
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        PathingGrid::set(self, Coord::new(y as i32, x as i32), blocked);
    }
    fn width(&self) -> usize {
        self.grid.width
    }
    fn height(&self) -> usize {
        self.grid.height
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height {
            let line = (0..self.grid.width)
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .join("");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses one row per line: `.` or `0` is free, `#` or `1` is blocked.
impl FromStr for PathingGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, cell)| match cell {
                        '.' | '0' => Ok(0u8),
                        '#' | '1' => Ok(1u8),
                        _ => Err(GridError::UnknownCell { cell, row, col }),
                    })
                    .collect::<Result<Vec<u8>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        PathingGrid::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_util::rect::Rect;

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let grid: PathingGrid = ".#.\n.#.".parse().unwrap();
        let p1 = Coord::new(0, 0);
        let p2 = Coord::new(1, 1);
        let p3 = Coord::new(1, 0);
        let p4 = Coord::new(0, 2);
        assert_ne!(grid.get_component(p1), grid.get_component(p2));
        assert_eq!(grid.get_component(p1), grid.get_component(p3));
        assert_ne!(grid.get_component(p1), grid.get_component(p4));
        assert!(grid.unreachable(p1, p4));
        assert!(grid.reachable(p1, p3));
    }

    // Tests whether allowing diagonals has the expected effect on reachability in a minimal setting.
    #[test]
    fn test_diagonal_switch_reachable() {
        // |.#|
        // |#.|
        let mut grid: PathingGrid = ".#\n#.".parse().unwrap();
        let start = Coord::new(0, 0);
        let end = Coord::new(1, 1);
        assert!(grid.reachable(start, end));
        assert_eq!(grid.same_component(start, end, true), Some(true));
        assert_eq!(grid.same_component(start, end, false), None);
        grid.generate_components(false);
        assert!(grid.unreachable(start, end));
        assert_eq!(grid.same_component(start, end, false), Some(false));
    }

    #[test]
    fn set_joins_and_dirties_components() {
        let mut grid: PathingGrid = ".#.".parse().unwrap();
        let left = Coord::new(0, 0);
        let right = Coord::new(0, 2);
        assert!(grid.unreachable(left, right));
        grid.set(Coord::new(0, 1), false);
        assert!(grid.reachable(left, right));
        assert!(!grid.components_dirty);

        grid.set(Coord::new(0, 1), true);
        assert!(grid.components_dirty);
        assert_eq!(grid.same_component(left, right, true), None);
        grid.update();
        assert!(grid.unreachable(left, right));
    }

    /// Writes through the [Grid] trait keep the components in sync.
    #[test]
    fn grid_trait_writes_maintain_components() {
        let mut grid = <PathingGrid as Grid<bool>>::new(5, 3, false);
        let left = Coord::new(1, 0);
        let right = Coord::new(1, 4);
        assert!(grid.reachable(left, right));
        // Wall down column 2
        grid.set_rectangle(&Rect::new(2, 0, 1, 3), true);
        assert!(grid.components_dirty);
        assert!(Grid::get(&grid, 2, 1));
        assert!(grid.get(Coord::new(1, 2)));
        grid.update();
        assert!(grid.unreachable(left, right));

        Grid::set(&mut grid, 2, 1, false);
        assert!(grid.reachable(left, right));
        assert_eq!(grid.to_string(), "..#..\n.....\n..#..\n");
    }

    #[test]
    fn walkability_and_bounds() {
        let grid = PathingGrid::from_rows(&[[0u8, 1], [0, 0]]).unwrap();
        assert_eq!((WalkGrid::width(&grid), WalkGrid::height(&grid)), (2, 2));
        assert!(grid.is_walkable(Coord::new(0, 0)));
        assert!(!grid.is_walkable(Coord::new(0, 1)));
        assert!(!grid.is_walkable(Coord::new(-1, 0)));
        assert!(!grid.is_walkable(Coord::new(0, 2)));
        assert!(grid.get(Coord::new(5, 5)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            PathingGrid::new(0, 3, false).unwrap_err(),
            GridError::EmptyGrid {
                width: 0,
                height: 3
            }
        );
        assert_eq!(
            "..\n.".parse::<PathingGrid>().unwrap_err(),
            GridError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            ".x".parse::<PathingGrid>().unwrap_err(),
            GridError::UnknownCell {
                cell: 'x',
                row: 0,
                col: 1
            }
        );
        assert!("".parse::<PathingGrid>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let text = "..#\n#..\n";
        let grid: PathingGrid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
    }
}
