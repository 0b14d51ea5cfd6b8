/// Fuzzes the search by checking on many random grids that a path is found exactly when the
/// goal is on the same connected component as the start, and that consistent heuristics
/// give paths as short as Dijkstra's. Both 4- and 8-connectivity are tested.
use grid_astar::{
    is_valid_path, path_cost,
    solver::heuristic::{Chebyshev, Heuristic, Manhattan, NoHeuristic, SquaredEuclidean},
    Coord, PathFinder, PathingGrid, SearchConfig, WalkGrid,
};
use rand::prelude::*;

fn random_grid(n: usize, rng: &mut StdRng, diagonal: bool, start: Coord, end: Coord) -> PathingGrid {
    let rows: Vec<Vec<u8>> = (0..n)
        .map(|_| (0..n).map(|_| rng.gen_bool(0.4) as u8).collect())
        .collect();
    let mut grid = PathingGrid::from_rows(&rows).unwrap();
    grid.set(start, false);
    grid.set(end, false);
    grid.generate_components(diagonal);
    grid
}

fn visualize_grid(grid: &PathingGrid, start: &Coord, end: &Coord) {
    for row in 0..grid.height() as i32 {
        for col in 0..grid.width() as i32 {
            let p = Coord::new(row, col);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.get(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

fn finder<H: Heuristic>(heuristic: H, allow_diagonal: bool) -> PathFinder<H> {
    PathFinder::with_heuristic(heuristic).with_config(SearchConfig {
        allow_diagonal,
        ..Default::default()
    })
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Coord::new(0, 0);
    let end = Coord::new(N as i32 - 1, N as i32 - 1);
    for diagonal in [false, true] {
        let solver = finder(SquaredEuclidean, diagonal);
        for _ in 0..N_GRIDS {
            let grid = random_grid(N, &mut rng, diagonal, start, end);
            let reachable = grid.reachable(start, end);
            let path = solver.search(&grid, start, end).unwrap();
            // Show the grid if the result disagrees with the components
            if path.is_empty() == reachable {
                visualize_grid(&grid, &start, &end);
            }
            assert_eq!(!path.is_empty(), reachable);
            if reachable {
                assert!(is_valid_path(&grid, &path, diagonal));
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&end));
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Coord::new(0, 0);
    let end = Coord::new(N as i32 - 1, N as i32 - 1);
    for diagonal in [false, true] {
        let dijkstra = finder(NoHeuristic, diagonal);
        let chebyshev = finder(Chebyshev, diagonal);
        let manhattan = finder(Manhattan, diagonal);
        let squared = finder(SquaredEuclidean, diagonal);
        for _ in 0..N_GRIDS {
            let grid = random_grid(N, &mut rng, diagonal, start, end);
            if !grid.reachable(start, end) {
                continue;
            }
            let optimal = path_cost(&dijkstra.search(&grid, start, end).unwrap());
            let consistent = if diagonal {
                chebyshev.search(&grid, start, end).unwrap()
            } else {
                manhattan.search(&grid, start, end).unwrap()
            };
            let greedy = squared.search(&grid, start, end).unwrap();
            if path_cost(&consistent) != optimal {
                println!("Dijkstra cost: {optimal}; consistent path: {consistent:?}");
                visualize_grid(&grid, &start, &end);
            }
            assert_eq!(path_cost(&consistent), optimal);
            assert!(path_cost(&greedy) >= optimal);
        }
    }
}
