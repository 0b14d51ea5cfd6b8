use grid_astar::observer::{SearchObserver, SearchStep, StepResult};
use grid_astar::{Coord, PathFinder, PathingGrid, WalkGrid};
use rand::prelude::*;
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

// A random maze is generated and searched, drawing the open (o) and closed (x) cells
// after every step. S marks the start, G the goal and * the final path.

const WIDTH: usize = 20;
const HEIGHT: usize = 20;
const OBSTACLE_DENSITY: f64 = 0.3;

fn random_maze(rng: &mut StdRng) -> (PathingGrid, Coord, Coord) {
    let rows: Vec<Vec<u8>> = (0..HEIGHT)
        .map(|_| {
            (0..WIDTH)
                .map(|_| rng.gen_bool(OBSTACLE_DENSITY) as u8)
                .collect()
        })
        .collect();
    let grid = PathingGrid::from_rows(&rows).unwrap();
    let random_free = |rng: &mut StdRng, except: Option<Coord>| loop {
        let c = Coord::new(
            rng.gen_range(0..HEIGHT as i32),
            rng.gen_range(0..WIDTH as i32),
        );
        if grid.is_walkable(c) && Some(c) != except {
            return c;
        }
    };
    let start = random_free(rng, None);
    let end = random_free(rng, Some(start));
    (grid, start, end)
}

fn draw(grid: &dyn WalkGrid, start: Coord, end: Coord, mark: impl Fn(Coord) -> Option<char>) {
    for row in 0..grid.height() as i32 {
        let line: String = (0..grid.width() as i32)
            .map(|col| {
                let c = Coord::new(row, col);
                if c == start {
                    'S'
                } else if c == end {
                    'G'
                } else if let Some(m) = mark(c) {
                    m
                } else if grid.is_walkable(c) {
                    '.'
                } else {
                    '#'
                }
            })
            .collect();
        println!("{}", line);
    }
    println!();
}

/// Draws every step and sleeps so the search can be followed.
struct Animation {
    start: Coord,
    end: Coord,
    delay: Duration,
}

impl SearchObserver for Animation {
    fn on_step(&mut self, step: &SearchStep<'_>) -> StepResult {
        println!("Step {}:", step.expanded());
        draw(step.grid(), self.start, self.end, |c| {
            if step.is_closed(c) {
                Some('x')
            } else if step.is_open(c) {
                Some('o')
            } else {
                None
            }
        });
        thread::sleep(self.delay);
        Ok(ControlFlow::Continue(()))
    }
}

fn main() {
    env_logger::init();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let (grid, start, end) = random_maze(&mut rng);
    println!("Start: {}, End: {}", start, end);

    let mut animation = Animation {
        start,
        end,
        delay: Duration::from_millis(100),
    };
    let path = match PathFinder::new().search_observed(&grid, start, end, &mut animation) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            return;
        }
    };
    if path.is_empty() {
        println!("No path exists");
        return;
    }
    draw(&grid, start, end, |c| path.contains(&c).then_some('*'));
    println!("Path:");
    for p in path {
        println!("{}", p);
    }
}
