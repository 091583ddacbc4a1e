use anyhow::{Context, Result, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::geometry::Point2;
use crate::utils::grid::Grid;
use crate::utils::parse::{ints, parse_lines};
use crate::utils::search::bfs_distances;
use crate::utils::{invalid_input, solve_failed};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["geometry", "coordinate-compression"])]
pub struct Solver;

/// Tiles covered by the rectangle with opposite corners `a` and `b`
fn area(a: Point2, b: Point2) -> u64 {
    (a.x.abs_diff(b.x) + 1) * (a.y.abs_diff(b.y) + 1)
}

/// The red-tile polygon on a compressed grid
///
/// Distinct coordinates map to odd indices; the even indices between them
/// stand for the open gaps, plus one free border all round.
struct Floor {
    xs: Vec<i64>,
    ys: Vec<i64>,
    /// Inclusive 2D prefix sums of tiles outside the polygon
    outside: Vec<Vec<u32>>,
}

fn compress(coords: &[i64], v: i64) -> i64 {
    // Only called with coordinates taken from `coords`
    coords.binary_search(&v).map_or(0, |i| 2 * i as i64 + 1)
}

impl Floor {
    fn new(red: &[Point2]) -> Result<Self> {
        let xs: Vec<i64> = red.iter().map(|p| p.x).sorted_unstable().dedup().collect();
        let ys: Vec<i64> = red.iter().map(|p| p.y).sorted_unstable().dedup().collect();
        let (width, height) = (2 * xs.len() + 1, 2 * ys.len() + 1);

        let mut edge = Grid::from_fn(width, height, |_| false);
        let squash = |p: Point2| Point2::new(compress(&xs, p.x), compress(&ys, p.y));
        for (&a, &b) in red.iter().circular_tuple_windows() {
            ensure!(a.x == b.x || a.y == b.y, "{a} and {b} are not in line");
            let (mut at, to) = (squash(a), squash(b));
            let step = Point2::new((to.x - at.x).signum(), (to.y - at.y).signum());
            edge[at] = true;
            while at != to {
                at += step;
                edge[at] = true;
            }
        }

        let reached = bfs_distances(
            Point2::ORIGIN,
            |&p| edge.neighbors4(p).filter(|&q| !edge[q]).collect::<Vec<_>>(),
            None,
        );
        let mut outside = vec![vec![0u32; width + 1]; height + 1];
        for y in 0..height {
            for x in 0..width {
                let out = u32::from(reached.contains_key(&Point2::new(x as i64, y as i64)));
                outside[y + 1][x + 1] = outside[y][x + 1] + outside[y + 1][x] - outside[y][x] + out;
            }
        }
        Ok(Self { xs, ys, outside })
    }

    fn is_inside(&self, a: Point2, b: Point2) -> bool {
        let (ax, bx) = (compress(&self.xs, a.x) as usize, compress(&self.xs, b.x) as usize);
        let (ay, by) = (compress(&self.ys, a.y) as usize, compress(&self.ys, b.y) as usize);
        let (x0, x1) = (ax.min(bx), ax.max(bx) + 1);
        let (y0, y1) = (ay.min(by), ay.max(by) + 1);
        let o = &self.outside;
        o[y1][x1] + o[y0][x0] == o[y0][x1] + o[y1][x0]
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Point2>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let red = parse_lines(input, |line| {
            let coords = ints(line);
            match coords[..] {
                [x, y] => Ok(Point2::new(x, y)),
                _ => anyhow::bail!("expected X,Y"),
            }
        })
        .context("red tiles")
        .map_err(invalid_input)?;
        if red.len() < 2 {
            return Err(ParseError::invalid("need at least two red tiles"));
        }
        Ok(red)
    }
}

impl PartSolver<1> for Solver {
    fn solve(red: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let largest = red
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| area(a, b))
            .max()
            .unwrap_or(0);
        Ok(largest.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(red: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let floor = Floor::new(red).map_err(solve_failed)?;
        let largest = red
            .iter()
            .tuple_combinations()
            .filter(|&(&a, &b)| floor.is_inside(a, b))
            .map(|(&a, &b)| area(a, b))
            .max()
            .unwrap_or(0);
        Ok(largest.to_string())
    }
}
