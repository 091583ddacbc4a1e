use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::geometry::{Direction, Point2};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 3, tags = ["spiral", "math"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = u64;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        match input.trim().parse() {
            Ok(0) => Err(ParseError::invalid("squares start at 1")),
            Ok(square) => Ok(square),
            Err(e) => Err(ParseError::invalid(format!("square number: {e}"))),
        }
    }
}

/// Manhattan distance from square `n` to square 1
fn carry_distance(n: u64) -> u64 {
    if n == 1 {
        return 0;
    }
    // ring k holds squares up to (2k + 1)^2
    let mut ring = 0;
    while (2 * ring + 1) * (2 * ring + 1) < n {
        ring += 1;
    }
    let corner = (2 * ring + 1) * (2 * ring + 1);
    let along_side = (corner - n) % (2 * ring);
    ring + along_side.abs_diff(ring)
}

/// Squares in spiral order, starting with square 1 at the origin
fn spiral() -> impl Iterator<Item = Point2> {
    let legs = (1usize..).flat_map(|len| [len, len]);
    let turns = [Direction::East, Direction::North, Direction::West, Direction::South]
        .into_iter()
        .cycle();
    let steps = legs
        .zip(turns)
        .flat_map(|(len, dir)| std::iter::repeat_n(dir, len));
    std::iter::once(Point2::ORIGIN).chain(steps.scan(Point2::ORIGIN, |pos, dir| {
        *pos = pos.step(dir);
        Some(*pos)
    }))
}

/// First value larger than `limit` written by the neighbour-sum stress test
fn first_larger(limit: u64) -> Option<u64> {
    let mut written: HashMap<Point2, u64> = HashMap::new();
    spiral().find_map(|square| {
        let value = if square == Point2::ORIGIN {
            1
        } else {
            square.neighbors8().filter_map(|p| written.get(&p)).sum()
        };
        if value > limit {
            return Some(value);
        }
        written.insert(square, value);
        None
    })
}

impl PartSolver<1> for Solver {
    fn solve(square: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(carry_distance(*square).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(square: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_larger(*square)
            .map(|value| value.to_string())
            .ok_or_else(|| SolveError::failed("spiral ended"))
    }
}
