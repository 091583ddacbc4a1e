use std::collections::HashSet;

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::geometry::{Direction, Point2};
use crate::utils::invalid_input;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 1, tags = ["walk"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Step {
    right: bool,
    blocks: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Step>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(idx, token)| {
                let right = match token.chars().next() {
                    Some('R') => true,
                    Some('L') => false,
                    _ => bail!("step {}: expected R or L in {token:?}", idx + 1),
                };
                let blocks = token[1..]
                    .parse()
                    .with_context(|| format!("step {}: bad distance", idx + 1))?;
                Ok(Step { right, blocks })
            })
            .collect::<anyhow::Result<_>>()
            .map_err(invalid_input)
    }
}

/// Every block walked, one unit step at a time
fn walk(steps: &[Step]) -> impl Iterator<Item = Point2> + '_ {
    steps
        .iter()
        .scan(Direction::North, |facing, step| {
            *facing = if step.right {
                facing.turn_right()
            } else {
                facing.turn_left()
            };
            Some(std::iter::repeat_n(*facing, step.blocks))
        })
        .flatten()
        .scan(Point2::ORIGIN, |pos, dir| {
            *pos = pos.step(dir);
            Some(*pos)
        })
}

impl PartSolver<1> for Solver {
    fn solve(steps: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let end = walk(steps).last().unwrap_or(Point2::ORIGIN);
        Ok(end.manhattan(Point2::ORIGIN).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(steps: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut visited = HashSet::from([Point2::ORIGIN]);
        walk(steps)
            .find(|&p| !visited.insert(p))
            .map(|p| p.manhattan(Point2::ORIGIN).to_string())
            .ok_or_else(|| SolveError::failed("no location is visited twice"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;

    #[test]
    fn part_one_examples() {
        assert_eq!(answer::<Solver>("R2, L3", 1), "5");
        assert_eq!(answer::<Solver>("R2, R2, R2", 1), "2");
        assert_eq!(answer::<Solver>("R5, L5, R5, R3", 1), "12");
    }

    #[test]
    fn part_two_example() {
        assert_eq!(answer::<Solver>("R8, R4, R4, R8\n", 2), "4");
    }

    #[test]
    fn never_revisiting_is_an_error() {
        let mut steps = Solver::parse("R2, L3").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut steps).is_err());
        assert!(Solver::parse("R2, X3").is_err());
    }
}
