use anyhow::{Context, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::invalid_input;
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["simulation"])]
pub struct Solver;

const DIAL_SIZE: i64 = 100;
const START: i64 = 50;

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<i64>,
    zeros: Option<ZeroCounts>,
}

#[derive(Debug, Clone, Copy)]
struct ZeroCounts {
    /// Rotations that leave the dial on 0
    landed: u64,
    /// Clicks that pass over or land on 0
    clicked: u64,
}

fn count_zeros(rotations: &[i64]) -> ZeroCounts {
    let mut dial = START;
    let mut counts = ZeroCounts {
        landed: 0,
        clicked: 0,
    };
    for &rotation in rotations {
        let before = dial;
        let unwrapped = dial + rotation;
        // Turning left onto or past 0 from a non-zero position
        if unwrapped <= 0 && before != 0 {
            counts.clicked += 1;
        }
        counts.clicked += (unwrapped / DIAL_SIZE).unsigned_abs();
        dial = unwrapped.rem_euclid(DIAL_SIZE);
        if dial == 0 {
            counts.landed += 1;
        }
    }
    counts
}

impl SharedData {
    fn zeros(&mut self) -> ZeroCounts {
        *self.zeros.get_or_insert_with(|| count_zeros(&self.rotations))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rotations = parse_lines(input, |line| {
            let sign = match line.as_bytes().first() {
                Some(b'L') => -1,
                Some(b'R') => 1,
                _ => bail!("rotation must start with L or R"),
            };
            let clicks: i64 = line[1..].parse().context("bad click count")?;
            ensure!(clicks >= 0, "click count must be non-negative");
            Ok(sign * clicks)
        })
        .map_err(invalid_input)?;
        Ok(SharedData {
            rotations,
            zeros: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.zeros().landed.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.zeros().clicked.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        L68
        L30
        R48
        L5
        R60
        L55
        L1
        L99
        R14
        L82
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "3");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "6");
    }

    #[test]
    fn full_turns_click_every_lap() {
        assert_eq!(answer::<Solver>("R1000", 2), "10");
        // Already on 0: leaving it does not count, each full lap back does
        assert_eq!(answer::<Solver>("L50\nL100\nL5", 2), "2");
        assert_eq!(answer::<Solver>("L50\nL100\nL5", 1), "2");
    }

    #[test]
    fn rejects_unknown_direction() {
        let err = Solver::parse("R5\nU3").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
