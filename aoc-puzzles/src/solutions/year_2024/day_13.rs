use anyhow::ensure;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::invalid_input;
use crate::utils::linear::{is_natural, matrix, solve_unique, to_i64};
use crate::utils::parse::ints;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 13, tags = ["linear-algebra"])]
pub struct Solver;

const PRIZE_OFFSET: i64 = 10_000_000_000_000;
const PRESS_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Machine {
    a: (i64, i64),
    b: (i64, i64),
    prize: (i64, i64),
}

impl Machine {
    /// Tokens for the unique non-negative press counts, if the prize is reachable
    fn tokens(&self, offset: i64, limit: Option<i64>) -> Option<i64> {
        let (px, py) = (self.prize.0 + offset, self.prize.1 + offset);
        let rows = matrix(&[
            vec![self.a.0, self.b.0, px],
            vec![self.a.1, self.b.1, py],
        ]);
        let presses = solve_unique(rows)?;
        if !presses.iter().all(is_natural) {
            return None;
        }
        let (a, b) = (to_i64(&presses[0])?, to_i64(&presses[1])?);
        if limit.is_some_and(|max| a > max || b > max) {
            return None;
        }
        Some(3 * a + b)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .enumerate()
            .map(|(idx, block)| {
                let n = ints(block);
                ensure!(n.len() == 6, "machine {} needs two buttons and a prize", idx + 1);
                Ok(Machine {
                    a: (n[0], n[1]),
                    b: (n[2], n[3]),
                    prize: (n[4], n[5]),
                })
            })
            .collect::<anyhow::Result<_>>()
            .map_err(invalid_input)
    }
}

fn fewest_tokens(machines: &[Machine], offset: i64, limit: Option<i64>) -> i64 {
    machines.iter().filter_map(|m| m.tokens(offset, limit)).sum()
}

impl PartSolver<1> for Solver {
    fn solve(machines: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(fewest_tokens(machines, 0, Some(PRESS_LIMIT)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(machines: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(fewest_tokens(machines, PRIZE_OFFSET, None).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Button A: X+94, Y+34
        Button B: X+22, Y+67
        Prize: X=8400, Y=5400

        Button A: X+26, Y+66
        Button B: X+67, Y+21
        Prize: X=12748, Y=12176

        Button A: X+17, Y+86
        Button B: X+84, Y+37
        Prize: X=7870, Y=6450

        Button A: X+69, Y+23
        Button B: X+27, Y+71
        Prize: X=18641, Y=10279
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "480");
    }

    #[test]
    fn far_prizes_change_which_machines_win() {
        let machines = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(machines[0].tokens(0, Some(PRESS_LIMIT)), Some(280));
        let far: Vec<bool> = machines
            .iter()
            .map(|m| m.tokens(PRIZE_OFFSET, None).is_some())
            .collect();
        assert_eq!(far, vec![false, true, false, true]);
    }
}
