use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 1, tags = ["strings"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .trim()
            .chars()
            .enumerate()
            .map(|(idx, c)| {
                c.to_digit(10)
                    .ok_or_else(|| ParseError::invalid(format!("column {}: {c:?} is not a digit", idx + 1)))
            })
            .collect()
    }
}

/// Sum of digits matching the digit `offset` places ahead, wrapping around
fn captcha(digits: &[u32], offset: usize) -> u32 {
    let len = digits.len();
    digits
        .iter()
        .enumerate()
        .filter(|&(i, d)| *d == digits[(i + offset) % len])
        .map(|(_, d)| d)
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(digits: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(captcha(digits, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(digits: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(captcha(digits, digits.len() / 2).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;

    #[test]
    fn next_digit() {
        for (input, expected) in [("1122", "3"), ("1111", "4"), ("1234", "0"), ("91212129", "9")] {
            assert_eq!(answer::<Solver>(input, 1), expected, "{input}");
        }
    }

    #[test]
    fn halfway_around() {
        for (input, expected) in [
            ("1212", "6"),
            ("1221", "0"),
            ("123425", "4"),
            ("123123", "12"),
            ("12131415", "4"),
        ] {
            assert_eq!(answer::<Solver>(input, 2), expected, "{input}");
        }
    }
}
