use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use super::assembunny::{Instr, Machine, parse_program};
use crate::utils::invalid_input;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 12, tags = ["vm", "assembunny"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instr>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_program(input).map_err(invalid_input)
    }
}

fn register_a(program: &[Instr], c: i64) -> String {
    let mut machine = Machine::new(program.to_vec(), [0, 0, c, 0]);
    machine.run_to_end();
    machine.regs[0].to_string()
}

impl PartSolver<1> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(register_a(program, 0))
    }
}

impl PartSolver<2> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(register_a(program, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        cpy 41 a
        inc a
        inc a
        dec a
        jnz a 2
        dec a
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "42");
    }

    #[test]
    fn part_two_seeds_register_c() {
        let program = "cpy c a\ninc a";
        assert_eq!(answer::<Solver>(program, 1), "1");
        assert_eq!(answer::<Solver>(program, 2), "2");
    }
}
