use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use super::assembunny::{Instr, Machine, parse_program};
use crate::utils::invalid_input;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 23, tags = ["vm", "assembunny"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instr>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_program(input).map_err(invalid_input)
    }
}

/// The safe code is whatever `a` holds once the program ends
fn safe_code(program: &[Instr], eggs: i64) -> String {
    let mut machine = Machine::new(program.to_vec(), [eggs, 0, 0, 0]);
    machine.run_to_end();
    machine.regs[0].to_string()
}

impl PartSolver<1> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(safe_code(program, 7))
    }
}

impl PartSolver<2> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(safe_code(program, 12))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn example() {
        let program = parse_program(indoc! {"
            cpy 2 a
            tgl a
            tgl a
            tgl a
            cpy 1 a
            dec a
            dec a
        "})
        .unwrap();
        assert_eq!(safe_code(&program, 0), "3");
    }

    #[test]
    fn factorial_with_toggled_tail() {
        // Computes a! via the nested multiply loop, then toggles the
        // trailing `jnz` into a `cpy` that adds a constant
        let program = parse_program(indoc! {"
            cpy a b
            dec b
            cpy a d
            cpy 0 a
            cpy b c
            inc a
            dec c
            jnz c -2
            dec d
            jnz d -5
            dec b
            cpy b c
            cpy c d
            dec d
            inc c
            jnz d -2
            tgl c
            cpy -16 c
            jnz 1 c
            cpy 3 c
            jnz 4 d
            inc a
            inc d
            jnz d -2
            inc c
            jnz c -5
        "})
        .unwrap();
        // 7! + 3 * 4 with the input's constants swapped for small ones
        assert_eq!(safe_code(&program, 7), "5052");
    }
}
