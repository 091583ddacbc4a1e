use std::ops::ControlFlow;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use super::assembunny::{Halt, Instr, Machine, parse_program};
use crate::utils::invalid_input;

/// The last day has a single puzzle
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 25, tags = ["vm", "assembunny", "brute-force"])]
pub struct Solver;

/// Outputs that must alternate before a seed is accepted
const SIGNAL_LEN: usize = 100;
const MAX_SEED: i64 = 1_000_000;
/// Instructions a seed may run before it counts as silent
const STEP_LIMIT: u64 = 1_000_000;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instr>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_program(input).map_err(invalid_input)
    }
}

fn emits_clock(program: &[Instr], seed: i64) -> bool {
    let mut machine = Machine::new(program.to_vec(), [seed, 0, 0, 0]).with_step_limit(STEP_LIMIT);
    let mut emitted = 0;
    let mut valid = true;
    let halt = machine.run(|value| {
        if value != (emitted % 2) as i64 {
            valid = false;
            return ControlFlow::Break(());
        }
        emitted += 1;
        if emitted == SIGNAL_LEN {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    valid && halt == Halt::Interrupted
}

impl PartSolver<1> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seed = (1..=MAX_SEED)
            .find(|&seed| emits_clock(program, seed))
            .ok_or_else(|| SolveError::failed(format!("no seed up to {MAX_SEED} emits a clock")))?;
        debug!("clock signal starts at seed {seed}");
        Ok(seed.to_string())
    }
}
