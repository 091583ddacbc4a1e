use anyhow::{Context, Result, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use log::debug;

use crate::utils::parse::ints;
use crate::utils::{invalid_input, solve_failed};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 17, tags = ["vm", "backtracking"])]
pub struct Solver;

/// Runaway programs are stopped after this many instructions
const STEP_LIMIT: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computer {
    registers: [u64; 3],
    program: Vec<u8>,
}

fn shift(value: u64, by: u64) -> u64 {
    u32::try_from(by)
        .ok()
        .and_then(|by| value.checked_shr(by))
        .unwrap_or(0)
}

impl Computer {
    fn combo(&self, operand: u8, regs: &[u64; 3]) -> Result<u64> {
        match operand {
            0..=3 => Ok(u64::from(operand)),
            4..=6 => Ok(regs[usize::from(operand - 4)]),
            _ => bail!("combo operand {operand} is reserved"),
        }
    }

    /// Everything the program outputs when started with register A set to `a`
    fn run(&self, a: u64) -> Result<Vec<u8>> {
        let mut regs = [a, self.registers[1], self.registers[2]];
        let mut out = Vec::new();
        let mut ip = 0;
        let mut steps = 0;
        while let (Some(&opcode), Some(&operand)) = (self.program.get(ip), self.program.get(ip + 1)) {
            steps += 1;
            ensure!(steps <= STEP_LIMIT, "no halt after {STEP_LIMIT} instructions");
            let literal = u64::from(operand);
            ip += 2;
            match opcode {
                0 => regs[0] = shift(regs[0], self.combo(operand, &regs)?),
                1 => regs[1] ^= literal,
                2 => regs[1] = self.combo(operand, &regs)? % 8,
                3 if regs[0] != 0 => ip = usize::from(operand),
                3 => {}
                4 => regs[1] ^= regs[2],
                5 => out.push((self.combo(operand, &regs)? % 8) as u8),
                6 => regs[1] = shift(regs[0], self.combo(operand, &regs)?),
                7 => regs[2] = shift(regs[0], self.combo(operand, &regs)?),
                _ => bail!("opcode {opcode} is not 3-bit"),
            }
        }
        Ok(out)
    }

    /// Smallest A whose output ends with `program[from..]`, built three bits
    /// at a time from the end of the program
    fn quine_from(&self, prefix: u64, from: usize) -> Result<Option<u64>> {
        for bits in 0..8 {
            let a = prefix << 3 | bits;
            if a == 0 {
                continue;
            }
            if self.run(a)? != self.program[from..] {
                continue;
            }
            if from == 0 {
                return Ok(Some(a));
            }
            if let Some(found) = self.quine_from(a, from - 1)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn lowest_quine(&self) -> Result<u64> {
        let Some(last) = self.program.len().checked_sub(1) else {
            bail!("empty program");
        };
        let a = self
            .quine_from(0, last)?
            .context("no value of register A makes the program print itself")?;
        debug!("program reproduces itself from A = {a:o} (octal)");
        Ok(a)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Computer;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let parse = || -> Result<Computer> {
            let (registers, program) = input
                .split_once("Program:")
                .context("missing \"Program:\" line")?;
            let registers: Vec<u64> = ints(registers)
                .into_iter()
                .map(u64::try_from)
                .collect::<Result<_, _>>()
                .context("registers must be non-negative")?;
            let Ok(registers) = <[u64; 3]>::try_from(registers) else {
                bail!("expected registers A, B and C");
            };
            let program = ints(program)
                .into_iter()
                .map(|v| u8::try_from(v).ok().filter(|&v| v < 8).with_context(|| format!("{v} is not 3-bit")))
                .collect::<Result<Vec<_>>>()?;
            ensure!(!program.is_empty(), "empty program");
            Ok(Computer { registers, program })
        };
        parse().map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(computer: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let out = computer.run(computer.registers[0]).map_err(solve_failed)?;
        Ok(out.iter().join(","))
    }
}

impl PartSolver<2> for Solver {
    fn solve(computer: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        computer
            .lowest_quine()
            .map(|a| a.to_string())
            .map_err(solve_failed)
    }
}
