use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::default_map::DefaultMap;
use crate::utils::invalid_input;
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 8, tags = ["registers"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cmp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Cmp {
    fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Cmp::Lt => lhs < rhs,
            Cmp::Le => lhs <= rhs,
            Cmp::Gt => lhs > rhs,
            Cmp::Ge => lhs >= rhs,
            Cmp::Eq => lhs == rhs,
            Cmp::Ne => lhs != rhs,
        }
    }
}

/// `target += delta if reg cmp value`
#[derive(Debug, Clone)]
pub struct Instruction<'a> {
    target: &'a str,
    delta: i64,
    reg: &'a str,
    cmp: Cmp,
    value: i64,
}

fn parse_instruction(line: &str) -> anyhow::Result<Instruction<'_>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [target, op, amount, "if", reg, cmp, value] = tokens[..] else {
        bail!("expected `<reg> inc|dec <n> if <reg> <cmp> <n>`");
    };
    let amount: i64 = amount.parse().context("amount")?;
    let delta = match op {
        "inc" => amount,
        "dec" => -amount,
        _ => bail!("unknown operation {op:?}"),
    };
    let cmp = match cmp {
        "<" => Cmp::Lt,
        "<=" => Cmp::Le,
        ">" => Cmp::Gt,
        ">=" => Cmp::Ge,
        "==" => Cmp::Eq,
        "!=" => Cmp::Ne,
        _ => bail!("unknown comparison {cmp:?}"),
    };
    Ok(Instruction {
        target,
        delta,
        reg,
        cmp,
        value: value.parse().context("comparison value")?,
    })
}

#[derive(Debug)]
pub struct SharedData<'a> {
    program: Vec<Instruction<'a>>,
    run: Option<RunSummary>,
}

#[derive(Debug, Clone, Copy)]
struct RunSummary {
    final_max: i64,
    ever_max: i64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let program = parse_lines(input, parse_instruction).map_err(invalid_input)?;
        Ok(SharedData { program, run: None })
    }
}

fn run_once(shared: &mut SharedData<'_>) -> RunSummary {
    *shared.run.get_or_insert_with(|| {
        // Registers only ever compared still hold 0 at the end
        let mut registers: DefaultMap<&str, i64> = shared
            .program
            .iter()
            .flat_map(|instr| [(instr.reg, 0), (instr.target, 0)])
            .collect();
        let mut ever_max = 0;
        for instr in &shared.program {
            if instr.cmp.holds(registers[instr.reg], instr.value) {
                let reg = registers.entry_mut(instr.target);
                *reg += instr.delta;
                ever_max = ever_max.max(*reg);
            }
        }
        RunSummary {
            final_max: registers.values().copied().max().unwrap_or(0),
            ever_max,
        }
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run_once(shared).final_max.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run_once(shared).ever_max.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        b inc 5 if a > 1
        a inc 1 if b < 5
        c dec -10 if a >= 1
        c inc -20 if c == 10
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "1");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "10");
    }

    #[test]
    fn compared_registers_count_towards_final_max() {
        let program = indoc! {"
            a dec 3 if b == 0
            c dec 1 if a < 0
        "};
        assert_eq!(answer::<Solver>(program, 1), "0");
        assert_eq!(answer::<Solver>("a dec 3 if a == 0", 1), "-3");
    }

    #[test]
    fn rejects_unknown_comparison() {
        let err = Solver::parse("a inc 1 if b <> 2").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
