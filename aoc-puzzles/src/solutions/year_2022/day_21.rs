use std::collections::HashMap;
use std::ops::{Add, Sub};

use anyhow::{Context, Result, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use num::{BigRational, Zero};

use crate::utils::linear::{rational, to_i64};
use crate::utils::parse::parse_lines;
use crate::utils::{invalid_input, solve_failed};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 21, tags = ["expression", "algebra"])]
pub struct Solver;

const ROOT: &str = "root";
const HUMAN: &str = "humn";

#[derive(Debug, Clone)]
pub enum Job<'a> {
    Number(i64),
    Op(&'a str, &'a str, &'a str),
}

/// `slope * humn + offset`
#[derive(Debug, Clone, PartialEq)]
struct Linear {
    slope: BigRational,
    offset: BigRational,
}

impl Linear {
    fn constant(value: BigRational) -> Self {
        Self {
            slope: BigRational::zero(),
            offset: value,
        }
    }

    fn is_constant(&self) -> bool {
        self.slope.is_zero()
    }

    fn scale(self, by: &BigRational) -> Self {
        Self {
            slope: self.slope * by,
            offset: self.offset * by,
        }
    }
}

impl Add for Linear {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            slope: self.slope + rhs.slope,
            offset: self.offset + rhs.offset,
        }
    }
}

impl Sub for Linear {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            slope: self.slope - rhs.slope,
            offset: self.offset - rhs.offset,
        }
    }
}

struct Troop<'a> {
    jobs: HashMap<&'a str, Job<'a>>,
    /// Treat `humn` as the unknown instead of its shouted number
    symbolic_human: bool,
}

impl Troop<'_> {
    fn eval(&self, name: &str, depth: usize) -> Result<Linear> {
        ensure!(depth <= self.jobs.len(), "monkeys wait on each other in a cycle");
        if self.symbolic_human && name == HUMAN {
            return Ok(Linear {
                slope: rational(1),
                offset: BigRational::zero(),
            });
        }
        let job = self.jobs.get(name).with_context(|| format!("unknown monkey {name:?}"))?;
        let (lhs, op, rhs) = match *job {
            Job::Number(n) => return Ok(Linear::constant(rational(n))),
            Job::Op(lhs, op, rhs) => (lhs, op, rhs),
        };
        let (a, b) = (self.eval(lhs, depth + 1)?, self.eval(rhs, depth + 1)?);
        Ok(match op {
            "+" => a + b,
            "-" => a - b,
            "*" if a.is_constant() => b.scale(&a.offset),
            "*" if b.is_constant() => a.scale(&b.offset),
            "*" => bail!("{name} multiplies two unknowns"),
            "/" if b.is_constant() && !b.offset.is_zero() => a.scale(&b.offset.recip()),
            "/" => bail!("{name} divides by an unknown or zero"),
            _ => bail!("{name} uses unknown operator {op:?}"),
        })
    }

    fn root_value(&self) -> Result<i64> {
        let value = self.eval(ROOT, 0)?;
        to_i64(&value.offset).context("root does not yell an integer")
    }

    /// Solve `lhs == rhs` of root for the unknown human number
    fn human_value(&self) -> Result<i64> {
        let Some(&Job::Op(lhs, _, rhs)) = self.jobs.get(ROOT) else {
            bail!("root must combine two monkeys");
        };
        let diff = self.eval(lhs, 1)? - self.eval(rhs, 1)?;
        ensure!(!diff.is_constant(), "root does not depend on {HUMAN}");
        let human = -diff.offset / diff.slope;
        to_i64(&human).with_context(|| format!("{HUMAN} would have to yell {human}"))
    }
}

fn parse_job(line: &str) -> Result<(&str, Job<'_>)> {
    let (name, job) = line.split_once(": ").context("expected `name: job`")?;
    let tokens: Vec<&str> = job.split_whitespace().collect();
    let job = match tokens[..] {
        [number] => Job::Number(number.parse().context("number")?),
        [lhs, op @ ("+" | "-" | "*" | "/"), rhs] => Job::Op(lhs, op, rhs),
        _ => bail!("unrecognised job {job:?}"),
    };
    Ok((name, job))
}

impl AocParser for Solver {
    type SharedData<'a> = HashMap<&'a str, Job<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let jobs = parse_lines(input, parse_job).map_err(invalid_input)?;
        Ok(jobs.into_iter().collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(jobs: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let troop = Troop {
            jobs: jobs.clone(),
            symbolic_human: false,
        };
        troop.root_value().map(|v| v.to_string()).map_err(solve_failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(jobs: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let troop = Troop {
            jobs: jobs.clone(),
            symbolic_human: true,
        };
        troop.human_value().map(|v| v.to_string()).map_err(solve_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        root: pppw + sjmn
        dbpl: 5
        cczh: sllz + lgvd
        zczc: 2
        ptdq: humn - dvpt
        dvpt: 3
        lfqf: 4
        humn: 5
        ljgn: 2
        sjmn: drzm * dbpl
        sllz: 4
        pppw: cczh / lfqf
        lgvd: ljgn * ptdq
        drzm: hmdt - zczc
        hmdt: 32
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "152");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "301");
    }

    #[test]
    fn cycles_are_reported() {
        let mut jobs = Solver::parse("root: a + b\na: b * 2\nb: a - 1").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut jobs).is_err());
    }
}
