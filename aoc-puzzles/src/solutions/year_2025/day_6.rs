use anyhow::{Context, Result, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::invalid_input;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc(year = 2025, day = 6, tags = ["parsing"])]
#[aoc_solver(max_parts = 2)]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Mul,
}

impl Op {
    fn apply(self, numbers: &[u64]) -> u64 {
        match self {
            Op::Add => numbers.iter().sum(),
            Op::Mul => numbers.iter().product(),
        }
    }
}

/// One problem on the worksheet, read both ways
#[derive(Debug)]
pub struct Problem {
    op: Op,
    by_rows: Vec<u64>,
    by_columns: Vec<u64>,
}

fn number(digits: impl Iterator<Item = u8>) -> Result<Option<u64>> {
    let text: String = digits.filter(|b| !b.is_ascii_whitespace()).map(char::from).collect();
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(text.parse().with_context(|| format!("{text:?} is not a number"))?))
}

/// Reads the problem occupying columns `cols` of the padded sheet
fn read_problem(sheet: &[Vec<u8>], cols: std::ops::Range<usize>) -> Result<Problem> {
    let Some((ops, digits)) = sheet.split_last() else {
        bail!("empty worksheet");
    };
    let op = match ops[cols.clone()].iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'+') => Op::Add,
        Some(b'*') => Op::Mul,
        other => bail!("columns {cols:?}: expected + or *, found {:?}", other.map(|&b| char::from(b))),
    };
    let by_rows = digits
        .iter()
        .filter_map(|row| number(row[cols.clone()].iter().copied()).transpose())
        .collect::<Result<Vec<_>>>()?;
    let by_columns = cols
        .clone()
        .rev()
        .filter_map(|c| number(digits.iter().map(|row| row[c])).transpose())
        .collect::<Result<Vec<_>>>()?;
    ensure!(!by_rows.is_empty(), "columns {cols:?} hold no numbers");
    Ok(Problem {
        op,
        by_rows,
        by_columns,
    })
}

fn parse_sheet(input: &str) -> Result<Vec<Problem>> {
    let lines: Vec<&str> = input
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .collect();
    ensure!(lines.len() >= 2, "need number rows and an operator row");
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let sheet: Vec<Vec<u8>> = lines
        .iter()
        .map(|l| {
            let mut row = l.as_bytes().to_vec();
            row.resize(width, b' ');
            row
        })
        .collect();

    let blank = |c: usize| sheet.iter().all(|row| row[c] == b' ');
    let mut problems = Vec::new();
    let mut start = None;
    for c in 0..=width {
        match (start, c == width || blank(c)) {
            (Some(s), true) => {
                problems.push(read_problem(&sheet, s..c)?);
                start = None;
            }
            (None, false) => start = Some(c),
            _ => {}
        }
    }
    Ok(problems)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Problem>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_sheet(input).map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(problems: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = problems.iter().map(|p| p.op.apply(&p.by_rows)).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(problems: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = problems.iter().map(|p| p.op.apply(&p.by_columns)).sum();
        Ok(total.to_string())
    }
}
