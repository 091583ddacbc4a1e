use anyhow::{Context, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};
use crate::utils::invalid_input;
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["dp", "strings"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Row {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Row {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let (springs, groups) = line.split_once(' ').context("expected `<springs> <groups>`")?;
        ensure!(
            springs.bytes().all(|b| matches!(b, b'.' | b'#' | b'?')),
            "unexpected spring in {springs:?}"
        );
        let groups = groups
            .split(',')
            .map(|g| g.parse().with_context(|| format!("group {g:?}")))
            .collect::<anyhow::Result<_>>()?;
        Ok(Row {
            springs: springs.as_bytes().to_vec(),
            groups,
        })
    }

    fn unfold(&self, copies: usize) -> Self {
        Row {
            springs: std::iter::repeat_n(self.springs.as_slice(), copies)
                .collect::<Vec<_>>()
                .join(&b'?'),
            groups: self.groups.repeat(copies),
        }
    }

    /// Ways to place every damaged group over the unknown springs
    fn arrangements(&self) -> u64 {
        let cache = DpCache::new(VecBackend::new(), Arrangements { row: self });
        cache.get(&0)
    }
}

/// State `(spring, group)` flattened as `spring * (groups + 1) + group`:
/// arrangements of `springs[spring..]` using `groups[group..]`
struct Arrangements<'r> {
    row: &'r Row,
}

impl Arrangements<'_> {
    fn split(&self, state: usize) -> (usize, usize) {
        let stride = self.row.groups.len() + 1;
        (state / stride, state % stride)
    }

    fn join(&self, spring: usize, group: usize) -> usize {
        spring * (self.row.groups.len() + 1) + group
    }

    fn is_end(&self, state: usize) -> bool {
        self.split(state).0 >= self.row.springs.len()
    }
}

impl DpProblem<usize, u64> for Arrangements<'_> {
    fn deps(&self, state: &usize) -> Vec<usize> {
        let (spring, group) = self.split(*state);
        let Row { springs, groups } = self.row;
        if spring >= springs.len() {
            return Vec::new();
        }
        let mut deps = Vec::with_capacity(2);
        let here = springs[spring];
        if here != b'#' {
            deps.push(self.join(spring + 1, group));
        }
        if here != b'.' {
            if let Some(&len) = groups.get(group) {
                let end = spring + len;
                let fits = end <= springs.len()
                    && !springs[spring..end].contains(&b'.')
                    && springs.get(end) != Some(&b'#');
                if fits {
                    deps.push(self.join((end + 1).min(springs.len()), group + 1));
                }
            }
        }
        deps
    }

    fn compute(&self, state: &usize, deps: Vec<u64>) -> u64 {
        if self.is_end(*state) {
            u64::from(self.split(*state).1 == self.row.groups.len())
        } else {
            deps.iter().sum()
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Row>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, Row::parse).map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(rows: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(rows.iter().map(Row::arrangements).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(rows: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(rows
            .iter()
            .map(|row| row.unfold(5).arrangements())
            .sum::<u64>()
            .to_string())
    }
}
