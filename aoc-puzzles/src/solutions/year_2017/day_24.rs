use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::invalid_input;
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 24, tags = ["backtracking"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    components: Vec<(u32, u32)>,
    best: Option<Bridges>,
}

/// Best bridges found by one exhaustive search
#[derive(Debug, Clone, Copy, Default)]
struct Bridges {
    strongest: u32,
    /// (length, strength) of the longest bridge, strongest among ties
    longest: (usize, u32),
}

struct Builder<'c> {
    components: &'c [(u32, u32)],
    used: Vec<bool>,
    found: Bridges,
}

impl Builder<'_> {
    fn extend(&mut self, port: u32, length: usize, strength: u32) {
        self.found.strongest = self.found.strongest.max(strength);
        self.found.longest = self.found.longest.max((length, strength));
        for i in 0..self.components.len() {
            if self.used[i] {
                continue;
            }
            let (a, b) = self.components[i];
            let other = if a == port {
                b
            } else if b == port {
                a
            } else {
                continue;
            };
            self.used[i] = true;
            self.extend(other, length + 1, strength + a + b);
            self.used[i] = false;
        }
    }
}

fn search(shared: &mut SharedData) -> Bridges {
    *shared.best.get_or_insert_with(|| {
        let mut builder = Builder {
            components: &shared.components,
            used: vec![false; shared.components.len()],
            found: Bridges::default(),
        };
        builder.extend(0, 0, 0);
        builder.found
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let components = parse_lines(input, |line| {
            let (a, b) = line.split_once('/').context("expected `a/b`")?;
            Ok((a.parse()?, b.parse()?))
        })
        .map_err(invalid_input)?;
        Ok(SharedData {
            components,
            best: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(search(shared).strongest.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(search(shared).longest.1.to_string())
    }
}
