use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use petgraph::unionfind::UnionFind;

use crate::utils::invalid_input;
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 12, tags = ["graph", "union-find"])]
pub struct Solver;

fn parse_pipe(line: &str) -> anyhow::Result<(usize, Vec<usize>)> {
    let (program, peers) = line.split_once("<->").context("missing `<->`")?;
    let program = program.trim().parse().context("program id")?;
    let peers = peers
        .split(',')
        .map(|p| p.trim().parse().with_context(|| format!("peer {p:?}")))
        .collect::<anyhow::Result<_>>()?;
    Ok((program, peers))
}

impl AocParser for Solver {
    type SharedData<'a> = UnionFind<usize>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let pipes = parse_lines(input, parse_pipe).map_err(invalid_input)?;
        let size = pipes
            .iter()
            .flat_map(|(program, peers)| peers.iter().chain([program]))
            .max()
            .map_or(0, |&max| max + 1);
        let mut groups = UnionFind::new(size);
        for (program, peers) in &pipes {
            for &peer in peers {
                groups.union(*program, peer);
            }
        }
        Ok(groups)
    }
}

impl PartSolver<1> for Solver {
    fn solve(groups: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let labels = groups.clone().into_labeling();
        let Some(&zero) = labels.first() else {
            return Err(SolveError::failed("program 0 is missing"));
        };
        Ok(labels.iter().filter(|&&l| l == zero).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(groups: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(groups.clone().into_labeling().into_iter().unique().count().to_string())
    }
}
