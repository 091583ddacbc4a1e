use anyhow::{Context, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use log::debug;
use petgraph::unionfind::UnionFind;

use crate::utils::geometry::Point3;
use crate::utils::invalid_input;
use crate::utils::parse::{ints, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["union-find", "geometry"])]
pub struct Solver;

const CONNECTIONS: usize = 1000;

#[derive(Debug)]
pub struct Playground {
    boxes: Vec<Point3>,
    /// Every pair of boxes, closest first
    pairs: Vec<(usize, usize)>,
}

impl Playground {
    fn new(boxes: Vec<Point3>) -> Self {
        let pairs = (0..boxes.len())
            .tuple_combinations()
            .sorted_by_key(|&(a, b)| boxes[a].distance_squared(boxes[b]))
            .collect();
        Self { boxes, pairs }
    }

    /// Product of the three largest circuits after wiring the `connections`
    /// closest pairs
    fn largest_circuits(&self, connections: usize) -> u64 {
        let mut circuits = UnionFind::new(self.boxes.len());
        for &(a, b) in self.pairs.iter().take(connections) {
            circuits.union(a, b);
        }
        circuits
            .into_labeling()
            .into_iter()
            .counts()
            .into_values()
            .sorted_unstable_by(|a, b| b.cmp(a))
            .take(3)
            .map(|size| size as u64)
            .product()
    }

    /// The pair whose connection leaves a single circuit
    fn last_connection(&self) -> Option<(usize, usize)> {
        let mut circuits = UnionFind::new(self.boxes.len());
        let mut remaining = self.boxes.len();
        for (wired, &(a, b)) in self.pairs.iter().enumerate() {
            if circuits.union(a, b) {
                remaining -= 1;
                if remaining == 1 {
                    debug!("single circuit after {} connections", wired + 1);
                    return Some((a, b));
                }
            }
        }
        None
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Playground;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let boxes = parse_lines(input, |line| {
            let coords = ints(line);
            ensure!(coords.len() == 3, "expected X,Y,Z");
            Ok(Point3::new(coords[0], coords[1], coords[2]))
        })
        .context("junction boxes")
        .map_err(invalid_input)?;
        Ok(Playground::new(boxes))
    }
}

impl PartSolver<1> for Solver {
    fn solve(playground: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(playground.largest_circuits(CONNECTIONS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(playground: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = playground
            .last_connection()
            .ok_or_else(|| SolveError::failed("need at least two junction boxes"))?;
        Ok((playground.boxes[a].x * playground.boxes[b].x).to_string())
    }
}
