use std::collections::HashSet;

use anyhow::ensure;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::geometry::Point3;
use crate::utils::invalid_input;
use crate::utils::parse::{ints, parse_lines};
use crate::utils::search::bfs_distances;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 18, tags = ["3d", "flood-fill"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Point3>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let cubes = parse_lines(input, |line| {
            let coords = ints(line);
            ensure!(coords.len() == 3, "expected `x,y,z`");
            Ok(Point3::new(coords[0], coords[1], coords[2]))
        })
        .map_err(invalid_input)?;
        Ok(cubes.into_iter().collect())
    }
}

/// Faces that touch a point accepted by `open`
fn faces_touching(cubes: &HashSet<Point3>, open: impl Fn(&Point3) -> bool) -> usize {
    cubes
        .iter()
        .flat_map(|c| c.neighbors6())
        .filter(|n| open(n))
        .count()
}

/// Air reachable from outside the droplet, within a box padded by one
fn exterior(cubes: &HashSet<Point3>) -> HashSet<Point3> {
    let mut lo = Point3::new(i64::MAX, i64::MAX, i64::MAX);
    let mut hi = Point3::new(i64::MIN, i64::MIN, i64::MIN);
    for c in cubes {
        lo = Point3::new(lo.x.min(c.x), lo.y.min(c.y), lo.z.min(c.z));
        hi = Point3::new(hi.x.max(c.x), hi.y.max(c.y), hi.z.max(c.z));
    }
    let (lo, hi) = (lo - Point3::new(1, 1, 1), hi + Point3::new(1, 1, 1));
    let in_box = |p: &Point3| {
        (lo.x..=hi.x).contains(&p.x) && (lo.y..=hi.y).contains(&p.y) && (lo.z..=hi.z).contains(&p.z)
    };
    bfs_distances(
        lo,
        |&p| {
            p.neighbors6()
                .filter(|n| in_box(n) && !cubes.contains(n))
                .collect::<Vec<_>>()
        },
        None,
    )
    .into_keys()
    .collect()
}

impl PartSolver<1> for Solver {
    fn solve(cubes: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(faces_touching(cubes, |n| !cubes.contains(n)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(cubes: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if cubes.is_empty() {
            return Ok("0".to_string());
        }
        let outside = exterior(cubes);
        Ok(faces_touching(cubes, |n| outside.contains(n)).to_string())
    }
}
