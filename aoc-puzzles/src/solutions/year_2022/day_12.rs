use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::geometry::Point2;
use crate::utils::grid::Grid;
use crate::utils::invalid_input;
use crate::utils::search::bfs;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, tags = ["grid", "bfs"])]
pub struct Solver;

#[derive(Debug)]
pub struct Heightmap {
    elevation: Grid<u8>,
    start: Point2,
    end: Point2,
}

impl AocParser for Solver {
    type SharedData<'a> = Heightmap;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let chars = Grid::parse_chars(input).map_err(invalid_input)?;
        let start = chars.find(|&c| c == 'S').ok_or_else(|| ParseError::missing("start `S`"))?;
        let end = chars.find(|&c| c == 'E').ok_or_else(|| ParseError::missing("signal `E`"))?;
        let elevation = Grid::parse(input, |c| {
            Ok(match c {
                'S' => 0,
                'E' => 25,
                'a'..='z' => c as u8 - b'a',
                _ => bail!("unexpected map symbol {c:?}"),
            })
        })
        .map_err(invalid_input)?;
        Ok(Heightmap {
            elevation,
            start,
            end,
        })
    }
}

impl Heightmap {
    /// Searches backwards from the signal; a reversed step may drop by at most one
    fn steps_from_end(&self, is_goal: impl FnMut(&Point2) -> bool) -> Option<usize> {
        let grid = &self.elevation;
        bfs(
            self.end,
            |&p| {
                grid.neighbors4(p)
                    .filter(|&q| grid[p] <= grid[q] + 1)
                    .collect::<Vec<_>>()
            },
            is_goal,
        )
        .map(|(_, steps)| steps)
    }
}

impl PartSolver<1> for Solver {
    fn solve(map: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = map.start;
        map.steps_from_end(|&p| p == start)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no route from S to E"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(map: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        map.steps_from_end(|&p| map.elevation[p] == 0)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no lowland reaches E"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Sabqponm
        abcryxxl
        accszExk
        acctuvwj
        abdefghi
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "31");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "29");
    }

    #[test]
    fn missing_signal() {
        assert!(Solver::parse("Sab\nabc").is_err());
    }
}
