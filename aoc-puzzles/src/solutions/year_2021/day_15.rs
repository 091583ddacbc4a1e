use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::geometry::Point2;
use crate::utils::grid::Grid;
use crate::utils::invalid_input;
use crate::utils::search::dijkstra;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 15, tags = ["grid", "dijkstra"])]
pub struct Solver;

/// The cave seen through `tiles` copies in each direction
struct Cave<'g> {
    risk: &'g Grid<u8>,
    tiles: i64,
}

impl Cave<'_> {
    fn width(&self) -> i64 {
        self.risk.width() as i64 * self.tiles
    }

    fn height(&self) -> i64 {
        self.risk.height() as i64 * self.tiles
    }

    /// Risk grows by one per tile away from the original, wrapping 9 to 1
    fn risk_at(&self, p: Point2) -> Option<u64> {
        if !(0..self.width()).contains(&p.x) || !(0..self.height()).contains(&p.y) {
            return None;
        }
        let (w, h) = (self.risk.width() as i64, self.risk.height() as i64);
        let base = self.risk[Point2::new(p.x % w, p.y % h)] as i64;
        let shifted = (base - 1 + p.x / w + p.y / h) % 9 + 1;
        Some(shifted as u64)
    }

    fn lowest_total_risk(&self) -> Option<u64> {
        let exit = Point2::new(self.width() - 1, self.height() - 1);
        dijkstra(
            [Point2::ORIGIN],
            |&p| {
                p.neighbors4()
                    .filter_map(|q| self.risk_at(q).map(|r| (q, r)))
                    .collect::<Vec<_>>()
            },
            |&p| p == exit,
        )
        .map(|(_, risk)| risk)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .with_context(|| format!("{c:?} is not a risk level"))
        })
        .map_err(invalid_input)
    }
}

fn solve_tiled(risk: &Grid<u8>, tiles: i64) -> Result<String, SolveError> {
    Cave { risk, tiles }
        .lowest_total_risk()
        .map(|r| r.to_string())
        .ok_or_else(|| SolveError::failed("no route to the exit"))
}

impl PartSolver<1> for Solver {
    fn solve(risk: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_tiled(risk, 1)
    }
}

impl PartSolver<2> for Solver {
    fn solve(risk: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_tiled(risk, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        1163751742
        1381373672
        2136511328
        3694931569
        7463417111
        1319128137
        1359912421
        3125421639
        1293138521
        2311944581
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "40");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "315");
    }

    #[test]
    fn tiles_wrap_risk() {
        let risk = Grid::from_fn(1, 1, |_| 8u8);
        let cave = Cave { risk: &risk, tiles: 5 };
        let row: Vec<_> = (0..5).map(|x| cave.risk_at(Point2::new(x, 0)).unwrap()).collect();
        assert_eq!(row, vec![8, 9, 1, 2, 3]);
        assert_eq!(cave.risk_at(Point2::new(4, 4)), Some(7));
        assert_eq!(cave.risk_at(Point2::new(5, 0)), None);
    }
}
