use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::geometry::Point2;
use crate::utils::search::{astar, bfs_distances};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 13, tags = ["maze", "astar", "bfs"])]
pub struct Solver;

const START: Point2 = Point2::new(1, 1);
const TARGET: Point2 = Point2::new(31, 39);
const STEP_BUDGET: usize = 50;

/// The office designer's favourite number
#[derive(Debug, Clone, Copy)]
pub struct Office {
    favourite: i64,
}

impl Office {
    /// Negative coordinates are outside the building and count as walls
    fn is_open(self, p: Point2) -> bool {
        let Point2 { x, y } = p;
        if x < 0 || y < 0 {
            return false;
        }
        let n = x * x + 3 * x + 2 * x * y + y + y * y + self.favourite;
        n.count_ones() % 2 == 0
    }

    fn open_neighbours(self, p: Point2) -> impl Iterator<Item = Point2> {
        p.neighbors4().filter(move |&q| self.is_open(q))
    }

    /// Searches the square up to three times the target's larger coordinate,
    /// so a walled-off target exhausts the frontier
    fn fewest_steps(self, target: Point2) -> Option<u64> {
        let bound = 3 * (target.x.max(target.y).max(START.x) + 1);
        astar(
            [START],
            |&p| {
                self.open_neighbours(p)
                    .filter(move |q| q.x <= bound && q.y <= bound)
                    .map(|q| (q, 1))
            },
            |&p| p.manhattan(target),
            |&p| p == target,
        )
        .map(|(_, steps)| steps)
    }

    fn reachable_within(self, steps: usize) -> usize {
        bfs_distances(START, |&p| self.open_neighbours(p), Some(steps)).len()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Office;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let favourite = input
            .trim()
            .parse()
            .map_err(|e| ParseError::invalid(format!("favourite number: {e}")))?;
        Ok(Office { favourite })
    }
}

impl PartSolver<1> for Solver {
    fn solve(office: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        office
            .fewest_steps(TARGET)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed(format!("{TARGET} is unreachable")))
    }
}

impl PartSolver<2> for Solver {
    fn solve(office: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(office.reachable_within(STEP_BUDGET).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: Office = Office { favourite: 10 };

    #[test]
    fn layout_matches_example() {
        let row0: String = (0..10)
            .map(|x| if EXAMPLE.is_open(Point2::new(x, 0)) { '.' } else { '#' })
            .collect();
        assert_eq!(row0, ".#.####.##");
        assert!(!EXAMPLE.is_open(Point2::new(-1, 0)));
    }

    #[test]
    fn shortest_route() {
        assert_eq!(EXAMPLE.fewest_steps(Point2::new(7, 4)), Some(11));
    }

    #[test]
    fn walled_target_is_unreachable() {
        assert!(!EXAMPLE.is_open(Point2::new(1, 0)));
        assert_eq!(EXAMPLE.fewest_steps(Point2::new(1, 0)), None);
        // With favourite 1 the target tile is itself a wall
        let mut office = Office { favourite: 1 };
        assert!(!office.is_open(TARGET));
        assert!(matches!(
            <Solver as PartSolver<1>>::solve(&mut office),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn reachable_counts() {
        assert_eq!(EXAMPLE.reachable_within(0), 1);
        assert_eq!(EXAMPLE.reachable_within(2), 5);
        assert_eq!(EXAMPLE.reachable_within(3), 6);
    }
}
