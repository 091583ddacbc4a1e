use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::ints;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 17, tags = ["simulation"])]
pub struct Solver;

/// Target area, entirely right of and below the launcher
#[derive(Debug, Clone, Copy)]
pub struct Target {
    x: (i64, i64),
    y: (i64, i64),
}

impl Target {
    /// Peak height if the shot lands in the target
    fn fire(self, mut vx: i64, mut vy: i64) -> Option<i64> {
        let (mut x, mut y, mut peak) = (0, 0, 0);
        while x <= self.x.1 && y >= self.y.0 {
            if x >= self.x.0 && y <= self.y.1 {
                return Some(peak);
            }
            x += vx;
            y += vy;
            peak = peak.max(y);
            vx -= vx.signum();
            vy -= 1;
        }
        None
    }

    /// Peak heights of every hitting velocity
    fn hits(self) -> Vec<i64> {
        let max_vy = -self.y.0;
        (1..=self.x.1)
            .flat_map(|vx| (self.y.0..=max_vy).map(move |vy| (vx, vy)))
            .filter_map(|(vx, vy)| self.fire(vx, vy))
            .collect()
    }
}

#[derive(Debug)]
pub struct SharedData {
    target: Target,
    hits: Option<Vec<i64>>,
}

impl SharedData {
    fn hits(&mut self) -> &[i64] {
        let target = self.target;
        self.hits.get_or_insert_with(|| target.hits())
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let bounds = ints(input);
        let [x0, x1, y0, y1] = bounds[..] else {
            return Err(ParseError::invalid("expected `target area: x=a..b, y=c..d`"));
        };
        let target = Target {
            x: (x0.min(x1), x0.max(x1)),
            y: (y0.min(y1), y0.max(y1)),
        };
        if target.x.0 <= 0 || target.y.1 >= 0 {
            return Err(ParseError::invalid(
                "target must lie right of and below the launcher",
            ));
        }
        Ok(SharedData { target, hits: None })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .hits()
            .iter()
            .max()
            .map(|peak| peak.to_string())
            .ok_or_else(|| SolveError::failed("no velocity hits the target"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.hits().len().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;

    const EXAMPLE: &str = "target area: x=20..30, y=-10..-5";

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "45");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "112");
    }

    #[test]
    fn individual_shots() {
        let target = Target {
            x: (20, 30),
            y: (-10, -5),
        };
        assert_eq!(target.fire(7, 2), Some(3));
        assert_eq!(target.fire(6, 9), Some(45));
        assert_eq!(target.fire(17, -4), None);
    }

    #[test]
    fn rejects_target_above_launcher() {
        assert!(Solver::parse("target area: x=20..30, y=5..10").is_err());
    }
}
