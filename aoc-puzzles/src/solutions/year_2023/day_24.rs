use anyhow::ensure;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use log::debug;
use num::BigRational;

use crate::utils::invalid_input;
use crate::utils::linear::{rational, solve_unique, to_i64};
use crate::utils::parse::{ints, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 24, tags = ["geometry", "linear-algebra"])]
pub struct Solver;

const TEST_AREA: (i128, i128) = (200_000_000_000_000, 400_000_000_000_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    pos: [i128; 3],
    vel: [i128; 3],
}

fn parse_hailstone(line: &str) -> anyhow::Result<Hailstone> {
    let values = ints(line);
    ensure!(values.len() == 6, "expected `px, py, pz @ vx, vy, vz`");
    let v = |i: usize| i128::from(values[i]);
    Ok(Hailstone {
        pos: [v(0), v(1), v(2)],
        vel: [v(3), v(4), v(5)],
    })
}

/// Whether the XY paths of `a` and `b` cross inside `[lo, hi]` at a point
/// neither stone has already passed
fn paths_cross(a: &Hailstone, b: &Hailstone, (lo, hi): (i128, i128)) -> bool {
    let ([px, py, _], [vx, vy, _]) = (a.pos, a.vel);
    let ([qx, qy, _], [ux, uy, _]) = (b.pos, b.vel);
    let mut det = vx * uy - vy * ux;
    if det == 0 {
        return false;
    }
    let (dx, dy) = (qx - px, qy - py);
    let (mut t, mut s) = (dx * uy - dy * ux, dx * vy - dy * vx);
    if det < 0 {
        (det, t, s) = (-det, -t, -s);
    }
    if t < 0 || s < 0 {
        return false;
    }
    // Crossing point scaled by det keeps everything integral
    let window = lo * det..=hi * det;
    window.contains(&(px * det + t * vx)) && window.contains(&(py * det + t * vy))
}

fn crossings(stones: &[Hailstone], area: (i128, i128)) -> usize {
    stones
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| paths_cross(a, b, area))
        .count()
}

fn cross(a: [i128; 3], b: [i128; 3]) -> [i128; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Three equations in (px, py, pz, vx, vy, vz) from requiring the rock to
/// hit both `a` and `b`, with the quadratic `p x v` term cancelled
fn pair_equations(a: &Hailstone, b: &Hailstone) -> [Vec<BigRational>; 3] {
    let dv: [i128; 3] = std::array::from_fn(|i| b.vel[i] - a.vel[i]);
    let dp: [i128; 3] = std::array::from_fn(|i| b.pos[i] - a.pos[i]);
    let (ca, cb) = (cross(a.pos, a.vel), cross(b.pos, b.vel));
    let c: [i128; 3] = std::array::from_fn(|i| cb[i] - ca[i]);
    let row = |coeffs: [i128; 6], rhs: i128| {
        coeffs
            .into_iter()
            .chain([rhs])
            .map(rational)
            .collect::<Vec<_>>()
    };
    [
        row([0, dv[2], -dv[1], 0, -dp[2], dp[1]], c[0]),
        row([-dv[2], 0, dv[0], dp[2], 0, -dp[0]], c[1]),
        row([dv[1], -dv[0], 0, -dp[1], dp[0], 0], c[2]),
    ]
}

/// Sum of the rock's starting coordinates
fn rock_throw(stones: &[Hailstone]) -> Option<i64> {
    let (first, second) = (stones.first()?, stones.get(1)?);
    stones[2..].iter().find_map(|third| {
        let mut rows = Vec::with_capacity(6);
        rows.extend(pair_equations(first, second));
        rows.extend(pair_equations(first, third));
        let solution = solve_unique(rows)?;
        debug!("rock solved from hailstones {first:?}, {second:?}, {third:?}");
        solution[..3].iter().map(to_i64).sum()
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hailstone>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_hailstone).map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(stones: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(crossings(stones, TEST_AREA).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(stones: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        rock_throw(stones)
            .map(|sum| sum.to_string())
            .ok_or_else(|| SolveError::failed("no integral rock trajectory hits every hailstone"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        19, 13, 30 @ -2,  1, -2
        18, 19, 22 @ -1, -1, -2
        20, 25, 34 @ -2, -2, -4
        12, 31, 28 @ -1, -2, -1
        20, 19, 15 @  1, -5, -3
    "};

    #[test]
    fn crossings_in_small_area() {
        let stones = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(crossings(&stones, (7, 27)), 2);
    }

    #[test]
    fn parallel_and_past_paths_do_not_cross() {
        let stones = Solver::parse(EXAMPLE).unwrap();
        // 18,19 @ -1,-1 and 20,25 @ -2,-2 are parallel
        assert!(!paths_cross(&stones[1], &stones[2], (7, 27)));
        // crossing happened in the past for the first stone
        assert!(!paths_cross(&stones[0], &stones[4], (7, 27)));
    }

    #[test]
    fn rock_position() {
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "47");
    }
}
