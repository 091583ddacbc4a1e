use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 11, tags = ["dp"])]
pub struct Solver;

/// What one stone becomes after a single blink
fn blink(stone: u64) -> Vec<u64> {
    if stone == 0 {
        return vec![1];
    }
    let digits = stone.ilog10() + 1;
    if digits % 2 == 0 {
        let half = 10u64.pow(digits / 2);
        vec![stone / half, stone % half]
    } else {
        vec![stone * 2024]
    }
}

/// Number of stones `(stone, blinks)` turns into
struct Pebbles;

impl DpProblem<(u64, u8), u64> for Pebbles {
    fn deps(&self, &(stone, blinks): &(u64, u8)) -> Vec<(u64, u8)> {
        if blinks == 0 {
            return Vec::new();
        }
        blink(stone).into_iter().map(|s| (s, blinks - 1)).collect()
    }

    fn compute(&self, &(_, blinks): &(u64, u8), deps: Vec<u64>) -> u64 {
        if blinks == 0 { 1 } else { deps.iter().sum() }
    }
}

fn stones_after(stones: &[u64], blinks: u8) -> u64 {
    let cache = DpCache::new(HashMapBackend::new(), Pebbles);
    let total = stones.iter().map(|&s| cache.get(&(s, blinks))).sum();
    debug!("{blinks} blinks memoised {} states", cache.len());
    total
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split_whitespace()
            .map(|s| s.parse().map_err(|_| ParseError::invalid(format!("{s:?} is not a stone"))))
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(stones: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(stones_after(stones, 25).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(stones: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(stones_after(stones, 75).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;

    #[test]
    fn single_blinks() {
        assert_eq!(blink(0), vec![1]);
        assert_eq!(blink(1000), vec![10, 0]);
        assert_eq!(blink(99), vec![9, 9]);
        assert_eq!(blink(125), vec![253000]);
    }

    #[test]
    fn example() {
        assert_eq!(stones_after(&[125, 17], 6), 22);
        assert_eq!(answer::<Solver>("125 17", 1), "55312");
    }
}
