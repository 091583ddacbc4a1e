use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::invalid_input;
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["intervals"])]
pub struct Solver;

#[derive(Debug)]
pub struct Inventory {
    /// Sorted, disjoint and non-adjacent
    fresh: Vec<RangeInclusive<u64>>,
    ids: Vec<u64>,
}

/// Union of `ranges` as sorted disjoint ranges
fn merge(mut ranges: Vec<RangeInclusive<u64>>) -> Vec<RangeInclusive<u64>> {
    ranges.sort_by_key(|r| *r.start());
    let mut merged: Vec<RangeInclusive<u64>> = Vec::with_capacity(ranges.len());
    for range in ranges.into_iter().filter(|r| !r.is_empty()) {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                let end = (*last.end()).max(*range.end());
                *last = *last.start()..=end;
            }
            _ => merged.push(range),
        }
    }
    merged
}

impl Inventory {
    fn is_fresh(&self, id: u64) -> bool {
        let idx = self.fresh.partition_point(|r| *r.end() < id);
        self.fresh.get(idx).is_some_and(|r| r.contains(&id))
    }
}

fn parse_range(line: &str) -> Result<RangeInclusive<u64>> {
    let (lo, hi) = line.split_once('-').context("expected lo-hi")?;
    Ok(lo.parse()?..=hi.parse()?)
}

impl AocParser for Solver {
    type SharedData<'a> = Inventory;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let parse = || -> Result<Inventory> {
            let input = input.replace("\r\n", "\n");
            let (ranges, ids) = input
                .split_once("\n\n")
                .context("ranges and ids must be separated by a blank line")?;
            let ranges = parse_lines(ranges, parse_range).context("fresh ranges")?;
            let ids = parse_lines(ids, |l| Ok(l.parse::<u64>()?)).context("ingredient ids")?;
            Ok(Inventory {
                fresh: merge(ranges),
                ids,
            })
        };
        parse().map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(inventory: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = inventory.ids.iter().filter(|&&id| inventory.is_fresh(id)).count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(inventory: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = inventory.fresh.iter().map(|r| r.end() - r.start() + 1).sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;
    use proptest::prelude::*;

    const EXAMPLE: &str = indoc! {"
        3-5
        10-14
        16-20
        12-18

        1
        5
        8
        11
        17
        32
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "3");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "14");
    }

    #[test]
    fn adjacent_and_nested_ranges_merge() {
        assert_eq!(merge(vec![5..=9, 1..=4, 2..=3, 11..=12]), vec![1..=9, 11..=12]);
        assert_eq!(merge(vec![0..=u64::MAX, 7..=8]), vec![0..=u64::MAX]);
    }

    #[test]
    fn missing_separator_is_an_error() {
        assert!(Solver::parse("3-5\n1\n").is_err());
    }

    proptest! {
        #[test]
        fn merged_ranges_cover_the_same_ids(bounds in prop::collection::vec((0u64..60, 0u64..8), 0..12)) {
            let ranges: Vec<_> = bounds.iter().map(|&(start, len)| start..=start + len).collect();
            let inventory = Inventory { fresh: merge(ranges.clone()), ids: Vec::new() };
            for pair in inventory.fresh.windows(2) {
                prop_assert!(pair[0].end() + 1 < *pair[1].start());
            }
            for id in 0..70 {
                prop_assert_eq!(inventory.is_fresh(id), ranges.iter().any(|r| r.contains(&id)));
            }
        }
    }
}
