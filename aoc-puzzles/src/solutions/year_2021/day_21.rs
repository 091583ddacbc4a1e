use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::ints;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 21, tags = ["dp", "game"])]
pub struct Solver;

/// Sums of three rolls of a three-sided die and how many universes roll each
const DIRAC_ROLLS: [(u8, u64); 7] = [(3, 1), (4, 3), (5, 6), (6, 7), (7, 6), (8, 3), (9, 1)];
const DIRAC_GOAL: u8 = 21;

fn advance(pos: u8, by: u32) -> u8 {
    ((u32::from(pos) - 1 + by) % 10 + 1) as u8
}

/// Deterministic 100-sided die; losing score times the number of rolls
fn practice_game(mut pos: [u8; 2]) -> u64 {
    let mut scores = [0u64; 2];
    let mut rolls = 0u32;
    let mut player = 0;
    loop {
        let moved: u32 = (0..3).map(|i| (rolls + i) % 100 + 1).sum();
        rolls += 3;
        pos[player] = advance(pos[player], moved);
        scores[player] += u64::from(pos[player]);
        if scores[player] >= 1000 {
            return scores[1 - player] * u64::from(rolls);
        }
        player = 1 - player;
    }
}

/// (position, score) of the player to move, then of the other player
type Turn = (u8, u8, u8, u8);

/// Universes in which the player to move and the other player win
struct DiracGame;

impl DiracGame {
    /// Successor turns, or `None` where the roll wins outright
    fn outcomes(turn: &Turn) -> impl Iterator<Item = (u64, Option<Turn>)> + use<> {
        let &(pos, score, other_pos, other_score) = turn;
        DIRAC_ROLLS.into_iter().map(move |(sum, universes)| {
            let pos = advance(pos, u32::from(sum));
            let score = score + pos;
            let next = (score < DIRAC_GOAL).then_some((other_pos, other_score, pos, score));
            (universes, next)
        })
    }
}

impl DpProblem<Turn, (u64, u64)> for DiracGame {
    fn deps(&self, turn: &Turn) -> Vec<Turn> {
        Self::outcomes(turn).filter_map(|(_, next)| next).collect()
    }

    fn compute(&self, turn: &Turn, deps: Vec<(u64, u64)>) -> (u64, u64) {
        let mut deps = deps.into_iter();
        let (mut mine, mut theirs) = (0, 0);
        for (universes, next) in Self::outcomes(turn) {
            if next.is_none() {
                mine += universes;
            } else if let Some((their_wins, my_wins)) = deps.next() {
                mine += universes * my_wins;
                theirs += universes * their_wins;
            }
        }
        (mine, theirs)
    }
}

fn quantum_game(pos: [u8; 2]) -> u64 {
    let cache = DpCache::new(HashMapBackend::new(), DiracGame);
    let (first, second) = cache.get(&(pos[0], 0, pos[1], 0));
    debug!("dirac dice explored {} turns", cache.len());
    first.max(second)
}

impl AocParser for Solver {
    type SharedData<'a> = [u8; 2];

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let starts: Vec<u8> = input
            .lines()
            .filter_map(|line| ints(line).last().copied())
            .map(|pos| match u8::try_from(pos) {
                Ok(p @ 1..=10) => Ok(p),
                _ => Err(ParseError::invalid(format!("starting position {pos} is off the track"))),
            })
            .collect::<Result<_, _>>()?;
        starts
            .try_into()
            .map_err(|_| ParseError::invalid("expected two starting positions"))
    }
}

impl PartSolver<1> for Solver {
    fn solve(starts: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(practice_game(*starts).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(starts: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(quantum_game(*starts).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Player 1 starting position: 4
        Player 2 starting position: 8
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "739785");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "444356092776315");
    }

    #[test]
    fn track_wraps() {
        assert_eq!(advance(7, 5), 2);
        assert_eq!(advance(10, 10), 10);
        assert!(Solver::parse("Player 1 starting position: 11\nPlayer 2 starting position: 3").is_err());
    }
}
