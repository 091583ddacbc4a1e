use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::geometry::{Direction, Point2};
use crate::utils::hash::md5_hex;
use crate::utils::search::bfs;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 17, tags = ["md5", "bfs", "dfs"])]
pub struct Solver;

const VAULT: Point2 = Point2::new(3, 3);

/// Door order in the hash prefix
const DOORS: [(char, Direction); 4] = [
    ('U', Direction::North),
    ('D', Direction::South),
    ('L', Direction::West),
    ('R', Direction::East),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Room {
    pos: Point2,
    path: String,
}

fn moves(passcode: &str, room: &Room) -> Vec<Room> {
    if room.pos == VAULT {
        return Vec::new();
    }
    let hash = md5_hex(format!("{passcode}{}", room.path));
    hash.chars()
        .zip(DOORS)
        .filter(|&(c, _)| matches!(c, 'b'..='f'))
        .map(|(_, (label, dir))| Room {
            pos: room.pos.step(dir),
            path: format!("{}{label}", room.path),
        })
        .filter(|next| (0..4).contains(&next.pos.x) && (0..4).contains(&next.pos.y))
        .collect()
}

fn shortest_path(passcode: &str) -> Option<String> {
    let start = Room {
        pos: Point2::ORIGIN,
        path: String::new(),
    };
    bfs(start, |room| moves(passcode, room), |room| room.pos == VAULT)
        .map(|(room, _)| room.path)
}

/// Length of the longest path ending at the vault
fn longest_path(passcode: &str) -> Option<usize> {
    let mut longest = None;
    let mut stack = vec![Room {
        pos: Point2::ORIGIN,
        path: String::new(),
    }];
    while let Some(room) = stack.pop() {
        if room.pos == VAULT {
            longest = longest.max(Some(room.path.len()));
            continue;
        }
        stack.extend(moves(passcode, &room));
    }
    longest
}

impl AocParser for Solver {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let passcode = input.trim();
        if passcode.is_empty() {
            return Err(ParseError::missing("passcode"));
        }
        Ok(passcode)
    }
}

impl PartSolver<1> for Solver {
    fn solve(passcode: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shortest_path(passcode).ok_or_else(|| SolveError::failed("the vault is unreachable"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(passcode: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        longest_path(passcode)
            .map(|len| len.to_string())
            .ok_or_else(|| SolveError::failed("the vault is unreachable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;

    #[test]
    fn shortest_paths() {
        assert_eq!(answer::<Solver>("ihgpwlah", 1), "DDRRRD");
        assert_eq!(answer::<Solver>("kglvqrso", 1), "DDUDRLRRUDRD");
        assert_eq!(
            answer::<Solver>("ulqzkmnv", 1),
            "DRURDRUDDLLDLUURRDULRLDUUDDDRR"
        );
    }

    #[test]
    fn longest_paths() {
        assert_eq!(answer::<Solver>("ihgpwlah", 2), "370");
        assert_eq!(answer::<Solver>("kglvqrso", 2), "492");
        assert_eq!(answer::<Solver>("ulqzkmnv", 2), "830");
    }

    #[test]
    fn dead_end_passcode() {
        assert_eq!(shortest_path("hijkl"), None);
        assert_eq!(longest_path("hijkl"), None);
    }
}
