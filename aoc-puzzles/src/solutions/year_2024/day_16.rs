use std::collections::{HashMap, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::geometry::{Direction, Point2};
use crate::utils::grid::Grid;
use crate::utils::invalid_input;
use crate::utils::search::dijkstra_all;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["grid", "dijkstra"])]
pub struct Solver;

const STEP_COST: u64 = 1;
const TURN_COST: u64 = 1000;

type Reindeer = (Point2, Direction);

#[derive(Debug)]
pub struct SharedData {
    maze: Grid<char>,
    start: Point2,
    end: Point2,
    scores: Option<Scores>,
}

/// Lowest score from the start and to the end for every reindeer state
#[derive(Debug)]
struct Scores {
    from_start: HashMap<Reindeer, u64>,
    to_end: HashMap<Reindeer, u64>,
}

fn open(maze: &Grid<char>, p: Point2) -> bool {
    maze.get(p).is_some_and(|&c| c != '#')
}

fn turns((p, d): Reindeer) -> Vec<(Reindeer, u64)> {
    vec![((p, d.turn_left()), TURN_COST), ((p, d.turn_right()), TURN_COST)]
}

fn score_maze(maze: &Grid<char>, start: Point2, end: Point2) -> Scores {
    let from_start = dijkstra_all([(start, Direction::East)], |&(p, d)| {
        let ahead = p.step(d);
        let mut next = turns((p, d));
        if open(maze, ahead) {
            next.push(((ahead, d), STEP_COST));
        }
        next
    });
    // Reversed moves: step backwards, turns are symmetric
    let to_end = dijkstra_all(Direction::ALL.map(|d| (end, d)), |&(p, d)| {
        let behind = p.step(d.reverse());
        let mut next = turns((p, d));
        if open(maze, behind) {
            next.push(((behind, d), STEP_COST));
        }
        next
    });
    Scores { from_start, to_end }
}

impl SharedData {
    fn scores(&mut self) -> &Scores {
        self.scores
            .get_or_insert_with(|| score_maze(&self.maze, self.start, self.end))
    }

    fn best_score(&mut self) -> Option<u64> {
        let end = self.end;
        self.scores()
            .from_start
            .iter()
            .filter(|((p, _), _)| *p == end)
            .map(|(_, &score)| score)
            .min()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let maze = Grid::parse_chars(input).map_err(invalid_input)?;
        let start = maze.find(|&c| c == 'S').ok_or_else(|| ParseError::missing("start tile `S`"))?;
        let end = maze.find(|&c| c == 'E').ok_or_else(|| ParseError::missing("end tile `E`"))?;
        Ok(SharedData {
            maze,
            start,
            end,
            scores: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .best_score()
            .map(|score| score.to_string())
            .ok_or_else(|| SolveError::failed("the end tile is unreachable"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .best_score()
            .ok_or_else(|| SolveError::failed("the end tile is unreachable"))?;
        let scores = shared.scores();
        let seats: HashSet<Point2> = scores
            .from_start
            .iter()
            .filter(|&(state, &score)| scores.to_end.get(state).is_some_and(|&rest| score + rest == best))
            .map(|((p, _), _)| *p)
            .collect();
        Ok(seats.len().to_string())
    }
}
