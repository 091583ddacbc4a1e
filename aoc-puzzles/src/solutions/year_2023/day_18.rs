use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::geometry::{Direction, Point2};
use crate::utils::invalid_input;
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["geometry", "shoelace"])]
pub struct Solver;

/// One dig instruction read both ways: the plain fields and the colour code
#[derive(Debug, Clone, Copy)]
pub struct Dig {
    plain: (Direction, i64),
    colour: (Direction, i64),
}

fn parse_dig(line: &str) -> anyhow::Result<Dig> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [dir, len, colour] = tokens[..] else {
        bail!("expected `<dir> <len> (#rrggbb)`");
    };
    let dir = Direction::from_char(dir.chars().next().context("empty direction")?)?;
    let len = len.parse().context("length")?;
    let hex = colour
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|h| h.len() == 6)
        .context("colour must look like (#rrggbb)")?;
    let colour_len = i64::from_str_radix(&hex[..5], 16).context("colour distance")?;
    let colour_dir = match &hex[5..] {
        "0" => Direction::East,
        "1" => Direction::South,
        "2" => Direction::West,
        "3" => Direction::North,
        other => bail!("colour direction {other:?} is not 0-3"),
    };
    Ok(Dig {
        plain: (dir, len),
        colour: (colour_dir, colour_len),
    })
}

/// Cubic metres dug: interior by the shoelace formula plus the trench itself
fn lagoon(plan: impl Iterator<Item = (Direction, i64)>) -> i64 {
    let mut pos = Point2::ORIGIN;
    let (mut twice_area, mut perimeter) = (0, 0);
    for (dir, len) in plan {
        let next = pos + dir.delta() * len;
        twice_area += pos.x * next.y - next.x * pos.y;
        perimeter += len;
        pos = next;
    }
    twice_area.abs() / 2 + perimeter / 2 + 1
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Dig>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_dig).map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(plan: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon(plan.iter().map(|d| d.plain)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(plan: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon(plan.iter().map(|d| d.colour)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        R 6 (#70c710)
        D 5 (#0dc571)
        L 2 (#5713f0)
        D 2 (#d2c081)
        R 2 (#59c680)
        D 2 (#411b91)
        L 5 (#8ceee2)
        U 2 (#caa173)
        L 1 (#1b58a2)
        U 2 (#caa171)
        R 2 (#7807d2)
        U 3 (#a77fa3)
        L 2 (#015232)
        U 2 (#7a21e3)
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "62");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "952408144115");
    }

    #[test]
    fn colour_decoding() {
        let dig = parse_dig("R 6 (#70c710)").unwrap();
        assert_eq!(dig.colour, (Direction::East, 461937));
        assert!(parse_dig("R 6 (#70c714)").is_err());
    }
}
