use anyhow::{Context, Result, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::trace;

use crate::utils::invalid_input;
use crate::utils::linear::{denominator_lcm, is_inconsistent, matrix, rational, reduced_row_echelon, to_i64};
use crate::utils::parse::parse_lines;
use crate::utils::search::bfs;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["bfs", "linear-algebra"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Bit `i` set when light `i` must end up on
    lights: u32,
    /// Counters (and lights) each button toggles
    buttons: Vec<Vec<usize>>,
    joltage: Vec<i64>,
}

/// A pivot row of the reduced system scaled to integers:
/// `lead * pivot + sum(coefs[i] * free[i]) = rhs`
struct PivotRow {
    lead: i64,
    coefs: Vec<i64>,
    rhs: i64,
}

struct Presses {
    rows: Vec<PivotRow>,
    /// Upper bound for each free button
    bounds: Vec<i64>,
    best: Option<i64>,
}

impl Presses {
    /// Total presses with the free buttons fixed to `free`, if every pivot
    /// button then gets a whole, non-negative count
    fn total(&self, free: &[i64]) -> Option<i64> {
        let mut total: i64 = free.iter().sum();
        for row in &self.rows {
            let rest = row.rhs - row.coefs.iter().zip(free).map(|(c, x)| c * x).sum::<i64>();
            if rest < 0 || rest % row.lead != 0 {
                return None;
            }
            total += rest / row.lead;
        }
        Some(total)
    }

    fn search(&mut self, free: &mut Vec<i64>) {
        let partial: i64 = free.iter().sum();
        if self.best.is_some_and(|best| partial >= best) {
            return;
        }
        if free.len() == self.bounds.len() {
            if let Some(total) = self.total(free) {
                self.best = Some(self.best.map_or(total, |best| best.min(total)));
            }
            return;
        }
        for presses in 0..=self.bounds[free.len()] {
            free.push(presses);
            self.search(free);
            free.pop();
        }
    }
}

impl Machine {
    fn button_mask(&self, button: &[usize]) -> u32 {
        button.iter().fold(0, |mask, &light| mask | 1 << light)
    }

    fn fewest_light_presses(&self) -> Option<usize> {
        let masks: Vec<u32> = self.buttons.iter().map(|b| self.button_mask(b)).collect();
        bfs(0u32, |&state| masks.iter().map(move |m| state ^ m).collect::<Vec<_>>(), |&state| {
            state == self.lights
        })
        .map(|(_, presses)| presses)
    }

    /// Fewest presses reaching every joltage target exactly.
    ///
    /// Solves `A x = target` by elimination and enumerates the free buttons,
    /// each bounded by the smallest target among the counters it feeds.
    fn fewest_joltage_presses(&self) -> Result<Option<i64>> {
        let vars = self.buttons.len();
        let rows: Vec<Vec<i64>> = self
            .joltage
            .iter()
            .enumerate()
            .map(|(counter, &target)| {
                let mut row: Vec<i64> = self
                    .buttons
                    .iter()
                    .map(|b| i64::from(b.contains(&counter)))
                    .collect();
                row.push(target);
                row
            })
            .collect();
        let mut rows = matrix(&rows);
        let pivots = reduced_row_echelon(&mut rows, vars);
        if is_inconsistent(&rows, vars, pivots.len()) {
            return Ok(None);
        }

        let free: Vec<usize> = (0..vars).filter(|c| !pivots.contains(c)).collect();
        let mut pivot_rows = Vec::with_capacity(pivots.len());
        for (row, &col) in rows.iter().zip(&pivots) {
            let scale = rational(denominator_lcm(row));
            let int = |v: &num::BigRational| to_i64(&(v * &scale)).context("coefficient overflows i64");
            pivot_rows.push(PivotRow {
                lead: int(&row[col])?,
                coefs: free.iter().map(|&f| int(&row[f])).collect::<Result<_>>()?,
                rhs: int(&row[vars])?,
            });
        }
        let bounds = free
            .iter()
            .map(|&f| {
                self.buttons[f]
                    .iter()
                    .map(|&counter| self.joltage[counter])
                    .min()
                    .unwrap_or(0)
            })
            .collect();
        trace!("{} buttons, {} free", vars, free.len());

        let mut presses = Presses {
            rows: pivot_rows,
            bounds,
            best: None,
        };
        presses.search(&mut Vec::with_capacity(free.len()));
        Ok(presses.best)
    }
}

fn parse_list(token: &str, open: char, close: char) -> Result<Vec<usize>> {
    let inner = token
        .strip_prefix(open)
        .and_then(|t| t.strip_suffix(close))
        .with_context(|| format!("expected {open}..{close}, found {token:?}"))?;
    inner
        .split(',')
        .map(|n| n.trim().parse().with_context(|| format!("{n:?} is not an index")))
        .collect()
}

fn parse_machine(line: &str) -> Result<Machine> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [diagram, buttons @ .., joltage] = tokens.as_slice() else {
        bail!("expected a light diagram, buttons and joltage targets");
    };
    let diagram = diagram
        .strip_prefix('[')
        .and_then(|d| d.strip_suffix(']'))
        .context("light diagram must be in brackets")?;
    ensure!(diagram.len() <= 32, "at most 32 lights");
    let mut lights = 0;
    for (i, c) in diagram.chars().enumerate() {
        match c {
            '#' => lights |= 1 << i,
            '.' => {}
            _ => bail!("unexpected light {c:?}"),
        }
    }
    let buttons = buttons
        .iter()
        .map(|b| parse_list(b, '(', ')'))
        .collect::<Result<Vec<_>>>()?;
    let joltage: Vec<i64> = parse_list(joltage, '{', '}')?
        .into_iter()
        .map(|j| j as i64)
        .collect();
    ensure!(joltage.len() == diagram.len(), "one joltage target per light");
    for button in &buttons {
        ensure!(
            button.iter().all(|&i| i < diagram.len()),
            "button {button:?} wires a missing light"
        );
    }
    Ok(Machine {
        lights,
        buttons,
        joltage,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_machine).map_err(invalid_input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(machines: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for (idx, machine) in machines.iter().enumerate() {
            total += machine.fewest_light_presses().ok_or_else(|| {
                SolveError::failed(format!("machine {} cannot match its lights", idx + 1))
            })?;
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(machines: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for (idx, machine) in machines.iter().enumerate() {
            let presses = machine
                .fewest_joltage_presses()
                .map_err(crate::utils::solve_failed)?
                .ok_or_else(|| {
                    SolveError::failed(format!("machine {} cannot reach its joltage", idx + 1))
                })?;
            total += presses;
        }
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::answer;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
        [...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
        [.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
    "};

    #[test]
    fn example() {
        assert_eq!(answer::<Solver>(EXAMPLE, 1), "7");
        assert_eq!(answer::<Solver>(EXAMPLE, 2), "33");
    }

    #[test]
    fn per_machine_presses() {
        let machines = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(machines[0].lights, 0b0110);
        let lights: Vec<_> = machines.iter().map(|m| m.fewest_light_presses()).collect();
        assert_eq!(lights, vec![Some(2), Some(3), Some(2)]);
        let joltage: Vec<_> = machines
            .iter()
            .map(|m| m.fewest_joltage_presses().unwrap())
            .collect();
        assert_eq!(joltage, vec![Some(10), Some(12), Some(11)]);
    }

    #[test]
    fn unreachable_targets() {
        // The only button lights both, so a single light is impossible
        let machine = parse_machine("[#.] (0,1) {1,2}").unwrap();
        assert_eq!(machine.fewest_light_presses(), None);
        assert_eq!(machine.fewest_joltage_presses().unwrap(), None);
        assert!(parse_machine("[#.] (0,2) {1,2}").is_err());
    }
}
