//! Output formatting for solver results

use crate::error::ExecutorError;
use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::{Duration, Instant};

/// Prints results as they are released and a summary at the end
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

/// Where a rendered result goes
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Stdout(String),
    Stderr(String),
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match result_line(result, self.quiet) {
            Line::Stdout(line) => println!("{line}"),
            Line::Stderr(line) => eprintln!("{line}"),
        }
    }

    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }
        println!();
        for line in Summary::of(results).lines(self.start_time.elapsed()) {
            println!("{line}");
        }
    }
}

fn result_line(result: &SolverResult, quiet: bool) -> Line {
    match (&result.answer, quiet) {
        (Ok(answer), true) => Line::Stdout(answer.clone()),
        (Ok(answer), false) => Line::Stdout(format_line(result, answer)),
        (Err(e), true) => Line::Stderr(format!("Error: {e}")),
        (Err(e), false) => Line::Stderr(format!("{}: Error - {e}", label(result))),
    }
}

/// Totals over every released part
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    solved: usize,
    failed: usize,
    /// Failed parts whose input file could not be loaded
    missing_input: usize,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Summary {
    fn of(results: &[SolverResult]) -> Self {
        let mut summary = Summary {
            solved: 0,
            failed: 0,
            missing_input: 0,
            parse_time: TimeDelta::zero(),
            solve_time: TimeDelta::zero(),
        };
        for result in results {
            // Each parse is attached to exactly one part, solved or not
            if let Some(parse) = result.parse_duration {
                summary.parse_time += parse;
            }
            match &result.answer {
                Ok(_) => {
                    summary.solved += 1;
                    summary.solve_time += result.solve_duration;
                }
                Err(e) => {
                    summary.failed += 1;
                    if matches!(e.inner(), ExecutorError::Input { .. }) {
                        summary.missing_input += 1;
                    }
                }
            }
        }
        summary
    }

    fn lines(&self, elapsed: Duration) -> Vec<String> {
        let mut counts = format!("Solvers: {} solved, {} failed", self.solved, self.failed);
        if self.missing_input > 0 {
            counts.push_str(&format!(" ({} without input)", self.missing_input));
        }
        let mut lines = vec![
            "--- Summary ---".to_string(),
            counts,
            format!("Total parse time: {}", format_duration(self.parse_time)),
            format!("Total solve time: {}", format_duration(self.solve_time)),
            format!("Elapsed wall-clock time: {}", format_std_duration(elapsed)),
        ];
        if let Some(speedup) = speedup(self.parse_time + self.solve_time, elapsed) {
            lines.push(format!("Speedup factor: {speedup:.2}x"));
        }
        lines
    }
}

fn label(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

fn format_line(result: &SolverResult, answer: &str) -> String {
    let parse = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    format!(
        "{}: {} ({}solve: {})",
        label(result),
        answer,
        parse,
        format_duration(result.solve_duration)
    )
}

fn speedup(compute: TimeDelta, elapsed: Duration) -> Option<f64> {
    if elapsed.is_zero() {
        return None;
    }
    let compute_secs = compute.num_microseconds()? as f64 / 1_000_000.0;
    Some(compute_secs / elapsed.as_secs_f64())
}

fn format_micros(micros: u128) -> String {
    if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

fn format_duration(d: TimeDelta) -> String {
    match d.num_microseconds() {
        None => "N/A".to_string(),
        Some(micros) if micros < 0 => format!("-{}", format_micros(micros.unsigned_abs().into())),
        Some(micros) => format_micros(micros.unsigned_abs().into()),
    }
}

fn format_std_duration(d: Duration) -> String {
    format_micros(d.as_micros())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArcExecutorError, InputError};
    use aoc_solver::{SolveError, SolverError};
    use std::path::PathBuf;

    fn solved(day: u8, part: u8, answer: &str, parse_us: Option<i64>, solve_us: i64) -> SolverResult {
        SolverResult {
            year: 2016,
            day,
            part,
            answer: Ok(answer.to_string()),
            solve_duration: TimeDelta::microseconds(solve_us),
            parse_duration: parse_us.map(TimeDelta::microseconds),
        }
    }

    fn failed(day: u8, part: u8, error: ArcExecutorError, parse_us: Option<i64>) -> SolverResult {
        SolverResult {
            year: 2016,
            day,
            part,
            answer: Err(error),
            solve_duration: TimeDelta::zero(),
            parse_duration: parse_us.map(TimeDelta::microseconds),
        }
    }

    fn missing_input(day: u8) -> ArcExecutorError {
        ExecutorError::Input {
            year: 2016,
            day,
            source: InputError::Missing {
                path: PathBuf::from(format!("inputs/2016/day{day:02}.txt")),
            },
        }
        .into()
    }

    fn no_path() -> ArcExecutorError {
        ExecutorError::Solver(SolverError::SolveError(SolveError::failed("no path"))).into()
    }

    #[test]
    fn durations_pick_a_unit() {
        assert_eq!(format_duration(TimeDelta::microseconds(250)), "250µs");
        assert_eq!(format_duration(TimeDelta::microseconds(12_340)), "12.34ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(-1500)), "-1.50s");
        assert_eq!(format_std_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn answer_line_layout() {
        let result = solved(1, 2, "4", Some(20), 80);
        assert_eq!(format_line(&result, "4"), "2016/01 Part 2: 4 (parse: 20µs, solve: 80µs)");
        let later_part = solved(1, 2, "4", None, 80);
        assert_eq!(format_line(&later_part, "4"), "2016/01 Part 2: 4 (solve: 80µs)");
    }

    #[test]
    fn quiet_mode_prints_bare_answers() {
        let ok = solved(13, 1, "82", Some(5), 40);
        assert_eq!(result_line(&ok, true), Line::Stdout("82".to_string()));
        assert_eq!(
            result_line(&ok, false),
            Line::Stdout("2016/13 Part 1: 82 (parse: 5µs, solve: 40µs)".to_string())
        );

        let err = failed(13, 2, no_path(), None);
        assert_eq!(
            result_line(&err, true),
            Line::Stderr("Error: Solve error: Solve failed: no path".to_string())
        );
        assert_eq!(
            result_line(&err, false),
            Line::Stderr("2016/13 Part 2: Error - Solve error: Solve failed: no path".to_string())
        );
    }

    #[test]
    fn summary_counts_each_parse_once() {
        let results = vec![
            // Day 1 parsed once and shared by both parts
            solved(1, 1, "12", Some(100), 30),
            solved(1, 2, "4", None, 20),
            // Day 12 parsed separately for each part
            solved(12, 1, "318007", Some(50), 1_000),
            solved(12, 2, "9227661", Some(50), 2_000),
            // Day 13 parsed, then part 1 failed and part 2 solved
            failed(13, 1, no_path(), Some(10)),
            solved(13, 2, "138", None, 40),
            // Day 17 has no input at all
            failed(17, 1, missing_input(17), None),
            failed(17, 2, missing_input(17), None),
        ];
        let summary = Summary::of(&results);
        assert_eq!(
            summary,
            Summary {
                solved: 5,
                failed: 3,
                missing_input: 2,
                parse_time: TimeDelta::microseconds(210),
                solve_time: TimeDelta::microseconds(3_090),
            }
        );

        let lines = summary.lines(Duration::from_micros(1_650));
        assert_eq!(lines[1], "Solvers: 5 solved, 3 failed (2 without input)");
        assert_eq!(lines[2], "Total parse time: 210µs");
        assert_eq!(lines[3], "Total solve time: 3.09ms");
        assert_eq!(lines[4], "Elapsed wall-clock time: 1.65ms");
        assert_eq!(lines[5], "Speedup factor: 2.00x");
    }

    #[test]
    fn summary_of_nothing() {
        let summary = Summary::of(&[]);
        assert_eq!((summary.solved, summary.failed), (0, 0));
        let lines = summary.lines(Duration::ZERO);
        assert_eq!(lines[1], "Solvers: 0 solved, 0 failed");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn speedup_compares_compute_to_wall_clock() {
        let ratio = speedup(TimeDelta::seconds(4), Duration::from_secs(2)).unwrap();
        assert!((ratio - 2.0).abs() < 1e-9);
        assert_eq!(speedup(TimeDelta::seconds(1), Duration::ZERO), None);
    }
}
