//! Parsed days and their timings

use crate::error::{ParseError, SolveError};
use crate::solver::SolverExt;
use chrono::{DateTime, TimeDelta, Utc};

/// Wall-clock window of one parse or solve step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Span {
    /// Run `f`, recording when it started and finished
    pub fn time<T>(f: impl FnOnce() -> T) -> (T, Span) {
        let start = Utc::now();
        let value = f();
        (value, Span { start, end: Utc::now() })
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Answer to one part with the window it was computed in
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub solved: Span,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solved.duration()
    }
}

/// One (year, day) whose input has been parsed.
///
/// Both parts run against the same shared data, so work cached by part 1
/// is visible to part 2.
pub struct SolverInstance<'a, S: SolverExt> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parsed: Span,
}

impl<'a, S: SolverExt> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parsed) = Span::time(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: shared?,
            parsed,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], so the registry can hand out
/// any day behind one type.
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn print_day(mut solver: Box<dyn DynSolver>) -> Result<(), aoc_solver::SolveError> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("{}/{:02} part {part}: {}", solver.year(), solver.day(), result.answer);
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve `part`; out-of-range parts are rejected before reaching the day
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_span(&self) -> Span;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_span().duration()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, solved) = Span::time(|| S::solve_part_checked_range(&mut self.shared, part));
        Ok(SolveResult {
            answer: answer?,
            solved,
        })
    }

    fn parse_span(&self) -> Span {
        self.parsed
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{AocParser, Solver};

    struct Captcha;

    impl AocParser for Captcha {
        type SharedData<'a> = Vec<u32>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .trim()
                .chars()
                .map(|c| c.to_digit(10).ok_or_else(|| ParseError::invalid(format!("{c:?}"))))
                .collect()
        }
    }

    impl Solver for Captcha {
        const PARTS: u8 = 1;

        fn solve_part(digits: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
            Ok(digits.iter().sum::<u32>().to_string())
        }
    }

    #[test]
    fn spans_are_ordered() {
        let mut instance = SolverInstance::<Captcha>::new(2017, 1, "1122").unwrap();
        let span = instance.parse_span();
        assert!(span.start <= span.end);

        let result = instance.solve(1).unwrap();
        assert_eq!(result.answer, "6");
        assert!(result.duration() >= TimeDelta::zero());
        assert!(instance.parse_duration() >= TimeDelta::zero());
    }

    #[test]
    fn parse_failure_builds_nothing() {
        assert!(SolverInstance::<Captcha>::new(2017, 1, "12x").is_err());
    }

    #[test]
    fn extra_parts_are_out_of_range() {
        let mut instance = SolverInstance::<Captcha>::new(2017, 1, "9").unwrap();
        assert!(matches!(instance.solve(2), Err(SolveError::PartOutOfRange(2))));
        assert!(matches!(instance.solve(0), Err(SolveError::PartOutOfRange(0))));
    }
}
