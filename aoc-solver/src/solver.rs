//! Parser and solver traits every day implements

use crate::error::{ParseError, SolveError};

/// Turns a day's raw input into the data both parts work on.
///
/// `SharedData` may borrow from the input, and may carry caches that part 1
/// fills and part 2 reads.
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Part `N` of a day.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Captcha;
///
/// impl AocParser for Captcha {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .trim()
///             .chars()
///             .map(|c| c.to_digit(10).ok_or_else(|| ParseError::invalid(format!("not a digit: {c}"))))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Captcha {
///     fn solve(digits: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         let next = digits.iter().cycle().skip(1);
///         let sum: u32 = digits.iter().zip(next).filter(|(a, b)| a == b).map(|(a, _)| a).sum();
///         Ok(sum.to_string())
///     }
/// }
///
/// let mut digits = Captcha::parse("1122").unwrap();
/// assert_eq!(<Captcha as PartSolver<1>>::solve(&mut digits).unwrap(), "3");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Runtime part dispatch.
///
/// `#[derive(AocSolver)]` writes this from the `PartSolver` impls. A day can
/// also implement it directly with one `match` over `part`.
pub trait Solver: AocParser {
    /// Number of parts, usually 2; the last day of a year may have 1
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked dispatch, blanket-implemented for every [`Solver`]
pub trait SolverExt: Solver {
    /// Rejects part 0 and parts above [`Solver::PARTS`] with
    /// [`SolveError::PartOutOfRange`] before dispatching
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
