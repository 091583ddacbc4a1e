//! Helpers shared across puzzle days

pub mod default_map;
pub mod dp_cache;
pub mod geometry;
pub mod grid;
pub mod hash;
pub mod linear;
pub mod parse;
pub mod search;

use aoc_solver::{ParseError, SolveError};

/// Flatten an `anyhow` chain into a [`ParseError::InvalidFormat`]
pub fn invalid_input(err: anyhow::Error) -> ParseError {
    ParseError::invalid(format!("{err:#}"))
}

/// Map an `anyhow` chain to [`SolveError::SolveFailed`]
pub fn solve_failed(err: anyhow::Error) -> SolveError {
    SolveError::failed(format!("{err:#}"))
}
