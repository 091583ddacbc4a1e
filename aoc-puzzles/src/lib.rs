//! Advent of Code puzzle archive with automatic registration
//!
//! Every day lives in `solutions::year_YYYY::day_N` as a unit struct named
//! `Solver` deriving `AocSolver` and `AutoRegisterSolver`, so linking this
//! crate is enough for a registry built with `register_all_plugins` to see
//! it. Helpers shared between days live in [`utils`].

pub mod solutions;
pub mod utils;

#[cfg(test)]
mod test_support {
    use aoc_solver::{SolverRegistry, SolverRegistryBuilder};

    /// Registry holding every archived day
    pub fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_all_plugins()
            .expect("no duplicate registrations")
            .build()
    }

    /// Parse `input` and answer `part` with solver `S`
    pub fn answer<S: aoc_solver::Solver>(input: &str, part: u8) -> String {
        let mut shared = S::parse(input).unwrap_or_else(|e| panic!("parse failed: {e}"));
        S::solve_part(&mut shared, part).unwrap_or_else(|e| panic!("part {part} failed: {e}"))
    }
}
