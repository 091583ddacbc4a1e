//! Memoization cache for recursive searches
//!
//! Many puzzles count things over a state space whose states depend on
//! smaller states (arrangements of the rest of a row, stones after fewer
//! blinks, paths from the next device). [`DpCache`] memoizes such a
//! recurrence: a [`DpProblem`] names the states a state depends on and how to
//! combine their values.
//!
//! # Backend Types
//!
//! - [`VecBackend`]: dense, sequential `usize` indices (auto-growing)
//! - [`HashMapBackend`]: arbitrary hashable index types
//!
//! # Warning: Cycle Behavior
//!
//! **This cache does NOT support cycle detection.** A cyclic dependency graph
//! recurses until the stack overflows. Dependencies must form a DAG.
//!
//! # Example
//!
//! ```rust
//! use aoc_puzzles::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! /// Lattice paths to (0, 0) moving only left or up
//! struct GridPaths;
//!
//! impl DpProblem<(usize, usize), u64> for GridPaths {
//!     fn deps(&self, pos: &(usize, usize)) -> Vec<(usize, usize)> {
//!         let (r, c) = *pos;
//!         let mut deps = Vec::new();
//!         if r > 0 { deps.push((r - 1, c)); }
//!         if c > 0 { deps.push((r, c - 1)); }
//!         deps
//!     }
//!     fn compute(&self, _pos: &(usize, usize), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::new(HashMapBackend::new(), GridPaths);
//! assert_eq!(cache.get(&(4, 4)), 70); // C(8,4)
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};

#[cfg(test)]
mod tests;
