//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;

/// A dynamic programming cache with lazy evaluation and dependency resolution.
///
/// Dependencies are resolved recursively and each value is computed exactly
/// once.
///
/// # Warning: No Cycle Detection
///
/// This cache does NOT detect cycles in the dependency graph. If cycles exist,
/// the recursion never terminates (stack overflow).
/// **Users MUST ensure dependencies form a DAG.**
///
/// # Example
///
/// ```rust
/// use aoc_puzzles::utils::dp_cache::{ClosureProblem, DpCache, VecBackend};
///
/// let factorial = ClosureProblem::new(
///     |n: &usize| if *n == 0 { vec![] } else { vec![n - 1] },
///     |n: &usize, deps: Vec<u64>| if *n == 0 { 1 } else { (*n as u64) * deps[0] },
/// );
/// let cache = DpCache::new(VecBackend::new(), factorial);
///
/// assert_eq!(cache.get(&5), 120);
/// ```
pub struct DpCache<I, K, B, P> {
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<fn(I) -> K>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    /// Creates a new DpCache with the given backend and problem definition.
    pub fn new(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Borrow the problem definition
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Retrieves the value for the given index, computing it if necessary.
    ///
    /// If the value is already cached, returns a clone of the cached value.
    /// Otherwise, resolves all dependencies recursively, computes the value,
    /// caches it, and returns a clone.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow is held while dependencies recurse
        let deps = self.problem.deps(index);
        let dep_values: Vec<K> = deps.iter().map(|dep| self.get(dep)).collect();

        let value = self.problem.compute(index, dep_values);
        self.backend
            .borrow_mut()
            .get_or_insert_with(index.clone(), || value)
            .clone()
    }

    /// Number of values computed so far
    pub fn len(&self) -> usize {
        self.backend.borrow().len()
    }

    /// Whether nothing has been computed yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
