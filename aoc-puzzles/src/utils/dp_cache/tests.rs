//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use super::*;

/// fib(n) depends on fib(n-1), fib(n-2)
struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

#[test]
fn test_fibonacci_linear_dependency_chain() {
    let cache = DpCache::new(VecBackend::new(), Fibonacci);

    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&90), 2_880_067_194_370_816_120);
    assert_eq!(cache.len(), 91);
}

#[test]
fn test_diamond_dependency_memoization() {
    // A(0) depends on B(1) and C(2), both depend on D(3)
    struct Diamond {
        count: Rc<Cell<i32>>,
    }

    impl DpProblem<usize, i32> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
            self.count.set(self.count.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 10,
            }
        }
    }

    let count = Rc::new(Cell::new(0));
    let cache = DpCache::new(VecBackend::new(), Diamond { count: count.clone() });

    assert_eq!(cache.get(&0), 50);
    assert_eq!(count.get(), 4);

    assert_eq!(cache.get(&0), 50);
    assert_eq!(count.get(), 4);
}

#[test]
fn test_vec_backend_keeps_first_value() {
    let mut backend: VecBackend<i32> = VecBackend::new();

    assert_eq!(*backend.get_or_insert_with(5, || 42), 42);
    assert_eq!(*backend.get_or_insert_with(5, || 999), 42);
    assert_eq!(backend.get(&5), Some(&42));
    assert_eq!(backend.get(&4), None);
    assert_eq!(backend.get(&10), None);
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_hashmap_backend_with_tuple_states() {
    // Ways to climb `n` stairs taking 1..=max steps at a time
    let stairs = ClosureProblem::new(
        |&(n, max): &(u32, u32)| (1..=max.min(n)).map(|step| (n - step, max)).collect(),
        |&(n, _): &(u32, u32), deps: Vec<u64>| if n == 0 { 1 } else { deps.iter().sum() },
    );
    let cache = DpCache::new(HashMapBackend::new(), stairs);

    assert_eq!(cache.get(&(4, 2)), 5);
    assert_eq!(cache.get(&(4, 3)), 7);
    assert_eq!(cache.get(&(10, 2)), 89);
    assert!(!cache.is_empty());
}
