//! Result aggregator for ordering parallel solver results
//!
//! Buffers and orders results for streaming output using two min-heaps:
//! - One for expected keys (what we're waiting for)
//! - One for received results (buffered until their turn)

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Received result, ordered by its key alone
struct Pending(ResultKey, SolverResult);

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// Buffers results and releases them in ascending key order
pub struct ResultAggregator {
    /// Keys still owed, smallest on top
    expected: BinaryHeap<Reverse<ResultKey>>,
    /// Results that arrived ahead of their turn, smallest on top
    pending: BinaryHeap<Reverse<Pending>>,
}

impl ResultAggregator {
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Buffer `result` and return every result now due, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(Reverse(Pending(ResultKey::from(&result), result)));

        let mut ready = Vec::new();
        while let (Some(Reverse(due)), Some(Reverse(Pending(head, _)))) =
            (self.expected.peek(), self.pending.peek())
        {
            if head != due {
                break;
            }
            self.expected.pop();
            if let Some(Reverse(Pending(_, result))) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Everything still buffered, in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut results: Vec<_> = self.pending.drain().map(|Reverse(Pending(_, r))| r).collect();
        results.sort_by_key(|r| ResultKey::from(r));
        results
    }

    /// Whether every expected key has been released
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn make_result(k: ResultKey) -> SolverResult {
        SolverResult {
            year: k.year,
            day: k.day,
            part: k.part,
            answer: Ok(format!("{}_{}_{}", k.year, k.day, k.part)),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    #[test]
    fn in_order_results_pass_straight_through() {
        let keys = vec![key(2016, 25, 1), key(2017, 1, 1)];
        let mut agg = ResultAggregator::new(keys.clone());
        for k in keys {
            let ready = agg.add(make_result(k));
            assert_eq!(ready.iter().map(ResultKey::from).collect::<Vec<_>>(), vec![k]);
        }
        assert!(agg.is_complete());
    }

    #[test]
    fn later_results_wait_for_earlier_ones() {
        let mut agg = ResultAggregator::new(vec![key(2024, 16, 1), key(2024, 16, 2), key(2024, 17, 1)]);
        assert!(agg.add(make_result(key(2024, 16, 2))).is_empty());
        assert!(agg.add(make_result(key(2024, 17, 1))).is_empty());

        let ready = agg.add(make_result(key(2024, 16, 1)));
        let order: Vec<_> = ready.iter().map(|r| (r.day, r.part)).collect();
        assert_eq!(order, vec![(16, 1), (16, 2), (17, 1)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn drain_returns_stragglers_sorted() {
        let mut agg = ResultAggregator::new(vec![key(2021, 15, 1), key(2021, 15, 2), key(2021, 17, 1)]);
        agg.add(make_result(key(2021, 17, 1)));
        agg.add(make_result(key(2021, 15, 2)));

        let remaining = agg.drain();
        let order: Vec<_> = remaining.iter().map(|r| (r.day, r.part)).collect();
        assert_eq!(order, vec![(15, 2), (17, 1)]);
        assert!(!agg.is_complete());
    }

    proptest! {
        #[test]
        fn any_arrival_order_is_emitted_sorted(order in Just((0..12usize).collect::<Vec<_>>()).prop_shuffle()) {
            let keys: Vec<_> = (0..12u8).map(|i| key(2016 + u16::from(i / 4), i % 4 + 1, 1)).collect();
            let mut agg = ResultAggregator::new(keys.clone());
            let mut emitted = Vec::new();
            for idx in order {
                emitted.extend(agg.add(make_result(keys[idx])).iter().map(ResultKey::from));
            }
            prop_assert!(agg.is_complete());
            prop_assert_eq!(emitted, keys);
        }
    }
}
