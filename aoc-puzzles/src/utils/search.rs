//! Generic graph searches over implicit graphs
//!
//! Nodes are any `Clone + Eq + Hash` value; edges come from a successor
//! closure, so puzzles never materialise their state graphs.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Breadth-first search from `start` to the first node satisfying `is_goal`.
///
/// Returns the goal node and its distance in edges.
pub fn bfs<N, I>(
    start: N,
    mut successors: impl FnMut(&N) -> I,
    mut is_goal: impl FnMut(&N) -> bool,
) -> Option<(N, usize)>
where
    N: Clone + Eq + Hash,
    I: IntoIterator<Item = N>,
{
    let mut seen = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([(start, 0)]);
    while let Some((node, dist)) = queue.pop_front() {
        if is_goal(&node) {
            return Some((node, dist));
        }
        for next in successors(&node) {
            if seen.insert(next.clone()) {
                queue.push_back((next, dist + 1));
            }
        }
    }
    None
}

/// Distance to every node reachable from `start`, optionally stopping at
/// `max_depth` edges.
pub fn bfs_distances<N, I>(
    start: N,
    mut successors: impl FnMut(&N) -> I,
    max_depth: Option<usize>,
) -> HashMap<N, usize>
where
    N: Clone + Eq + Hash,
    I: IntoIterator<Item = N>,
{
    let mut dist = HashMap::from([(start.clone(), 0)]);
    let mut queue = VecDeque::from([(start, 0)]);
    while let Some((node, d)) = queue.pop_front() {
        if max_depth.is_some_and(|max| d >= max) {
            continue;
        }
        for next in successors(&node) {
            if let Entry::Vacant(slot) = dist.entry(next.clone()) {
                slot.insert(d + 1);
                queue.push_back((next, d + 1));
            }
        }
    }
    dist
}

/// Heap entry ordered by cost only; ties are broken by insertion order
struct Queued<N> {
    priority: u64,
    seq: u64,
    cost: u64,
    node: N,
}

impl<N> PartialEq for Queued<N> {
    fn eq(&self, other: &Self) -> bool {
        (self.priority, self.seq) == (other.priority, other.seq)
    }
}

impl<N> Eq for Queued<N> {}

impl<N> PartialOrd for Queued<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for Queued<N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.priority, self.seq).cmp(&(other.priority, other.seq))
    }
}

/// Min-heap keyed by priority
struct Frontier<N> {
    heap: BinaryHeap<Reverse<Queued<N>>>,
    seq: u64,
}

impl<N> Frontier<N> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    fn push(&mut self, priority: u64, cost: u64, node: N) {
        self.seq += 1;
        self.heap.push(Reverse(Queued {
            priority,
            seq: self.seq,
            cost,
            node,
        }));
    }

    fn pop(&mut self) -> Option<(u64, N)> {
        self.heap.pop().map(|Reverse(q)| (q.cost, q.node))
    }
}

/// Dijkstra's algorithm from one or more zero-cost sources to the first node
/// satisfying `is_goal`.
///
/// Returns the goal node and its total cost.
pub fn dijkstra<N, I>(
    starts: impl IntoIterator<Item = N>,
    successors: impl FnMut(&N) -> I,
    is_goal: impl FnMut(&N) -> bool,
) -> Option<(N, u64)>
where
    N: Clone + Eq + Hash,
    I: IntoIterator<Item = (N, u64)>,
{
    astar(starts, successors, |_| 0, is_goal)
}

/// Lowest cost to every node reachable from the sources.
pub fn dijkstra_all<N, I>(
    starts: impl IntoIterator<Item = N>,
    mut successors: impl FnMut(&N) -> I,
) -> HashMap<N, u64>
where
    N: Clone + Eq + Hash,
    I: IntoIterator<Item = (N, u64)>,
{
    let mut best: HashMap<N, u64> = HashMap::new();
    let mut frontier = Frontier::new();
    for start in starts {
        best.insert(start.clone(), 0);
        frontier.push(0, 0, start);
    }
    while let Some((cost, node)) = frontier.pop() {
        if best.get(&node).is_some_and(|&b| b < cost) {
            continue;
        }
        for (next, step) in successors(&node) {
            let next_cost = cost + step;
            if best.get(&next).is_none_or(|&b| next_cost < b) {
                best.insert(next.clone(), next_cost);
                frontier.push(next_cost, next_cost, next);
            }
        }
    }
    best
}

/// A* search. `heuristic` must never overestimate the remaining cost.
///
/// Returns the goal node and its total cost.
pub fn astar<N, I>(
    starts: impl IntoIterator<Item = N>,
    mut successors: impl FnMut(&N) -> I,
    mut heuristic: impl FnMut(&N) -> u64,
    mut is_goal: impl FnMut(&N) -> bool,
) -> Option<(N, u64)>
where
    N: Clone + Eq + Hash,
    I: IntoIterator<Item = (N, u64)>,
{
    let mut best: HashMap<N, u64> = HashMap::new();
    let mut frontier = Frontier::new();
    for start in starts {
        best.insert(start.clone(), 0);
        let h = heuristic(&start);
        frontier.push(h, 0, start);
    }
    while let Some((cost, node)) = frontier.pop() {
        if best.get(&node).is_some_and(|&b| b < cost) {
            continue;
        }
        if is_goal(&node) {
            return Some((node, cost));
        }
        for (next, step) in successors(&node) {
            let next_cost = cost + step;
            if best.get(&next).is_none_or(|&b| next_cost < b) {
                best.insert(next.clone(), next_cost);
                let h = heuristic(&next);
                frontier.push(next_cost + h, next_cost, next);
            }
        }
    }
    None
}
