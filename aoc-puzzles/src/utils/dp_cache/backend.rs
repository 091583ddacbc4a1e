//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

/// A storage backend for the DP cache.
///
/// Implementations can use different data structures (Vec, HashMap, etc.)
/// based on the index type requirements.
pub trait Backend<I, K> {
    /// Returns the cached value for an index, if any
    fn get(&self, index: &I) -> Option<&K>;

    /// Returns the cached value for an index, inserting `f()` first if absent
    fn get_or_insert_with(&mut self, index: I, f: impl FnOnce() -> K) -> &K;

    /// Number of cached values
    fn len(&self) -> usize;

    /// Whether nothing is cached yet
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A Vec-based backend for usize indices.
///
/// This backend is efficient for dense, sequential integer indices starting from 0.
/// The Vec automatically grows to accommodate new indices.
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
    filled: usize,
}

impl<K> VecBackend<K> {
    /// Creates a new empty VecBackend.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new VecBackend with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            filled: 0,
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index)?.as_ref()
    }

    fn get_or_insert_with(&mut self, index: usize, f: impl FnOnce() -> K) -> &K {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        let slot = &mut self.data[index];
        if slot.is_none() {
            self.filled += 1;
        }
        slot.get_or_insert_with(f)
    }

    fn len(&self) -> usize {
        self.filled
    }
}

/// A HashMap-based backend for arbitrary hashable indices.
///
/// Suitable for sparse indices or non-integer index types such as tuples of
/// puzzle state.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    /// Creates a new empty HashMapBackend.
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert_with(&mut self, index: I, f: impl FnOnce() -> K) -> &K {
        self.data.entry(index).or_insert_with(f)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
