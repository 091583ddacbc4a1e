//! Maps that read missing keys as a default value

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Index;

/// A `HashMap` whose reads never fail: absent keys yield `default`.
///
/// Writes go through [`DefaultMap::entry_mut`], which inserts the default
/// first, so `*map.entry_mut(k) += 1` works for fresh keys.
#[derive(Debug, Clone)]
pub struct DefaultMap<K, V> {
    inner: HashMap<K, V>,
    default: V,
}

impl<K: Eq + Hash, V: Default> Default for DefaultMap<K, V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<K: Eq + Hash, V> DefaultMap<K, V> {
    pub fn new(default: V) -> Self {
        Self {
            inner: HashMap::new(),
            default,
        }
    }

    pub fn get<Q>(&self, key: &Q) -> &V
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.get(key).unwrap_or(&self.default)
    }

    pub fn entry_mut(&mut self, key: K) -> &mut V
    where
        V: Clone,
    {
        self.inner
            .entry(key)
            .or_insert_with(|| self.default.clone())
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    /// Explicitly stored entries only
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.inner.values()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K, Q, V> Index<&Q> for DefaultMap<K, V>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key)
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for DefaultMap<K, V>
where
    V: Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
            default: V::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_as_default() {
        let mut regs: DefaultMap<String, i64> = DefaultMap::default();
        assert_eq!(regs["a"], 0);
        *regs.entry_mut("a".to_string()) += 5;
        *regs.entry_mut("a".to_string()) -= 2;
        assert_eq!(regs["a"], 3);
        assert_eq!(regs.len(), 1);
        assert!(regs.get("b") == &0);
    }

    #[test]
    fn custom_default() {
        let map: DefaultMap<u8, &str> = DefaultMap::new("wall");
        assert_eq!(map[&3], "wall");
        assert!(map.is_empty());
    }
}
