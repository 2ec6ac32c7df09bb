use std::{collections::BTreeMap, hash::Hash, marker::PhantomData};

pub trait BigMapKey: Clone + Copy + Eq + PartialEq + Hash {
    fn to_u64(&self) -> u64;
    fn from_u64(value: u64) -> Self;
}

/// A map that hands out its own keys. Keys are never reused, so a stale key
/// held after a removal simply misses. Iteration follows insertion order.
pub struct BigMap<K: BigMapKey, V> {
    inner: BTreeMap<u64, V>,
    current_index: u64,
    phantom_k: PhantomData<K>,
}

impl<K: BigMapKey, V> BigMap<K, V> {
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
            current_index: 0,
            phantom_k: PhantomData,
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(&key.to_u64())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.inner.get_mut(&key.to_u64())
    }

    pub fn insert(&mut self, value: V) -> K {
        let old_index = self.current_index;
        self.current_index = self.current_index.wrapping_add(1);

        self.inner.insert(old_index, value);

        K::from_u64(old_index)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(&key.to_u64())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(&key.to_u64())
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.inner
            .iter()
            .map(|(key, value)| (K::from_u64(*key), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.inner.keys().map(|key| K::from_u64(*key))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: BigMapKey, V> Default for BigMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
