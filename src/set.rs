use crate::error::{BenchError, Result};
use std::collections::{BTreeSet, HashSet};

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

pub type Key = u32;

/// Containers that can hand back some remaining element without the caller
/// naming it first.
///
/// The element chosen is whatever the container's own iteration order yields
/// first. No randomness or fairness is promised.
pub trait ArbitraryPop {
    fn pop_arbitrary(&mut self) -> Result<Key>;

    fn peek_arbitrary(&self) -> Result<Key>;

    fn size(&self) -> usize;

    fn is_drained(&self) -> bool {
        self.size() == 0
    }
}

/// Unordered set of keys backed by a hash table.
#[derive(Debug, PartialEq, Clone)]
pub struct KeySet {
    keys: HashSet<Key>,
}

impl KeySet {
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: HashSet::with_capacity(capacity),
        }
    }

    /// Returns `false` when the key was already present.
    pub fn insert(&mut self, key: Key) -> bool {
        self.keys.insert(key)
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn peek_arbitrary(&self) -> Result<Key> {
        self.keys.iter().next().copied().ok_or(BenchError::EmptySet)
    }

    /// Removes and returns the first key in bucket order.
    pub fn pop_arbitrary(&mut self) -> Result<Key> {
        let key = self.peek_arbitrary()?;
        self.keys.remove(&key);

        Ok(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Key> + '_ {
        self.keys.iter()
    }
}

impl ArbitraryPop for KeySet {
    fn pop_arbitrary(&mut self) -> Result<Key> {
        KeySet::pop_arbitrary(self)
    }

    fn peek_arbitrary(&self) -> Result<Key> {
        KeySet::peek_arbitrary(self)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl ArbitraryPop for BTreeSet<Key> {
    fn pop_arbitrary(&mut self) -> Result<Key> {
        self.pop_first().ok_or(BenchError::EmptySet)
    }

    fn peek_arbitrary(&self) -> Result<Key> {
        self.iter().next().copied().ok_or(BenchError::EmptySet)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

// Refit from the quickcheck impl for HashSet
#[cfg(test)]
impl Arbitrary for KeySet {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let vec: Vec<Key> = Arbitrary::arbitrary(g);
        vec.into_iter().collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let vec: Vec<Key> = self.iter().cloned().collect();
        Box::new(vec.shrink().map(|v| v.into_iter().collect::<Self>()))
    }
}
