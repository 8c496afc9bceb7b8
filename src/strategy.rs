//! Alternative ways of popping an arbitrary key, compared side by side.
//!
//! `KeySet` (remove the first bucket) and `BTreeSet<Key>` (pop the smallest)
//! implement `ArbitraryPop` directly. The wrappers below cover the remaining
//! ways of getting a key out of a std set.

use crate::driver::{pop_set_with, Seconds};
use crate::error::{BenchError, Result};
use crate::set::{ArbitraryPop, Key, KeySet};
use std::collections::{BTreeSet, HashSet};
use std::iter::FromIterator;

fn hash_first(s: &HashSet<Key>) -> Option<Key> {
    s.iter().next().copied()
}

fn hash_take_next(s: &mut HashSet<Key>) -> Option<Key> {
    let elt = hash_first(s)?;
    s.take(&elt)
}

fn hash_retain(s: &mut HashSet<Key>) -> Option<Key> {
    let mut snatched = None;
    s.retain(|&elt| match snatched {
        None => {
            snatched = Some(elt);
            false
        }
        Some(_) => true,
    });
    snatched
}

fn btree_first(s: &BTreeSet<Key>) -> Option<Key> {
    s.iter().next().copied()
}

fn btree_last(s: &BTreeSet<Key>) -> Option<Key> {
    s.iter().next_back().copied()
}

fn btree_take_next(s: &mut BTreeSet<Key>) -> Option<Key> {
    let elt = btree_first(s)?;
    s.take(&elt)
}

fn btree_take_next_back(s: &mut BTreeSet<Key>) -> Option<Key> {
    let elt = btree_last(s)?;
    s.take(&elt)
}

fn btree_pop_last(s: &mut BTreeSet<Key>) -> Option<Key> {
    s.pop_last()
}

macro_rules! pop_strategy {
    ($(#[$attr:meta])* $name:ident, $container:ident, $pop:ident, $peek:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default)]
        pub struct $name($container<Key>);

        impl FromIterator<Key> for $name {
            fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
                $name(iter.into_iter().collect())
            }
        }

        impl ArbitraryPop for $name {
            fn pop_arbitrary(&mut self) -> Result<Key> {
                $pop(&mut self.0).ok_or(BenchError::EmptySet)
            }

            fn peek_arbitrary(&self) -> Result<Key> {
                $peek(&self.0).ok_or(BenchError::EmptySet)
            }

            fn size(&self) -> usize {
                self.0.len()
            }
        }
    };
}

pop_strategy!(
    /// Finds the first bucket, then `take`s it.
    HashTakeNext,
    HashSet,
    hash_take_next,
    hash_first
);
pop_strategy!(
    /// Drops the first visited key through `retain`. Every pop scans the whole
    /// table, so keep sizes small.
    HashRetain,
    HashSet,
    hash_retain,
    hash_first
);
pop_strategy!(BTreeTakeNext, BTreeSet, btree_take_next, btree_first);
pop_strategy!(
    BTreeTakeNextBack,
    BTreeSet,
    btree_take_next_back,
    btree_last
);
pop_strategy!(BTreePopLast, BTreeSet, btree_pop_last, btree_last);

/// Largest size `HashRetain` is timed at.
pub const RETAIN_MAX_SIZE: Key = 50_000;

/// A named drain timer, optionally limited to sizes up to `max_size`.
#[derive(Clone)]
pub struct Strategy {
    name: &'static str,
    max_size: Option<Key>,
    time: fn(Key) -> Result<Seconds>,
}

impl Strategy {
    pub fn new(name: &'static str, time: fn(Key) -> Result<Seconds>) -> Self {
        Self {
            name,
            max_size: None,
            time,
        }
    }

    pub fn of<S>(name: &'static str) -> Self
    where
        S: ArbitraryPop + FromIterator<Key>,
    {
        Self::new(name, pop_set_with::<S>)
    }

    pub fn up_to(mut self, max_size: Key) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn applies_to(&self, n: Key) -> bool {
        self.max_size.map_or(true, |max| n <= max)
    }

    pub fn time(&self, n: Key) -> Result<Seconds> {
        (self.time)(n)
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name)
            .field("max_size", &self.max_size)
            .finish()
    }
}

pub fn default_strategies() -> Vec<Strategy> {
    vec![
        Strategy::of::<BTreeTakeNext>("btree_take_next"),
        Strategy::of::<BTreeTakeNextBack>("btree_take_next_back"),
        Strategy::of::<BTreeSet<Key>>("btree_pop_first"),
        Strategy::of::<BTreePopLast>("btree_pop_last"),
        Strategy::of::<KeySet>("hash_remove_next"),
        Strategy::of::<HashTakeNext>("hash_take_next"),
        Strategy::of::<HashRetain>("hash_retain").up_to(RETAIN_MAX_SIZE),
    ]
}
