//! A hash set with O(1) uniform random selection.
//!
//! Elements live in a dense vector with a position index beside it. Removal swaps the
//! element with the last one and pops, so every operation stays constant time.

use std::hash::Hash;
use std::slice;

use rand::Rng;

use crate::errors::{MazeError, Result};
use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone)]
pub struct IndexedHashSet<T: Hash + Eq + Clone> {
    items: Vec<T>,
    positions: FnvHashMap<T, usize>,
}

impl<T: Hash + Eq + Clone> Default for IndexedHashSet<T> {
    fn default() -> Self {
        IndexedHashSet::with_capacity(0)
    }
}

impl<T: Hash + Eq + Clone> IndexedHashSet<T> {
    pub fn new() -> IndexedHashSet<T> {
        IndexedHashSet::default()
    }

    pub fn with_capacity(capacity: usize) -> IndexedHashSet<T> {
        IndexedHashSet {
            items: Vec::with_capacity(capacity),
            positions: utils::fnv_hashmap(capacity),
        }
    }

    /// Returns false if the element was already present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.positions.contains_key(&item) {
            return false;
        }
        self.positions.insert(item.clone(), self.items.len());
        self.items.push(item);
        true
    }

    /// Returns false if the element was not present.
    pub fn remove(&mut self, item: &T) -> bool {
        let position = match self.positions.remove(item) {
            Some(p) => p,
            None => return false,
        };
        let _ = self.items.swap_remove(position);
        if let Some(moved) = self.items.get(position) {
            self.positions.insert(moved.clone(), position);
        }
        true
    }

    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A uniformly chosen element.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T> {
        if self.items.is_empty() {
            return Err(MazeError::EmptyPool);
        }
        Ok(&self.items[rng.gen_range(0..self.items.len())])
    }

    /// Iteration order is arbitrary once anything has been removed.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}
