//! Union-find over arbitrary hashable elements.
//!
//! Elements are interned to dense indices so the forest itself is two plain vectors.
//! `find` compresses paths, `union` merges by rank.

use std::hash::Hash;

use crate::errors::{MazeError, Result};
use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone)]
pub struct DisjointSet<T: Hash + Eq + Clone> {
    indices: FnvHashMap<T, usize>,
    elements: Vec<T>,
    parents: Vec<usize>,
    ranks: Vec<u8>,
    sets_count: usize,
}

impl<T: Hash + Eq + Clone> Default for DisjointSet<T> {
    fn default() -> Self {
        DisjointSet::with_capacity(0)
    }
}

impl<T: Hash + Eq + Clone> DisjointSet<T> {
    pub fn new() -> DisjointSet<T> {
        DisjointSet::default()
    }

    pub fn with_capacity(capacity: usize) -> DisjointSet<T> {
        DisjointSet {
            indices: utils::fnv_hashmap(capacity),
            elements: Vec::with_capacity(capacity),
            parents: Vec::with_capacity(capacity),
            ranks: Vec::with_capacity(capacity),
            sets_count: 0,
        }
    }

    /// Register `element` as a singleton set. Returns false if it was already registered, in
    /// which case its current set is left alone.
    pub fn make_set(&mut self, element: T) -> bool {
        if self.indices.contains_key(&element) {
            return false;
        }
        let index = self.elements.len();
        self.indices.insert(element.clone(), index);
        self.elements.push(element);
        self.parents.push(index);
        self.ranks.push(0);
        self.sets_count += 1;
        true
    }

    #[inline]
    pub fn contains(&self, element: &T) -> bool {
        self.indices.contains_key(element)
    }

    /// Number of registered elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of disjoint sets.
    #[inline]
    pub fn sets_count(&self) -> usize {
        self.sets_count
    }

    /// The representative of the set holding `element`.
    pub fn find(&mut self, element: &T) -> Result<T> {
        let index = self.index(element)?;
        let root = self.find_root(index);
        Ok(self.elements[root].clone())
    }

    /// Merge the sets of `a` and `b`. Returns false when they were already the same set.
    pub fn union(&mut self, a: &T, b: &T) -> Result<bool> {
        let a_index = self.index(a)?;
        let b_index = self.index(b)?;
        let a_root = self.find_root(a_index);
        let b_root = self.find_root(b_index);
        if a_root == b_root {
            return Ok(false);
        }

        let (a_rank, b_rank) = (self.ranks[a_root], self.ranks[b_root]);
        if a_rank < b_rank {
            self.parents[a_root] = b_root;
        } else if a_rank > b_rank {
            self.parents[b_root] = a_root;
        } else {
            self.parents[b_root] = a_root;
            self.ranks[a_root] += 1;
        }
        self.sets_count -= 1;
        Ok(true)
    }

    pub fn same_set(&mut self, a: &T, b: &T) -> Result<bool> {
        let a_index = self.index(a)?;
        let b_index = self.index(b)?;
        Ok(self.find_root(a_index) == self.find_root(b_index))
    }

    fn index(&self, element: &T) -> Result<usize> {
        self.indices.get(element).cloned().ok_or(MazeError::ElementNotFound)
    }

    fn find_root(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parents[root] != root {
            root = self.parents[root];
        }
        // Second pass points everything on the path straight at the root.
        let mut current = index;
        while self.parents[current] != root {
            let next = self.parents[current];
            self.parents[current] = root;
            current = next;
        }
        root
    }
}
