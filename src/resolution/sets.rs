use std::collections::HashSet;
use std::hash::Hash;

use crate::resolution::failure::Failure;
use crate::types::ResolvedFile;

/// Set that remembers first-insertion order. Re-inserting an element is a
/// no-op and never moves it.
#[derive(Debug, Clone)]
pub struct InsertionOrderedSet<T> {
    order: Vec<T>,
    seen: HashSet<T>,
}

pub type ResolvedFileSet = InsertionOrderedSet<ResolvedFile>;
pub type FailureSet = InsertionOrderedSet<Failure>;

impl<T> Default for InsertionOrderedSet<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> InsertionOrderedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the value was not present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.insert(value.clone()) {
            self.order.push(value);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.seen.contains(value)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.order
    }
}
