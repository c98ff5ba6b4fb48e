//! Ordered, index-addressed content collections.

use serde::{Deserialize, Serialize};

/// An ordered sequence of content items.
///
/// Items have no identity apart from their position: removing an item
/// renumbers everything after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T>(Vec<T>);

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an item, returning its index.
    pub fn push(&mut self, item: T) -> usize {
        self.0.push(item);
        self.0.len() - 1
    }

    /// Remove the item at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Apply `update` to the item at `index`. Returns `false` when out of range.
    pub fn update_at(&mut self, index: usize, update: impl FnOnce(&mut T)) -> bool {
        match self.0.get_mut(index) {
            Some(item) => {
                update(item);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
