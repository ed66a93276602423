//! Structural occurrence counting.
//!
//! A [`Multiplicity`] counts how many times each distinct value occurs in a
//! sequence, where "distinct" is decided by [`CanonicalKey`] rather than by
//! identity. Two rows built separately from the same cells count as one value.
//! The first occurrence of each value is kept and iteration follows
//! first-seen order.

use crate::access::CanonicalKey;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Occurrence counts keyed by structural equality
#[derive(Debug, Clone)]
pub struct Multiplicity<T: CanonicalKey> {
    entries: IndexMap<T::Key, (T, usize)>,
}

impl<T: CanonicalKey> Multiplicity<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Count every item of a sequence
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        items.into_iter().collect()
    }

    /// Record one occurrence of `item` and return its count so far
    pub fn insert(&mut self, item: T) -> usize {
        match self.entries.entry(item.canonical_key()) {
            Entry::Occupied(mut entry) => {
                let (_, count) = entry.get_mut();
                *count += 1;
                *count
            }
            Entry::Vacant(entry) => {
                entry.insert((item, 1));
                1
            }
        }
    }

    /// Number of occurrences of a value structurally equal to `item`
    pub fn count_of(&self, item: &T) -> usize {
        self.entries
            .get(&item.canonical_key())
            .map_or(0, |(_, count)| *count)
    }

    /// Raw key counts in first-seen order
    pub fn multiplicities(&self) -> impl Iterator<Item = (&T::Key, usize)> {
        self.entries.iter().map(|(key, (_, count))| (key, *count))
    }

    /// First-seen value of each key with its count, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.entries.values().map(|(item, count)| (item, *count))
    }

    pub fn for_each<F: FnMut(&T, usize)>(&self, mut f: F) {
        for (item, count) in self.iter() {
            f(item, count);
        }
    }

    /// Distinct values in first-seen order
    pub fn into_values(self) -> Vec<T> {
        self.entries.into_values().map(|(item, _)| item).collect()
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: CanonicalKey> Default for Multiplicity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CanonicalKey> Extend<T> for Multiplicity<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }
}

impl<T: CanonicalKey> FromIterator<T> for Multiplicity<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut counter = Self::new();
        counter.extend(items);
        counter
    }
}

impl<T: CanonicalKey> IntoIterator for Multiplicity<T> {
    type Item = (T, usize);
    type IntoIter = indexmap::map::IntoValues<T::Key, (T, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}
