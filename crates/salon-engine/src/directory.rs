//! Keyed in-memory stores with id allocation.

use std::collections::BTreeMap;

/// An entity store that hands out ids `1, 2, 3, ...` in insertion order.
///
/// Ids are never reused. Iteration is in id order.
#[derive(Debug, Clone)]
pub struct Directory<K, T> {
    entries: BTreeMap<K, T>,
    next_id: u32,
}

impl<K, T> Default for Directory<K, T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<K, T> Directory<K, T>
where
    K: Copy + Ord + From<u32>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id, build the entity with it and store it.
    pub fn insert_with(&mut self, build: impl FnOnce(K) -> T) -> K {
        let id = K::from(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, build(id));
        id
    }

    pub fn get(&self, id: K) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.values()
    }
}
