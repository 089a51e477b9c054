#![forbid(unsafe_code)]

//! Sorted, value-addressed entity storage.
//!
//! A [`SortedCollection`] keeps its entities ordered by [`EntityKey`] and
//! holds at most one entity per key. Lookups go through binary search on
//! the key, so a stored clone can always find its live counterpart even
//! after the live object's payload (sustain, flags, length) has changed.

use crate::entity::{Entity, EntityKey, Tick};

/// Entities kept sorted by identity key, unique per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedCollection {
    items: Vec<Entity>,
}

impl SortedCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.items.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Entity] {
        &self.items
    }

    /// Index of the live entity matching `entity` by key.
    #[must_use]
    pub fn locate(&self, entity: &Entity) -> Option<usize> {
        self.search(&entity.key()).ok()
    }

    /// Insert `entity` in key order.
    ///
    /// An entity already stored under the same key is replaced and returned.
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        match self.search(&entity.key()) {
            Ok(index) => Some(std::mem::replace(&mut self.items[index], entity)),
            Err(index) => {
                self.items.insert(index, entity);
                None
            }
        }
    }

    /// Remove the live entity matching `entity` by key.
    pub fn remove(&mut self, entity: &Entity) -> Option<Entity> {
        let index = self.locate(entity)?;
        Some(self.items.remove(index))
    }

    /// Entities positioned at exactly `position`.
    #[must_use]
    pub fn at_position(&self, position: Tick) -> &[Entity] {
        let start = self.items.partition_point(|e| e.position() < position);
        let end = self.items.partition_point(|e| e.position() <= position);
        &self.items[start..end]
    }

    fn search(&self, key: &EntityKey<'_>) -> Result<usize, usize> {
        self.items.binary_search_by(|probe| probe.key().cmp(key))
    }
}

impl<'a> IntoIterator for &'a SortedCollection {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Entity> for SortedCollection {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut collection = Self::new();
        for entity in iter {
            collection.insert(entity);
        }
        collection
    }
}
