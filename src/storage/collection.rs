//! Keyed collection with stable insertion order
//!
//! Lookups by id go through a `HashMap`; listing walks a separate order
//! vector so output stays in the order entities were added.

use std::collections::HashMap;
use std::hash::Hash;

/// A map from id to entity that remembers insertion order
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert an entity; replacing an existing key keeps its position
    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.insert(key, value).is_none() {
            self.order.push(key);
        }
    }

    /// Get an entity by key
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Remove an entity, returning it if it was present
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate entities in insertion order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter().filter_map(|k| self.entries.get(k))
    }

    /// Iterate entities mutably (order unspecified)
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.entries.values_mut()
    }

    /// Remove every entity
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
