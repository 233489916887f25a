//! Category repository
//!
//! Holds the authoritative in-memory set of income and expense categories.

use crate::models::{Category, CategoryId, OperationKind};

use super::collection::OrderedMap;

/// Repository for categories
#[derive(Debug, Default)]
pub struct CategoryRepository {
    data: OrderedMap<CategoryId, Category>,
}

impl CategoryRepository {
    /// Create an empty category repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.data.get(&id)
    }

    /// Get a mutable category by ID
    pub fn get_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.data.get_mut(&id)
    }

    /// Get all categories in creation order
    pub fn get_all(&self) -> Vec<Category> {
        self.data.values().cloned().collect()
    }

    /// Get all categories of one kind
    pub fn get_by_kind(&self, kind: OperationKind) -> Vec<Category> {
        self.data
            .values()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect()
    }

    /// Get a category by kind and name (case-insensitive)
    pub fn get_by_name(&self, kind: OperationKind, name: &str) -> Option<&Category> {
        let name_lower = name.to_lowercase();
        self.data
            .values()
            .find(|c| c.kind == kind && c.name.to_lowercase() == name_lower)
    }

    /// Insert or replace a category
    pub fn upsert(&mut self, category: Category) {
        self.data.insert(category.id, category);
    }

    /// Delete a category, returning it if it existed
    pub fn delete(&mut self, id: CategoryId) -> Option<Category> {
        self.data.remove(&id)
    }

    /// Check if a category exists
    pub fn exists(&self, id: CategoryId) -> bool {
        self.data.contains(&id)
    }

    /// Count categories
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Remove every category
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
