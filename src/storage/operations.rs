//! Operation repository
//!
//! Holds the authoritative in-memory set of operations with an index from
//! account id to the operations booked against it.

use std::collections::HashMap;

use crate::models::{AccountId, CategoryId, Money, Operation, OperationId};

use super::collection::OrderedMap;

/// Repository for operations with an account index
#[derive(Debug, Default)]
pub struct OperationRepository {
    data: OrderedMap<OperationId, Operation>,
    /// Index: account_id -> operation_ids
    by_account: HashMap<AccountId, Vec<OperationId>>,
}

impl OperationRepository {
    /// Create an empty operation repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an operation by ID
    pub fn get(&self, id: OperationId) -> Option<&Operation> {
        self.data.get(&id)
    }

    /// Get all operations in creation order
    pub fn get_all(&self) -> Vec<Operation> {
        self.data.values().cloned().collect()
    }

    /// Get the operations booked against an account
    pub fn get_by_account(&self, account_id: AccountId) -> Vec<&Operation> {
        self.by_account
            .get(&account_id)
            .map(|ids| ids.iter().filter_map(|id| self.data.get(id)).collect())
            .unwrap_or_default()
    }

    /// Get the operations classified under a category
    pub fn get_by_category(&self, category_id: CategoryId) -> Vec<&Operation> {
        self.data
            .values()
            .filter(|o| o.category_id == category_id)
            .collect()
    }

    /// Signed sum of an account's operations (income minus expense)
    pub fn signed_total_for(&self, account_id: AccountId) -> Money {
        self.get_by_account(account_id)
            .into_iter()
            .map(Operation::signed_amount)
            .sum()
    }

    /// Insert an operation and index it
    pub fn insert(&mut self, operation: Operation) {
        let id = operation.id;
        let account_id = operation.account_id;
        if !self.data.contains(&id) {
            self.by_account.entry(account_id).or_default().push(id);
        }
        self.data.insert(id, operation);
    }

    /// Delete an operation, returning it if it existed
    pub fn delete(&mut self, id: OperationId) -> Option<Operation> {
        let removed = self.data.remove(&id)?;
        if let Some(ids) = self.by_account.get_mut(&removed.account_id) {
            ids.retain(|o| *o != id);
            if ids.is_empty() {
                self.by_account.remove(&removed.account_id);
            }
        }
        Some(removed)
    }

    /// Check if an operation exists
    pub fn exists(&self, id: OperationId) -> bool {
        self.data.contains(&id)
    }

    /// Count operations
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Remove every operation
    pub fn clear(&mut self) {
        self.data.clear();
        self.by_account.clear();
    }
}
