//! Account repository
//!
//! Holds the authoritative in-memory set of accounts, keyed by id.

use crate::models::{Account, AccountId, Money};

use super::collection::OrderedMap;

/// Repository for accounts
#[derive(Debug, Default)]
pub struct AccountRepository {
    data: OrderedMap<AccountId, Account>,
}

impl AccountRepository {
    /// Create an empty account repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.data.get(&id)
    }

    /// Get a mutable account by ID
    pub fn get_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.data.get_mut(&id)
    }

    /// Get all accounts in creation order
    pub fn get_all(&self) -> Vec<Account> {
        self.data.values().cloned().collect()
    }

    /// Get an account by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Option<&Account> {
        let name_lower = name.to_lowercase();
        self.data
            .values()
            .find(|a| a.name.to_lowercase() == name_lower)
    }

    /// Insert or replace an account
    pub fn upsert(&mut self, account: Account) {
        self.data.insert(account.id, account);
    }

    /// Delete an account, returning it if it existed
    pub fn delete(&mut self, id: AccountId) -> Option<Account> {
        self.data.remove(&id)
    }

    /// Check if an account exists
    pub fn exists(&self, id: AccountId) -> bool {
        self.data.contains(&id)
    }

    /// Sum of all account balances
    pub fn total_balance(&self) -> Money {
        self.data.values().map(|a| a.balance).sum()
    }

    /// Iterate accounts mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Account> + '_ {
        self.data.values_mut()
    }

    /// Count accounts
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Remove every account
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
