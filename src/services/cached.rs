//! Read-through cache over a ledger service
//!
//! The three collection queries are served from retained snapshots until a
//! write invalidates them. Writes always go to the inner service first and
//! only a successful write invalidates.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::LedgerResult;
use crate::models::{
    Account, AccountId, Category, CategoryId, Money, Operation, OperationId, OperationKind,
};

use super::ledger::LedgerService;

/// Hit/miss counters of a [`CachedLedger`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// One cached collection; `None` means dirty
#[derive(Debug)]
struct Slot<T> {
    name: &'static str,
    value: RefCell<Option<Rc<[T]>>>,
}

impl<T> Slot<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            value: RefCell::new(None),
        }
    }

    fn get_or_fetch(&self, stats: &Counters, fetch: impl FnOnce() -> Rc<[T]>) -> Rc<[T]> {
        if let Some(cached) = self.value.borrow().as_ref() {
            stats.hits.set(stats.hits.get() + 1);
            return Rc::clone(cached);
        }

        stats.misses.set(stats.misses.get() + 1);
        let fresh = fetch();
        debug!(collection = self.name, len = fresh.len(), "cache refilled");
        *self.value.borrow_mut() = Some(Rc::clone(&fresh));
        fresh
    }

    fn invalidate(&self) {
        self.value.borrow_mut().take();
    }

    fn is_clean(&self) -> bool {
        self.value.borrow().is_some()
    }
}

#[derive(Debug, Default)]
struct Counters {
    hits: Cell<u64>,
    misses: Cell<u64>,
}

/// A caching decorator over any [`LedgerService`]
#[derive(Debug)]
pub struct CachedLedger<L> {
    inner: L,
    accounts: Slot<Account>,
    categories: Slot<Category>,
    operations: Slot<Operation>,
    counters: Counters,
}

impl<L: LedgerService> CachedLedger<L> {
    /// Wrap a service; every collection starts dirty
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            accounts: Slot::new("accounts"),
            categories: Slot::new("categories"),
            operations: Slot::new("operations"),
            counters: Counters::default(),
        }
    }

    /// The wrapped service
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Unwrap the decorated service
    pub fn into_inner(self) -> L {
        self.inner
    }

    /// Current hit/miss counts
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.get(),
            misses: self.counters.misses.get(),
        }
    }

    /// Whether the (accounts, categories, operations) snapshots are retained
    pub fn clean_state(&self) -> (bool, bool, bool) {
        (
            self.accounts.is_clean(),
            self.categories.is_clean(),
            self.operations.is_clean(),
        )
    }

    /// Drop every snapshot
    pub fn invalidate_all(&self) {
        self.accounts.invalidate();
        self.categories.invalidate();
        self.operations.invalidate();
    }

    fn after_account_write(&self) {
        self.accounts.invalidate();
        self.operations.invalidate();
    }

    fn after_category_write(&self) {
        self.categories.invalidate();
        self.operations.invalidate();
    }

    fn after_operation_write(&self) {
        self.accounts.invalidate();
        self.operations.invalidate();
    }
}

impl<L: LedgerService> LedgerService for CachedLedger<L> {
    fn create_account(&mut self, name: &str, opening_balance: Money) -> LedgerResult<Account> {
        let account = self.inner.create_account(name, opening_balance)?;
        self.after_account_write();
        Ok(account)
    }

    fn restore_account(&mut self, name: &str, opening_balance: Money) -> LedgerResult<Account> {
        let account = self.inner.restore_account(name, opening_balance)?;
        self.after_account_write();
        Ok(account)
    }

    fn rename_account(&mut self, id: AccountId, name: &str) -> LedgerResult<String> {
        let previous = self.inner.rename_account(id, name)?;
        self.after_account_write();
        Ok(previous)
    }

    fn delete_account(&mut self, id: AccountId) -> bool {
        let removed = self.inner.delete_account(id);
        if removed {
            self.after_account_write();
        }
        removed
    }

    fn get_account(&self, id: AccountId) -> Option<Account> {
        self.all_accounts().iter().find(|a| a.id == id).cloned()
    }

    fn all_accounts(&self) -> Rc<[Account]> {
        self.accounts
            .get_or_fetch(&self.counters, || self.inner.all_accounts())
    }

    fn adjust_balance(&mut self, id: AccountId, delta: Money) -> LedgerResult<Money> {
        let balance = self.inner.adjust_balance(id, delta)?;
        self.accounts.invalidate();
        Ok(balance)
    }

    fn create_category(&mut self, kind: OperationKind, name: &str) -> LedgerResult<Category> {
        let category = self.inner.create_category(kind, name)?;
        self.after_category_write();
        Ok(category)
    }

    fn rename_category(&mut self, id: CategoryId, name: &str) -> LedgerResult<String> {
        let previous = self.inner.rename_category(id, name)?;
        self.after_category_write();
        Ok(previous)
    }

    fn delete_category(&mut self, id: CategoryId) -> bool {
        let removed = self.inner.delete_category(id);
        if removed {
            self.after_category_write();
        }
        removed
    }

    fn get_category(&self, id: CategoryId) -> Option<Category> {
        self.all_categories().iter().find(|c| c.id == id).cloned()
    }

    fn all_categories(&self) -> Rc<[Category]> {
        self.categories
            .get_or_fetch(&self.counters, || self.inner.all_categories())
    }

    fn create_operation_at(
        &mut self,
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        category_id: CategoryId,
        description: &str,
        date: DateTime<Utc>,
    ) -> LedgerResult<Operation> {
        let operation = self
            .inner
            .create_operation_at(kind, account_id, amount, category_id, description, date)?;
        self.after_operation_write();
        Ok(operation)
    }

    fn restore_operation(
        &mut self,
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        category_id: CategoryId,
        description: &str,
        date: DateTime<Utc>,
    ) -> LedgerResult<Operation> {
        let operation = self
            .inner
            .restore_operation(kind, account_id, amount, category_id, description, date)?;
        self.after_operation_write();
        Ok(operation)
    }

    fn delete_operation(&mut self, id: OperationId) -> bool {
        let removed = self.inner.delete_operation(id);
        if removed {
            self.after_operation_write();
        }
        removed
    }

    fn get_operation(&self, id: OperationId) -> Option<Operation> {
        self.all_operations().iter().find(|o| o.id == id).cloned()
    }

    fn all_operations(&self) -> Rc<[Operation]> {
        self.operations
            .get_or_fetch(&self.counters, || self.inner.all_operations())
    }

    fn recalculate_balances(&mut self) -> usize {
        let changed = self.inner.recalculate_balances();
        self.accounts.invalidate();
        changed
    }

    fn check_integrity(&self) -> bool {
        self.inner.check_integrity()
    }

    fn clear_all(&mut self) {
        self.inner.clear_all();
        self.invalidate_all();
    }
}
