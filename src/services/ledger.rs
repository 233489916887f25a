//! Ledger service
//!
//! `LedgerService` is the single capability the command layer and the CLI
//! consume. `Ledger` is the authoritative implementation over [`Storage`];
//! [`CachedLedger`](super::CachedLedger) decorates any implementation with a
//! read-through cache.

use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::analytics::{
    AnalyticsEngine, AnalyticsKind, AnalyticsReport, CategoryAnalytics, FinancialAnalytics,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, Money, Operation, OperationId, OperationKind,
};
use crate::storage::Storage;

/// Everything that can be done to a ledger
///
/// Writes validate before mutating: an `Err` means nothing changed.
pub trait LedgerService {
    /// Create an account; the name must be non-empty and the opening balance
    /// non-negative
    fn create_account(&mut self, name: &str, opening_balance: Money) -> LedgerResult<Account>;

    /// Create an account from restored data
    ///
    /// Unlike [`create_account`](Self::create_account) the opening balance is
    /// taken as given, since it comes from exported data.
    fn restore_account(&mut self, name: &str, opening_balance: Money) -> LedgerResult<Account>;

    /// Rename an account, returning the previous name
    fn rename_account(&mut self, id: AccountId, name: &str) -> LedgerResult<String>;

    /// Remove an account; returns whether it existed. Operations are kept.
    fn delete_account(&mut self, id: AccountId) -> bool;

    fn get_account(&self, id: AccountId) -> Option<Account>;

    /// All accounts in creation order
    fn all_accounts(&self) -> Rc<[Account]>;

    /// Add a signed amount to an account's balance, returning the new balance
    fn adjust_balance(&mut self, id: AccountId, delta: Money) -> LedgerResult<Money>;

    fn create_category(&mut self, kind: OperationKind, name: &str) -> LedgerResult<Category>;

    /// Rename a category, returning the previous name
    fn rename_category(&mut self, id: CategoryId, name: &str) -> LedgerResult<String>;

    /// Remove a category; returns whether it existed. Operations are kept.
    fn delete_category(&mut self, id: CategoryId) -> bool;

    fn get_category(&self, id: CategoryId) -> Option<Category>;

    /// All categories in creation order
    fn all_categories(&self) -> Rc<[Category]>;

    /// Book an operation dated now and apply its balance effect
    fn create_operation(
        &mut self,
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        category_id: CategoryId,
        description: &str,
    ) -> LedgerResult<Operation> {
        self.create_operation_at(kind, account_id, amount, category_id, description, Utc::now())
    }

    /// Book an operation with an explicit timestamp and apply its balance effect
    fn create_operation_at(
        &mut self,
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        category_id: CategoryId,
        description: &str,
        date: DateTime<Utc>,
    ) -> LedgerResult<Operation>;

    /// Book an operation read back from a snapshot and apply its balance effect
    ///
    /// The category may be missing, as it is for operations whose category
    /// was deleted. When it exists its kind must still match.
    fn restore_operation(
        &mut self,
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        category_id: CategoryId,
        description: &str,
        date: DateTime<Utc>,
    ) -> LedgerResult<Operation>;

    /// Remove an operation without touching any balance; returns whether it existed
    fn delete_operation(&mut self, id: OperationId) -> bool;

    fn get_operation(&self, id: OperationId) -> Option<Operation>;

    /// All operations in creation order
    fn all_operations(&self) -> Rc<[Operation]>;

    /// Reset every balance to opening balance plus signed operations;
    /// returns how many balances changed
    fn recalculate_balances(&mut self) -> usize;

    /// Whether every stored balance matches its recomputed value
    fn check_integrity(&self) -> bool;

    /// Remove every entity
    fn clear_all(&mut self);

    /// Sum of all account balances
    fn total_balance(&self) -> Money {
        self.all_accounts().iter().map(|a| a.balance).sum()
    }

    /// Total income and total expense over all operations
    fn financial_summary(&self) -> (Money, Money) {
        let operations = self.all_operations();
        let total = |kind: OperationKind| -> Money {
            operations
                .iter()
                .filter(|o| o.kind == kind)
                .map(|o| o.amount)
                .sum()
        };
        (total(OperationKind::Income), total(OperationKind::Expense))
    }

    fn full_analytics(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> FinancialAnalytics {
        let (operations, categories) = (self.all_operations(), self.all_categories());
        AnalyticsEngine::new(&operations, &categories).full_analytics(start, end)
    }

    fn top_expense_categories(
        &self,
        count: usize,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<CategoryAnalytics> {
        let (operations, categories) = (self.all_operations(), self.all_categories());
        AnalyticsEngine::new(&operations, &categories).top_expense_categories(count, start, end)
    }

    fn monthly_analytics(&self) -> BTreeMap<NaiveDate, FinancialAnalytics> {
        let (operations, categories) = (self.all_operations(), self.all_categories());
        AnalyticsEngine::new(&operations, &categories).monthly_analytics()
    }

    fn operation_type_distribution(&self) -> BTreeMap<OperationKind, Decimal> {
        let (operations, categories) = (self.all_operations(), self.all_categories());
        AnalyticsEngine::new(&operations, &categories).operation_type_distribution()
    }

    /// Compute any analytics report
    fn analytics(&self, kind: AnalyticsKind) -> AnalyticsReport {
        let (operations, categories) = (self.all_operations(), self.all_categories());
        AnalyticsEngine::new(&operations, &categories).report(kind)
    }
}

/// The authoritative in-memory ledger
#[derive(Debug, Default)]
pub struct Ledger {
    storage: Storage,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the underlying repositories
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    fn insert_account(&mut self, account: Account) -> LedgerResult<Account> {
        self.storage.accounts.upsert(account.clone());
        debug!(account = %account.id, name = %account.name, "account created");
        Ok(account)
    }

    /// Store an operation and move its account's balance
    ///
    /// Nothing is written unless the account exists and the new balance fits.
    fn book(&mut self, operation: Operation) -> LedgerResult<Operation> {
        let account = self
            .storage
            .accounts
            .get_mut(operation.account_id)
            .ok_or_else(|| LedgerError::account_not_found(operation.account_id.to_string()))?;

        let delta = operation.signed_amount();
        account
            .apply_delta(delta)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        self.storage.operations.insert(operation.clone());

        debug!(operation = %operation.id, account = %operation.account_id, %delta, "operation booked");
        Ok(operation)
    }

    /// Balance an account should have given its opening balance and operations
    pub fn expected_balance(&self, account: &Account) -> Money {
        account.opening_balance + self.storage.operations.signed_total_for(account.id)
    }
}

fn check_kind(category: &Category, kind: OperationKind) -> LedgerResult<()> {
    if !category.accepts(kind) {
        return Err(LedgerError::Validation(format!(
            "{} operation cannot use {} category '{}'",
            kind, category.kind, category.name
        )));
    }
    Ok(())
}

fn non_empty_name(name: &str, entity: &str) -> LedgerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation(format!(
            "{} name cannot be empty",
            entity
        )));
    }
    Ok(name.to_string())
}

impl LedgerService for Ledger {
    fn create_account(&mut self, name: &str, opening_balance: Money) -> LedgerResult<Account> {
        let account = Account::with_opening_balance(name.trim(), opening_balance);
        account
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        self.insert_account(account)
    }

    fn restore_account(&mut self, name: &str, opening_balance: Money) -> LedgerResult<Account> {
        let name = non_empty_name(name, "Account")?;
        self.insert_account(Account::with_opening_balance(name, opening_balance))
    }

    fn rename_account(&mut self, id: AccountId, name: &str) -> LedgerResult<String> {
        let name = non_empty_name(name, "Account")?;
        let account = self
            .storage
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::account_not_found(id.to_string()))?;
        Ok(std::mem::replace(&mut account.name, name))
    }

    fn delete_account(&mut self, id: AccountId) -> bool {
        let removed = self.storage.accounts.delete(id).is_some();
        if removed {
            debug!(account = %id, "account deleted");
        }
        removed
    }

    fn get_account(&self, id: AccountId) -> Option<Account> {
        self.storage.accounts.get(id).cloned()
    }

    fn all_accounts(&self) -> Rc<[Account]> {
        self.storage.accounts.get_all().into()
    }

    fn adjust_balance(&mut self, id: AccountId, delta: Money) -> LedgerResult<Money> {
        let account = self
            .storage
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::account_not_found(id.to_string()))?;
        account
            .apply_delta(delta)
            .map_err(|e| LedgerError::Validation(e.to_string()))
    }

    fn create_category(&mut self, kind: OperationKind, name: &str) -> LedgerResult<Category> {
        let category = Category::new(kind, name.trim());
        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone());
        debug!(category = %category.id, name = %category.name, %kind, "category created");
        Ok(category)
    }

    fn rename_category(&mut self, id: CategoryId, name: &str) -> LedgerResult<String> {
        let name = non_empty_name(name, "Category")?;
        let category = self
            .storage
            .categories
            .get_mut(id)
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;
        Ok(std::mem::replace(&mut category.name, name))
    }

    fn delete_category(&mut self, id: CategoryId) -> bool {
        let removed = self.storage.categories.delete(id).is_some();
        if removed {
            debug!(category = %id, "category deleted");
        }
        removed
    }

    fn get_category(&self, id: CategoryId) -> Option<Category> {
        self.storage.categories.get(id).cloned()
    }

    fn all_categories(&self) -> Rc<[Category]> {
        self.storage.categories.get_all().into()
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
        if !self.storage.accounts.exists(account_id) {
            return Err(LedgerError::account_not_found(account_id.to_string()));
        }

        let category = self
            .storage
            .categories
            .get(category_id)
            .ok_or_else(|| LedgerError::category_not_found(category_id.to_string()))?;

        let operation = Operation::new_at(kind, account_id, amount, category_id, description, date)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        check_kind(category, kind)?;

        self.book(operation)
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
        let operation = Operation::new_at(kind, account_id, amount, category_id, description, date)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        match self.storage.categories.get(category_id) {
            Some(category) => check_kind(category, kind)?,
            None => debug!(
                operation = %operation.id,
                category = %category_id,
                "restoring operation without category"
            ),
        }

        self.book(operation)
    }

    fn delete_operation(&mut self, id: OperationId) -> bool {
        let removed = self.storage.operations.delete(id).is_some();
        if removed {
            debug!(operation = %id, "operation deleted");
        }
        removed
    }

    fn get_operation(&self, id: OperationId) -> Option<Operation> {
        self.storage.operations.get(id).cloned()
    }

    fn all_operations(&self) -> Rc<[Operation]> {
        self.storage.operations.get_all().into()
    }

    fn recalculate_balances(&mut self) -> usize {
        let expected: Vec<(AccountId, Money)> = self
            .storage
            .accounts
            .get_all()
            .iter()
            .map(|a| (a.id, self.expected_balance(a)))
            .collect();

        let mut changed = 0;
        for (id, balance) in expected {
            if let Some(account) = self.storage.accounts.get_mut(id) {
                if account.balance != balance {
                    debug!(account = %id, from = %account.balance, to = %balance, "balance corrected");
                    account.balance = balance;
                    changed += 1;
                }
            }
        }
        changed
    }

    fn check_integrity(&self) -> bool {
        let mut consistent = true;
        for account in self.storage.accounts.get_all() {
            let expected = self.expected_balance(&account);
            if account.balance != expected {
                warn!(
                    account = %account.id,
                    name = %account.name,
                    stored = %account.balance,
                    %expected,
                    "balance mismatch"
                );
                consistent = false;
            }
        }
        consistent
    }

    fn clear_all(&mut self) {
        self.storage.clear_all();
        debug!("ledger cleared");
    }
}
