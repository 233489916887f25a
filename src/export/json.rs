//! JSON encoding and the ledger snapshot schema
//!
//! `LedgerSnapshot` is the record every export format carries: the full
//! lists of accounts, categories and operations plus an export timestamp and
//! a schema version.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, Category, CategoryId, Money, Operation, OperationKind};
use crate::services::LedgerService;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0";

/// Full ledger export structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// All accounts with their balances at export time
    pub accounts: Vec<Account>,

    /// All categories
    pub categories: Vec<Category>,

    /// All operations in booking order
    pub operations: Vec<Operation>,

    /// Export timestamp
    pub export_date: DateTime<Utc>,

    /// Schema version for compatibility checking
    pub version: String,
}

impl LedgerSnapshot {
    /// Capture the current state of a ledger
    pub fn from_service(ledger: &dyn LedgerService) -> Self {
        Self {
            accounts: ledger.all_accounts().to_vec(),
            categories: ledger.all_categories().to_vec(),
            operations: ledger.all_operations().to_vec(),
            export_date: Utc::now(),
            version: EXPORT_SCHEMA_VERSION.to_string(),
        }
    }

    /// Validate the snapshot structure
    ///
    /// Operations must reference a known account, carry a positive amount
    /// and, when their category is known, match its kind. Operations whose
    /// category is missing are allowed; they come from deleted categories.
    pub fn validate(&self) -> Result<(), String> {
        if self.version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.version
            ));
        }

        let account_ids: HashSet<_> = self.accounts.iter().map(|a| a.id).collect();
        if account_ids.len() != self.accounts.len() {
            return Err("Duplicate account id".to_string());
        }

        let category_kinds: HashMap<CategoryId, OperationKind> =
            self.categories.iter().map(|c| (c.id, c.kind)).collect();
        if category_kinds.len() != self.categories.len() {
            return Err("Duplicate category id".to_string());
        }

        for op in &self.operations {
            if !account_ids.contains(&op.account_id) {
                return Err(format!(
                    "Operation {} references unknown account {}",
                    op.id, op.account_id
                ));
            }
            if !op.amount.is_positive() {
                return Err(format!(
                    "Operation {} has non-positive amount {}",
                    op.id, op.amount
                ));
            }
            if let Some(kind) = category_kinds.get(&op.category_id) {
                if *kind != op.kind {
                    return Err(format!(
                        "Operation {} is {} but category {} is {}",
                        op.id, op.kind, op.category_id, kind
                    ));
                }
            }
        }

        Ok(())
    }

    /// Whether an operation's category is present in this snapshot
    pub fn has_category(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    /// Sum of all exported account balances
    pub fn total_balance(&self) -> Money {
        self.accounts.iter().map(|a| a.balance).sum()
    }
}

/// Encode a snapshot as pretty-printed JSON
pub fn export_json(snapshot: &LedgerSnapshot) -> LedgerResult<String> {
    serde_json::to_string_pretty(snapshot).map_err(|e| LedgerError::Export(e.to_string()))
}

/// Decode a snapshot from JSON
pub fn import_from_json(json_str: &str) -> LedgerResult<LedgerSnapshot> {
    serde_json::from_str(json_str).map_err(|e| LedgerError::Import(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;
    use crate::services::Ledger;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let account = ledger
            .create_account("Checking", Money::from_units(100))
            .unwrap();
        let salary = ledger
            .create_category(OperationKind::Income, "Salary")
            .unwrap();
        ledger
            .create_operation(
                OperationKind::Income,
                account.id,
                Money::from_cents(12345),
                salary.id,
                "Pay, \"March\"",
            )
            .unwrap();
        ledger
    }

    #[test]
    fn test_snapshot_from_service() {
        let ledger = sample_ledger();
        let snapshot = LedgerSnapshot::from_service(&ledger);

        assert_eq!(snapshot.version, EXPORT_SCHEMA_VERSION);
        assert_eq!(snapshot.accounts.len(), 1);
        assert_eq!(snapshot.categories.len(), 1);
        assert_eq!(snapshot.operations.len(), 1);
        assert_eq!(snapshot.total_balance(), Money::from_cents(22345));
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_json_field_names() {
        let snapshot = LedgerSnapshot::from_service(&sample_ledger());
        let json = export_json(&snapshot).unwrap();

        assert!(json.contains("\"export_date\""));
        assert!(json.contains("\"version\": \"1.0\""));
        assert!(json.contains("\"account_id\""));
        assert!(json.contains("\"category_id\""));
        assert!(json.contains("\"type\": \"Income\""));
        assert!(json.contains("\"amount\": \"123.45\""));
    }

    #[test]
    fn test_json_decode_matches() {
        let snapshot = LedgerSnapshot::from_service(&sample_ledger());
        let decoded = import_from_json(&export_json(&snapshot).unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_malformed_json_is_import_error() {
        let err = import_from_json("{ not json").unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }

    #[test]
    fn test_validate_rejects_bad_version() {
        let mut snapshot = LedgerSnapshot::from_service(&sample_ledger());
        snapshot.version = "0.9".into();
        assert!(snapshot.validate().unwrap_err().contains("version"));
    }

    #[test]
    fn test_validate_rejects_unknown_account() {
        let mut snapshot = LedgerSnapshot::from_service(&sample_ledger());
        snapshot.operations[0].account_id = AccountId::new();
        assert!(snapshot.validate().unwrap_err().contains("unknown account"));
    }

    #[test]
    fn test_validate_rejects_kind_mismatch() {
        let mut snapshot = LedgerSnapshot::from_service(&sample_ledger());
        snapshot.operations[0].kind = OperationKind::Expense;
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_unknown_category_still_validates() {
        let mut snapshot = LedgerSnapshot::from_service(&sample_ledger());
        let category_id = snapshot.operations[0].category_id;
        assert!(snapshot.has_category(category_id));

        snapshot.categories.clear();
        assert!(snapshot.validate().is_ok());
        assert!(!snapshot.has_category(category_id));
    }

    #[test]
    fn test_opening_balance_is_exported() {
        let snapshot = LedgerSnapshot::from_service(&sample_ledger());
        let json = export_json(&snapshot).unwrap();
        assert!(json.contains("\"opening_balance\": \"100\""));
    }
}
