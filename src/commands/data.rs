//! Export and import commands
//!
//! Import replaces the whole ledger. Entities are re-created through the
//! normal creation path, so every imported entity gets a fresh ID and every
//! operation goes through the usual validation and balance bookkeeping.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::export::{read_snapshot, write_snapshot, DataFormat, LedgerSnapshot};
use crate::models::{AccountId, CategoryId};
use crate::services::LedgerService;
use crate::storage::remove_file_if_exists;

use super::{Command, CommandState, Outcome, UndoOutcome};

/// What an import re-created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportCounts {
    pub accounts: usize,
    pub categories: usize,
    pub operations: usize,
    /// Operations restored whose category was not in the snapshot
    pub uncategorized_operations: usize,
}

/// Write every entity to a file
#[derive(Debug)]
pub struct ExportData {
    path: PathBuf,
    format: DataFormat,
    state: CommandState,
}

impl ExportData {
    pub fn new(path: impl Into<PathBuf>, format: DataFormat) -> Self {
        Self {
            path: path.into(),
            format,
            state: CommandState::Unexecuted,
        }
    }

    /// Export with the format inferred from the file extension
    pub fn infer(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let format = DataFormat::from_path(&path)?;
        Ok(Self::new(path, format))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Command for ExportData {
    fn name(&self) -> String {
        format!("export {} to {}", self.format, self.path.display())
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        let snapshot = LedgerSnapshot::from_service(ledger);
        write_snapshot(&self.path, self.format, &snapshot)?;
        self.state = CommandState::Executed;

        info!(
            path = %self.path.display(),
            format = %self.format,
            accounts = snapshot.accounts.len(),
            operations = snapshot.operations.len(),
            "ledger exported"
        );
        Ok(Outcome::Exported {
            path: self.path.clone(),
            format: self.format,
        })
    }

    fn undo(&mut self, _ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;

        remove_file_if_exists(&self.path)?;
        self.state = CommandState::Undone;
        Ok(UndoOutcome::Reverted)
    }
}

/// Replace the ledger with the contents of a file
#[derive(Debug)]
pub struct ImportData {
    path: PathBuf,
    format: DataFormat,
    previous: Option<LedgerSnapshot>,
    state: CommandState,
}

impl ImportData {
    pub fn new(path: impl Into<PathBuf>, format: DataFormat) -> Self {
        Self {
            path: path.into(),
            format,
            previous: None,
            state: CommandState::Unexecuted,
        }
    }

    /// Import with the format inferred from the file extension
    pub fn infer(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let format = DataFormat::from_path(&path)?;
        Ok(Self::new(path, format))
    }
}

impl Command for ImportData {
    fn name(&self) -> String {
        format!("import {} from {}", self.format, self.path.display())
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        let snapshot = read_snapshot(&self.path, self.format)?;
        let previous = LedgerSnapshot::from_service(ledger);

        let counts = match restore_snapshot(ledger, &snapshot) {
            Ok(counts) => counts,
            Err(e) => {
                warn!(error = %e, "import failed, restoring previous ledger");
                restore_snapshot(ledger, &previous)?;
                return Err(e);
            }
        };

        self.previous = Some(previous);
        self.state = CommandState::Executed;

        info!(
            path = %self.path.display(),
            accounts = counts.accounts,
            categories = counts.categories,
            operations = counts.operations,
            uncategorized = counts.uncategorized_operations,
            "ledger imported"
        );
        Ok(Outcome::Imported(counts))
    }

    fn undo(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;

        let previous = self
            .previous
            .as_ref()
            .ok_or_else(|| LedgerError::Import("no captured ledger to restore".to_string()))?;
        restore_snapshot(ledger, previous)?;
        self.state = CommandState::Undone;
        Ok(UndoOutcome::Reverted)
    }
}

/// Clear the ledger and re-create everything in `snapshot`
///
/// Accounts keep their exported opening balance. Once the operations are
/// booked again each balance is set to its exported value, so a snapshot
/// that was inconsistent stays inconsistent (and `check_integrity` says so).
/// Operations whose category is not in the snapshot keep their dangling
/// category id, the same state a deleted category leaves behind.
pub fn restore_snapshot(
    ledger: &mut dyn LedgerService,
    snapshot: &LedgerSnapshot,
) -> LedgerResult<ImportCounts> {
    ledger.clear_all();
    let mut counts = ImportCounts::default();

    let mut account_ids: HashMap<AccountId, AccountId> = HashMap::new();
    for account in &snapshot.accounts {
        let created = ledger.restore_account(&account.name, account.opening_balance)?;
        account_ids.insert(account.id, created.id);
        counts.accounts += 1;
    }

    let mut category_ids: HashMap<CategoryId, CategoryId> = HashMap::new();
    for category in &snapshot.categories {
        let created = ledger.create_category(category.kind, &category.name)?;
        category_ids.insert(category.id, created.id);
        counts.categories += 1;
    }

    for op in &snapshot.operations {
        let account_id = *account_ids
            .get(&op.account_id)
            .ok_or_else(|| LedgerError::account_not_found(op.account_id.to_string()))?;

        match category_ids.get(&op.category_id) {
            Some(category_id) => {
                ledger.create_operation_at(
                    op.kind,
                    account_id,
                    op.amount,
                    *category_id,
                    &op.description,
                    op.date,
                )?;
            }
            None => {
                debug!(
                    operation = %op.id,
                    category = %op.category_id,
                    "restoring operation with unknown category"
                );
                ledger.restore_operation(
                    op.kind,
                    account_id,
                    op.amount,
                    op.category_id,
                    &op.description,
                    op.date,
                )?;
                counts.uncategorized_operations += 1;
            }
        }
        counts.operations += 1;
    }

    for account in &snapshot.accounts {
        let Some(id) = account_ids.get(&account.id) else {
            continue;
        };
        let current = ledger
            .get_account(*id)
            .ok_or_else(|| LedgerError::account_not_found(id.to_string()))?;
        let drift = account.balance - current.balance;
        if !drift.is_zero() {
            ledger.adjust_balance(*id, drift)?;
        }
    }

    Ok(counts)
}
