//! Operation commands

use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, CategoryId, Money, Operation, OperationId, OperationKind};
use crate::services::LedgerService;

use super::{Command, CommandState, Outcome, UndoOutcome};

/// Book an income or expense against an account
///
/// All checks run before the ledger is touched: the category must exist and
/// match the kind, the account must exist and, for an expense, its balance
/// must cover the amount.
#[derive(Debug)]
pub struct CreateOperation {
    kind: OperationKind,
    account_id: AccountId,
    amount: Money,
    category_id: CategoryId,
    description: String,
    created: Option<Operation>,
    state: CommandState,
}

impl CreateOperation {
    pub fn new(
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        category_id: CategoryId,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            account_id,
            amount,
            category_id,
            description: description.into(),
            created: None,
            state: CommandState::Unexecuted,
        }
    }

    /// The booked operation once executed
    pub fn created(&self) -> Option<&Operation> {
        self.created.as_ref()
    }

    fn check(&self, ledger: &dyn LedgerService) -> LedgerResult<()> {
        let category = ledger
            .get_category(self.category_id)
            .ok_or_else(|| LedgerError::category_not_found(self.category_id.to_string()))?;
        if !category.accepts(self.kind) {
            return Err(LedgerError::Validation(format!(
                "{} operation cannot use {} category '{}'",
                self.kind, category.kind, category.name
            )));
        }

        let account = ledger
            .get_account(self.account_id)
            .ok_or_else(|| LedgerError::account_not_found(self.account_id.to_string()))?;
        if self.kind == OperationKind::Expense && self.amount > account.balance {
            return Err(LedgerError::InsufficientFunds {
                account: account.name,
                needed: self.amount,
                available: account.balance,
            });
        }

        Ok(())
    }
}

impl Command for CreateOperation {
    fn name(&self) -> String {
        format!("book {} of {} on {}", self.kind, self.amount, self.account_id)
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;
        self.check(ledger)?;

        let operation = ledger.create_operation(
            self.kind,
            self.account_id,
            self.amount,
            self.category_id,
            &self.description,
        )?;
        self.created = Some(operation.clone());
        self.state = CommandState::Executed;

        info!(
            operation = %operation.id,
            account = %operation.account_id,
            amount = %operation.amount,
            kind = %operation.kind,
            "operation booked"
        );
        Ok(Outcome::OperationCreated(operation))
    }

    fn undo(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;

        if let Some(operation) = &self.created {
            if ledger.get_operation(operation.id).is_none() {
                return Ok(UndoOutcome::NotReversible(format!(
                    "operation {} was already removed",
                    operation.id
                )));
            }
            reverse(ledger, operation)?;
        }
        self.state = CommandState::Undone;
        Ok(UndoOutcome::Reverted)
    }
}

/// Delete an operation and reverse its balance effect
#[derive(Debug)]
pub struct DeleteOperation {
    id: OperationId,
    state: CommandState,
}

impl DeleteOperation {
    pub fn new(id: OperationId) -> Self {
        Self {
            id,
            state: CommandState::Unexecuted,
        }
    }
}

impl Command for DeleteOperation {
    fn name(&self) -> String {
        format!("delete operation {}", self.id)
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        let operation = ledger
            .get_operation(self.id)
            .ok_or_else(|| LedgerError::operation_not_found(self.id.to_string()))?;
        reverse(ledger, &operation)?;
        self.state = CommandState::Executed;

        info!(operation = %self.id, "operation deleted");
        Ok(Outcome::Deleted {
            entity: "Operation",
            cascaded: 0,
        })
    }

    fn undo(&mut self, _ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;
        Ok(UndoOutcome::NotReversible(
            "deleted operations are not restored".to_string(),
        ))
    }
}

/// Take back an operation's balance effect, then remove it
///
/// An operation whose account is gone is removed without a balance change.
fn reverse(ledger: &mut dyn LedgerService, operation: &Operation) -> LedgerResult<()> {
    if ledger.get_account(operation.account_id).is_some() {
        ledger.adjust_balance(operation.account_id, -operation.signed_amount())?;
    } else {
        debug!(
            operation = %operation.id,
            account = %operation.account_id,
            "account gone, removing operation without balance change"
        );
    }
    ledger.delete_operation(operation.id);
    Ok(())
}
