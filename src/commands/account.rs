//! Account commands

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, Money};
use crate::services::LedgerService;

use super::{Command, CommandState, Outcome, UndoOutcome};

/// Open a new account
#[derive(Debug)]
pub struct CreateAccount {
    name: String,
    opening_balance: Money,
    created: Option<AccountId>,
    state: CommandState,
}

impl CreateAccount {
    pub fn new(name: impl Into<String>, opening_balance: Money) -> Self {
        Self {
            name: name.into(),
            opening_balance,
            created: None,
            state: CommandState::Unexecuted,
        }
    }

    /// ID of the account once executed
    pub fn created(&self) -> Option<AccountId> {
        self.created
    }
}

impl Command for CreateAccount {
    fn name(&self) -> String {
        format!("create account '{}'", self.name)
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        let account = ledger.create_account(&self.name, self.opening_balance)?;
        self.created = Some(account.id);
        self.state = CommandState::Executed;

        info!(account = %account.id, name = %account.name, "account created");
        Ok(Outcome::AccountCreated(account))
    }

    fn undo(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;

        if let Some(id) = self.created {
            ledger.delete_account(id);
        }
        self.state = CommandState::Undone;
        Ok(UndoOutcome::Reverted)
    }
}

/// Rename an account
#[derive(Debug)]
pub struct UpdateAccount {
    id: AccountId,
    new_name: String,
    previous: Option<String>,
    state: CommandState,
}

impl UpdateAccount {
    pub fn new(id: AccountId, new_name: impl Into<String>) -> Self {
        Self {
            id,
            new_name: new_name.into(),
            previous: None,
            state: CommandState::Unexecuted,
        }
    }
}

impl Command for UpdateAccount {
    fn name(&self) -> String {
        format!("rename account {} to '{}'", self.id, self.new_name)
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        let previous = ledger.rename_account(self.id, &self.new_name)?;
        self.previous = Some(previous.clone());
        self.state = CommandState::Executed;

        Ok(Outcome::Renamed {
            entity: "Account",
            from: previous,
            to: self.new_name.trim().to_string(),
        })
    }

    fn undo(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;

        if ledger.get_account(self.id).is_none() {
            return Ok(UndoOutcome::NotReversible(format!(
                "account {} no longer exists",
                self.id
            )));
        }
        if let Some(previous) = &self.previous {
            ledger.rename_account(self.id, previous)?;
        }
        self.state = CommandState::Undone;
        Ok(UndoOutcome::Reverted)
    }
}

/// Delete an account together with its operations
#[derive(Debug)]
pub struct DeleteAccount {
    id: AccountId,
    state: CommandState,
}

impl DeleteAccount {
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            state: CommandState::Unexecuted,
        }
    }
}

impl Command for DeleteAccount {
    fn name(&self) -> String {
        format!("delete account {}", self.id)
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        if ledger.get_account(self.id).is_none() {
            return Err(LedgerError::account_not_found(self.id.to_string()));
        }

        let dependent: Vec<_> = ledger
            .all_operations()
            .iter()
            .filter(|o| o.account_id == self.id)
            .map(|o| o.id)
            .collect();
        let cascaded = dependent
            .into_iter()
            .filter(|id| ledger.delete_operation(*id))
            .count();

        ledger.delete_account(self.id);
        self.state = CommandState::Executed;

        info!(account = %self.id, cascaded, "account deleted");
        Ok(Outcome::Deleted {
            entity: "Account",
            cascaded,
        })
    }

    fn undo(&mut self, _ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;
        Ok(UndoOutcome::NotReversible(
            "deleted accounts are not restored".to_string(),
        ))
    }
}
