//! Balance maintenance command

use tracing::info;

use crate::error::LedgerResult;
use crate::models::{AccountId, Money};
use crate::services::LedgerService;

use super::{Command, CommandState, Outcome, UndoOutcome};

/// Recompute every balance from opening balances and operations
#[derive(Debug, Default)]
pub struct RecalculateBalances {
    previous: Vec<(AccountId, Money)>,
    state: CommandState,
}

impl RecalculateBalances {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for RecalculateBalances {
    fn name(&self) -> String {
        "recalculate balances".to_string()
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        self.previous = ledger
            .all_accounts()
            .iter()
            .map(|a| (a.id, a.balance))
            .collect();
        let changed = ledger.recalculate_balances();
        self.state = CommandState::Executed;

        info!(changed, "balances recalculated");
        Ok(Outcome::Recalculated { changed })
    }

    fn undo(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;

        for (id, balance) in &self.previous {
            if let Some(account) = ledger.get_account(*id) {
                if account.balance != *balance {
                    ledger.adjust_balance(*id, *balance - account.balance)?;
                }
            }
        }
        self.state = CommandState::Undone;
        Ok(UndoOutcome::Reverted)
    }
}
