//! Read-only analytics command

use tracing::debug;

use crate::analytics::AnalyticsKind;
use crate::error::LedgerResult;
use crate::services::LedgerService;

use super::{Command, CommandState, Outcome, UndoOutcome};

/// Compute an analytics report; never kept in history
#[derive(Debug)]
pub struct ShowAnalytics {
    kind: AnalyticsKind,
    state: CommandState,
}

impl ShowAnalytics {
    pub fn new(kind: AnalyticsKind) -> Self {
        Self {
            kind,
            state: CommandState::Unexecuted,
        }
    }
}

impl Command for ShowAnalytics {
    fn name(&self) -> String {
        format!("show {} analytics", self.kind)
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        let report = ledger.analytics(self.kind);
        self.state = CommandState::Executed;

        debug!(kind = %self.kind, "analytics computed");
        Ok(Outcome::Analytics(report))
    }

    fn undo(&mut self, _ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;
        Ok(UndoOutcome::NotReversible(
            "analytics do not change the ledger".to_string(),
        ))
    }

    fn records_history(&self) -> bool {
        false
    }
}
