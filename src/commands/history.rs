//! Command history

use tracing::{info, warn};

use crate::error::LedgerResult;
use crate::services::LedgerService;

use super::{Command, Outcome, UndoOutcome};

/// A linear history of executed commands; only the latest can be undone
#[derive(Default)]
pub struct Session {
    history: Vec<Box<dyn Command>>,
}

impl Session {
    /// Create a session with an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command, keeping it for undo if it records history
    ///
    /// A failed command is not kept.
    pub fn run(
        &mut self,
        ledger: &mut dyn LedgerService,
        mut command: Box<dyn Command>,
    ) -> LedgerResult<Outcome> {
        let outcome = command.execute(ledger)?;
        if command.records_history() {
            self.history.push(command);
        }
        Ok(outcome)
    }

    /// Undo the most recent command and drop it from the history
    ///
    /// Returns `None` when there is nothing to undo. The entry is dropped
    /// even when the command turns out not to be reversible; if undo fails
    /// with an error the entry is kept.
    pub fn undo_last(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Option<UndoOutcome>> {
        let Some(mut command) = self.history.pop() else {
            return Ok(None);
        };

        match command.undo(ledger) {
            Ok(outcome) => {
                match &outcome {
                    UndoOutcome::Reverted => info!(command = %command.name(), "command undone"),
                    UndoOutcome::NotReversible(reason) => {
                        warn!(command = %command.name(), %reason, "command cannot be undone")
                    }
                }
                Ok(Some(outcome))
            }
            Err(e) => {
                self.history.push(command);
                Err(e)
            }
        }
    }

    /// Names of the recorded commands, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("history", &self.history())
            .finish()
    }
}
