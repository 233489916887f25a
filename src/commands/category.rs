//! Category commands

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryId, OperationKind};
use crate::services::LedgerService;

use super::{Command, CommandState, Outcome, UndoOutcome};

/// Add an income or expense category
#[derive(Debug)]
pub struct CreateCategory {
    kind: OperationKind,
    name: String,
    created: Option<CategoryId>,
    state: CommandState,
}

impl CreateCategory {
    pub fn new(kind: OperationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            created: None,
            state: CommandState::Unexecuted,
        }
    }

    pub fn created(&self) -> Option<CategoryId> {
        self.created
    }
}

impl Command for CreateCategory {
    fn name(&self) -> String {
        format!("create {} category '{}'", self.kind, self.name)
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        let category = ledger.create_category(self.kind, &self.name)?;
        self.created = Some(category.id);
        self.state = CommandState::Executed;

        info!(category = %category.id, name = %category.name, "category created");
        Ok(Outcome::CategoryCreated(category))
    }

    fn undo(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;

        if let Some(id) = self.created {
            ledger.delete_category(id);
        }
        self.state = CommandState::Undone;
        Ok(UndoOutcome::Reverted)
    }
}

/// Rename a category
#[derive(Debug)]
pub struct UpdateCategory {
    id: CategoryId,
    new_name: String,
    previous: Option<String>,
    state: CommandState,
}

impl UpdateCategory {
    pub fn new(id: CategoryId, new_name: impl Into<String>) -> Self {
        Self {
            id,
            new_name: new_name.into(),
            previous: None,
            state: CommandState::Unexecuted,
        }
    }
}

impl Command for UpdateCategory {
    fn name(&self) -> String {
        format!("rename category {} to '{}'", self.id, self.new_name)
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        let previous = ledger.rename_category(self.id, &self.new_name)?;
        self.previous = Some(previous.clone());
        self.state = CommandState::Executed;

        Ok(Outcome::Renamed {
            entity: "Category",
            from: previous,
            to: self.new_name.trim().to_string(),
        })
    }

    fn undo(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;

        if ledger.get_category(self.id).is_none() {
            return Ok(UndoOutcome::NotReversible(format!(
                "category {} no longer exists",
                self.id
            )));
        }
        if let Some(previous) = &self.previous {
            ledger.rename_category(self.id, previous)?;
        }
        self.state = CommandState::Undone;
        Ok(UndoOutcome::Reverted)
    }
}

/// Delete a category; its operations stay booked
#[derive(Debug)]
pub struct DeleteCategory {
    id: CategoryId,
    state: CommandState,
}

impl DeleteCategory {
    pub fn new(id: CategoryId) -> Self {
        Self {
            id,
            state: CommandState::Unexecuted,
        }
    }
}

impl Command for DeleteCategory {
    fn name(&self) -> String {
        format!("delete category {}", self.id)
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        self.state.ensure_executable(&self.name())?;

        if !ledger.delete_category(self.id) {
            return Err(LedgerError::category_not_found(self.id.to_string()));
        }
        self.state = CommandState::Executed;

        info!(category = %self.id, "category deleted");
        Ok(Outcome::Deleted {
            entity: "Category",
            cascaded: 0,
        })
    }

    fn undo(&mut self, _ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        self.state.ensure_undoable(&self.name())?;
        Ok(UndoOutcome::NotReversible(
            "deleted categories are not restored".to_string(),
        ))
    }
}
