//! Reversible ledger commands
//!
//! Every mutating use case is a [`Command`] object with `execute` and `undo`.
//! A command captures whatever it needs to reverse itself while executing.
//! Commands never hold the ledger; it is passed to each call.
//!
//! # Example
//!
//! ```rust
//! use finledger::commands::{CreateAccount, Session};
//! use finledger::models::Money;
//! use finledger::services::{CachedLedger, Ledger, LedgerService};
//!
//! let mut ledger = CachedLedger::new(Ledger::new());
//! let mut session = Session::new();
//!
//! session
//!     .run(&mut ledger, Box::new(CreateAccount::new("Checking", Money::from_units(1000))))
//!     .unwrap();
//! assert_eq!(ledger.all_accounts().len(), 1);
//!
//! session.undo_last(&mut ledger).unwrap();
//! assert!(ledger.all_accounts().is_empty());
//! ```

pub mod account;
pub mod analytics;
pub mod category;
pub mod data;
pub mod history;
pub mod maintenance;
pub mod operation;
pub mod timing;

use std::fmt;
use std::path::PathBuf;

use crate::analytics::AnalyticsReport;
use crate::error::{LedgerError, LedgerResult};
use crate::export::DataFormat;
use crate::models::{Account, Category, Operation};
use crate::services::LedgerService;

pub use account::{CreateAccount, DeleteAccount, UpdateAccount};
pub use analytics::ShowAnalytics;
pub use category::{CreateCategory, DeleteCategory, UpdateCategory};
pub use data::{restore_snapshot, ExportData, ImportCounts, ImportData};
pub use history::Session;
pub use maintenance::RecalculateBalances;
pub use operation::{CreateOperation, DeleteOperation};
pub use timing::Timed;

/// Lifecycle of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    #[default]
    Unexecuted,
    Executed,
    Undone,
}

impl CommandState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unexecuted => "unexecuted",
            Self::Executed => "executed",
            Self::Undone => "undone",
        }
    }

    /// Fail unless the command has not run yet
    pub fn ensure_executable(&self, command: &str) -> LedgerResult<()> {
        match self {
            Self::Unexecuted => Ok(()),
            _ => Err(self.error(command)),
        }
    }

    /// Fail unless the command has run and not been undone
    pub fn ensure_undoable(&self, command: &str) -> LedgerResult<()> {
        match self {
            Self::Executed => Ok(()),
            _ => Err(self.error(command)),
        }
    }

    fn error(&self, command: &str) -> LedgerError {
        LedgerError::CommandState {
            command: command.to_string(),
            state: self.label(),
        }
    }
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a successful `execute` produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    AccountCreated(Account),
    CategoryCreated(Category),
    OperationCreated(Operation),
    Renamed {
        entity: &'static str,
        from: String,
        to: String,
    },
    Deleted {
        entity: &'static str,
        /// Dependent entities removed along with it
        cascaded: usize,
    },
    Exported {
        path: PathBuf,
        format: DataFormat,
    },
    Imported(ImportCounts),
    Analytics(AnalyticsReport),
    Recalculated {
        changed: usize,
    },
}

/// What `undo` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The command's effects were reversed
    Reverted,
    /// The command cannot be reversed; nothing was changed
    NotReversible(String),
}

impl UndoOutcome {
    pub fn is_reverted(&self) -> bool {
        matches!(self, Self::Reverted)
    }
}

/// A reversible use case over a [`LedgerService`]
pub trait Command {
    /// Human-readable description, e.g. `create account 'Cash'`
    fn name(&self) -> String;

    fn state(&self) -> CommandState;

    /// Apply the command. Allowed once, from [`CommandState::Unexecuted`].
    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome>;

    /// Reverse the command. Allowed once, from [`CommandState::Executed`].
    fn undo(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome>;

    /// Whether a session should keep this command for undo
    fn records_history(&self) -> bool {
        true
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Account, Category, Money, OperationKind};
    use crate::services::{CachedLedger, Ledger, LedgerService};

    pub fn ledger() -> CachedLedger<Ledger> {
        CachedLedger::new(Ledger::new())
    }

    /// A ledger with "Checking" (1000), an income and an expense category
    pub fn seeded() -> (CachedLedger<Ledger>, Account, Category, Category) {
        let mut ledger = ledger();
        let account = ledger
            .create_account("Checking", Money::from_units(1000))
            .unwrap();
        let salary = ledger
            .create_category(OperationKind::Income, "Salary")
            .unwrap();
        let food = ledger
            .create_category(OperationKind::Expense, "Food")
            .unwrap();
        (ledger, account, salary, food)
    }
}
