//! Storage layer for finledger
//!
//! Authoritative in-memory repositories for accounts, categories and
//! operations, plus the file helpers used by export and import.

pub mod accounts;
pub mod categories;
pub mod collection;
pub mod file_io;
pub mod operations;

pub use accounts::AccountRepository;
pub use categories::CategoryRepository;
pub use collection::OrderedMap;
pub use file_io::{read_file_required, remove_file_if_exists, write_file_atomic};
pub use operations::OperationRepository;

/// Storage coordinator that owns every repository
#[derive(Debug, Default)]
pub struct Storage {
    pub accounts: AccountRepository,
    pub categories: CategoryRepository,
    pub operations: OperationRepository,
}

impl Storage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the storage holds no entity at all
    pub fn is_empty(&self) -> bool {
        self.accounts.count() == 0
            && self.categories.count() == 0
            && self.operations.count() == 0
    }

    /// Remove every entity from every repository
    pub fn clear_all(&mut self) {
        self.operations.clear();
        self.categories.clear();
        self.accounts.clear();
    }
}
