//! Core data models for finledger
//!
//! This module contains the data structures of the ledger domain: accounts,
//! categories, operations and the money type they share.

pub mod account;
pub mod category;
pub mod ids;
pub mod money;
pub mod operation;

pub use account::Account;
pub use category::Category;
pub use ids::{AccountId, CategoryId, OperationId};
pub use money::Money;
pub use operation::{Operation, OperationKind};
