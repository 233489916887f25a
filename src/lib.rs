//! finledger - personal finance ledger
//!
//! This library keeps accounts, income/expense categories and the operations
//! booked against them, with undoable commands, a caching ledger service,
//! analytics and JSON/CSV/YAML snapshot files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (money, accounts, categories, operations)
//! - `storage`: Keyed in-memory repositories and file helpers
//! - `services`: The `LedgerService` trait, the direct ledger and its cache
//! - `analytics`: Period, category and monthly analytics
//! - `commands`: Reversible commands and the session history
//! - `export`: Snapshot encoding (JSON, CSV, YAML)
//! - `config`: Configuration and path management
//! - `display`: Terminal tables
//! - `cli`: Command-line handlers
//! - `logging`: Tracing subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use finledger::models::{Money, OperationKind};
//! use finledger::services::{Ledger, LedgerService};
//!
//! let mut ledger = Ledger::new();
//! let account = ledger.create_account("Checking", Money::from_units(1000)).unwrap();
//! let salary = ledger.create_category(OperationKind::Income, "Salary").unwrap();
//! ledger
//!     .create_operation(OperationKind::Income, account.id, Money::from_units(500), salary.id, "")
//!     .unwrap();
//!
//! assert_eq!(ledger.total_balance(), Money::from_units(1500));
//! assert!(ledger.check_integrity());
//! ```

pub mod analytics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
