//! Service layer for finledger
//!
//! The service layer sits on top of the storage layer. It enforces
//! validation and balance bookkeeping, and exposes the read queries and
//! analytics the rest of the crate consumes through [`LedgerService`].

pub mod cached;
pub mod ledger;

pub use cached::{CacheStats, CachedLedger};
pub use ledger::{Ledger, LedgerService};
