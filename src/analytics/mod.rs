//! Analytics for finledger
//!
//! Read-side aggregation over a snapshot of operations and categories.
//! Results are computed on demand and never cached.

pub mod engine;
pub mod report;
pub mod snapshot;

pub use engine::{month_bounds, AnalyticsEngine};
pub use report::{AnalyticsKind, AnalyticsReport};
pub use snapshot::{CategoryAnalytics, FinancialAnalytics, UNKNOWN_CATEGORY};
