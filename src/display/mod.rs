//! Display formatting for terminal output
//!
//! Renders accounts and analytics reports as tables with `tabled`.

pub mod account;
pub mod report;

pub use account::{format_account_list, format_summary_line};
pub use report::{format_category_table, format_financial_analytics, format_report};
