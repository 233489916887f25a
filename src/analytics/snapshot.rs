//! Analytics snapshot types
//!
//! Immutable values computed on demand from an operation set. They are never
//! stored or cached.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{CategoryId, Money, OperationKind};

/// Label used when an operation's category no longer resolves
pub const UNKNOWN_CATEGORY: &str = "Unknown category";

/// Totals for one category within a filtered operation set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAnalytics {
    /// Category ID (may refer to a deleted category)
    pub category_id: CategoryId,
    /// Category name, or [`UNKNOWN_CATEGORY`]
    pub category_name: String,
    /// Income or expense
    pub category_type: OperationKind,
    /// Sum of the operation amounts
    pub total_amount: Money,
    /// Number of operations
    pub operations_count: usize,
    /// Share of the kind's total, in percent (0 when that total is 0)
    pub percentage: Decimal,
}

/// Income/expense overview of a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialAnalytics {
    pub total_income: Money,
    pub total_expense: Money,
    /// Income minus expense
    pub net_income: Money,
    /// Net income as a percentage of income (0 when there is no income)
    pub savings_rate: Decimal,
    /// Income categories, largest total first
    pub income_by_category: Vec<CategoryAnalytics>,
    /// Expense categories, largest total first
    pub expense_by_category: Vec<CategoryAnalytics>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl FinancialAnalytics {
    /// A zero-valued snapshot covering the given period
    pub fn empty(period_start: NaiveDate, period_end: NaiveDate) -> Self {
        Self {
            total_income: Money::zero(),
            total_expense: Money::zero(),
            net_income: Money::zero(),
            savings_rate: Decimal::ZERO,
            income_by_category: Vec::new(),
            expense_by_category: Vec::new(),
            period_start,
            period_end,
        }
    }

    /// Whether no operation contributed to this snapshot
    pub fn is_empty(&self) -> bool {
        self.income_by_category.is_empty() && self.expense_by_category.is_empty()
    }
}
