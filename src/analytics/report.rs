//! Analytics report requests and results

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::OperationKind;

use super::engine::AnalyticsEngine;
use super::snapshot::{CategoryAnalytics, FinancialAnalytics};

/// Which analytics to compute, with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsKind {
    /// Full income/expense overview of a period
    Full {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// Largest expense categories of a period
    TopExpenses {
        count: usize,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// Per-month overviews
    Monthly,
    /// Income/expense share of total volume
    Distribution,
}

impl AnalyticsKind {
    /// Short label, as used on the command line
    pub fn label(&self) -> &'static str {
        match self {
            Self::Full { .. } => "full",
            Self::TopExpenses { .. } => "top",
            Self::Monthly => "monthly",
            Self::Distribution => "distribution",
        }
    }
}

impl fmt::Display for AnalyticsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The result of an analytics request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AnalyticsReport {
    Full(FinancialAnalytics),
    TopExpenses(Vec<CategoryAnalytics>),
    Monthly(BTreeMap<NaiveDate, FinancialAnalytics>),
    Distribution(BTreeMap<OperationKind, Decimal>),
}

impl AnalyticsEngine<'_> {
    /// Compute the report a request asks for
    pub fn report(&self, kind: AnalyticsKind) -> AnalyticsReport {
        match kind {
            AnalyticsKind::Full { start, end } => {
                AnalyticsReport::Full(self.full_analytics(start, end))
            }
            AnalyticsKind::TopExpenses { count, start, end } => {
                AnalyticsReport::TopExpenses(self.top_expense_categories(count, start, end))
            }
            AnalyticsKind::Monthly => AnalyticsReport::Monthly(self.monthly_analytics()),
            AnalyticsKind::Distribution => {
                AnalyticsReport::Distribution(self.operation_type_distribution())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_dispatch_on_empty_engine() {
        let engine = AnalyticsEngine::new(&[], &[]);

        assert!(matches!(
            engine.report(AnalyticsKind::Full { start: None, end: None }),
            AnalyticsReport::Full(a) if a.is_empty()
        ));
        assert_eq!(
            engine.report(AnalyticsKind::TopExpenses { count: 3, start: None, end: None }),
            AnalyticsReport::TopExpenses(Vec::new())
        );
        assert_eq!(
            engine.report(AnalyticsKind::Monthly),
            AnalyticsReport::Monthly(BTreeMap::new())
        );
        assert_eq!(
            engine.report(AnalyticsKind::Distribution),
            AnalyticsReport::Distribution(BTreeMap::new())
        );
    }

    #[test]
    fn test_kind_label() {
        assert_eq!(AnalyticsKind::Monthly.to_string(), "monthly");
        assert_eq!(
            AnalyticsKind::TopExpenses { count: 5, start: None, end: None }.label(),
            "top"
        );
    }
}
