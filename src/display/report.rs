//! Analytics report formatting

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analytics::{AnalyticsReport, CategoryAnalytics, FinancialAnalytics};
use crate::models::OperationKind;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Ops")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Savings")]
    savings: String,
}

fn percent(value: Decimal) -> String {
    format!("{:.1}%", value)
}

/// Format per-category totals as a table
pub fn format_category_table(categories: &[CategoryAnalytics], symbol: &str) -> String {
    if categories.is_empty() {
        return "  (none)".to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        name: c.category_name.clone(),
        total: c.total_amount.format_with_symbol(symbol),
        count: c.operations_count,
        share: percent(c.percentage),
    });
    Table::new(rows).with(Style::modern()).to_string()
}

/// Format a period overview
pub fn format_financial_analytics(analytics: &FinancialAnalytics, symbol: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Period: {} to {}\n",
        analytics.period_start, analytics.period_end
    ));
    out.push_str(&format!(
        "Income: {}\nExpense: {}\nNet: {}\nSavings rate: {}\n",
        analytics.total_income.format_with_symbol(symbol),
        analytics.total_expense.format_with_symbol(symbol),
        analytics.net_income.format_with_symbol(symbol),
        percent(analytics.savings_rate)
    ));
    out.push_str("\nIncome by category\n");
    out.push_str(&format_category_table(&analytics.income_by_category, symbol));
    out.push_str("\n\nExpense by category\n");
    out.push_str(&format_category_table(&analytics.expense_by_category, symbol));
    out
}

fn format_monthly(months: &BTreeMap<NaiveDate, FinancialAnalytics>, symbol: &str) -> String {
    if months.is_empty() {
        return "No operations recorded.".to_string();
    }

    let rows = months.iter().map(|(first, a)| MonthRow {
        month: first.format("%Y-%m").to_string(),
        income: a.total_income.format_with_symbol(symbol),
        expense: a.total_expense.format_with_symbol(symbol),
        net: a.net_income.format_with_symbol(symbol),
        savings: percent(a.savings_rate),
    });
    Table::new(rows).with(Style::modern()).to_string()
}

fn format_distribution(distribution: &BTreeMap<OperationKind, Decimal>) -> String {
    if distribution.is_empty() {
        return "No operations recorded.".to_string();
    }

    distribution
        .iter()
        .map(|(kind, share)| format!("{}: {}", kind, percent(*share)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format any analytics report for the terminal
pub fn format_report(report: &AnalyticsReport, symbol: &str) -> String {
    match report {
        AnalyticsReport::Full(analytics) => format_financial_analytics(analytics, symbol),
        AnalyticsReport::TopExpenses(categories) => {
            format!("Top expense categories\n{}", format_category_table(categories, symbol))
        }
        AnalyticsReport::Monthly(months) => format_monthly(months, symbol),
        AnalyticsReport::Distribution(distribution) => format_distribution(distribution),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money};

    #[test]
    fn test_full_report() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut analytics = FinancialAnalytics::empty(day, day);
        analytics.total_income = Money::from_units(200);
        analytics.net_income = Money::from_units(200);
        analytics.savings_rate = Decimal::ONE_HUNDRED;
        analytics.income_by_category.push(CategoryAnalytics {
            category_id: CategoryId::new(),
            category_name: "Salary".into(),
            category_type: OperationKind::Income,
            total_amount: Money::from_units(200),
            operations_count: 2,
            percentage: Decimal::ONE_HUNDRED,
        });

        let text = format_report(&AnalyticsReport::Full(analytics), "$");
        assert!(text.contains("Period: 2025-03-01 to 2025-03-01"));
        assert!(text.contains("Savings rate: 100.0%"));
        assert!(text.contains("Salary"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn test_distribution_report() {
        let mut distribution = BTreeMap::new();
        distribution.insert(OperationKind::Income, Decimal::from(60));
        distribution.insert(OperationKind::Expense, Decimal::from(40));

        let text = format_report(&AnalyticsReport::Distribution(distribution), "$");
        assert_eq!(text, "Income: 60.0%\nExpense: 40.0%");
    }

    #[test]
    fn test_empty_monthly_report() {
        let text = format_report(&AnalyticsReport::Monthly(BTreeMap::new()), "$");
        assert_eq!(text, "No operations recorded.");
    }
}
