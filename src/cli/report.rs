//! Summary and analytics commands

use std::path::Path;

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::analytics::AnalyticsKind;
use crate::commands::{Outcome, ShowAnalytics};
use crate::config::Settings;
use crate::display::account::{format_account_list, format_summary_line};
use crate::display::report::format_report;
use crate::error::{LedgerError, LedgerResult};
use crate::services::LedgerService;

use super::load_ledger;

/// Analytics report options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Totals, savings rate and per-category breakdown
    Full,
    /// Largest expense categories
    Top,
    /// Full analytics per calendar month
    Monthly,
    /// Income/expense share of total volume
    Distribution,
}

impl ReportKind {
    /// Build the analytics request; `top` falls back to the configured count
    pub fn to_kind(
        self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        top: Option<usize>,
        settings: &Settings,
    ) -> AnalyticsKind {
        match self {
            Self::Full => AnalyticsKind::Full {
                start: from,
                end: to,
            },
            Self::Top => AnalyticsKind::TopExpenses {
                count: top.unwrap_or(settings.top_expense_count),
                start: from,
                end: to,
            },
            Self::Monthly => AnalyticsKind::Monthly,
            Self::Distribution => AnalyticsKind::Distribution,
        }
    }
}

/// Print accounts, the income/expense summary and the total balance
pub fn handle_summary(file: &Path, settings: &Settings) -> LedgerResult<()> {
    let loaded = load_ledger(file)?;
    let ledger = &loaded.ledger;
    let symbol = settings.currency_symbol.as_str();

    println!("{}", format_account_list(&ledger.all_accounts(), symbol));
    println!();

    let (income, expense) = ledger.financial_summary();
    println!("{}", format_summary_line(income, expense, symbol));
    println!(
        "Total balance: {}",
        ledger.total_balance().format_with_symbol(symbol)
    );
    println!(
        "Categories: {}  Operations: {}",
        ledger.all_categories().len(),
        ledger.all_operations().len()
    );

    Ok(())
}

/// Print one analytics report, as a table or as JSON
pub fn handle_analytics(
    file: &Path,
    settings: &Settings,
    kind: AnalyticsKind,
    json: bool,
) -> LedgerResult<()> {
    if let AnalyticsKind::Full {
        start: Some(start),
        end: Some(end),
    }
    | AnalyticsKind::TopExpenses {
        start: Some(start),
        end: Some(end),
        ..
    } = kind
    {
        if start > end {
            return Err(LedgerError::Validation(format!(
                "--from {} is after --to {}",
                start, end
            )));
        }
    }

    let mut loaded = load_ledger(file)?;
    let outcome = loaded
        .session
        .run(&mut loaded.ledger, Box::new(ShowAnalytics::new(kind)))?;

    let Outcome::Analytics(report) = outcome else {
        return Err(LedgerError::Validation(format!(
            "{} analytics produced no report",
            kind
        )));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_report(&report, &settings.currency_symbol));
    }

    Ok(())
}
