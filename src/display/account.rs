//! Account display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Account, Money};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Opening")]
    opening: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format accounts as a table with a total row
pub fn format_account_list(accounts: &[Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let mut rows: Vec<AccountRow> = accounts
        .iter()
        .map(|a| AccountRow {
            name: a.name.clone(),
            opening: a.opening_balance.format_with_symbol(symbol),
            balance: a.balance.format_with_symbol(symbol),
        })
        .collect();

    let total: Money = accounts.iter().map(|a| a.balance).sum();
    rows.push(AccountRow {
        name: "Total".to_string(),
        opening: String::new(),
        balance: total.format_with_symbol(symbol),
    });

    Table::new(rows)
        .with(Style::modern())
        .modify(Columns::new(1..), Alignment::right())
        .to_string()
}

/// One-line income/expense summary
pub fn format_summary_line(income: Money, expense: Money, symbol: &str) -> String {
    format!(
        "Income: {}  Expense: {}  Net: {}",
        income.format_with_symbol(symbol),
        expense.format_with_symbol(symbol),
        (income - expense).format_with_symbol(symbol)
    )
}
