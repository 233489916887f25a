//! CSV encoding
//!
//! A single sectioned file: a title row, an export-date row, then the
//! `ACCOUNTS`, `CATEGORIES` and `OPERATIONS` sections, each introduced by a
//! marker row and a header row. Amounts use `.` as decimal separator and
//! timestamps are RFC 3339.

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, Money, Operation, OperationId, OperationKind,
};

use super::json::LedgerSnapshot;

const TITLE: &str = "Finledger Export";
const EXPORT_DATE: &str = "Export Date";
const VERSION: &str = "Version";

const ACCOUNTS: &str = "ACCOUNTS";
const CATEGORIES: &str = "CATEGORIES";
const OPERATIONS: &str = "OPERATIONS";

const ACCOUNT_HEADER: [&str; 4] = ["Id", "Name", "Balance", "OpeningBalance"];
const CATEGORY_HEADER: [&str; 3] = ["Id", "Type", "Name"];
const OPERATION_HEADER: [&str; 7] = [
    "Id",
    "Type",
    "AccountId",
    "Amount",
    "Date",
    "Description",
    "CategoryId",
];

/// Encode a snapshot as sectioned CSV
pub fn export_csv(snapshot: &LedgerSnapshot) -> LedgerResult<String> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record([TITLE])?;
    writer.write_record([
        EXPORT_DATE,
        snapshot.export_date.to_rfc3339().as_str(),
        VERSION,
        snapshot.version.as_str(),
    ])?;

    writer.write_record([ACCOUNTS])?;
    writer.write_record(ACCOUNT_HEADER)?;
    for account in &snapshot.accounts {
        writer.write_record([
            account.id.as_uuid().to_string(),
            account.name.clone(),
            account.balance.amount().to_string(),
            account.opening_balance.amount().to_string(),
        ])?;
    }

    writer.write_record([CATEGORIES])?;
    writer.write_record(CATEGORY_HEADER)?;
    for category in &snapshot.categories {
        writer.write_record([
            category.id.as_uuid().to_string(),
            category.kind.to_string(),
            category.name.clone(),
        ])?;
    }

    writer.write_record([OPERATIONS])?;
    writer.write_record(OPERATION_HEADER)?;
    for op in &snapshot.operations {
        writer.write_record([
            op.id.as_uuid().to_string(),
            op.kind.to_string(),
            op.account_id.as_uuid().to_string(),
            op.amount.amount().to_string(),
            op.date.to_rfc3339(),
            op.description.clone(),
            op.category_id.as_uuid().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LedgerError::Export(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Accounts,
    Categories,
    Operations,
}

/// Decode a snapshot from sectioned CSV
pub fn import_from_csv(content: &str) -> LedgerResult<LedgerSnapshot> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(content.as_bytes());

    let mut snapshot = LedgerSnapshot {
        accounts: Vec::new(),
        categories: Vec::new(),
        operations: Vec::new(),
        export_date: Utc::now(),
        version: String::new(),
    };
    let mut section = Section::Preamble;
    let mut expect_header = false;
    let mut saw_title = false;

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 1;

        if record.len() == 1 {
            let marker = match &record[0] {
                ACCOUNTS => Some(Section::Accounts),
                CATEGORIES => Some(Section::Categories),
                OPERATIONS => Some(Section::Operations),
                _ => None,
            };
            if let Some(next) = marker {
                section = next;
                expect_header = true;
                continue;
            }
        }

        if expect_header {
            expect_header = false;
            continue;
        }

        match section {
            Section::Preamble => {
                if !saw_title {
                    if record.get(0) != Some(TITLE) {
                        return Err(import_error(line, "missing export title"));
                    }
                    saw_title = true;
                } else if record.get(0) == Some(EXPORT_DATE) {
                    snapshot.export_date = parse_date(field(&record, 1, line)?, line)?;
                    if record.get(2) == Some(VERSION) {
                        snapshot.version = field(&record, 3, line)?.to_string();
                    }
                }
            }
            Section::Accounts => snapshot.accounts.push(parse_account(&record, line)?),
            Section::Categories => snapshot.categories.push(parse_category(&record, line)?),
            Section::Operations => snapshot.operations.push(parse_operation(&record, line)?),
        }
    }

    if !saw_title {
        return Err(LedgerError::Import("Empty CSV export".to_string()));
    }

    Ok(snapshot)
}

fn import_error(line: usize, message: impl std::fmt::Display) -> LedgerError {
    LedgerError::Import(format!("CSV record {}: {}", line, message))
}

fn field<'r>(record: &'r StringRecord, index: usize, line: usize) -> LedgerResult<&'r str> {
    record
        .get(index)
        .ok_or_else(|| import_error(line, format!("missing field {}", index + 1)))
}

fn parse_id<T: std::str::FromStr>(value: &str, line: usize) -> LedgerResult<T> {
    value
        .parse()
        .map_err(|_| import_error(line, format!("invalid id '{}'", value)))
}

fn parse_money(value: &str, line: usize) -> LedgerResult<Money> {
    Money::parse(value).map_err(|e| import_error(line, e))
}

fn parse_kind(value: &str, line: usize) -> LedgerResult<OperationKind> {
    OperationKind::parse(value)
        .ok_or_else(|| import_error(line, format!("invalid type '{}'", value)))
}

fn parse_date(value: &str, line: usize) -> LedgerResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| import_error(line, format!("invalid date '{}': {}", value, e)))
}

fn parse_account(record: &StringRecord, line: usize) -> LedgerResult<Account> {
    let id: AccountId = parse_id(field(record, 0, line)?, line)?;
    let balance = parse_money(field(record, 2, line)?, line)?;

    // Files written without the opening column open at zero
    let opening_balance = match record.get(3) {
        Some(value) if !value.trim().is_empty() => parse_money(value, line)?,
        _ => Money::zero(),
    };

    let mut account = Account::with_opening_balance(field(record, 1, line)?, opening_balance);
    account.id = id;
    account.balance = balance;
    Ok(account)
}

fn parse_category(record: &StringRecord, line: usize) -> LedgerResult<Category> {
    let id: CategoryId = parse_id(field(record, 0, line)?, line)?;
    let kind = parse_kind(field(record, 1, line)?, line)?;

    let mut category = Category::new(kind, field(record, 2, line)?);
    category.id = id;
    Ok(category)
}

fn parse_operation(record: &StringRecord, line: usize) -> LedgerResult<Operation> {
    let id: OperationId = parse_id(field(record, 0, line)?, line)?;
    let kind = parse_kind(field(record, 1, line)?, line)?;
    let account_id: AccountId = parse_id(field(record, 2, line)?, line)?;
    let amount = parse_money(field(record, 3, line)?, line)?;
    let date = parse_date(field(record, 4, line)?, line)?;
    let description = field(record, 5, line)?;
    let category_id: CategoryId = parse_id(field(record, 6, line)?, line)?;

    let mut operation = Operation::new_at(kind, account_id, amount, category_id, description, date)
        .map_err(|e| import_error(line, e))?;
    operation.id = id;
    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Ledger, LedgerService};

    fn sample_snapshot() -> LedgerSnapshot {
        let mut ledger = Ledger::new();
        let account = ledger
            .create_account("Main, \"joint\"", Money::from_cents(100050))
            .unwrap();
        let food = ledger
            .create_category(OperationKind::Expense, "Food")
            .unwrap();
        ledger
            .create_operation(
                OperationKind::Expense,
                account.id,
                Money::from_cents(1999),
                food.id,
                "Dinner, drinks\nand \"tips\"",
            )
            .unwrap();
        LedgerSnapshot::from_service(&ledger)
    }

    #[test]
    fn test_csv_layout() {
        let csv = export_csv(&sample_snapshot()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], TITLE);
        assert!(lines[1].starts_with("Export Date,"));
        assert_eq!(lines[2], ACCOUNTS);
        assert_eq!(lines[3], "Id,Name,Balance,OpeningBalance");
        assert!(csv.contains("\"Main, \"\"joint\"\"\""));
        assert!(csv.contains(",980.51,1000.50\n"));
        assert!(csv.contains("\nCATEGORIES\nId,Type,Name\n"));
        assert!(csv.contains("\nOPERATIONS\nId,Type,AccountId,Amount,Date,Description,CategoryId\n"));
    }

    #[test]
    fn test_csv_decode_preserves_values() {
        let snapshot = sample_snapshot();
        let decoded = import_from_csv(&export_csv(&snapshot).unwrap()).unwrap();

        assert_eq!(decoded.version, snapshot.version);
        assert_eq!(decoded.export_date, snapshot.export_date);
        assert_eq!(decoded.accounts, snapshot.accounts);
        assert_eq!(decoded.categories, snapshot.categories);
        assert_eq!(decoded.operations, snapshot.operations);
        assert!(decoded.validate().is_ok());
    }

    #[test]
    fn test_csv_without_opening_column() {
        let id = AccountId::new();
        let content = format!(
            "{}\n{}\nId,Name,Balance\n{},Cash,12.5\n",
            TITLE,
            ACCOUNTS,
            id.as_uuid()
        );
        let decoded = import_from_csv(&content).unwrap();

        assert_eq!(decoded.accounts[0].id, id);
        assert_eq!(decoded.accounts[0].balance, Money::from_cents(1250));
        assert!(decoded.accounts[0].opening_balance.is_zero());
    }

    #[test]
    fn test_csv_rejects_garbage() {
        assert!(import_from_csv("").is_err());
        assert!(import_from_csv("hello,world\n").is_err());

        let bad_amount = format!(
            "{}\n{}\nId,Name,Balance\n{},Cash,ten\n",
            TITLE,
            ACCOUNTS,
            AccountId::new().as_uuid()
        );
        let err = import_from_csv(&bad_amount).unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }
}
