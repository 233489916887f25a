//! Cross-module properties of the ledger, its cache, commands and file formats

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use tempfile::TempDir;

use finledger::commands::{
    CreateAccount, CreateCategory, CreateOperation, DeleteAccount, DeleteOperation, ExportData,
    ImportData, RecalculateBalances, Session, UndoOutcome,
};
use finledger::export::DataFormat;
use finledger::models::{Account, AccountId, CategoryId, Money, OperationKind};
use finledger::services::{CachedLedger, Ledger, LedgerService};

struct Books {
    ledger: CachedLedger<Ledger>,
    session: Session,
    checking: AccountId,
    savings: AccountId,
    salary: CategoryId,
    food: CategoryId,
}

fn books() -> Books {
    let mut ledger = CachedLedger::new(Ledger::new());
    let checking = ledger.create_account("Checking", Money::from_units(1000)).unwrap().id;
    let savings = ledger.create_account("Savings", Money::from_cents(25050)).unwrap().id;
    let salary = ledger.create_category(OperationKind::Income, "Salary").unwrap().id;
    let food = ledger.create_category(OperationKind::Expense, "Food").unwrap().id;

    Books {
        ledger,
        session: Session::new(),
        checking,
        savings,
        salary,
        food,
    }
}

fn book(books: &mut Books, kind: OperationKind, account: AccountId, cents: i64) {
    let category = match kind {
        OperationKind::Income => books.salary,
        OperationKind::Expense => books.food,
    };
    books
        .session
        .run(
            &mut books.ledger,
            Box::new(CreateOperation::new(kind, account, Money::from_cents(cents), category, "")),
        )
        .unwrap();
}

fn names(accounts: &[Account]) -> Vec<String> {
    accounts.iter().map(|a| a.name.clone()).collect()
}

#[test]
fn integrity_holds_through_a_command_sequence() {
    let mut b = books();
    let (checking, savings) = (b.checking, b.savings);

    book(&mut b, OperationKind::Income, checking, 150_000);
    book(&mut b, OperationKind::Expense, checking, 4_999);
    book(&mut b, OperationKind::Expense, savings, 25_050);
    book(&mut b, OperationKind::Income, savings, 1);
    assert!(b.ledger.check_integrity());

    b.session.undo_last(&mut b.ledger).unwrap();
    b.session.undo_last(&mut b.ledger).unwrap();
    assert!(b.ledger.check_integrity());

    let op = b.ledger.all_operations()[0].id;
    b.session
        .run(&mut b.ledger, Box::new(DeleteOperation::new(op)))
        .unwrap();
    assert!(b.ledger.check_integrity());

    b.session
        .run(&mut b.ledger, Box::new(DeleteAccount::new(savings)))
        .unwrap();
    assert!(b.ledger.check_integrity());
    assert_eq!(
        b.ledger.get_account(checking).unwrap().balance,
        Money::from_cents(95_001)
    );
}

#[test]
fn recalculate_repairs_any_drift() {
    let mut b = books();
    let checking = b.checking;
    book(&mut b, OperationKind::Income, checking, 10_000);

    b.ledger.adjust_balance(checking, Money::from_units(-7)).unwrap();
    assert!(!b.ledger.check_integrity());

    b.session
        .run(&mut b.ledger, Box::new(RecalculateBalances::new()))
        .unwrap();
    assert!(b.ledger.check_integrity());
    assert_eq!(
        b.ledger.get_account(checking).unwrap().balance,
        Money::from_units(1100)
    );

    // Undo brings the drift back
    assert_eq!(
        b.session.undo_last(&mut b.ledger).unwrap(),
        Some(UndoOutcome::Reverted)
    );
    assert!(!b.ledger.check_integrity());
}

#[test]
fn create_account_undo_restores_account_list() {
    let mut b = books();
    let before = names(&b.ledger.all_accounts());

    b.session
        .run(&mut b.ledger, Box::new(CreateAccount::new("Cash", Money::zero())))
        .unwrap();
    assert_eq!(b.ledger.all_accounts().len(), before.len() + 1);

    b.session.undo_last(&mut b.ledger).unwrap();
    assert_eq!(names(&b.ledger.all_accounts()), before);
}

#[test]
fn overdrawing_expense_changes_nothing() {
    let mut b = books();
    let checking = b.checking;
    book(&mut b, OperationKind::Income, checking, 50_000);
    assert_eq!(
        b.ledger.get_account(checking).unwrap().balance,
        Money::from_units(1500)
    );

    let history = b.session.len();
    let err = b
        .session
        .run(
            &mut b.ledger,
            Box::new(CreateOperation::new(
                OperationKind::Expense,
                checking,
                Money::from_units(2000),
                b.food,
                "TV",
            )),
        )
        .unwrap_err();

    assert!(err.is_insufficient_funds());
    assert_eq!(
        b.ledger.get_account(checking).unwrap().balance,
        Money::from_units(1500)
    );
    assert_eq!(b.ledger.all_operations().len(), 1);
    assert_eq!(b.session.len(), history);
}

#[test]
fn every_format_round_trips_values_and_total() {
    let temp_dir = TempDir::new().unwrap();
    let mut b = books();
    let (checking, savings) = (b.checking, b.savings);
    book(&mut b, OperationKind::Income, checking, 123_456);
    book(&mut b, OperationKind::Expense, savings, 5_050);
    b.session
        .run(
            &mut b.ledger,
            Box::new(CreateCategory::new(OperationKind::Expense, "Rent, \"flat\"")),
        )
        .unwrap();

    let source_total = b.ledger.total_balance();
    let source_accounts: Vec<(String, Money, Money)> = b
        .ledger
        .all_accounts()
        .iter()
        .map(|a| (a.name.clone(), a.opening_balance, a.balance))
        .collect();
    let source_categories: Vec<(OperationKind, String)> = b
        .ledger
        .all_categories()
        .iter()
        .map(|c| (c.kind, c.name.clone()))
        .collect();

    for format in [DataFormat::Json, DataFormat::Csv, DataFormat::Yaml] {
        let path = temp_dir.path().join(format!("ledger.{}", format.extension()));
        b.session
            .run(&mut b.ledger, Box::new(ExportData::new(&path, format)))
            .unwrap();

        let mut target = CachedLedger::new(Ledger::new());
        let mut session = Session::new();
        session
            .run(&mut target, Box::new(ImportData::new(&path, format)))
            .unwrap();

        let accounts: Vec<(String, Money, Money)> = target
            .all_accounts()
            .iter()
            .map(|a| (a.name.clone(), a.opening_balance, a.balance))
            .collect();
        let categories: Vec<(OperationKind, String)> = target
            .all_categories()
            .iter()
            .map(|c| (c.kind, c.name.clone()))
            .collect();

        assert_eq!(accounts, source_accounts, "{} accounts", format);
        assert_eq!(categories, source_categories, "{} categories", format);
        assert_eq!(target.all_operations().len(), 2, "{} operations", format);
        assert_eq!(target.total_balance(), source_total, "{} total", format);
        assert!(target.check_integrity(), "{} integrity", format);
    }
}

#[test]
fn empty_ledger_analytics_are_zero() {
    let b = books();
    let analytics = b.ledger.full_analytics(None, None);

    assert!(analytics.total_income.is_zero());
    assert!(analytics.total_expense.is_zero());
    assert!(analytics.net_income.is_zero());
    assert_eq!(analytics.savings_rate, Decimal::ZERO);
    assert!(analytics.income_by_category.is_empty());
    assert!(analytics.expense_by_category.is_empty());

    assert!(b.ledger.top_expense_categories(5, None, None).is_empty());
    assert!(b.ledger.monthly_analytics().is_empty());
    assert!(b.ledger.operation_type_distribution().is_empty());
    assert_eq!(b.ledger.financial_summary(), (Money::zero(), Money::zero()));
}

#[test]
fn operations_in_two_months_give_two_buckets() {
    let mut b = books();
    let march = Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap();
    let april = Utc.with_ymd_and_hms(2025, 4, 2, 18, 30, 0).unwrap();

    b.ledger
        .create_operation_at(OperationKind::Income, b.checking, Money::from_units(300), b.salary, "", march)
        .unwrap();
    b.ledger
        .create_operation_at(OperationKind::Expense, b.checking, Money::from_units(40), b.food, "", april)
        .unwrap();
    b.ledger
        .create_operation_at(OperationKind::Expense, b.checking, Money::from_units(60), b.food, "", april)
        .unwrap();

    let monthly = b.ledger.monthly_analytics();
    let keys: Vec<NaiveDate> = monthly.keys().copied().collect();
    assert_eq!(
        keys,
        vec![
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        ]
    );

    assert_eq!(monthly[&keys[0]].total_income, Money::from_units(300));
    assert!(monthly[&keys[0]].total_expense.is_zero());
    assert_eq!(monthly[&keys[1]].total_expense, Money::from_units(100));
    assert_eq!(monthly[&keys[1]].expense_by_category[0].operations_count, 2);

    let march_only = b.ledger.full_analytics(
        NaiveDate::from_ymd_opt(2025, 3, 1),
        NaiveDate::from_ymd_opt(2025, 3, 31),
    );
    assert_eq!(march_only.total_income, Money::from_units(300));
    assert!(march_only.total_expense.is_zero());
}

#[test]
fn cached_reads_match_the_direct_ledger() {
    let mut b = books();
    let (checking, savings) = (b.checking, b.savings);

    // Populate every cache slot, then mutate through commands
    let _ = (b.ledger.all_accounts(), b.ledger.all_categories(), b.ledger.all_operations());
    book(&mut b, OperationKind::Income, checking, 20_000);
    book(&mut b, OperationKind::Expense, savings, 1_000);
    b.session
        .run(&mut b.ledger, Box::new(CreateAccount::new("Cash", Money::from_units(5))))
        .unwrap();
    b.session.undo_last(&mut b.ledger).unwrap();
    b.ledger.adjust_balance(savings, Money::from_units(1)).unwrap();

    let direct = b.ledger.inner();
    assert_eq!(b.ledger.all_accounts(), direct.all_accounts());
    assert_eq!(b.ledger.all_categories(), direct.all_categories());
    assert_eq!(b.ledger.all_operations(), direct.all_operations());
    assert_eq!(b.ledger.total_balance(), direct.total_balance());
    assert_eq!(
        b.ledger.full_analytics(None, None),
        direct.full_analytics(None, None)
    );

    let stats = b.ledger.stats();
    assert!(stats.hits > 0);
    assert!(stats.misses > 0);
}
