//! Analytics engine
//!
//! Pure read-side computations over an operation/category snapshot: period
//! totals, per-category breakdowns, monthly buckets and the income/expense
//! distribution. Nothing here mutates or caches.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::models::{Category, CategoryId, Money, Operation, OperationKind};

use super::snapshot::{CategoryAnalytics, FinancialAnalytics, UNKNOWN_CATEGORY};

/// Computes analytics over borrowed operations and categories
pub struct AnalyticsEngine<'a> {
    operations: &'a [Operation],
    categories: HashMap<CategoryId, &'a Category>,
}

impl<'a> AnalyticsEngine<'a> {
    /// Create an engine over a snapshot of the ledger
    pub fn new(operations: &'a [Operation], categories: &'a [Category]) -> Self {
        Self {
            operations,
            categories: categories.iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Full income/expense analytics for the inclusive `[start, end]` day range
    ///
    /// An absent bound leaves that side unbounded.
    pub fn full_analytics(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> FinancialAnalytics {
        let operations = self.filter(start, end);

        if operations.is_empty() {
            let today = Utc::now().date_naive();
            return FinancialAnalytics::empty(start.unwrap_or(today), end.unwrap_or(today));
        }

        let total_income = total_of(&operations, OperationKind::Income);
        let total_expense = total_of(&operations, OperationKind::Expense);
        let net_income = total_income - total_expense;
        let savings_rate = net_income.percent_of(total_income);

        let income_by_category =
            self.by_category(&operations, OperationKind::Income, total_income);
        let expense_by_category =
            self.by_category(&operations, OperationKind::Expense, total_expense);

        // Non-empty, so min/max exist
        let first_day = operations.iter().map(|o| o.day()).min();
        let last_day = operations.iter().map(|o| o.day()).max();

        let today = Utc::now().date_naive();
        FinancialAnalytics {
            total_income,
            total_expense,
            net_income,
            savings_rate,
            income_by_category,
            expense_by_category,
            period_start: start.or(first_day).unwrap_or(today),
            period_end: end.or(last_day).unwrap_or(today),
        }
    }

    /// The `count` expense categories with the largest totals in the range
    pub fn top_expense_categories(
        &self,
        count: usize,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<CategoryAnalytics> {
        let operations = self.filter(start, end);
        let total_expense = total_of(&operations, OperationKind::Expense);

        let mut categories = self.by_category(&operations, OperationKind::Expense, total_expense);
        categories.truncate(count);
        categories
    }

    /// Full analytics per calendar month, keyed by the month's first day
    pub fn monthly_analytics(&self) -> BTreeMap<NaiveDate, FinancialAnalytics> {
        let mut months = BTreeMap::new();

        for operation in self.operations {
            let Some((first, last)) = month_bounds(operation.day()) else {
                continue;
            };
            if months.contains_key(&first) {
                continue;
            }
            months.insert(first, self.full_analytics(Some(first), Some(last)));
        }

        months
    }

    /// Share of total operation volume (by amount) per operation kind
    ///
    /// Only kinds that occur are present; an empty ledger yields an empty map.
    pub fn operation_type_distribution(&self) -> BTreeMap<OperationKind, Decimal> {
        let total: Money = self.operations.iter().map(|o| o.amount).sum();

        let mut volume: BTreeMap<OperationKind, Money> = BTreeMap::new();
        for operation in self.operations {
            *volume.entry(operation.kind).or_default() += operation.amount;
        }

        volume
            .into_iter()
            .map(|(kind, amount)| (kind, amount.percent_of(total)))
            .collect()
    }

    fn filter(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<&'a Operation> {
        self.operations
            .iter()
            .filter(|o| o.is_within(start, end))
            .collect()
    }

    fn category_name(&self, id: CategoryId) -> String {
        self.categories
            .get(&id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
    }

    fn by_category(
        &self,
        operations: &[&Operation],
        kind: OperationKind,
        kind_total: Money,
    ) -> Vec<CategoryAnalytics> {
        let mut totals: HashMap<CategoryId, (Money, usize)> = HashMap::new();
        for operation in operations.iter().filter(|o| o.kind == kind) {
            let entry = totals
                .entry(operation.category_id)
                .or_insert((Money::zero(), 0));
            entry.0 += operation.amount;
            entry.1 += 1;
        }

        let mut result: Vec<CategoryAnalytics> = totals
            .into_iter()
            .map(|(category_id, (total_amount, operations_count))| CategoryAnalytics {
                category_id,
                category_name: self.category_name(category_id),
                category_type: kind,
                total_amount,
                operations_count,
                percentage: total_amount.percent_of(kind_total),
            })
            .collect();

        // Largest first; name and id keep equal totals in a stable order
        result.sort_by(|a, b| {
            b.total_amount
                .cmp(&a.total_amount)
                .then_with(|| a.category_name.cmp(&b.category_name))
                .then_with(|| a.category_id.as_uuid().cmp(b.category_id.as_uuid()))
        });
        result
    }
}

fn total_of(operations: &[&Operation], kind: OperationKind) -> Money {
    operations
        .iter()
        .filter(|o| o.kind == kind)
        .map(|o| o.amount)
        .sum()
}

/// First and last day of the month containing `day`
pub fn month_bounds(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = day.with_day(1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;
    use chrono::{DateTime, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        account: AccountId,
        salary: Category,
        bonus: Category,
        food: Category,
        rent: Category,
        operations: Vec<Operation>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                account: AccountId::new(),
                salary: Category::new(OperationKind::Income, "Salary"),
                bonus: Category::new(OperationKind::Income, "Bonus"),
                food: Category::new(OperationKind::Expense, "Food"),
                rent: Category::new(OperationKind::Expense, "Rent"),
                operations: Vec::new(),
            }
        }

        fn book(&mut self, category: &Category, units: i64, date: DateTime<Utc>) {
            let op = Operation::new_at(
                category.kind,
                self.account,
                Money::from_units(units),
                category.id,
                "",
                date,
            )
            .unwrap();
            self.operations.push(op);
        }

        fn categories(&self) -> Vec<Category> {
            vec![
                self.salary.clone(),
                self.bonus.clone(),
                self.food.clone(),
                self.rent.clone(),
            ]
        }
    }

    #[test]
    fn test_empty_full_analytics_is_zero() {
        let engine = AnalyticsEngine::new(&[], &[]);
        let analytics = engine.full_analytics(None, None);

        assert_eq!(analytics.total_income, Money::zero());
        assert_eq!(analytics.total_expense, Money::zero());
        assert_eq!(analytics.net_income, Money::zero());
        assert_eq!(analytics.savings_rate, Decimal::ZERO);
        assert!(analytics.is_empty());
        assert_eq!(analytics.period_start, analytics.period_end);
    }

    #[test]
    fn test_empty_range_keeps_requested_bounds() {
        let engine = AnalyticsEngine::new(&[], &[]);
        let analytics = engine.full_analytics(Some(day(2025, 1, 1)), Some(day(2025, 1, 31)));

        assert_eq!(analytics.period_start, day(2025, 1, 1));
        assert_eq!(analytics.period_end, day(2025, 1, 31));
    }

    #[test]
    fn test_full_analytics_totals_and_rates() {
        let mut fx = Fixture::new();
        let (salary, food, rent) = (fx.salary.clone(), fx.food.clone(), fx.rent.clone());
        fx.book(&salary, 1000, at(2025, 1, 5));
        fx.book(&food, 150, at(2025, 1, 10));
        fx.book(&rent, 600, at(2025, 1, 1));
        fx.book(&food, 50, at(2025, 1, 20));

        let categories = fx.categories();
        let engine = AnalyticsEngine::new(&fx.operations, &categories);
        let analytics = engine.full_analytics(None, None);

        assert_eq!(analytics.total_income, Money::from_units(1000));
        assert_eq!(analytics.total_expense, Money::from_units(800));
        assert_eq!(analytics.net_income, Money::from_units(200));
        assert_eq!(analytics.savings_rate, Decimal::from(20));
        assert_eq!(analytics.period_start, day(2025, 1, 1));
        assert_eq!(analytics.period_end, day(2025, 1, 20));

        let expenses = &analytics.expense_by_category;
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].category_name, "Rent");
        assert_eq!(expenses[0].percentage, Decimal::from(75));
        assert_eq!(expenses[1].category_name, "Food");
        assert_eq!(expenses[1].operations_count, 2);
        assert_eq!(expenses[1].total_amount, Money::from_units(200));
        assert_eq!(expenses[1].percentage, Decimal::from(25));

        assert_eq!(analytics.income_by_category.len(), 1);
        assert_eq!(analytics.income_by_category[0].percentage, Decimal::from(100));
    }

    #[test]
    fn test_expense_only_has_zero_savings_rate() {
        let mut fx = Fixture::new();
        let food = fx.food.clone();
        fx.book(&food, 40, at(2025, 2, 1));

        let categories = fx.categories();
        let engine = AnalyticsEngine::new(&fx.operations, &categories);
        let analytics = engine.full_analytics(None, None);

        assert_eq!(analytics.savings_rate, Decimal::ZERO);
        assert_eq!(analytics.net_income, Money::from_units(-40));
    }

    #[test]
    fn test_date_filter_is_inclusive() {
        let mut fx = Fixture::new();
        let salary = fx.salary.clone();
        fx.book(&salary, 100, at(2025, 1, 31));
        fx.book(&salary, 200, at(2025, 2, 1));
        fx.book(&salary, 400, at(2025, 2, 28));

        let categories = fx.categories();
        let engine = AnalyticsEngine::new(&fx.operations, &categories);

        let feb = engine.full_analytics(Some(day(2025, 2, 1)), Some(day(2025, 2, 28)));
        assert_eq!(feb.total_income, Money::from_units(600));

        let until_jan = engine.full_analytics(None, Some(day(2025, 1, 31)));
        assert_eq!(until_jan.total_income, Money::from_units(100));
        assert_eq!(until_jan.period_start, day(2025, 1, 31));
    }

    #[test]
    fn test_unknown_category_label() {
        let mut fx = Fixture::new();
        let orphan = Category::new(OperationKind::Expense, "Deleted");
        fx.book(&orphan, 10, at(2025, 1, 1));

        let categories = fx.categories();
        let engine = AnalyticsEngine::new(&fx.operations, &categories);
        let analytics = engine.full_analytics(None, None);

        assert_eq!(analytics.expense_by_category[0].category_name, UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_top_expense_categories() {
        let mut fx = Fixture::new();
        let (salary, food, rent) = (fx.salary.clone(), fx.food.clone(), fx.rent.clone());
        fx.book(&salary, 5000, at(2025, 1, 1));
        fx.book(&food, 30, at(2025, 1, 2));
        fx.book(&rent, 900, at(2025, 1, 3));

        let categories = fx.categories();
        let engine = AnalyticsEngine::new(&fx.operations, &categories);

        let top = engine.top_expense_categories(1, None, None);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].category_name, "Rent");
        assert_eq!(top[0].category_type, OperationKind::Expense);

        let all = engine.top_expense_categories(5, None, None);
        assert_eq!(all.len(), 2);

        let none = engine.top_expense_categories(5, Some(day(2026, 1, 1)), None);
        assert!(none.is_empty());
    }

    #[test]
    fn test_monthly_buckets_are_independent() {
        let mut fx = Fixture::new();
        let (salary, food) = (fx.salary.clone(), fx.food.clone());
        fx.book(&salary, 1000, at(2025, 1, 15));
        fx.book(&food, 300, at(2025, 1, 31));
        fx.book(&salary, 700, at(2025, 3, 2));

        let categories = fx.categories();
        let engine = AnalyticsEngine::new(&fx.operations, &categories);
        let monthly = engine.monthly_analytics();

        assert_eq!(monthly.len(), 2);
        let jan = &monthly[&day(2025, 1, 1)];
        assert_eq!(jan.total_income, Money::from_units(1000));
        assert_eq!(jan.total_expense, Money::from_units(300));
        assert_eq!(jan.period_end, day(2025, 1, 31));

        let mar = &monthly[&day(2025, 3, 1)];
        assert_eq!(mar.total_income, Money::from_units(700));
        assert_eq!(mar.total_expense, Money::zero());
    }

    #[test]
    fn test_operation_type_distribution() {
        let mut fx = Fixture::new();
        let (bonus, food) = (fx.bonus.clone(), fx.food.clone());
        fx.book(&bonus, 300, at(2025, 1, 1));
        fx.book(&food, 100, at(2025, 1, 2));

        let categories = fx.categories();
        let engine = AnalyticsEngine::new(&fx.operations, &categories);
        let distribution = engine.operation_type_distribution();

        assert_eq!(distribution[&OperationKind::Income], Decimal::from(75));
        assert_eq!(distribution[&OperationKind::Expense], Decimal::from(25));
    }

    #[test]
    fn test_distribution_empty_and_single_kind() {
        let engine = AnalyticsEngine::new(&[], &[]);
        assert!(engine.operation_type_distribution().is_empty());

        let mut fx = Fixture::new();
        let salary = fx.salary.clone();
        fx.book(&salary, 10, at(2025, 1, 1));
        let categories = fx.categories();
        let engine = AnalyticsEngine::new(&fx.operations, &categories);
        let distribution = engine.operation_type_distribution();
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution[&OperationKind::Income], Decimal::from(100));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(day(2024, 2, 17)),
            Some((day(2024, 2, 1), day(2024, 2, 29)))
        );
        assert_eq!(
            month_bounds(day(2025, 12, 31)),
            Some((day(2025, 12, 1), day(2025, 12, 31)))
        );
    }
}
