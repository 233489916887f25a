//! Operation model
//!
//! An operation is a single dated movement of money into (income) or out of
//! (expense) an account, classified by a category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, OperationId};
use super::money::Money;

/// Direction of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Money flowing into the account
    Income,
    /// Money flowing out of the account
    Expense,
}

impl OperationKind {
    /// Parse an operation kind from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Signed balance effect of an amount of this kind
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }

    /// Both kinds, income first
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A single income or expense booked against an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier
    pub id: OperationId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: OperationKind,

    /// The account this operation moves money in or out of
    pub account_id: AccountId,

    /// Always strictly positive; the direction comes from `kind`
    pub amount: Money,

    /// When the operation happened
    pub date: DateTime<Utc>,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// The category classifying this operation
    pub category_id: CategoryId,
}

impl Operation {
    /// Create a new operation dated now
    pub fn new(
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        category_id: CategoryId,
        description: impl Into<String>,
    ) -> Result<Self, OperationValidationError> {
        Self::new_at(kind, account_id, amount, category_id, description, Utc::now())
    }

    /// Create a new operation with an explicit timestamp
    pub fn new_at(
        kind: OperationKind,
        account_id: AccountId,
        amount: Money,
        category_id: CategoryId,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Result<Self, OperationValidationError> {
        if !amount.is_positive() {
            return Err(OperationValidationError::NonPositiveAmount(amount));
        }

        Ok(Self {
            id: OperationId::new(),
            kind,
            account_id,
            amount,
            date,
            description: description.into(),
            category_id,
        })
    }

    /// Balance effect on the owning account (+amount for income, -amount for expense)
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }

    /// Calendar day of the operation
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Check whether the operation falls in the inclusive day range
    pub fn is_within(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        let day = self.day();
        start.map_or(true, |s| day >= s) && end.map_or(true, |e| day <= e)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day(), self.kind, self.amount)?;
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        Ok(())
    }
}

/// Validation errors for operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for OperationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Operation amount must be positive (got {})", amount)
            }
        }
    }
}

impl std::error::Error for OperationValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ids() -> (AccountId, CategoryId) {
        (AccountId::new(), CategoryId::new())
    }

    #[test]
    fn test_new_operation() {
        let (account_id, category_id) = ids();
        let op = Operation::new(
            OperationKind::Income,
            account_id,
            Money::from_units(500),
            category_id,
            "Salary",
        )
        .unwrap();

        assert_eq!(op.kind, OperationKind::Income);
        assert_eq!(op.account_id, account_id);
        assert_eq!(op.category_id, category_id);
        assert_eq!(op.signed_amount(), Money::from_units(500));
    }

    #[test]
    fn test_expense_is_negative_delta() {
        let (account_id, category_id) = ids();
        let op = Operation::new(
            OperationKind::Expense,
            account_id,
            Money::from_cents(1999),
            category_id,
            "",
        )
        .unwrap();
        assert_eq!(op.signed_amount(), Money::from_cents(-1999));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let (account_id, category_id) = ids();
        for amount in [Money::zero(), Money::from_units(-5)] {
            let result = Operation::new(OperationKind::Expense, account_id, amount, category_id, "");
            assert_eq!(
                result,
                Err(OperationValidationError::NonPositiveAmount(amount))
            );
        }
    }

    #[test]
    fn test_is_within_inclusive() {
        let (account_id, category_id) = ids();
        let date = Utc.with_ymd_and_hms(2025, 3, 31, 18, 30, 0).unwrap();
        let op = Operation::new_at(
            OperationKind::Income,
            account_id,
            Money::from_units(1),
            category_id,
            "",
            date,
        )
        .unwrap();

        let first = NaiveDate::from_ymd_opt(2025, 3, 1);
        let last = NaiveDate::from_ymd_opt(2025, 3, 31);
        let april = NaiveDate::from_ymd_opt(2025, 4, 1);

        assert!(op.is_within(first, last));
        assert!(op.is_within(None, None));
        assert!(op.is_within(last, None));
        assert!(!op.is_within(april, None));
        assert!(!op.is_within(None, first));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(OperationKind::parse("Income"), Some(OperationKind::Income));
        assert_eq!(OperationKind::parse("EXPENSE"), Some(OperationKind::Expense));
        assert_eq!(OperationKind::parse("transfer"), None);
    }

    #[test]
    fn test_serialization_field_names() {
        let (account_id, category_id) = ids();
        let op = Operation::new(
            OperationKind::Expense,
            account_id,
            Money::from_cents(250),
            category_id,
            "Coffee",
        )
        .unwrap();

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["type"], "Expense");
        assert_eq!(json["amount"], "2.50");
        assert!(json.get("account_id").is_some());
        assert!(json.get("category_id").is_some());

        let deserialized: Operation = serde_json::from_value(json).unwrap();
        assert_eq!(op, deserialized);
    }
}
