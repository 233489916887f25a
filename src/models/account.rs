//! Account model
//!
//! Represents a bank account whose balance moves with the income and expense
//! operations booked against it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// A bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Checking")
    pub name: String,

    /// Balance the account was opened with, before any operation
    #[serde(default)]
    pub opening_balance: Money,

    /// Current balance: opening balance plus income minus expenses
    pub balance: Money,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_opening_balance(name, Money::zero())
    }

    /// Create a new account with an opening balance
    pub fn with_opening_balance(name: impl Into<String>, opening_balance: Money) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            opening_balance,
            balance: opening_balance,
        }
    }

    /// Apply a signed balance change, returning the new balance
    ///
    /// The balance is left untouched if the result would overflow.
    pub fn apply_delta(&mut self, delta: Money) -> Result<Money, AccountValidationError> {
        self.balance = self
            .balance
            .checked_add(delta)
            .ok_or(AccountValidationError::BalanceOverflow {
                balance: self.balance,
                delta,
            })?;
        Ok(self.balance)
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        if self.opening_balance.is_negative() {
            return Err(AccountValidationError::NegativeOpeningBalance(
                self.opening_balance,
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeOpeningBalance(Money),
    BalanceOverflow { balance: Money, delta: Money },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::NegativeOpeningBalance(amount) => {
                write!(f, "Opening balance cannot be negative ({})", amount)
            }
            Self::BalanceOverflow { balance, delta } => {
                write!(f, "Balance {} cannot absorb a change of {}", balance, delta)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("Checking");
        assert_eq!(account.name, "Checking");
        assert_eq!(account.balance, Money::zero());
        assert_eq!(account.opening_balance, Money::zero());
    }

    #[test]
    fn test_with_opening_balance() {
        let account = Account::with_opening_balance("Savings", Money::from_units(1000));
        assert_eq!(account.opening_balance, Money::from_units(1000));
        assert_eq!(account.balance, Money::from_units(1000));
    }

    #[test]
    fn test_apply_delta() {
        let mut account = Account::with_opening_balance("Checking", Money::from_units(1000));
        account.apply_delta(Money::from_units(500)).unwrap();
        let balance = account.apply_delta(-Money::from_units(200)).unwrap();
        assert_eq!(balance, Money::from_units(1300));
        assert_eq!(account.balance, Money::from_units(1300));
        assert_eq!(account.opening_balance, Money::from_units(1000));
    }

    #[test]
    fn test_apply_delta_overflow_keeps_balance() {
        let huge = Money::new(rust_decimal::Decimal::MAX);
        let mut account = Account::with_opening_balance("Checking", huge);

        let err = account.apply_delta(Money::from_units(1)).unwrap_err();
        assert!(matches!(err, AccountValidationError::BalanceOverflow { .. }));
        assert_eq!(account.balance, huge);
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new("Valid Name");
        assert!(account.validate().is_ok());

        account.name = "   ".to_string();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));

        account.name = "a".repeat(101);
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::NameTooLong(_))
        ));

        let negative = Account::with_opening_balance("Debt", Money::from_units(-1));
        assert!(matches!(
            negative.validate(),
            Err(AccountValidationError::NegativeOpeningBalance(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let account = Account::with_opening_balance("Test", Money::from_cents(12345));
        let json = serde_json::to_string(&account).unwrap();
        let deserialized: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account, deserialized);
    }

    #[test]
    fn test_display() {
        let account = Account::with_opening_balance("My Checking", Money::from_units(10));
        assert_eq!(format!("{}", account), "My Checking (10.00)");
    }
}
