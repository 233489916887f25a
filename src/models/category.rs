//! Category model
//!
//! Categories classify operations. Each category is either an income or an
//! expense category, and only operations of the same kind may use it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::operation::OperationKind;

/// An income or expense category (e.g., "Salary", "Groceries")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Which kind of operation this category accepts
    #[serde(rename = "type")]
    pub kind: OperationKind,

    /// Category name
    pub name: String,
}

impl Category {
    /// Create a new category
    pub fn new(kind: OperationKind, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            kind,
            name: name.into(),
        }
    }

    /// Check whether an operation of `kind` may be booked under this category
    pub fn accepts(&self, kind: OperationKind) -> bool {
        self.kind == kind
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.kind)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new(OperationKind::Expense, "Groceries");
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.kind, OperationKind::Expense);
        assert!(category.accepts(OperationKind::Expense));
        assert!(!category.accepts(OperationKind::Income));
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new(OperationKind::Income, "Salary");
        assert!(category.validate().is_ok());

        category.name = String::new();
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::EmptyName)
        );

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(_))
        ));
    }

    #[test]
    fn test_serialization_uses_type_field() {
        let category = Category::new(OperationKind::Income, "Salary");
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["type"], "Income");

        let deserialized: Category = serde_json::from_value(json).unwrap();
        assert_eq!(category, deserialized);
    }

    #[test]
    fn test_display() {
        let category = Category::new(OperationKind::Expense, "Food");
        assert_eq!(category.to_string(), "Food [Expense]");
    }
}
