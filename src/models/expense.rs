//! The expense record
//!
//! An expense is created once from the entry form, appended to the store and
//! never edited afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::money::Money;

/// Date format used for storage and display
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Free-text label ("Coffee", "Rent")
    pub name: String,

    /// Category label. One of [`ExpenseCategory`] for new entries; rows read
    /// from the store keep whatever label was persisted.
    pub category: String,

    /// Amount spent
    pub amount: Money,

    /// Day the expense was made
    pub date: NaiveDate,
}

impl Expense {
    /// Create a new expense in one of the fixed categories
    pub fn new(
        name: impl Into<String>,
        category: ExpenseCategory,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.name().to_string(),
            amount,
            date,
        }
    }

    /// Rebuild an expense from a stored row without checking the category
    pub fn from_stored(
        name: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            amount,
            date,
        }
    }

    /// The category, if the label is one of the fixed set
    pub fn known_category(&self) -> Option<ExpenseCategory> {
        self.category.parse().ok()
    }

    /// Check the rules the entry form enforces
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.known_category().is_none() {
            return Err(ExpenseValidationError::UnknownCategory(self.category.clone()));
        }

        Ok(())
    }

    /// Date rendered as YYYY-MM-DD
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Expense: {}, {}, {}, {} >",
            self.name,
            self.category,
            self.amount,
            self.date_string()
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NonPositiveAmount(Money),
    UnknownCategory(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0, got {}", amount)
            }
            Self::UnknownCategory(label) => write!(f, "Unknown category: {}", label),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new(
            "Coffee",
            ExpenseCategory::Food,
            Money::from_cents(450),
            date(2024, 3, 5),
        );

        assert_eq!(expense.category, "Food");
        assert_eq!(expense.known_category(), Some(ExpenseCategory::Food));
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_display() {
        let expense = Expense::new(
            "Coffee",
            ExpenseCategory::Food,
            Money::from_cents(450),
            date(2024, 3, 5),
        );

        assert_eq!(expense.to_string(), "<Expense: Coffee, Food, $4.50, 2024-03-05 >");
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new(
            "  ",
            ExpenseCategory::Fun,
            Money::from_cents(100),
            date(2024, 1, 1),
        );
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyName));

        expense.name = "Movie".into();
        expense.amount = Money::zero();
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(Money::zero()))
        );
    }

    #[test]
    fn test_stored_category_is_unchecked() {
        let expense =
            Expense::from_stored("Gift", "Presents", Money::from_cents(2500), date(2024, 1, 1));

        assert_eq!(expense.category, "Presents");
        assert_eq!(expense.known_category(), None);
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::UnknownCategory("Presents".into()))
        );
    }
}
