//! Expense categories
//!
//! New expenses are filed under one of a fixed set of categories. Rows read
//! back from the store keep their category as a plain label, see
//! [`crate::models::Expense`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of categories offered when recording an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Home,
    Work,
    Fun,
    Transport,
    Other,
}

impl ExpenseCategory {
    /// Get all categories in menu order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Home,
            Self::Work,
            Self::Fun,
            Self::Transport,
            Self::Other,
        ]
    }

    /// Get the label for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Home => "Home",
            Self::Work => "Work",
            Self::Fun => "Fun",
            Self::Transport => "Transport",
            Self::Other => "Other",
        }
    }

    /// Look up a category by its 1-based menu number
    pub fn from_menu_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::all().get(index))
            .copied()
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a label does not name one of the fixed categories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match against the category labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
