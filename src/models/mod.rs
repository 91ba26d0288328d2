//! Core data models for the expense tracker

pub mod category;
pub mod expense;
pub mod money;

pub use category::{ExpenseCategory, UnknownCategory};
pub use expense::{Expense, ExpenseValidationError, DATE_FORMAT};
pub use money::{Money, MoneyParseError};
