//! Storage layer for the expense tracker
//!
//! Expenses live in a single append-only CSV file. The store is opened and
//! closed within each operation; no handle is kept between calls.

pub mod store;

pub use store::{ExpenseStore, SkipReason, StoredRow, FIELDS_PER_ROW};
