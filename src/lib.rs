//! Expense Tracker - terminal expense logger with a monthly budget summary
//!
//! Expenses are appended to a CSV file, one row per expense. The monthly
//! summary re-reads the file, keeps the current month's rows and reports
//! spending per category, the remaining budget and a per-day allowance for
//! the rest of the month.
//!
//! # Architecture
//!
//! - `config`: Base directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, categories and the expense record
//! - `storage`: The append-only CSV store
//! - `reports`: The monthly summary
//! - `display`: Terminal formatting helpers
//! - `cli`: The interactive menu
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use expense_tracker::models::Money;
//! use expense_tracker::reports::{CategoryMode, MonthlySummary};
//! use expense_tracker::storage::ExpenseStore;
//!
//! let store = ExpenseStore::new("expenses.csv");
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let outcome = MonthlySummary::generate(
//!     &store,
//!     Money::from_dollars_cents(2000, 0),
//!     today,
//!     CategoryMode::Lenient,
//! )?;
//! print!("{}", outcome.format_terminal("$", false));
//! # Ok::<(), expense_tracker::ExpenseError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

use std::sync::Once;

pub use error::{ExpenseError, ExpenseResult};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber
///
/// Logs go to stderr so they never mix with the interactive menu. The level
/// is taken from `RUST_LOG`, defaulting to warnings from this crate.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expense_tracker=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
