//! Reports
//!
//! Aggregations over the expense store.

pub mod monthly;

pub use monthly::{
    days_in_month, CategoryMode, CategoryTotal, DailyAllowance, MonthlySummary, SkippedRow,
    SummaryOutcome,
};
