//! Monthly Summary Report
//!
//! Reads the whole expense store, keeps the rows that fall in the reference
//! month and totals them by category against the monthly budget.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use tracing::{debug, info};

use crate::display::highlight;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseCategory, Money};
use crate::storage::{ExpenseStore, SkipReason, StoredRow};

/// How categories read back from the store are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryMode {
    /// Accept any category label
    #[default]
    Lenient,
    /// Skip rows whose category is not one of the fixed set
    Strict,
}

/// A stored row left out of the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the store
    pub line: u64,
    /// Raw field values
    pub fields: Vec<String>,
    /// Why it was skipped
    pub reason: SkipReason,
}

impl SkippedRow {
    fn new(row: StoredRow, reason: SkipReason) -> Self {
        Self {
            line: row.line,
            fields: row.fields,
            reason,
        }
    }

    /// Warning line shown to the user
    pub fn warning(&self) -> String {
        let kind = match self.reason {
            SkipReason::FieldCount(_) => "malformed row",
            _ => "bad data in row",
        };
        format!(
            "Warning: Skipping {} {}: {:?} ({})",
            kind, self.line, self.fields, self.reason
        )
    }
}

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category label as stored
    pub category: String,
    /// Sum of amounts
    pub total: Money,
    /// Number of expenses
    pub count: usize,
}

/// What is left to spend per day for the rest of the month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyAllowance {
    /// Remaining budget spread over the days after the reference date
    PerDay { amount: Money, remaining_days: i64 },
    /// The reference date is the last day of its month
    LastDay { remaining: Money },
    /// The reference day lies past the end of the month
    MonthEnded,
}

impl DailyAllowance {
    /// Work out the allowance for `remaining` budget as of `reference_date`
    pub fn compute(remaining: Money, reference_date: NaiveDate) -> Self {
        let remaining_days = days_in_month(reference_date) - i64::from(reference_date.day());

        match remaining_days {
            days if days > 0 => match remaining.checked_div_rounded(days) {
                Some(amount) => Self::PerDay {
                    amount,
                    remaining_days: days,
                },
                None => Self::MonthEnded,
            },
            0 => Self::LastDay { remaining },
            _ => Self::MonthEnded,
        }
    }

    /// User-facing message
    pub fn message(&self, symbol: &str) -> String {
        match self {
            Self::PerDay { amount, .. } => format!(
                "Budget Per Day (for rest of month): {}",
                amount.format_with_symbol(symbol)
            ),
            Self::LastDay { remaining } => format!(
                "This is the last day of the month! Remaining budget: {}",
                remaining.format_with_symbol(symbol)
            ),
            Self::MonthEnded => {
                "The month is over. This summary is for the past month.".to_string()
            }
        }
    }
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> i64 {
    let first = date.with_day(1).unwrap_or(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days(),
        // Only December of the last representable year gets here
        None => 31,
    }
}

/// Spending summary for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    /// Date the month and remaining days are computed from
    pub reference_date: NaiveDate,
    /// Monthly budget ceiling
    pub budget: Money,
    /// Per-category totals, ordered by category label
    pub categories: Vec<CategoryTotal>,
    /// Sum of all expenses in the month
    pub total_spent: Money,
    /// `budget - total_spent`, may be negative
    pub remaining: Money,
    /// Spending allowance for the rest of the month
    pub allowance: DailyAllowance,
    /// Number of expenses included
    pub expense_count: usize,
    /// Rows that could not be read
    pub skipped: Vec<SkippedRow>,
}

/// Result of summarizing the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Nothing has ever been recorded
    NoData,
    /// The store has rows but none for the reference month
    NoExpensesThisMonth { skipped: Vec<SkippedRow> },
    /// At least one expense in the reference month
    Summary(MonthlySummary),
}

impl MonthlySummary {
    /// Summarize the store for the month containing `reference_date`
    pub fn generate(
        store: &ExpenseStore,
        budget: Money,
        reference_date: NaiveDate,
        mode: CategoryMode,
    ) -> ExpenseResult<SummaryOutcome> {
        let Some(rows) = store.read_rows()? else {
            info!(path = %store.path().display(), "no expense store yet");
            return Ok(SummaryOutcome::NoData);
        };

        let mut expenses = Vec::new();
        let mut skipped = Vec::new();

        for row in rows {
            match parse_row(&row, mode) {
                Ok(expense) => {
                    if same_month(expense.date, reference_date) {
                        expenses.push(expense);
                    }
                }
                Err(reason) => {
                    debug!(line = row.line, %reason, "skipping stored row");
                    skipped.push(SkippedRow::new(row, reason));
                }
            }
        }

        info!(
            included = expenses.len(),
            skipped = skipped.len(),
            month = %reference_date.format("%Y-%m"),
            "summarized expense store"
        );

        if expenses.is_empty() {
            return Ok(SummaryOutcome::NoExpensesThisMonth { skipped });
        }

        let summary = Self::from_expenses(&expenses, budget, reference_date, skipped)
            .ok_or_else(|| {
                ExpenseError::Storage(format!(
                    "Expense totals for {} exceed the supported range",
                    reference_date.format("%Y-%m")
                ))
            })?;

        Ok(SummaryOutcome::Summary(summary))
    }

    /// Build the summary from expenses already filtered to the month
    ///
    /// Returns `None` if a total does not fit in the money range.
    pub fn from_expenses(
        expenses: &[Expense],
        budget: Money,
        reference_date: NaiveDate,
        skipped: Vec<SkippedRow>,
    ) -> Option<Self> {
        let mut by_category: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
        let mut total_spent = Money::zero();
        for expense in expenses {
            let entry = by_category
                .entry(expense.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 = entry.0.checked_add(expense.amount)?;
            entry.1 += 1;
            total_spent = total_spent.checked_add(expense.amount)?;
        }

        let categories = by_category
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category: category.to_string(),
                total,
                count,
            })
            .collect();

        let remaining = budget.checked_sub(total_spent)?;

        Some(Self {
            reference_date,
            budget,
            categories,
            total_spent,
            remaining,
            allowance: DailyAllowance::compute(remaining, reference_date),
            expense_count: expenses.len(),
            skipped,
        })
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, symbol: &str, color: bool) -> String {
        let mut output = String::new();

        output.push_str("Expenses By Category (This Month)\n");
        for category in &self.categories {
            output.push_str(&format!(
                "  {}: {}\n",
                category.category,
                category.total.format_with_symbol(symbol)
            ));
        }

        output.push('\n');
        output.push_str(&format!(
            "Total spent (This Month): {}\n",
            self.total_spent.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Budget Remaining (This Month): {}\n",
            self.remaining.format_with_symbol(symbol)
        ));

        let allowance = self.allowance.message(symbol);
        if color {
            output.push_str(&highlight(&allowance));
        } else {
            output.push_str(&allowance);
        }
        output.push('\n');

        output
    }
}

impl SummaryOutcome {
    /// Rows skipped while reading the store
    pub fn skipped(&self) -> &[SkippedRow] {
        match self {
            Self::NoData => &[],
            Self::NoExpensesThisMonth { skipped } => skipped.as_slice(),
            Self::Summary(summary) => summary.skipped.as_slice(),
        }
    }

    /// Format the outcome, warnings first, for terminal display
    pub fn format_terminal(&self, symbol: &str, color: bool) -> String {
        let mut output = String::new();

        for row in self.skipped() {
            output.push_str(&row.warning());
            output.push('\n');
        }

        match self {
            Self::NoData => {
                output.push_str("No expenses file found. Add an expense to get started.\n");
            }
            Self::NoExpensesThisMonth { .. } => {
                output.push_str("No expenses recorded for this month yet.\n");
            }
            Self::Summary(summary) => {
                if !self.skipped().is_empty() {
                    output.push('\n');
                }
                output.push_str(&summary.format_terminal(symbol, color));
            }
        }

        output
    }
}

fn parse_row(row: &StoredRow, mode: CategoryMode) -> Result<Expense, SkipReason> {
    let expense = row.parse()?;

    if mode == CategoryMode::Strict && expense.category.parse::<ExpenseCategory>().is_err() {
        return Err(SkipReason::UnknownCategory(expense.category));
    }

    Ok(expense)
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}
