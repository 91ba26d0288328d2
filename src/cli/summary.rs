//! Monthly summary flow

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tracing::warn;

use super::prompt::Prompter;
use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::reports::{CategoryMode, MonthlySummary};
use crate::storage::ExpenseStore;

/// Print the summary for the month containing `reference_date`
///
/// Read failures are reported to the user and do not end the session.
pub fn handle_summary<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &ExpenseStore,
    settings: &Settings,
    reference_date: NaiveDate,
) -> ExpenseResult<()> {
    prompter.say("")?;
    prompter.say("Summarize User Expenses for this Month")?;

    let mode = if settings.strict_categories {
        CategoryMode::Strict
    } else {
        CategoryMode::Lenient
    };

    match MonthlySummary::generate(store, settings.monthly_budget, reference_date, mode) {
        Ok(outcome) => {
            let text = outcome.format_terminal(&settings.currency_symbol, settings.color_output);
            prompter.write_raw(&text)?;
        }
        Err(e) => {
            warn!(error = %e, "failed to summarize expenses");
            prompter.say(format!("An error occurred while reading the file: {}", e))?;
        }
    }

    Ok(())
}
