//! Add-expense flow
//!
//! Collects a validated expense from the user and appends it to the store.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tracing::warn;

use super::prompt::Prompter;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseCategory, Money};
use crate::storage::ExpenseStore;

/// Ask for name, amount and category, re-prompting until each is valid
///
/// Returns `Ok(None)` if the input ends before the form is complete.
pub fn read_expense<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    date: NaiveDate,
) -> ExpenseResult<Option<Expense>> {
    prompter.say("")?;
    prompter.say("Getting User Expense")?;

    let name = loop {
        let Some(name) = prompter.ask("Enter expense name: ")? else {
            return Ok(None);
        };
        if !name.is_empty() {
            break name;
        }
        prompter.say("Expense name cannot be empty.")?;
    };

    let amount = loop {
        let Some(answer) = prompter.ask("Enter expense amount: ")? else {
            return Ok(None);
        };
        match Money::parse(&answer) {
            Ok(amount) if amount.is_positive() => break amount,
            Ok(_) => prompter.say("Amount must be greater than 0.")?,
            Err(_) => prompter.say("Invalid input. Please enter a valid number.")?,
        }
    };

    let categories = ExpenseCategory::all();
    let category = loop {
        prompter.say("")?;
        prompter.say("Select a category: ")?;
        for (i, category) in categories.iter().enumerate() {
            prompter.say(format!("    {}.  {}", i + 1, category))?;
        }

        let prompt = format!("Enter a category number [1 - {}]: ", categories.len());
        let Some(answer) = prompter.ask(&prompt)? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(number) => match ExpenseCategory::from_menu_number(number) {
                Some(category) => break category,
                None => prompter.say("Invalid category. Please try again!")?,
            },
            Err(_) => prompter.say("Invalid input. Please enter a number.")?,
        }
    };

    let expense = Expense::new(name, category, amount, date);
    expense
        .validate()
        .map_err(|e| ExpenseError::Validation(e.to_string()))?;

    prompter.say(format!(
        "Expense added: {}, {}, {}",
        expense.name,
        expense.category,
        expense.amount.to_decimal_string()
    ))?;

    Ok(Some(expense))
}

/// Run the add-expense flow
///
/// A failed write is reported and the flow returns normally.
pub fn handle_add_expense<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &ExpenseStore,
    date: NaiveDate,
) -> ExpenseResult<()> {
    let Some(expense) = read_expense(prompter, date)? else {
        prompter.say("Expense entry cancelled.")?;
        return Ok(());
    };

    prompter.say(format!("Saving User Expense to {}", store.path().display()))?;
    if let Err(e) = store.append(&expense) {
        warn!(error = %e, "failed to append expense");
        prompter.say(format!("Failed to save expense: {}", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn run_form(input: &str) -> (Option<Expense>, String) {
        let mut prompter = Prompter::new(input.as_bytes(), Vec::new());
        let expense = read_expense(&mut prompter, date()).unwrap();
        (expense, String::from_utf8(prompter.into_output()).unwrap())
    }

    #[test]
    fn test_valid_form() {
        let (expense, output) = run_form("Coffee\n4.50\n1\n");

        let expense = expense.unwrap();
        assert_eq!(expense.name, "Coffee");
        assert_eq!(expense.amount, Money::from_cents(450));
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.date, date());
        assert!(output.contains("    6.  Other"));
        assert!(output.contains("Expense added: Coffee, Food, 4.50"));
    }

    #[test]
    fn test_reprompts_invalid_answers() {
        let (expense, output) = run_form("\nTaxi\nabc\n-3\n0\n12\nx\n9\n5\n");

        let expense = expense.unwrap();
        assert_eq!(expense.name, "Taxi");
        assert_eq!(expense.amount, Money::from_cents(1200));
        assert_eq!(expense.category, "Transport");
        assert!(output.contains("Expense name cannot be empty."));
        assert_eq!(output.matches("Invalid input. Please enter a valid number.").count(), 1);
        assert_eq!(output.matches("Amount must be greater than 0.").count(), 2);
        assert!(output.contains("Invalid input. Please enter a number."));
        assert!(output.contains("Invalid category. Please try again!"));
    }

    #[test]
    fn test_sub_cent_amounts_round_before_the_check() {
        let (expense, output) = run_form("Tip\n0.004\n0.005\n4\n");

        let expense = expense.unwrap();
        assert_eq!(expense.amount, Money::from_cents(1));
        assert_eq!(output.matches("Amount must be greater than 0.").count(), 1);
        assert_eq!(expense.validate(), Ok(()));
    }

    #[test]
    fn test_end_of_input_cancels() {
        let (expense, _) = run_form("Coffee\n4.50\n");
        assert!(expense.is_none());
    }

    #[test]
    fn test_handle_add_appends() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));
        let mut prompter = Prompter::new("Rent\n1200\n2\n".as_bytes(), Vec::new());

        handle_add_expense(&mut prompter, &store, date()).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "Rent,1200.00,Home,2024-03-05\n");
    }

    #[test]
    fn test_handle_add_reports_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let store = ExpenseStore::new(temp_dir.path());
        let mut prompter = Prompter::new("Rent\n1200\n2\n".as_bytes(), Vec::new());

        handle_add_expense(&mut prompter, &store, date()).unwrap();

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("Failed to save expense:"));
    }
}
