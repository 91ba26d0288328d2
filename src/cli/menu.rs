//! Interactive main menu

use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::NaiveDate;

use super::expense::handle_add_expense;
use super::prompt::Prompter;
use super::summary::handle_summary;
use crate::config::Settings;
use crate::display::section_header;
use crate::error::ExpenseResult;
use crate::storage::ExpenseStore;

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddExpense,
    ViewSummary,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::AddExpense),
            "2" => Ok(Self::ViewSummary),
            "3" => Ok(Self::Exit),
            _ => Err(()),
        }
    }
}

/// Everything the menu needs to serve one session
#[derive(Debug, Clone)]
pub struct Session {
    /// Where expenses are recorded
    pub store: ExpenseStore,
    /// Budget and display settings
    pub settings: Settings,
    /// Fixed "today"; the local date is used when unset
    pub today: Option<NaiveDate>,
}

impl Session {
    /// Create a session using the local date
    pub fn new(store: ExpenseStore, settings: Settings) -> Self {
        Self {
            store,
            settings,
            today: None,
        }
    }

    /// Pin "today" to a fixed date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Run the menu loop until the user exits or the input ends
pub fn run_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    session: &Session,
) -> ExpenseResult<()> {
    prompter.say("Running Expense Tracker!")?;

    loop {
        prompter.say("")?;
        prompter.say(section_header("Expense Tracker Menu"))?;
        prompter.say("  1. Add a new expense")?;
        prompter.say("  2. View summary for this month")?;
        prompter.say("  3. Exit")?;

        let Some(answer) = prompter.ask("Enter your choice [1-3]: ")? else {
            break;
        };

        match answer.parse::<MenuChoice>() {
            Ok(MenuChoice::AddExpense) => {
                handle_add_expense(prompter, &session.store, session.today())?;
            }
            Ok(MenuChoice::ViewSummary) => {
                handle_summary(prompter, &session.store, &session.settings, session.today())?;
            }
            Ok(MenuChoice::Exit) => break,
            Err(()) => prompter.say("Invalid choice. Please enter 1, 2, or 3.")?,
        }
    }

    prompter.say("Exiting. Goodbye!")?;
    Ok(())
}
