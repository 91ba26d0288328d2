use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use expense_tracker::cli::{run_menu, Prompter, Session};
use expense_tracker::config::{paths::DATA_DIR_ENV, ExpensePaths, Settings};
use expense_tracker::models::Money;
use expense_tracker::storage::ExpenseStore;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Log expenses and track them against a monthly budget",
    long_about = "An interactive expense logger. Add expenses from the menu and \
                  view how much of this month's budget is left and what you can \
                  still spend per day."
)]
struct Cli {
    /// Directory holding settings and the expense store
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Expense store file (defaults to expenses.csv in the data directory)
    #[arg(long, env = "EXPENSE_TRACKER_STORE")]
    store: Option<PathBuf>,

    /// Monthly budget for this run (e.g., "2000" or "2000.00")
    #[arg(long, env = "EXPENSE_TRACKER_BUDGET", value_parser = parse_budget)]
    budget: Option<Money>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration and paths
    Config {
        /// Save a new monthly budget to the settings file
        #[arg(long, value_parser = parse_budget)]
        set_budget: Option<Money>,
    },
}

fn parse_budget(value: &str) -> Result<Money, String> {
    let budget = Money::parse(value).map_err(|e| e.to_string())?;
    if !budget.is_positive() {
        return Err("budget must be greater than 0".to_string());
    }
    Ok(budget)
}

fn main() -> Result<()> {
    expense_tracker::init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };

    let mut settings = Settings::load_or_create(&paths).unwrap_or_else(|e| {
        warn!(error = %e, "using default settings");
        eprintln!("Warning: {}. Using default settings.", e);
        Settings::default()
    });
    if let Some(budget) = cli.budget {
        settings.monthly_budget = budget;
    }
    if let Some(store) = cli.store {
        settings.store_file = Some(store);
    }

    let store = ExpenseStore::new(settings.store_path(&paths));
    debug!(store = %store.path().display(), "resolved expense store");

    match cli.command {
        Some(Commands::Config {
            set_budget: Some(budget),
        }) => {
            // Reload so that one-run overrides are not persisted
            let mut saved = Settings::load_or_create(&paths)?;
            saved.monthly_budget = budget;
            saved.save(&paths)?;
            info!(budget = %budget, "monthly budget saved");
            println!(
                "Monthly budget set to {}",
                budget.format_with_symbol(&saved.currency_symbol)
            );
            println!("Saved to {}", paths.settings_file().display());
        }
        Some(Commands::Config { set_budget: None }) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Expense store:  {}", store.path().display());
            println!();
            println!("Settings:");
            println!(
                "  Monthly budget:    {}",
                settings.monthly_budget.format_with_symbol(&settings.currency_symbol)
            );
            println!("  Strict categories: {}", settings.strict_categories);
            println!("  Color output:      {}", settings.color_output);
        }
        None => {
            let session = Session::new(store, settings);
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            run_menu(&mut prompter, &session)?;
        }
    }

    Ok(())
}
