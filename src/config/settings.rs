//! User settings for the expense tracker
//!
//! Holds the monthly budget ceiling, where expenses are stored and how the
//! summary is rendered. Stored as JSON next to the expense store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::Money;

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Monthly spending ceiling, in cents
    #[serde(default = "default_monthly_budget")]
    pub monthly_budget: Money,

    /// Currency symbol used in the summary
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Store location override; relative paths resolve against the base directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,

    /// Skip stored rows whose category is not one of the fixed six
    #[serde(default)]
    pub strict_categories: bool,

    /// Highlight the daily allowance line
    #[serde(default = "default_color_output")]
    pub color_output: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_monthly_budget() -> Money {
    Money::from_dollars_cents(50_000, 0)
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_color_output() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            monthly_budget: default_monthly_budget(),
            currency_symbol: default_currency(),
            store_file: None,
            strict_categories: false,
            color_output: default_color_output(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if !settings.monthly_budget.is_positive() {
                return Err(ExpenseError::Config(format!(
                    "Monthly budget must be greater than 0, got {}",
                    settings.monthly_budget
                )));
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the expense store location
    pub fn store_path(&self, paths: &ExpensePaths) -> PathBuf {
        match &self.store_file {
            Some(file) if file.is_absolute() => file.clone(),
            Some(file) => paths.base_dir().join(file),
            None => paths.store_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.monthly_budget, Money::from_cents(5_000_000));
        assert_eq!(settings.currency_symbol, "$");
        assert!(!settings.strict_categories);
        assert!(settings.color_output);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path());

        let mut settings = Settings::default();
        settings.monthly_budget = Money::from_dollars_cents(2000, 0);
        settings.strict_categories = true;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.monthly_budget, Money::from_cents(200_000));
        assert!(loaded.strict_categories);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"monthly_budget": 150000}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.monthly_budget, Money::from_cents(150_000));
        assert_eq!(loaded.schema_version, 1);
        assert!(loaded.color_output);
    }

    #[test]
    fn test_non_positive_budget_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"monthly_budget": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }

    #[test]
    fn test_store_path_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path());
        let mut settings = Settings::default();

        assert_eq!(settings.store_path(&paths), temp_dir.path().join("expenses.csv"));

        settings.store_file = Some(PathBuf::from("2024.csv"));
        assert_eq!(settings.store_path(&paths), temp_dir.path().join("2024.csv"));

        let absolute = temp_dir.path().join("elsewhere").join("log.csv");
        settings.store_file = Some(absolute.clone());
        assert_eq!(settings.store_path(&paths), absolute);
    }
}
