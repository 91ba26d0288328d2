//! Append-only CSV expense store
//!
//! Each expense is one headerless CSV row: `name,amount,category,date`.
//! Rows are only ever appended; the whole file is re-read for summaries.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money, DATE_FORMAT};

/// Number of fields in a well-formed row
pub const FIELDS_PER_ROW: usize = 4;

/// Flat-file store holding every expense ever recorded
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Create a store backed by the given file (which need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether anything has been recorded yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one expense as a new row, creating the file if needed
    pub fn append(&self, expense: &Expense) -> ExpenseResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ExpenseError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ExpenseError::Io(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        writer
            .write_record([
                expense.name.as_str(),
                expense.amount.to_decimal_string().as_str(),
                expense.category.as_str(),
                expense.date_string().as_str(),
            ])
            .map_err(|e| ExpenseError::Io(format!("Failed to write expense: {}", e)))?;

        writer
            .flush()
            .map_err(|e| ExpenseError::Io(format!("Failed to flush expense store: {}", e)))?;

        info!(path = %self.path.display(), name = %expense.name, "expense appended");
        Ok(())
    }

    /// Read every row in file order
    ///
    /// Returns `Ok(None)` when the store file does not exist yet. Rows are
    /// returned unparsed so that callers decide how to treat malformed ones.
    /// Blank lines come back as rows with no fields. Only I/O failures are
    /// errors; any bytes that can be read yield rows.
    pub fn read_rows(&self) -> ExpenseResult<Option<Vec<StoredRow>>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ExpenseError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_slice());

        let mut rows = Vec::new();
        let mut record = ByteRecord::new();

        loop {
            let start = reader.position().clone();

            // The reader skips blank lines silently; report each one as an empty row
            let offset = usize::try_from(start.byte()).unwrap_or(data.len());
            let (newlines, blank_lines) = terminator_run(&data, offset);
            let first_blank = start.line() + (newlines - blank_lines);
            for i in 0..blank_lines {
                rows.push(StoredRow {
                    line: first_blank + i,
                    fields: Vec::new(),
                });
            }

            let more = reader.read_byte_record(&mut record).map_err(|e| {
                ExpenseError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
            })?;
            if !more {
                break;
            }

            let fields = record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();

            rows.push(StoredRow {
                line: start.line() + newlines,
                fields,
            });
        }

        Ok(Some(rows))
    }
}

/// Count the line terminators starting at `offset`
///
/// Returns the number of `\n` bytes in the run and how many of them end a
/// blank line. A `\n` completing a `\r\n` split across `offset` ends the
/// previous row rather than a blank one.
fn terminator_run(data: &[u8], offset: usize) -> (u64, u64) {
    let run = data.get(offset..).unwrap_or_default();
    let newlines = run
        .iter()
        .take_while(|&&b| b == b'\r' || b == b'\n')
        .filter(|&&b| b == b'\n')
        .count() as u64;
    let completes_crlf =
        offset > 0 && data.get(offset - 1) == Some(&b'\r') && run.first() == Some(&b'\n');

    (newlines, newlines - u64::from(completes_crlf))
}

/// One raw row as read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    /// 1-based line number in the store file
    pub line: u64,
    /// Field values in stored order
    pub fields: Vec<String>,
}

/// Why a stored row could not be turned into an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Row did not have exactly four fields
    FieldCount(usize),
    /// Amount field is not a number
    BadAmount(String),
    /// Date field is not YYYY-MM-DD
    BadDate(String),
    /// Category is not one of the fixed set (strict mode only)
    UnknownCategory(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCount(n) => {
                write!(f, "expected {} fields, found {}", FIELDS_PER_ROW, n)
            }
            Self::BadAmount(value) => write!(f, "invalid amount '{}'", value),
            Self::BadDate(value) => write!(f, "invalid date '{}'", value),
            Self::UnknownCategory(value) => write!(f, "unknown category '{}'", value),
        }
    }
}

impl StoredRow {
    /// Parse the row as `name, amount, category, date`
    pub fn parse(&self) -> Result<Expense, SkipReason> {
        let [name, amount, category, date] = self.fields.as_slice() else {
            return Err(SkipReason::FieldCount(self.fields.len()));
        };

        let amount = Money::parse(amount).map_err(|_| SkipReason::BadAmount(amount.clone()))?;
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| SkipReason::BadDate(date.clone()))?;

        Ok(Expense::from_stored(name.as_str(), category.as_str(), amount, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseCategory;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(fields: &[&str]) -> StoredRow {
        StoredRow {
            line: 1,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_missing_store_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));

        assert!(!store.exists());
        assert!(store.read_rows().unwrap().is_none());
    }

    #[test]
    fn test_append_writes_expected_row() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));

        let coffee = Expense::new(
            "Coffee",
            ExpenseCategory::Food,
            Money::from_cents(450),
            date(2024, 3, 5),
        );
        store.append(&coffee).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "Coffee,4.50,Food,2024-03-05\n");
    }

    #[test]
    fn test_append_is_append_only() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));

        let rent = Expense::new(
            "Rent",
            ExpenseCategory::Home,
            Money::from_cents(120_000),
            date(2024, 3, 1),
        );
        store.append(&rent).unwrap();
        store.append(&rent).unwrap();

        let rows = store.read_rows().unwrap().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, rows[1].fields);
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn test_append_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("nested").join("expenses.csv"));

        let fare = Expense::new(
            "Bus",
            ExpenseCategory::Transport,
            Money::from_cents(275),
            date(2024, 3, 2),
        );
        store.append(&fare).unwrap();

        assert!(store.exists());
    }

    #[test]
    fn test_names_with_delimiters_are_quoted() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));

        let lunch = Expense::new(
            "Lunch, \"deluxe\"",
            ExpenseCategory::Food,
            Money::from_cents(1299),
            date(2024, 3, 8),
        );
        store.append(&lunch).unwrap();

        let rows = store.read_rows().unwrap().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].parse().unwrap(), lunch);
    }

    #[test]
    fn test_read_keeps_malformed_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");
        fs::write(&path, "Coffee,4.50,Food,2024-03-05\nBroken,1.00,Food\n").unwrap();

        let rows = ExpenseStore::new(&path).read_rows().unwrap().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields.len(), 3);
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn test_blank_lines_are_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");
        fs::write(&path, "A,1.00,Food,2024-03-01\n\nB,2.00,Food,2024-03-02\n\n").unwrap();

        let rows = ExpenseStore::new(&path).read_rows().unwrap().unwrap();
        let lines: Vec<_> = rows.iter().map(|r| (r.line, r.fields.len())).collect();
        assert_eq!(lines, [(1, 4), (2, 0), (3, 4), (4, 0)]);
        assert_eq!(rows[1].parse(), Err(SkipReason::FieldCount(0)));
    }

    #[test]
    fn test_blank_lines_with_crlf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");
        fs::write(&path, "A,1.00,Food,2024-03-01\r\n\r\nB,2.00,Food,2024-03-02\r\n").unwrap();

        let rows = ExpenseStore::new(&path).read_rows().unwrap().unwrap();
        let lines: Vec<_> = rows.iter().map(|r| (r.line, r.fields.len())).collect();
        assert_eq!(lines, [(1, 4), (2, 0), (3, 4)]);
    }

    #[test]
    fn test_invalid_utf8_does_not_stop_the_scan() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");
        let mut contents = b"Caf\xe9,3.00,Food,2024-03-01\n".to_vec();
        contents.extend_from_slice(b"Tea,2.00,Food,2024-03-02\n");
        fs::write(&path, contents).unwrap();

        let rows = ExpenseStore::new(&path).read_rows().unwrap().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields[0], "Caf\u{fffd}");
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[1].parse().unwrap().name, "Tea");
    }

    #[test]
    fn test_unreadable_store_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory exists but cannot be read as a file
        let store = ExpenseStore::new(temp_dir.path());

        assert!(matches!(store.read_rows(), Err(ExpenseError::Storage(_))));
    }

    #[test]
    fn test_parse_row() {
        let expense = row(&["Rent", "1200.0", "Home", "2024-03-01"]).parse().unwrap();
        assert_eq!(expense.amount, Money::from_cents(120_000));
        assert_eq!(expense.category, "Home");
        assert_eq!(expense.date, date(2024, 3, 1));
    }

    #[test]
    fn test_parse_row_failures() {
        assert_eq!(
            row(&["Rent", "1200", "Home"]).parse(),
            Err(SkipReason::FieldCount(3))
        );
        assert_eq!(
            row(&["Rent", "lots", "Home", "2024-03-01"]).parse(),
            Err(SkipReason::BadAmount("lots".into()))
        );
        assert_eq!(
            row(&["Rent", "1200", "Home", "03/01/2024"]).parse(),
            Err(SkipReason::BadDate("03/01/2024".into()))
        );
        assert_eq!(
            row(&["Rent", "1200", "Home", "2024-02-30"]).parse(),
            Err(SkipReason::BadDate("2024-02-30".into()))
        );
    }

    #[test]
    fn test_parse_keeps_unknown_category() {
        let expense = row(&["Gift", "25", "Presents", "2024-03-01"]).parse().unwrap();
        assert_eq!(expense.category, "Presents");
    }
}
