//! Interactive command-line interface
//!
//! A numbered menu over the two operations: recording an expense and
//! summarizing the current month. All flows are generic over the input and
//! output streams.

pub mod expense;
pub mod menu;
pub mod prompt;
pub mod summary;

pub use expense::{handle_add_expense, read_expense};
pub use menu::{run_menu, MenuChoice, Session};
pub use prompt::Prompter;
pub use summary::handle_summary;
