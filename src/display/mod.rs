//! Display formatting for terminal output

pub mod report;

pub use report::{highlight, section_header};
