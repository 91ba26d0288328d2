//! Line-oriented terminal prompts
//!
//! Wraps an input and an output stream so the interactive flows can run
//! against stdin/stdout or against in-memory buffers.

use std::io::{BufRead, Write};

use crate::error::ExpenseResult;

/// Reads answers from `input` and writes prompts and messages to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over the given streams
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed line
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> ExpenseResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    /// Print a line of output
    pub fn say(&mut self, message: impl AsRef<str>) -> ExpenseResult<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Print text as-is, without adding a newline
    pub fn write_raw(&mut self, text: &str) -> ExpenseResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Consume the prompter and hand back the output stream
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_trims_answer() {
        let mut prompter = Prompter::new("  Coffee \n".as_bytes(), Vec::new());

        let answer = prompter.ask("Name: ").unwrap();

        assert_eq!(answer.as_deref(), Some("Coffee"));
        assert_eq!(String::from_utf8(prompter.into_output()).unwrap(), "Name: ");
    }

    #[test]
    fn test_ask_at_end_of_input() {
        let mut prompter = Prompter::new("".as_bytes(), Vec::new());

        assert_eq!(prompter.ask("Name: ").unwrap(), None);
    }
}
