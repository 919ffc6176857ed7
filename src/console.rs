//! Line-oriented operator prompts.

use crate::SetupError;
use std::io::{BufRead, Write};

/// Prompts the operator over any line reader/writer pair.
///
/// The binary wraps stdin/stdout; tests use in-memory buffers.
///
/// # Example
///
/// ```rust
/// use cd3_setup::Console;
/// use std::io::Cursor;
///
/// let mut console = Console::new(Cursor::new("  y \n"), Vec::new());
/// assert_eq!(console.ask("Continue? ").unwrap(), "y");
/// ```
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over `input` and `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed line.
    ///
    /// End of input is treated as the operator abandoning the run.
    pub fn ask(&mut self, prompt: &str) -> Result<String, SetupError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SetupError::Interrupted);
        }
        Ok(line.trim().to_string())
    }

    /// Print one line.
    pub fn say(&mut self, line: &str) -> Result<(), SetupError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Consume the console, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}
