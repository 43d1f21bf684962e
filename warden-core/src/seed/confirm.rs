//! Yes/no confirmation gate in front of each seeding stage.

use std::io::{self, BufRead, Write};

use crate::console;
use crate::error::WardenError;

/// Pluggable confirmation capability.
///
/// Batch and non-interactive invocations supply [`AssumeYes`]; the
/// interactive CLI reads a single line from stdin.
pub trait Confirm: Send + Sync {
    fn confirm(&self, question: &str) -> Result<bool, WardenError>;
}

/// Reads a single line from stdin; only a case-insensitive `y` proceeds.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> Result<bool, WardenError> {
        print!("{}", console::prompt(question));
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}

/// Constant-true gate for `--yes` runs and provisioning pipelines.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _question: &str) -> Result<bool, WardenError> {
        Ok(true)
    }
}
