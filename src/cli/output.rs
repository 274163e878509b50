//! Terminal output management.
//!
//! Status lines go to stdout, warnings to stderr. `quiet` silences status
//! lines and tool stdout; warnings and tool stderr are always shown.
//! `verbose` enables the extra detail lines.

use crossterm::style::Stylize;
use std::io::{self, Write};

/// Colored, level-aware terminal output.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Whether normal status lines and tool stdout are suppressed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Detail line, only shown in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            writeln!(io::stdout().lock(), "{}", message.dark_grey())?;
        }
        Ok(())
    }

    /// Progress line for a step that is starting.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout().lock(), "{} {}", "→".cyan(), message)?;
        }
        Ok(())
    }

    /// Success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout().lock(), "{} {}", "✓".green(), message)?;
        }
        Ok(())
    }

    /// Warning line. Printed even in quiet mode.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        writeln!(io::stderr().lock(), "{} {}", "warning:".yellow().bold(), message)
    }

    /// Bold section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout().lock(), "\n{}", title.bold())?;
        }
        Ok(())
    }

    /// Plain line without decoration.
    pub fn println(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout().lock(), "{}", message)?;
        }
        Ok(())
    }
}
