// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, verbose (subprocess detail), and quiet modes.

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Normal plus streamed engine/transport detail lines
    Verbose,
    /// Minimal output for CI (only final results)
    Quiet,
}

/// Handles CLI output based on the configured mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Print a progress message (suppressed in quiet mode).
    pub fn progress(&self, message: &str) {
        if self.mode != OutputMode::Quiet {
            println!("{message}");
        }
    }

    /// Stream a raw detail line from a subprocess (verbose mode only).
    pub fn detail(&self, line: &str) {
        if self.mode == OutputMode::Verbose {
            println!("{line}");
        }
    }

    /// Print an essential result, shown in every mode.
    pub fn result(&self, message: &str) {
        println!("{message}");
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        eprintln!("Error: {message}");
    }
}
