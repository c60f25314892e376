//! Plain-text status reporting with a spinner while the generator runs
//!
//! Status lines go to the wrapped writer (standard output in the binary). The
//! spinner draws on standard error and hides itself when that is not a terminal.

use crate::batch::generator::GeneratorStatus;
use crate::batch::outcome::{ItemOutcome, ItemReport, RunSummary};
use crate::io::configuration::{MAX_STDERR_EXCERPT, SPINNER_TICK_MS};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Writes per-item status lines and the final summary
pub struct ProgressReporter<W: Write> {
    out: W,
    show_spinner: bool,
    spinner: Option<ProgressBar>,
    total: usize,
}

impl<W: Write> ProgressReporter<W> {
    /// Create a reporter writing status lines to `out`
    pub const fn new(out: W, show_spinner: bool) -> Self {
        Self {
            out,
            show_spinner,
            spinner: None,
            total: 0,
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(mut self) -> W {
        self.clear_spinner();
        self.out
    }

    /// Announce how many inputs were found
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn discovered(&mut self, total: usize) -> io::Result<()> {
        self.total = total;
        writeln!(self.out, "Found {total} PLY files to process")
    }

    /// Announce that the generator is about to run for an item
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn item_started(&mut self, index: usize, base_name: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "\nProcessing {base_name} ({index}/{})...",
            self.total
        )?;
        self.out.flush()?;

        if self.show_spinner {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(SPINNER_STYLE.clone());
            spinner.set_message(format!("Generating density images for {base_name}"));
            spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            self.spinner = Some(spinner);
        }
        Ok(())
    }

    /// Report an item's outcome followed by the progress counter
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn item_finished(&mut self, item: &ItemReport) -> io::Result<()> {
        self.clear_spinner();
        let name = &item.base_name;

        match &item.outcome {
            ItemOutcome::Success { artifacts } => {
                writeln!(self.out, "Successfully processed {name}")?;
                writeln!(self.out, "Output files created successfully:")?;
                for path in artifacts.paths() {
                    writeln!(self.out, "  - {}", path.display())?;
                }
            }
            ItemOutcome::SkippedMissingAnnotation { annotation } => {
                writeln!(
                    self.out,
                    "Warning: No JSON file found for {} (expected {})",
                    item.input.display(),
                    annotation.display()
                )?;
            }
            ItemOutcome::Failed { status, stderr } => match status {
                GeneratorStatus::LaunchFailed(reason) => {
                    writeln!(self.out, "Unexpected error processing {name}: {reason}")?;
                }
                GeneratorStatus::ExitCode(code) => {
                    writeln!(self.out, "Error processing {name}:")?;
                    writeln!(self.out, "Exit code: {code}")?;
                    writeln!(self.out, "Error output: {}", stderr_excerpt(stderr))?;
                }
                GeneratorStatus::Signal | GeneratorStatus::Success => {
                    writeln!(self.out, "Error processing {name}:")?;
                    writeln!(self.out, "Exit code: none (terminated by signal)")?;
                    writeln!(self.out, "Error output: {}", stderr_excerpt(stderr))?;
                }
            },
            ItemOutcome::IncompleteOutput { problems } => {
                writeln!(self.out, "Successfully processed {name}")?;
                writeln!(
                    self.out,
                    "Warning: Some output files are missing for {name}"
                )?;
                for problem in problems {
                    writeln!(self.out, "  - {problem}")?;
                }
            }
        }

        writeln!(
            self.out,
            "Progress: {}/{} files processed",
            item.index, item.total
        )
    }

    /// Print the closing summary
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.clear_spinner();
        writeln!(
            self.out,
            "\nProcessed {}/{} files: {} succeeded, {} skipped, {} failed, {} incomplete",
            summary.processed(),
            summary.total,
            summary.succeeded,
            summary.skipped,
            summary.failed,
            summary.incomplete
        )?;
        self.out.flush()
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// Trailing part of captured stderr, at most `MAX_STDERR_EXCERPT` bytes
///
/// Tracebacks end with the useful line, so the tail is kept.
pub fn stderr_excerpt(stderr: &str) -> &str {
    let text = stderr.trim_end();
    if text.len() <= MAX_STDERR_EXCERPT {
        return text;
    }
    let mut start = text.len() - MAX_STDERR_EXCERPT;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text.get(start..).unwrap_or(text)
}
