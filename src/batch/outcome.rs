//! Per-item outcomes and run-level aggregation

use crate::batch::generator::GeneratorStatus;
use crate::batch::layout::OutputArtifacts;
use crate::batch::verify::ArtifactProblem;
use crate::io::error::{BatchError, Result};
use std::path::PathBuf;

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Generator succeeded and both images exist
    Success {
        /// Images that were produced
        artifacts: OutputArtifacts,
    },
    /// No annotation file; the generator was not invoked
    SkippedMissingAnnotation {
        /// Annotation path that was looked for
        annotation: PathBuf,
    },
    /// Generator did not exit successfully; outputs were not checked
    Failed {
        /// How the generator ended
        status: GeneratorStatus,
        /// Captured standard error
        stderr: String,
    },
    /// Generator exited 0 but left outputs missing or unreadable
    IncompleteOutput {
        /// Every problem found with the expected artifacts
        problems: Vec<ArtifactProblem>,
    },
}

/// Outcome category without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// See [`ItemOutcome::Success`]
    Success,
    /// See [`ItemOutcome::SkippedMissingAnnotation`]
    Skipped,
    /// See [`ItemOutcome::Failed`]
    Failed,
    /// See [`ItemOutcome::IncompleteOutput`]
    Incomplete,
}

impl ItemOutcome {
    /// Category of this outcome
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success { .. } => OutcomeKind::Success,
            Self::SkippedMissingAnnotation { .. } => OutcomeKind::Skipped,
            Self::Failed { .. } => OutcomeKind::Failed,
            Self::IncompleteOutput { .. } => OutcomeKind::Incomplete,
        }
    }
}

/// One processed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// 1-based position among all discovered inputs
    pub index: usize,
    /// Number of discovered inputs
    pub total: usize,
    /// Point-cloud file
    pub input: PathBuf,
    /// Join key derived from the input file name
    pub base_name: String,
    /// What happened
    pub outcome: ItemOutcome,
}

/// Outcome counts for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Inputs discovered
    pub total: usize,
    /// Items with both images produced
    pub succeeded: usize,
    /// Items without an annotation file
    pub skipped: usize,
    /// Items whose generator run failed
    pub failed: usize,
    /// Items whose generator succeeded with outputs missing
    pub incomplete: usize,
}

impl RunSummary {
    /// Empty summary for `total` discovered inputs
    pub const fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            skipped: 0,
            failed: 0,
            incomplete: 0,
        }
    }

    /// Count one outcome
    pub const fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Success => self.succeeded += 1,
            OutcomeKind::Skipped => self.skipped += 1,
            OutcomeKind::Failed => self.failed += 1,
            OutcomeKind::Incomplete => self.incomplete += 1,
        }
    }

    /// Items attempted so far, skipped ones included
    pub const fn processed(&self) -> usize {
        self.succeeded + self.skipped + self.failed + self.incomplete
    }

    /// Whether every attempted item either succeeded or was skipped
    pub const fn is_clean(&self) -> bool {
        self.failed == 0 && self.incomplete == 0
    }

    /// Aggregate exit policy for strict runs
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ItemsFailed`] if any item failed or was incomplete
    pub const fn require_clean(&self) -> Result<()> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(BatchError::ItemsFailed {
                failed: self.failed,
                incomplete: self.incomplete,
            })
        }
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Items in processing order
    pub items: Vec<ItemReport>,
    /// Outcome counts
    pub summary: RunSummary,
}

impl RunReport {
    /// Outcome recorded for `base_name`, if that input was discovered
    pub fn outcome_of(&self, base_name: &str) -> Option<&ItemOutcome> {
        self.items
            .iter()
            .find(|item| item.base_name == base_name)
            .map(|item| &item.outcome)
    }
}
