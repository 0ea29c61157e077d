//! Public output types for rename runs.
//!
//! These are what the pipeline hands back to its caller once every stage has
//! finished; the CLI maps them onto its response envelope.

use crate::error::{Error, ErrorCode};
use crate::rename::Collision;
use serde::Serialize;
use std::path::PathBuf;

// ============================================================================
// Per-operation outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The file was moved.
    Renamed,
    /// Dry run: reported as renamed, nothing touched.
    Simulated,
    /// The filesystem refused the rename.
    Failed,
    /// The operation had no destination and was never attempted.
    Excluded,
}

/// Outcome of one attempted rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub source: PathBuf,
    /// Where the file ended up (or would have, in a dry run). `None` when the
    /// rename failed or was excluded.
    pub destination: Option<PathBuf>,
    pub status: OutcomeStatus,
}

impl RenameOutcome {
    pub fn is_renamed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Renamed | OutcomeStatus::Simulated)
    }
}

// ============================================================================
// Run report
// ============================================================================

/// Counts over a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub requested: usize,
    pub renamed: usize,
    pub failed: usize,
    pub errors: usize,
}

/// Everything a run produced, including every error recorded along the way.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Number of file paths supplied.
    pub requested: usize,
    pub dry_run: bool,
    /// Set when a fatal error stopped the run before any rename.
    pub aborted: bool,
    pub outcomes: Vec<RenameOutcome>,
    pub collisions: Vec<Collision>,
    pub errors: Vec<Error>,
}

impl RunReport {
    pub fn new(requested: usize, dry_run: bool) -> Self {
        Self {
            requested,
            dry_run,
            ..Self::default()
        }
    }

    pub fn record_error(&mut self, error: Error) {
        if error.code.is_fatal() {
            self.aborted = true;
        }
        self.errors.push(error);
    }

    pub fn renamed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_renamed()).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(|e| e.code).collect()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            requested: self.requested,
            renamed: self.renamed(),
            failed: self
                .outcomes
                .iter()
                .filter(|o| o.status == OutcomeStatus::Failed)
                .count(),
            errors: self.errors.len(),
        }
    }

    /// `0` when no stage recorded an error, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }

    /// The closing line of every run.
    pub fn summary_line(&self) -> String {
        format!(
            "Renamed {} out of {} files given.",
            self.renamed(),
            self.requested
        )
    }
}
