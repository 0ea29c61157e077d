//! Event sink for pipeline progress and failures.
//!
//! The pipeline only hands over semantic content; formatting, colour and
//! verbosity gating belong to the implementation.

use super::collision::Collision;
use crate::error::{Error, ErrorCode};

pub trait Reporter {
    /// Informational line. `force` marks lines shown even when not verbose.
    fn message(&mut self, message: &str, force: bool);

    /// An error from any stage.
    fn failure(&mut self, error: &Error);

    /// Colliding destinations. `fatal` is false when the run continues
    /// without the colliding files.
    fn collisions(&mut self, collisions: &[Collision], fatal: bool);
}

/// A reported event, as captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Message { text: String, forced: bool },
    Failure { code: ErrorCode, message: String },
    Collisions { collisions: Vec<Collision>, fatal: bool },
}

/// Reporter that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<ErrorCode> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Failure { code, .. } => Some(*code),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Message { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn message(&mut self, message: &str, force: bool) {
        self.events.push(ReportEvent::Message {
            text: message.to_string(),
            forced: force,
        });
    }

    fn failure(&mut self, error: &Error) {
        self.events.push(ReportEvent::Failure {
            code: error.code,
            message: error.message.clone(),
        });
    }

    fn collisions(&mut self, collisions: &[Collision], fatal: bool) {
        self.events.push(ReportEvent::Collisions {
            collisions: collisions.to_vec(),
            fatal,
        });
    }
}
