// Public modules
pub mod config;
pub mod error;
pub mod output;
pub mod rename;

// Re-export common types for convenience
pub use config::{FileConfig, RawFlags, RunOptions};
pub use error::{Error, ErrorCode, Result};
pub use output::{OutcomeStatus, RenameOutcome, RunReport, RunSummary};
