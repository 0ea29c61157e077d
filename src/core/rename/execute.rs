//! Destination availability checks and rename execution.
//!
//! Both stages fan out over the worker pool and join before returning, with
//! results in plan order.

use super::fs::FileSystem;
use super::plan::RenameOperation;
use crate::error::Error;
use crate::output::{OutcomeStatus, RenameOutcome};
use rayon::prelude::*;

/// Keep the operations whose destination is free.
///
/// A destination is taken when any entry already exists there, symlinks
/// included, unless it is the source's own entry under a case-changed name
/// (a case-only rename on a case-insensitive filesystem). This is a point-in-time check: another process
/// can still create the destination before the rename runs.
pub fn check_availability(
    fs: &dyn FileSystem,
    operations: Vec<RenameOperation>,
) -> (Vec<RenameOperation>, Vec<Error>) {
    let checked: Vec<(RenameOperation, Option<Error>)> = operations
        .into_par_iter()
        .map(|op| {
            let taken = match &op.destination {
                Some(destination) => {
                    fs.entry_exists(destination) && !fs.same_entry(&op.source, destination)
                }
                None => false,
            };
            let error = match (&op.destination, taken) {
                (Some(destination), true) => {
                    Some(Error::rename_destination_exists(&op.source, destination))
                }
                _ => None,
            };
            (op, error)
        })
        .collect();

    let mut available = Vec::with_capacity(checked.len());
    let mut errors = Vec::new();
    for (op, error) in checked {
        match error {
            Some(error) => errors.push(error),
            None => available.push(op),
        }
    }

    (available, errors)
}

/// Rename every operation independently.
///
/// A failed rename is reported in its outcome and error slot and leaves the
/// others untouched. With `dry_run` nothing is moved and every operation with
/// a destination is reported as simulated.
pub fn execute_renames(
    fs: &dyn FileSystem,
    operations: &[RenameOperation],
    dry_run: bool,
) -> Vec<(RenameOutcome, Option<Error>)> {
    operations
        .par_iter()
        .map(|op| execute_one(fs, op, dry_run))
        .collect()
}

fn execute_one(
    fs: &dyn FileSystem,
    op: &RenameOperation,
    dry_run: bool,
) -> (RenameOutcome, Option<Error>) {
    let Some(destination) = &op.destination else {
        return (
            RenameOutcome {
                source: op.source.clone(),
                destination: None,
                status: OutcomeStatus::Excluded,
            },
            None,
        );
    };

    if dry_run {
        return (
            RenameOutcome {
                source: op.source.clone(),
                destination: Some(destination.clone()),
                status: OutcomeStatus::Simulated,
            },
            None,
        );
    }

    match fs.rename(&op.source, destination) {
        Ok(()) => (
            RenameOutcome {
                source: op.source.clone(),
                destination: Some(destination.clone()),
                status: OutcomeStatus::Renamed,
            },
            None,
        ),
        Err(err) => (
            RenameOutcome {
                source: op.source.clone(),
                destination: None,
                status: OutcomeStatus::Failed,
            },
            Some(Error::rename_failed(&op.source, destination, &err)),
        ),
    }
}
