//! The rename pipeline: validate, plan, resolve collisions, check
//! destinations, execute.

use super::collision::{resolve_collisions, CollisionPolicy};
use super::execute::{check_availability, execute_renames};
use super::fs::FileSystem;
use super::pattern::Pattern;
use super::plan::{build_plan, validate_files};
use super::report::Reporter;
use crate::config::RunOptions;
use crate::error::Error;
use crate::output::RunReport;
use std::path::PathBuf;

/// Rename `files` according to `pattern`.
///
/// Every error along the way is sent to `reporter` and recorded in the
/// returned report; nothing is propagated. The summary line is always the
/// last event reported.
pub fn rename_files(
    files: &[PathBuf],
    pattern: &Pattern,
    options: &RunOptions,
    fs: &dyn FileSystem,
    reporter: &mut dyn Reporter,
) -> RunReport {
    let mut report = RunReport::new(files.len(), options.dry_run);

    reporter.message(&format!("Expression: \"{}\"", pattern.expression()), false);
    reporter.message(&format!("Replacement: \"{}\"", pattern.replacement()), false);

    run_stages(files, pattern, options, fs, reporter, &mut report);

    for outcome in report.outcomes.iter().filter(|o| o.is_renamed()) {
        if let Some(destination) = &outcome.destination {
            reporter.message(
                &format!(
                    "\"{}\" => \"{}\"",
                    outcome.source.display(),
                    destination.display()
                ),
                options.dry_run,
            );
        }
    }
    reporter.message(&report.summary_line(), true);

    report
}

fn run_stages(
    files: &[PathBuf],
    pattern: &Pattern,
    options: &RunOptions,
    fs: &dyn FileSystem,
    reporter: &mut dyn Reporter,
    report: &mut RunReport,
) {
    let (valid, invalid) = validate_files(fs, files);
    if !invalid.is_empty() {
        for path in &invalid {
            fail(report, reporter, Error::rename_invalid_input(path));
        }
        return;
    }

    let plan = build_plan(&valid, pattern);

    let resolution = resolve_collisions(plan, CollisionPolicy::from_options(options));
    if !resolution.collisions.is_empty() {
        reporter.collisions(&resolution.collisions, resolution.fatal);
        report.collisions = resolution.collisions.clone();
    }
    if resolution.fatal {
        for collision in &resolution.collisions {
            report.record_error(Error::rename_collision(
                &collision.sources,
                &collision.destination,
            ));
        }
        return;
    }

    let (available, unavailable) = check_availability(fs, resolution.operations);
    for error in unavailable {
        fail(report, reporter, error);
    }

    for (outcome, error) in execute_renames(fs, &available, options.dry_run) {
        if let Some(error) = error {
            fail(report, reporter, error);
        }
        report.outcomes.push(outcome);
    }
}

fn fail(report: &mut RunReport, reporter: &mut dyn Reporter, error: Error) {
    reporter.failure(&error);
    report.record_error(error);
}
