use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use regex_rename::config::CONFIG_ENV_VAR;
use regex_rename::log_status;
use regex_rename::rename::{self, LocalFs, Pattern};
use regex_rename::validation;
use regex_rename::{FileConfig, RawFlags, RunOptions, RunReport, RunSummary};

use crate::commands::CmdResult;
use crate::output::{CliError, ConsoleReporter};

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Expression matched against each base name (`/body/flags` or bare)
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Replacement template ($1, $<name>, $&, $$)
    #[arg(value_name = "REPLACEMENT")]
    pub replacement: Option<String>,

    /// Files to rename
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Print extended information
    #[arg(short, long)]
    pub verbose: bool,

    /// Don't modify any file
    #[arg(short, long)]
    pub dry_run: bool,

    /// Force rename on collision conflicts
    #[arg(short = 'C', long)]
    pub ignore_collisions: bool,

    /// Continue renaming non-colliding files instead of stopping
    #[arg(short = 'S', long)]
    pub skip_problematic: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Load default options from a TOML file (falls back to $REGEX_RENAME_CONFIG)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl RenameArgs {
    fn flags(&self) -> RawFlags {
        RawFlags {
            verbose: self.verbose,
            dry_run: self.dry_run,
            ignore_collisions: self.ignore_collisions,
            skip_problematic: self.skip_problematic,
            json: self.json,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameOutput {
    pub expression: String,
    pub replacement: String,
    pub dry_run: bool,
    pub aborted: bool,
    pub renames: Vec<RenameSummary>,
    pub collisions: Vec<CollisionSummary>,
    pub errors: Vec<CliError>,
    pub summary: RunSummary,
    /// Whether the report should be printed as JSON.
    #[serde(skip)]
    pub json: bool,
}

#[derive(Serialize)]
pub struct RenameSummary {
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub status: regex_rename::OutcomeStatus,
}

#[derive(Serialize)]
pub struct CollisionSummary {
    pub sources: Vec<String>,
    pub destination: String,
}

pub fn run(args: RenameArgs) -> CmdResult<RenameOutput> {
    let flags = args.flags();
    let expression = validation::require(args.pattern, "PATTERN")?;
    let replacement = validation::require(args.replacement, "REPLACEMENT")?;
    validation::require_non_empty_vec(&args.files, "FILE")?;

    let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let file_config = match FileConfig::locate(args.config.as_deref(), from_env) {
        Some(path) => {
            let config = FileConfig::load(&path)?;
            log_status!("config", "Loaded defaults from {}", path.display());
            config
        }
        None => FileConfig::default(),
    };
    let options = RunOptions::normalize(flags, &file_config);

    let pattern = Pattern::compile(&expression, &replacement)?;

    let mut reporter = ConsoleReporter::new(options.verbose, options.json);
    let report = rename::rename_files(&args.files, &pattern, &options, &LocalFs, &mut reporter);
    let exit_code = report.exit_code();

    Ok((build_output(&pattern, &options, &report), exit_code))
}

fn build_output(pattern: &Pattern, options: &RunOptions, report: &RunReport) -> RenameOutput {
    RenameOutput {
        expression: pattern.expression().to_string(),
        replacement: pattern.replacement().to_string(),
        dry_run: report.dry_run,
        aborted: report.aborted,
        renames: report
            .outcomes
            .iter()
            .map(|o| RenameSummary {
                from: o.source.display().to_string(),
                to: o.destination.as_ref().map(|d| d.display().to_string()),
                status: o.status,
            })
            .collect(),
        collisions: report
            .collisions
            .iter()
            .map(|c| CollisionSummary {
                sources: c.sources.iter().map(|s| s.display().to_string()).collect(),
                destination: c.destination.display().to_string(),
            })
            .collect(),
        errors: report.errors.iter().map(CliError::from).collect(),
        summary: report.summary(),
        json: options.json,
    }
}
