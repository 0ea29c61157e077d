use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};

mod commands;
mod output;
mod tty;

use commands::rename::RenameArgs;
use regex_rename::{Error, ErrorCode};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "regex-rename")]
#[command(version = VERSION)]
#[command(about = "Rename files by applying a regular expression to their base names")]
#[command(override_usage = "regex-rename [OPTION]... PATTERN REPLACEMENT FILE...")]
#[command(disable_help_flag = true)]
struct Cli {
    /// Show this help
    #[arg(short, long, action = ArgAction::SetTrue)]
    help: bool,

    #[command(flatten)]
    args: RenameArgs,
}

fn print_usage() {
    let mut cmd = Cli::command();
    eprintln!("{}", cmd.render_help());
}

fn print_error(err: &Error) {
    match err.details.get("error").and_then(|v| v.as_str()) {
        Some(detail) => eprintln!("ERROR: {}: {}", err.message, detail),
        None => eprintln!("ERROR: {}", err.message),
    }
    for hint in &err.hints {
        eprintln!("hint: {}", hint.message);
    }
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let exit_code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            return std::process::ExitCode::from(exit_code_to_u8(exit_code));
        }
    };

    if cli.help {
        print_usage();
        return std::process::ExitCode::SUCCESS;
    }

    let json_flag = cli.args.json;
    let result = commands::rename::run(cli.args);

    let json = match &result {
        Ok((data, _)) => data.json,
        Err(_) => json_flag,
    };

    if let Err(err) = &result {
        if !json {
            print_error(err);
        }
        if err.code == ErrorCode::ValidationMissingArgument {
            print_usage();
        }
    }

    let (json_result, exit_code) = output::map_cmd_result_to_json(result);
    if json {
        let _ = output::print_json_result(json_result);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
