mod console;
mod response;

pub use console::ConsoleReporter;
pub use response::{map_cmd_result_to_json, print_json_result, CliError};
