//! Terminal detection for CLI output.

use std::io::{self, IsTerminal};

pub fn is_stderr_tty() -> bool {
    io::stderr().is_terminal()
}

// log_status! macro is defined in lib.rs (#[macro_export]) and available crate-wide.
