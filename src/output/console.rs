//! Line-oriented console output for rename runs.

use regex_rename::rename::{Collision, Reporter};
use regex_rename::Error;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Writes progress to stdout and problems to stderr.
///
/// Progress lines are dropped unless verbose or forced, and dropped entirely
/// when stdout is reserved for JSON. Only stderr lines are coloured, and only
/// when stderr is a terminal.
pub struct ConsoleReporter {
    verbose: bool,
    quiet_stdout: bool,
    color: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool, quiet_stdout: bool) -> Self {
        Self {
            verbose,
            quiet_stdout,
            color: crate::tty::is_stderr_tty(),
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

fn format_collisions(collisions: &[Collision]) -> String {
    let blocks: Vec<String> = collisions
        .iter()
        .map(|collision| {
            let sources = collision
                .sources
                .iter()
                .map(|s| format!("   \"{}\"", s.display()))
                .collect::<Vec<_>>()
                .join(",\n");
            format!("\n{}\n=> \"{}\"\n", sources, collision.destination.display())
        })
        .collect();
    format!("Colliding files: {}", blocks.join("\n"))
}

impl Reporter for ConsoleReporter {
    fn message(&mut self, message: &str, force: bool) {
        if self.quiet_stdout || !(self.verbose || force) {
            return;
        }
        println!("{}", message);
    }

    fn failure(&mut self, error: &Error) {
        eprintln!("{}", self.paint(RED, &format!("ERROR: {}", error.message)));
    }

    fn collisions(&mut self, collisions: &[Collision], fatal: bool) {
        let text = format_collisions(collisions);
        if fatal {
            eprintln!("{}", self.paint(RED, &format!("ERROR: {}", text)));
        } else {
            eprintln!("{}", self.paint(YELLOW, &format!("WARNING: {}", text)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn collisions_render_one_block_per_destination() {
        let text = format_collisions(&[Collision {
            sources: vec![PathBuf::from("x.txt"), PathBuf::from("y.txt")],
            destination: PathBuf::from("z.txt"),
        }]);
        assert_eq!(
            text,
            "Colliding files: \n   \"x.txt\",\n   \"y.txt\"\n=> \"z.txt\"\n"
        );
    }

    #[test]
    fn paint_is_plain_without_terminal() {
        let reporter = ConsoleReporter {
            verbose: false,
            quiet_stdout: false,
            color: false,
        };
        assert_eq!(reporter.paint(RED, "ERROR: x"), "ERROR: x");
    }
}
