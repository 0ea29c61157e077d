//! Pattern compilation and base-name substitution.
//!
//! Expressions come either delimiter-wrapped with trailing flags
//! (`/body/flags`, `#body#flags`) or bare, in which case the whole string is
//! the expression. Replacement templates use `$` placeholders:
//!
//! - `$1` … `$99`: numbered capture group
//! - `$<name>`: named capture group
//! - `$&`: whole match
//! - `$$`: literal dollar
//!
//! Anything else following `$` is kept literally.

use super::fs::strip_cur_dir;
use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use std::path::{is_separator, Path, PathBuf};

const DELIMITERS: &[char] = &['/', '#'];

/// A compiled expression plus its replacement template.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    expression: String,
    replacement: String,
    template: String,
    global: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Flags {
    global: bool,
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
    ignore_whitespace: bool,
}

impl Flags {
    fn parse(flags: &str, expression: &str) -> Result<Self> {
        let mut parsed = Flags::default();
        for flag in flags.chars() {
            match flag {
                'g' => parsed.global = true,
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_matches_new_line = true,
                'x' => parsed.ignore_whitespace = true,
                // Unicode matching is always on.
                'u' => {}
                other => {
                    return Err(Error::validation_invalid_pattern(
                        expression,
                        format!("Unsupported flag '{}'. Use: g, i, m, s, u, x", other),
                    ))
                }
            }
        }
        Ok(parsed)
    }
}

/// Split `/body/flags` or `#body#flags` into body and flags.
///
/// Returns `None` when the expression is not delimiter-wrapped, the body is
/// empty, or the trailing part contains anything but ASCII letters.
fn split_delimited(expression: &str) -> Option<(String, &str)> {
    let delimiter = expression.chars().next().filter(|c| DELIMITERS.contains(c))?;
    let rest = &expression[delimiter.len_utf8()..];
    let close = rest.rfind(delimiter)?;
    let body = &rest[..close];
    let flags = &rest[close + delimiter.len_utf8()..];

    if body.is_empty() || !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some((body.replace("\\/", "/"), flags))
}

/// Rewrite a `$`-style template into the syntax understood by `regex`.
fn translate_template(template: &str, regex: &Regex) -> String {
    let group_count = regex.captures_len() - 1;
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                out.push_str("$$");
            }
            Some('&') => {
                chars.next();
                out.push_str("${0}");
            }
            Some(first) if first.is_ascii_digit() => {
                chars.next();
                let first_value = first.to_digit(10).unwrap_or(0) as usize;
                let second = chars.peek().copied().filter(|d| d.is_ascii_digit());

                // Prefer the two-digit group when it exists, mirroring `$12`
                // falling back to `$1` followed by a literal `2`.
                if let Some(second) = second {
                    let value = first_value * 10 + second.to_digit(10).unwrap_or(0) as usize;
                    if value >= 1 && value <= group_count {
                        chars.next();
                        out.push_str(&format!("${{{}}}", value));
                        continue;
                    }
                }

                if first_value >= 1 && first_value <= group_count {
                    out.push_str(&format!("${{{}}}", first_value));
                } else {
                    out.push_str("$$");
                    out.push(first);
                }
            }
            Some('<') => {
                let lookahead: String = chars.clone().skip(1).take_while(|&c| c != '>').collect();
                let closed = chars.clone().nth(1 + lookahead.chars().count()) == Some('>');
                let known = regex.capture_names().flatten().any(|n| n == lookahead);

                if closed && known {
                    // Consume `<name>`.
                    for _ in 0..lookahead.chars().count() + 2 {
                        chars.next();
                    }
                    out.push_str(&format!("${{{}}}", lookahead));
                } else {
                    out.push_str("$$");
                }
            }
            _ => out.push_str("$$"),
        }
    }

    out
}

impl Pattern {
    /// Compile a user-supplied expression and replacement template.
    pub fn compile(expression: &str, replacement: &str) -> Result<Self> {
        let (body, flags) = match split_delimited(expression) {
            Some((body, flags)) => (body, Flags::parse(flags, expression)?),
            None => (expression.to_string(), Flags::default()),
        };

        let regex = RegexBuilder::new(&body)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .ignore_whitespace(flags.ignore_whitespace)
            .build()
            .map_err(|e| Error::validation_invalid_pattern(expression, e.to_string()))?;

        let template = translate_template(replacement, &regex);

        Ok(Pattern {
            regex,
            expression: expression.to_string(),
            replacement: replacement.to_string(),
            template,
            global: flags.global,
        })
    }

    /// The expression as the user supplied it.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The replacement template as the user supplied it.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Substitute the first match (every match with `g`) in `name`.
    pub fn replace(&self, name: &str) -> String {
        if self.global {
            self.regex.replace_all(name, self.template.as_str()).into_owned()
        } else {
            self.regex.replace(name, self.template.as_str()).into_owned()
        }
    }

    /// Compute the renamed path for `path`, or `None` when its base name does
    /// not match.
    ///
    /// Only the final path segment is matched and substituted; the directory
    /// portion is kept as given, minus a leading `./`. Base names that are not valid UTF-8 never
    /// match, and a substitution that leaves nothing to name the file is not a
    /// rename.
    pub fn renamed_path(&self, path: &Path) -> Option<PathBuf> {
        let name = path.file_name()?.to_str()?;
        if !self.is_match(name) {
            return None;
        }

        let new_name = self.replace(name);
        let new_name = new_name.trim_start_matches(is_separator);
        if new_name.is_empty() {
            return None;
        }

        Some(match path.parent().map(strip_cur_dir) {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(new_name),
            _ => PathBuf::from(new_name),
        })
    }
}
