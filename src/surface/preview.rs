//! Terminal preview of converted markup.
//!
//! The markup is trusted passthrough: printed verbatim between dimmed
//! rules, never parsed or reformatted.

use std::io::{Write, stdout};

use owo_colors::OwoColorize;

use crate::convert::SvgMarkup;

const RULE_WIDTH: usize = 60;

/// Print the markup block to stdout.
pub fn print_preview(markup: &SvgMarkup) {
    let rule = "─".repeat(RULE_WIDTH);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{}", rule.dimmed()).ok();
    writeln!(stdout, "{markup}").ok();
    writeln!(stdout, "{}", rule.dimmed()).ok();
    stdout.flush().ok();
}
