//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Diagnostics go to stderr; dataset views go to stdout.

use std::fmt::Display;

use colored::Colorize;

/// Width labels are padded to in `field`, so summary values line up.
const LABEL_WIDTH: usize = 9;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print `label: value` with the label padded and green
pub fn field(label: &str, value: &(impl Display + ?Sized)) {
    let padded = format!("{:<width$}", format!("{label}:"), width = LABEL_WIDTH + 1);
    println!("{} {}", padded.green(), value);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented list entry
pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print dimmed note, e.g. result counts
pub fn note(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg.to_string().dimmed());
}

/// Print as is (trees, table rows, JSON)
pub fn plain(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
