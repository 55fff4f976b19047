//! Pure formatting functions for CLI output.
//!
//! Diagnostic logging goes through `log`; these helpers print the
//! user-facing results and failures.

use crate::workflow::WorkflowResult;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Print the run's named outputs in `name=value` form.
pub fn display_outputs(result: &WorkflowResult) {
    println!("version={}", result.version);
    println!("tag={}", result.tag);
}
