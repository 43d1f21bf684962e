//! Operator-facing console output.
//!
//! Every line the bootstrap prints is prefixed with one of four fixed
//! status markers. Diagnostics go through `tracing` instead; this module
//! is only for the human driving the tool.

use std::fmt::Display;

pub const SUCCESS: &str = "✅";
pub const INFO: &str = "ℹ️";
pub const ERROR: &str = "❌";
pub const QUESTION: &str = "❓";

pub fn success(message: impl Display) {
    println!("{SUCCESS} {message}");
}

pub fn info(message: impl Display) {
    println!("{INFO} {message}");
}

pub fn error(message: impl Display) {
    eprintln!("{ERROR} {message}");
}

/// Format a yes/no prompt line (without printing it).
pub fn prompt(message: impl Display) -> String {
    format!("{QUESTION} {message} (y/n): ")
}
