//! CLI definitions for tbgrep
//!
//! Kept separate from main.rs so the completions generator can rebuild the
//! command from the derive structure.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use clap_complete::Shell as CompletionShell;

/// Build clap styles for consistent CLI appearance.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "tbgrep")]
#[command(about = "Extract Python tracebacks from log files and arbitrary text")]
#[command(
    long_about = "tbgrep - Python Traceback Extractor

Scans log files (or stdin) for Python traceback blocks and prints each one
with any log-line prefix stripped. Stats mode deduplicates the tracebacks
and reports occurrence counts instead.

EXAMPLES:
    tbgrep error.log                     Print every traceback in the file
    cat *.log | tbgrep                   Scan stdin
    tbgrep --stats error.log             Count unique tracebacks
    tbgrep --stats --ignore-line-numbers error.log
                                         Fold variants that differ only in
                                         frame line numbers
    tbgrep --last huge.log               Most recent traceback, read from
                                         the end of the file"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Report unique tracebacks and the number of occurrences
    #[arg(long)]
    pub stats: bool,

    /// When reporting unique tracebacks, treat stack traces with varying
    /// line numbers as the same
    #[arg(long)]
    pub ignore_line_numbers: bool,

    /// When reporting unique tracebacks, treat stack traces with varying
    /// values for the exception as the same
    #[arg(long)]
    pub ignore_exception_values: bool,

    /// Print only the most recent traceback of each file, scanning
    /// backwards from the end (requires real files, not stdin)
    #[arg(long, conflicts_with = "stats")]
    pub last: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<CompletionShell>,

    /// The files to process (stdin when omitted)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}
