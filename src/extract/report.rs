//! Occurrence report rendering.
//!
//! Presentation layer for stats mode: each unique traceback gets a banner
//! with its occurrence count, the de-normalized block text, and the report
//! closes with a divider and a summary line. The banner misspelling
//! "occurence" is part of the historical output format and is kept so
//! downstream scrapers keep working.

use super::machine::ExtractorOptions;
use super::normalize::apply_display_masks;

const REPORT_WIDTH: usize = 80;

fn pluralize(count: u64, name: &str) -> String {
    if count == 1 {
        name.to_string()
    } else {
        format!("{name}s")
    }
}

/// Banner line: `== <label> ` padded with `=` to 80 columns.
fn banner(label: &str) -> String {
    let pad = (REPORT_WIDTH - 4).saturating_sub(label.len());
    format!("== {} {}", label, "=".repeat(pad))
}

/// Render the report for `stats` entries, assumed sorted ascending by count.
pub(crate) fn render(stats: &[(&str, u64)], options: &ExtractorOptions) -> String {
    let mut out = String::new();
    for (text, count) in stats {
        let label = format!("{} {}", count, pluralize(*count, "occurence"));
        out.push_str(&banner(&label));
        out.push_str("\n\n");
        out.push_str(&apply_display_masks(
            text,
            options.ignore_line_numbers,
            options.ignore_exception_values,
        ));
        out.push('\n');
    }
    out.push_str(&"=".repeat(REPORT_WIDTH));
    out.push('\n');
    let total = stats.len() as u64;
    out.push_str(&format!(
        "{} unique {} extracted\n",
        total,
        pluralize(total, "traceback")
    ));
    out
}
