//! Placeholder masking for traceback deduplication.
//!
//! Two tracebacks that differ only in a line number or in the value attached
//! to the exception are usually the same bug. Before counting, the variable
//! parts are replaced with sentinel placeholders so such blocks compare
//! equal; at display time the placeholders are swapped for short literal
//! masks (`###` and `***`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel substituted for a frame's line number.
pub const LINE_NUMBER_PLACEHOLDER: &str = "==TBGREP LINE NUMBER==";

/// Sentinel substituted for the exception value on the final line.
pub const EXC_VALUE_PLACEHOLDER: &str = "==TBGREP EXC VALUE==";

static EXC_VALUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r": .*").expect("valid regex"));

static LINE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(", line )\d+(, in )"#).expect("valid regex"));

/// Mask the exception value on a final traceback line.
///
/// Replaces the first `: <rest>` with `: ==TBGREP EXC VALUE==`. The regex
/// does not cross newlines, so a trailing newline survives.
pub(crate) fn mask_exception_value(line: &str) -> String {
    EXC_VALUE_RE
        .replace(line, format!(": {EXC_VALUE_PLACEHOLDER}"))
        .into_owned()
}

/// Mask every `", line <digits>, in ` occurrence on a frame line.
pub(crate) fn mask_line_numbers(line: &str) -> String {
    LINE_NUMBER_RE
        .replace_all(line, format!("${{1}}{LINE_NUMBER_PLACEHOLDER}${{2}}"))
        .into_owned()
}

/// Swap placeholders for their short display masks.
///
/// Only the placeholders a normalization flag actually produced are
/// substituted, so stray `###` in real traceback text is never invented.
pub(crate) fn apply_display_masks(
    text: &str,
    ignore_line_numbers: bool,
    ignore_exception_values: bool,
) -> String {
    let mut text = text.to_string();
    if ignore_line_numbers {
        text = text.replace(LINE_NUMBER_PLACEHOLDER, "###");
    }
    if ignore_exception_values {
        text = text.replace(EXC_VALUE_PLACEHOLDER, "***");
    }
    text
}
