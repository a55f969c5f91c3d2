//! The traceback extraction state machine.
//!
//! [`TracebackExtractor`] consumes a forward sequence of lines, one call per
//! line, and emits a completed traceback block whenever a line breaks the
//! indentation pattern that the traceback format guarantees. It holds at
//! most one in-progress block at a time.

use std::collections::HashMap;

use tracing::trace;

use super::normalize::{mask_exception_value, mask_line_numbers};
use super::report;

/// The fixed literal that starts every traceback.
///
/// Matching is substring search, not anchored to the line start: whatever
/// prefix a logging framework put in front of the header is measured once
/// and stripped from every line of the block.
pub const TRACEBACK_HEADER: &str = "Traceback (most recent call last):";

/// Extraction configuration.
///
/// With `stats` off (the default), completed blocks are only returned from
/// [`TracebackExtractor::process`]. With `stats` on, every completed block is
/// also normalized per the two `ignore_*` flags and counted.
#[derive(Debug, Clone, Default)]
pub struct ExtractorOptions {
    /// Count unique tracebacks instead of just emitting them.
    pub stats: bool,
    /// Treat blocks differing only in frame line numbers as equal.
    pub ignore_line_numbers: bool,
    /// Treat blocks differing only in the exception value as equal.
    pub ignore_exception_values: bool,
}

/// An in-progress block: the stripped lines collected so far and the column
/// the header was found at. `index` is fixed for the life of the block.
struct Block {
    lines: Vec<String>,
    index: usize,
}

/// Line-by-line traceback extractor.
///
/// Create one per logical stream; it must not be shared across scans.
///
/// # Example
///
/// ```
/// use tbgrep::{ExtractorOptions, TracebackExtractor};
///
/// let mut extractor = TracebackExtractor::new(ExtractorOptions::default());
/// let lines = [
///     "Traceback (most recent call last):\n",
///     "  File \"app.py\", line 1, in <module>\n",
///     "KeyError: 'foo'\n",
/// ];
/// let mut blocks = lines.iter().filter_map(|line| extractor.process(line));
/// assert_eq!(blocks.next().unwrap(), lines.concat());
/// ```
pub struct TracebackExtractor {
    options: ExtractorOptions,
    block: Option<Block>,
    /// Occurrence counts in insertion order, with an index for O(1) lookup.
    counts: Vec<(String, u64)>,
    seen: HashMap<String, usize>,
}

impl TracebackExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractorOptions) -> Self {
        Self {
            options,
            block: None,
            counts: Vec::new(),
            seen: HashMap::new(),
        }
    }

    /// Feed one line; returns the completed block if this line ended one.
    ///
    /// Lines are treated as opaque strings: trailing newlines are neither
    /// required nor stripped. An empty line is the end-of-stream sentinel
    /// and never terminates a block, which means a traceback that runs to
    /// the very end of input without a following non-indented line is never
    /// emitted. That matches the historical behavior and callers depend on
    /// trailing partial blocks being dropped.
    pub fn process(&mut self, line: &str) -> Option<String> {
        let Some(block) = self.block.as_mut() else {
            if let Some(index) = line.find(TRACEBACK_HEADER) {
                trace!(column = index, "traceback header found");
                self.block = Some(Block {
                    lines: vec![line[index..].to_string()],
                    index,
                });
            }
            return None;
        };

        if line.is_empty() {
            return None;
        }
        // Lines shorter than the prefix strip to empty, like the header's
        // prefix columns they are replacing.
        let stripped = line.get(block.index..).unwrap_or("");
        block.lines.push(stripped.to_string());
        if stripped.is_empty() || stripped.starts_with(' ') {
            return None;
        }

        let Block { lines, .. } = self.block.take()?;
        let emitted = lines.concat();
        trace!(lines = lines.len(), "traceback block complete");
        if self.options.stats {
            self.record(lines);
        }
        Some(emitted)
    }

    /// Normalize a completed block per the options and bump its count.
    fn record(&mut self, mut lines: Vec<String>) {
        if self.options.ignore_exception_values {
            if let Some(last) = lines.last_mut() {
                *last = mask_exception_value(last);
            }
        }
        if self.options.ignore_line_numbers && lines.len() > 2 {
            let last = lines.len() - 1;
            for line in &mut lines[1..last] {
                *line = mask_line_numbers(line);
            }
        }
        let key = lines.concat();
        match self.seen.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.seen.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Occurrence counts sorted ascending by count.
    ///
    /// Sorted by count only; order among equal counts is insertion order.
    pub fn stats(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(text, count)| (text.as_str(), *count))
            .collect();
        entries.sort_by_key(|&(_, count)| count);
        entries
    }

    /// Render the occurrence report for all counted blocks.
    pub fn render_report(&self) -> String {
        report::render(&self.stats(), &self.options)
    }
}
