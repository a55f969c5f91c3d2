//! tbgrep — Python traceback extractor.
//!
//! A library (and CLI) for pulling traceback blocks out of arbitrary text
//! streams such as log files, optionally deduplicating them with
//! configurable normalization, and optionally scanning a file backwards to
//! find only the most recent occurrences without reading the whole file.

pub mod config;
pub mod extract;
pub mod revlines;

pub use config::Config;
pub use extract::{
    last_traceback_from_file, tracebacks_from_file, tracebacks_from_lines, ExtractorOptions,
    FileTracebacks, TracebackExtractor, Tracebacks, TRACEBACK_HEADER,
};
pub use revlines::BackwardsLines;
