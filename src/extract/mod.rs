//! Traceback extraction.
//!
//! The state machine ([`TracebackExtractor`]) recognizes the start and
//! extent of a traceback block in a stream of lines; the driver functions
//! ([`tracebacks_from_lines`], [`tracebacks_from_file`],
//! [`last_traceback_from_file`]) compose it with forward and backwards line
//! sources. Normalization and the stats report live in their own submodules.

mod iter;
mod machine;
mod normalize;
mod report;

pub use iter::{
    last_traceback_from_file, tracebacks_from_file, tracebacks_from_lines, FileTracebacks,
    Tracebacks,
};
pub use machine::{ExtractorOptions, TracebackExtractor, TRACEBACK_HEADER};
pub use normalize::{EXC_VALUE_PLACEHOLDER, LINE_NUMBER_PLACEHOLDER};
