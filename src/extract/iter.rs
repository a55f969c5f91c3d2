//! Extraction drivers.
//!
//! Lazy, pull-based iterators that feed lines into a [`TracebackExtractor`]:
//! forward over any line sequence, forward over a file, and backwards over a
//! file via [`BackwardsLines`]. All of them are single-pass and yield blocks
//! as soon as they complete.

use std::collections::VecDeque;
use std::io::{self, BufRead, Seek};

use crate::revlines::BackwardsLines;

use super::machine::{ExtractorOptions, TracebackExtractor, TRACEBACK_HEADER};

/// Iterator over tracebacks found in a sequence of lines.
///
/// Produced by [`tracebacks_from_lines`].
pub struct Tracebacks<I> {
    lines: I,
    extractor: TracebackExtractor,
}

impl<I> Iterator for Tracebacks<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(block) = self.extractor.process(line.as_ref()) {
                return Some(block);
            }
        }
        None
    }
}

/// Yield each traceback found in `lines`, in encounter order.
///
/// The lines can come from any iterable of strings; trailing newlines are
/// preserved in the emitted blocks.
///
/// # Example
///
/// ```
/// use tbgrep::tracebacks_from_lines;
///
/// let log = "boot\nTraceback (most recent call last):\n  File \"a.py\", line 1, in f\nKeyError: 'x'\ndone\n";
/// let blocks: Vec<String> = tracebacks_from_lines(log.split_inclusive('\n')).collect();
/// assert_eq!(blocks.len(), 1);
/// ```
pub fn tracebacks_from_lines<I>(lines: I) -> Tracebacks<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Tracebacks {
        lines: lines.into_iter(),
        extractor: TracebackExtractor::new(ExtractorOptions::default()),
    }
}

/// Forward line iterator that keeps each line's trailing newline.
///
/// `BufRead::lines` strips terminators, which would corrupt reassembled
/// blocks; this reader preserves them, like iterating a Python file object.
struct LinesWithEndings<R> {
    reader: R,
}

impl<R: BufRead> Iterator for LinesWithEndings<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(err) => Some(Err(err)),
        }
    }
}

enum Mode<R> {
    Forward {
        lines: LinesWithEndings<R>,
        extractor: TracebackExtractor,
    },
    Reverse {
        lines: BackwardsLines<R>,
        pending: VecDeque<String>,
    },
}

/// Iterator over tracebacks found in a file, forward or backwards.
///
/// Produced by [`tracebacks_from_file`].
pub struct FileTracebacks<R> {
    mode: Mode<R>,
}

impl<R: BufRead + Seek> FileTracebacks<R> {
    /// Set the reverse reader's block size. No effect in forward mode.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        if let Mode::Reverse { lines, .. } = &mut self.mode {
            lines.set_block_size(block_size);
        }
        self
    }
}

impl<R: BufRead + Seek> Iterator for FileTracebacks<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.mode {
            Mode::Forward { lines, extractor } => {
                for line in lines.by_ref() {
                    match line {
                        Ok(line) => {
                            if let Some(block) = extractor.process(&line) {
                                return Some(Ok(block));
                            }
                        }
                        Err(err) => return Some(Err(err)),
                    }
                }
                None
            }
            Mode::Reverse { lines, pending } => {
                for line in lines.by_ref() {
                    let line = match line {
                        Ok(line) => line,
                        Err(err) => return Some(Err(err)),
                    };
                    let starts_block = line.contains(TRACEBACK_HEADER);
                    pending.push_front(line);
                    if starts_block {
                        // Replay the buffered span forward through a fresh
                        // extractor; it contains exactly one header.
                        let block = tracebacks_from_lines(pending.drain(..)).next();
                        match block {
                            Some(block) => return Some(Ok(block)),
                            // Unterminated block at end of file: drop the
                            // span and keep scanning earlier content.
                            None => continue,
                        }
                    }
                }
                None
            }
        }
    }
}

/// Yield each traceback found in a file.
///
/// With `reverse` set, the file is read from the end via [`BackwardsLines`]
/// and blocks come out physically last-to-first; lines are buffered only
/// from one header back to the previously seen line, so finding the most
/// recent traceback touches just the tail of the file.
pub fn tracebacks_from_file<R: BufRead + Seek>(reader: R, reverse: bool) -> FileTracebacks<R> {
    let mode = if reverse {
        Mode::Reverse {
            lines: BackwardsLines::new(reader),
            pending: VecDeque::new(),
        }
    } else {
        Mode::Forward {
            lines: LinesWithEndings { reader },
            extractor: TracebackExtractor::new(ExtractorOptions::default()),
        }
    };
    FileTracebacks { mode }
}

/// The last traceback physically present in a file, or `None`.
///
/// Reads backwards and stops as soon as the block is assembled.
pub fn last_traceback_from_file<R: BufRead + Seek>(reader: R) -> io::Result<Option<String>> {
    tracebacks_from_file(reader, true).next().transpose()
}
