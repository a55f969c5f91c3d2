//! Backwards line reader.
//!
//! [`BackwardsLines`] reads a seekable stream in reverse, yielding one line
//! at a time starting from the last physical line, without materializing the
//! whole file. This is what makes "find the most recent traceback in a
//! multi-gigabyte log" cheap: only the tail of the file is ever read.
//!
//! # Algorithm
//!
//! A byte buffer holds the unconsumed tail of the file. Each step splits off
//! everything after the last newline in the buffer as the next line. When the
//! buffer runs out of newlines, a fixed-size block immediately preceding the
//! buffer is read and prepended; once that read reaches offset 0, a single
//! synthetic `\n` is injected at the front so the physically first line is
//! delimited like every other one.
//!
//! Every yielded line carries its trailing `\n`, except the line that ends
//! exactly at end of file when the file itself had no trailing newline.
//! Concatenating all yielded lines in reverse therefore reproduces the file
//! byte-for-byte.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use tbgrep::BackwardsLines;
//!
//! let lines: Vec<String> = BackwardsLines::new(Cursor::new("a\nb\nc\n"))
//!     .collect::<std::io::Result<_>>()
//!     .unwrap();
//! assert_eq!(lines, ["c\n", "b\n", "a\n"]);
//! ```

use std::io::{self, Read, Seek, SeekFrom};

use tracing::trace;

/// Default size of each backwards read, in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Iterator over the lines of a seekable stream, last line first.
///
/// No I/O happens until the first call to `next()`; construction is
/// infallible and read/seek errors surface as iterator items.
pub struct BackwardsLines<R> {
    inner: R,
    buf: Vec<u8>,
    /// Unread bytes remaining before the buffer.
    pos: u64,
    block_size: usize,
    trailing_newline: bool,
    started: bool,
    skipped_artifact: bool,
    yielded_any: bool,
    done: bool,
}

impl<R: Read + Seek> BackwardsLines<R> {
    /// Create a reverse line reader with the default block size.
    pub fn new(inner: R) -> Self {
        Self::with_block_size(inner, DEFAULT_BLOCK_SIZE)
    }

    /// Create a reverse line reader that refills `block_size` bytes at a time.
    pub fn with_block_size(inner: R, block_size: usize) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
            block_size: block_size.max(1),
            trailing_newline: false,
            started: false,
            skipped_artifact: false,
            yielded_any: false,
            done: false,
        }
    }

    /// Change the refill size. Only meaningful before iteration starts.
    pub(crate) fn set_block_size(&mut self, block_size: usize) {
        self.block_size = block_size.max(1);
    }

    /// Position the cursor at end of file and record whether the file ends
    /// with a newline. That bit decides two boundary behaviors: the empty
    /// split after a final `\n` is skipped, and the first yielded line only
    /// gets a `\n` restored if the file actually had one.
    fn init(&mut self) -> io::Result<()> {
        let len = self.inner.seek(SeekFrom::End(0))?;
        self.pos = len;
        self.trailing_newline = if len > 0 {
            self.inner.seek(SeekFrom::Start(len - 1))?;
            let mut last = [0u8; 1];
            self.inner.read_exact(&mut last)?;
            last[0] == b'\n'
        } else {
            false
        };
        Ok(())
    }

    /// Read the block immediately preceding the buffer and prepend it.
    fn refill(&mut self) -> io::Result<()> {
        let toread = (self.block_size as u64).min(self.pos);
        let start = self.pos - toread;
        self.inner.seek(SeekFrom::Start(start))?;
        let mut chunk = vec![0u8; toread as usize];
        self.inner.read_exact(&mut chunk)?;
        chunk.append(&mut self.buf);
        self.buf = chunk;
        self.pos = start;
        if self.pos == 0 {
            // Synthetic delimiter for the physically first line.
            self.buf.insert(0, b'\n');
        }
        trace!(pos = self.pos, buffered = self.buf.len(), "refilled reverse buffer");
        Ok(())
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        if !self.started {
            self.started = true;
            self.init()?;
        }
        loop {
            let Some(newline_pos) = self.buf.iter().rposition(|&b| b == b'\n') else {
                if self.pos == 0 {
                    return Ok(None);
                }
                self.refill()?;
                continue;
            };
            let mut line = self.buf.split_off(newline_pos + 1);
            self.buf.truncate(newline_pos);
            if self.trailing_newline && !self.skipped_artifact {
                // The very first split lands on the file's final newline and
                // produces an empty artifact, not a line. Skipped exactly
                // once; a real blank line right before it still comes out.
                self.skipped_artifact = true;
                debug_assert!(line.is_empty());
                continue;
            }
            if self.yielded_any || self.trailing_newline {
                line.push(b'\n');
            }
            self.yielded_any = true;
            return String::from_utf8(line).map(Some).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    NonUtf8Line { offset: self.pos },
                )
            });
        }
    }
}

/// A line could not be decoded as UTF-8.
#[derive(Debug, thiserror::Error)]
#[error("line near byte offset {offset} is not valid UTF-8")]
pub struct NonUtf8Line {
    /// File offset of the buffer the line came from.
    pub offset: u64,
}

impl<R: Read + Seek> Iterator for BackwardsLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
