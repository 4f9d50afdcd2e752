// Logical line reader
//
// Pulls fixed-size chunks from a CharSource and cuts them into logical
// lines: a line ends at an unquoted '\n'. The quote mode survives buffer
// refills, so a quoted field may span any number of chunks, and the result
// never depends on the buffer size.

use tracing::trace;

use super::source::CharSource;
use crate::config::DEFAULT_BUFFER_CAPACITY;
use crate::core::ScanMode;
use crate::error::{CsvError, Result};

/// Stateful reader of logical CSV lines.
pub struct LineReader<S> {
    source: S,
    /// Refill buffer
    buf: Box<[u8]>,
    /// Next unscanned byte in `buf`
    pos: usize,
    /// End of valid data in `buf`
    filled: usize,
    /// Quote state carried across refills
    mode: ScanMode,
    /// Bytes of the line being assembled
    line: Vec<u8>,
    /// Source returned end-of-stream and the buffer is drained
    exhausted: bool,
    lines_read: u64,
}

impl<S: CharSource> LineReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_capacity(source, DEFAULT_BUFFER_CAPACITY)
    }

    /// Create a reader with a refill buffer of `capacity` bytes (minimum 1).
    pub fn with_capacity(source: S, capacity: usize) -> Self {
        LineReader {
            source,
            buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
            pos: 0,
            filled: 0,
            mode: ScanMode::Line,
            line: Vec::new(),
            exhausted: false,
            lines_read: 0,
        }
    }

    /// Read the next logical line.
    ///
    /// The terminating `\n` and a `\r` right before it are stripped. Returns
    /// `Ok(None)` at end of stream, which is distinct from `Ok(Some(""))` for
    /// an empty line. If the stream ends inside a quoted field the partial
    /// line is discarded and `MalformedInput` is returned; the reader is then
    /// exhausted.
    ///
    /// A source error aborts the call but keeps the partial line and its
    /// quote mode, so a retry resumes the same line where it stopped.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        if self.exhausted {
            return Ok(None);
        }
        // Bytes left over from a call aborted by a source error
        let mut started = !self.line.is_empty();

        loop {
            if self.pos == self.filled && !self.refill()? {
                self.exhausted = true;
                if self.mode.in_quotes() {
                    self.mode = ScanMode::Line;
                    self.line.clear();
                    return Err(CsvError::MalformedInput {
                        line: Some(self.lines_read + 1),
                    });
                }
                if !started {
                    return Ok(None);
                }
                return self.finish_line(false).map(Some);
            }
            started = true;

            let chunk = &self.buf[self.pos..self.filled];
            let mut mode = self.mode;
            let mut line_end = None;
            for (i, &byte) in chunk.iter().enumerate() {
                match (mode, byte) {
                    (_, b'"') => mode = mode.toggle(),
                    (ScanMode::Line, b'\n') => {
                        line_end = Some(i);
                        break;
                    }
                    _ => {}
                }
            }
            self.mode = mode;

            match line_end {
                Some(i) => {
                    self.line.extend_from_slice(&chunk[..i]);
                    self.pos += i + 1;
                    return self.finish_line(true).map(Some);
                }
                None => {
                    self.line.extend_from_slice(chunk);
                    self.pos = self.filled;
                }
            }
        }
    }

    /// True once the source has reported end-of-stream and every buffered
    /// byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of logical lines returned so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Pull the next chunk from the source. Returns false at end of stream.
    fn refill(&mut self) -> Result<bool> {
        loop {
            match self.source.read_chunk(&mut self.buf) {
                Ok(n) => {
                    trace!(bytes = n, in_quotes = self.mode.in_quotes(), "line reader refill");
                    self.pos = 0;
                    self.filled = n;
                    return Ok(n > 0);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn finish_line(&mut self, terminated: bool) -> Result<String> {
        if terminated && self.line.last() == Some(&b'\r') {
            self.line.pop();
        }
        self.mode = ScanMode::Line;
        self.lines_read += 1;
        let bytes = std::mem::take(&mut self.line);
        String::from_utf8(bytes).map_err(|_| CsvError::InvalidUtf8 {
            line: self.lines_read,
        })
    }
}

impl<S: CharSource> Iterator for LineReader<S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}
