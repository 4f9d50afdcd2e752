// Line writer: the sink-side counterpart of the line reader. It writes
// already-formatted lines and counts them.

use super::source::CharSink;
use crate::error::Result;

pub struct LineWriter<W> {
    sink: W,
    lines_written: u64,
}

impl<W: CharSink> LineWriter<W> {
    pub fn new(sink: W) -> Self {
        LineWriter {
            sink,
            lines_written: 0,
        }
    }

    /// Write one line verbatim; the caller supplies the terminator.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.sink.write_chunk(line.as_bytes())?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush_sink()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
