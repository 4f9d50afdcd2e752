// Character source and sink capabilities
//
// The line reader and writer only need sequential chunked access, so they
// depend on these two traits rather than on a concrete stream type. Every
// `io::Read` is a source and every `io::Write` is a sink.

use std::io::{self, Read, Write};

/// A sequential, single-pass input.
pub trait CharSource {
    /// Fill `buf` with the next bytes and return how many were written.
    /// `Ok(0)` means the source is exhausted.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<R: Read + ?Sized> CharSource for R {
    #[inline]
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }
}

/// A sequential output.
pub trait CharSink {
    /// Write the whole buffer.
    fn write_chunk(&mut self, data: &[u8]) -> io::Result<()>;

    fn flush_sink(&mut self) -> io::Result<()>;
}

impl<W: Write + ?Sized> CharSink for W {
    #[inline]
    fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.write_all(data)
    }

    #[inline]
    fn flush_sink(&mut self) -> io::Result<()> {
        self.flush()
    }
}
