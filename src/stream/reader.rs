// Row reader: logical line reader + row decoder + header bookkeeping

use super::line_reader::LineReader;
use super::source::CharSource;
use crate::codec::RowDecoder;
use crate::config::CsvConfig;
use crate::container::Appendable;
use crate::error::{ColumnMismatch, Result};

/// Reads rows of field values from a character source.
///
/// With `has_header` set, the first logical line is consumed while the
/// reader is built and kept apart from the data rows; its width becomes the
/// expected column count.
pub struct CsvReader<S> {
    lines: LineReader<S>,
    decoder: RowDecoder,
    header: Option<Vec<String>>,
}

impl<S: CharSource> CsvReader<S> {
    /// Reader with the default configuration (comma, no header).
    pub fn new(source: S) -> Self {
        let config = CsvConfig::default();
        CsvReader {
            lines: LineReader::with_capacity(source, config.buffer_capacity),
            decoder: decoder_for(&config),
            header: None,
        }
    }

    pub fn with_config(source: S, config: &CsvConfig) -> Result<Self> {
        config.validate()?;
        let mut reader = CsvReader {
            lines: LineReader::with_capacity(source, config.buffer_capacity),
            decoder: decoder_for(config),
            header: None,
        };
        if config.has_header {
            if let Some(line) = reader.lines.read_line()? {
                reader.header = Some(reader.decoder.decode_header(&line)?);
            }
        }
        Ok(reader)
    }

    /// Header names, if the reader was configured with a header and the
    /// source was not empty.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Read and decode the next row. `Ok(None)` at end of stream.
    pub fn read_row(&mut self) -> Result<Option<Vec<String>>> {
        let mut row = Vec::new();
        Ok(self.read_row_into(&mut row)?.map(|_| row))
    }

    /// Read the next row into `out`, returning its field count.
    pub fn read_row_into<C: Appendable<String>>(&mut self, out: &mut C) -> Result<Option<usize>> {
        match self.lines.read_line()? {
            Some(line) => self.decoder.decode_into(&line, out).map(Some),
            None => Ok(None),
        }
    }

    /// Read the next raw logical line without decoding it.
    pub fn read_raw_line(&mut self) -> Result<Option<String>> {
        self.lines.read_line()
    }

    /// Column mismatch reported for the row just read, if any.
    pub fn last_mismatch(&self) -> Option<ColumnMismatch> {
        self.decoder.last_mismatch()
    }

    pub fn mismatches(&self) -> u64 {
        self.decoder.mismatches()
    }

    pub fn delimiter(&self) -> char {
        self.decoder.delimiter()
    }

    /// Switch the delimiter for the following rows.
    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        self.decoder.set_delimiter(delimiter)
    }

    /// Logical lines read so far, header included.
    pub fn lines_read(&self) -> u64 {
        self.lines.lines_read()
    }

    pub fn is_exhausted(&self) -> bool {
        self.lines.is_exhausted()
    }

    pub fn into_inner(self) -> S {
        self.lines.into_inner()
    }
}

fn decoder_for(config: &CsvConfig) -> RowDecoder {
    RowDecoder::new(config.delimiter)
        .with_warn_columns(config.warn_columns)
        .with_parallel_unescape(config.parallel_unescape)
}

impl<S: CharSource> Iterator for CsvReader<S> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}
