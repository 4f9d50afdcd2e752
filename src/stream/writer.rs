// Row writer: row encoder + line writer

use super::line_writer::LineWriter;
use super::source::CharSink;
use crate::codec::RowEncoder;
use crate::config::CsvConfig;
use crate::error::{ColumnMismatch, Result};

/// Writes rows of field values to a character sink.
pub struct CsvWriter<W> {
    lines: LineWriter<W>,
    encoder: RowEncoder,
    /// Reused line buffer
    line: String,
}

impl<W: CharSink> CsvWriter<W> {
    /// Writer with the default configuration (comma, minimal quoting, CRLF).
    pub fn new(sink: W) -> Self {
        CsvWriter {
            lines: LineWriter::new(sink),
            encoder: encoder_for(&CsvConfig::default()),
            line: String::new(),
        }
    }

    pub fn with_config(sink: W, config: &CsvConfig) -> Result<Self> {
        config.validate()?;
        Ok(CsvWriter {
            lines: LineWriter::new(sink),
            encoder: encoder_for(config),
            line: String::new(),
        })
    }

    /// Write a header row. Its width becomes the expected column count.
    /// An empty header writes nothing.
    pub fn write_header<I, S>(&mut self, header: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = header.into_iter().peekable();
        if values.peek().is_none() {
            return Ok(());
        }
        self.line.clear();
        self.encoder.encode_header_into(&mut self.line, values);
        self.lines.write_line(&self.line)
    }

    /// Write one data row. An empty row writes nothing.
    pub fn write_row<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = row.into_iter().peekable();
        if values.peek().is_none() {
            return Ok(());
        }
        self.line.clear();
        self.encoder.encode_into(&mut self.line, values);
        self.lines.write_line(&self.line)
    }

    /// Column mismatch reported for the row just written, if any.
    pub fn last_mismatch(&self) -> Option<ColumnMismatch> {
        self.encoder.last_mismatch()
    }

    pub fn delimiter(&self) -> char {
        self.encoder.delimiter()
    }

    /// Switch the delimiter for the following rows.
    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        self.encoder.set_delimiter(delimiter)
    }

    pub fn lines_written(&self) -> u64 {
        self.lines.lines_written()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.lines.flush()
    }

    pub fn get_ref(&self) -> &W {
        self.lines.get_ref()
    }

    pub fn into_inner(self) -> W {
        self.lines.into_inner()
    }
}

fn encoder_for(config: &CsvConfig) -> RowEncoder {
    RowEncoder::new(config.delimiter)
        .with_quote_style(config.quote_style)
        .with_terminator(config.terminator.clone())
        .with_warn_columns(config.warn_columns)
}
