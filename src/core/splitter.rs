// Field splitter
//
// Scans one logical line into raw (still escaped) fields. Quote state lives
// on the splitter instance and is reset at the start of every line.
//
//   state | char      | action                        | next
//   ------+-----------+-------------------------------+------
//   Line  | "         | keep in field                 | Quote
//   Line  | delimiter | close field, start a new one  | Line
//   Line  | other     | keep in field                 | Line
//   Quote | "         | keep in field                 | Line
//   Quote | other     | keep in field (literal)       | Quote

use super::scanner::{ScanMode, QUOTE};
use crate::config::validate_delimiter;
use crate::container::Appendable;
use crate::error::{CsvError, Result};

/// Stateful, delimiter-aware and quote-aware line splitter.
///
/// Fields are returned as slices of the input line, still carrying their
/// surrounding quotes and doubled inner quotes.
#[derive(Debug, Clone)]
pub struct FieldSplitter {
    delimiter: char,
    mode: ScanMode,
}

impl FieldSplitter {
    pub fn new(delimiter: char) -> Self {
        FieldSplitter {
            delimiter,
            mode: ScanMode::Line,
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Change the delimiter. `"`, `\r` and `\n` are rejected with
    /// `InvalidConfig` and leave the splitter unchanged.
    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        validate_delimiter(delimiter)?;
        self.delimiter = delimiter;
        Ok(())
    }

    /// Current scanner mode; `Line` between calls unless a split failed midway.
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn reset(&mut self) {
        self.mode = ScanMode::Line;
    }

    /// Split a logical line into raw fields.
    pub fn split<'a>(&mut self, line: &'a str) -> Result<Vec<&'a str>> {
        let mut fields = Vec::with_capacity(8);
        self.split_into(line, &mut fields)?;
        Ok(fields)
    }

    /// Split a logical line, appending raw fields to `out`.
    ///
    /// Returns the number of fields appended. On an unterminated quote
    /// nothing is appended and `MalformedInput` is returned.
    ///
    /// One trailing `\n` is ignored, and a trailing `\r` on the last field is
    /// stripped, so a line still carrying its `\r\n` terminator splits the
    /// same as one without.
    pub fn split_into<'a, C: Appendable<&'a str>>(
        &mut self,
        line: &'a str,
        out: &mut C,
    ) -> Result<usize> {
        self.reset();
        let line = line.strip_suffix('\n').unwrap_or(line);
        let delimiter = self.delimiter;

        // First pass finds boundaries so a malformed line appends nothing.
        let mut bounds: Vec<usize> = Vec::new();
        for (pos, c) in line.char_indices() {
            match self.mode {
                ScanMode::Line if c == QUOTE => self.mode = ScanMode::Quote,
                ScanMode::Line if c == delimiter => bounds.push(pos),
                ScanMode::Quote if c == QUOTE => self.mode = ScanMode::Line,
                _ => {}
            }
        }

        if self.mode.in_quotes() {
            self.reset();
            return Err(CsvError::MalformedInput { line: None });
        }

        let mut start = 0;
        for &end in &bounds {
            out.append(&line[start..end]);
            start = end + delimiter.len_utf8();
        }

        // The last field is always flushed, so a trailing delimiter yields a
        // trailing empty field and an empty line yields [""].
        let last = &line[start..];
        out.append(last.strip_suffix('\r').unwrap_or(last));

        Ok(bounds.len() + 1)
    }
}

/// Split a logical line with a fresh splitter.
pub fn split_line(line: &str, delimiter: char) -> Result<Vec<&str>> {
    FieldSplitter::new(delimiter).split(line)
}
