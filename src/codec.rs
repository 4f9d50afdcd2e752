//! Row codec: moves between logical lines and rows of field values.
//!
//! Decoding is split + unescape; encoding is escape + join + terminator.
//! [`RowDecoder`] and [`RowEncoder`] additionally track the column count:
//! the first row sets the baseline and later rows of a different width are
//! reported as a [`ColumnMismatch`] without interrupting the stream.

use tracing::{debug, warn};

use crate::config::{validate_delimiter, QuoteStyle};
use crate::container::Appendable;
use crate::core::{escape_into, FieldSplitter};
use crate::error::{ColumnMismatch, CsvError, Result};
use crate::parallel::unescape_fields;

/// Decode one logical line into field values.
///
/// Text after a closing quote is kept with the stray quote dropped, so
/// `"a"b` decodes to `ab` rather than being truncated to `a`.
pub fn decode_row(line: &str, delimiter: char) -> Result<Vec<String>> {
    let raw = FieldSplitter::new(delimiter).split(line)?;
    Ok(unescape_fields(&raw, false))
}

/// A line with no content once one trailing `\n` and one `\r` are removed.
fn is_blank(line: &str) -> bool {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line).is_empty()
}

/// Encode field values with minimal quoting, joined by `delimiter` and
/// followed by `terminator`.
pub fn encode_row<I, S>(values: I, delimiter: char, terminator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    encode_row_into(&mut out, values, delimiter, terminator, QuoteStyle::Necessary);
    out
}

/// Encode into an existing buffer. Returns the number of fields written.
pub fn encode_row_into<I, S>(
    out: &mut String,
    values: I,
    delimiter: char,
    terminator: &str,
    style: QuoteStyle,
) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut count = 0;
    for value in values {
        if count > 0 {
            out.push(delimiter);
        }
        let value = value.as_ref();
        match style {
            QuoteStyle::Necessary => escape_into(out, value, delimiter, false),
            QuoteStyle::Always => escape_into(out, value, delimiter, true),
            QuoteStyle::Never => out.push_str(value),
        }
        count += 1;
    }
    out.push_str(terminator);
    count
}

/// Tracks the expected field count across rows.
#[derive(Debug, Clone, Default)]
pub struct ColumnTracker {
    expected: Option<usize>,
    warn: bool,
    mismatches: u64,
}

impl ColumnTracker {
    pub fn new(warn: bool) -> Self {
        ColumnTracker {
            expected: None,
            warn,
            mismatches: 0,
        }
    }

    /// Baseline width, once one has been established.
    pub fn expected(&self) -> Option<usize> {
        self.expected
    }

    /// Force the baseline, e.g. from a header row.
    pub fn set_baseline(&mut self, columns: usize) {
        debug!(columns, "column baseline set");
        self.expected = Some(columns);
    }

    /// Record a row of `found` fields. The first row becomes the baseline
    /// and is never a mismatch. With warnings disabled nothing is reported.
    pub fn observe(&mut self, row: u64, found: usize) -> Option<ColumnMismatch> {
        let Some(expected) = self.expected else {
            self.set_baseline(found);
            return None;
        };
        if !self.warn || expected == found {
            return None;
        }
        self.mismatches += 1;
        warn!(
            row,
            expected, found, "column mismatch detected, further parsing may be malformed"
        );
        Some(ColumnMismatch {
            row,
            expected,
            found,
        })
    }

    pub fn mismatches(&self) -> u64 {
        self.mismatches
    }

    pub fn reset(&mut self) {
        self.expected = None;
        self.mismatches = 0;
    }
}

/// Stateful decoder: splitter + unescape + column tracking.
#[derive(Debug, Clone)]
pub struct RowDecoder {
    splitter: FieldSplitter,
    tracker: ColumnTracker,
    parallel: bool,
    rows: u64,
    last_mismatch: Option<ColumnMismatch>,
}

impl RowDecoder {
    pub fn new(delimiter: char) -> Self {
        RowDecoder {
            splitter: FieldSplitter::new(delimiter),
            tracker: ColumnTracker::new(true),
            parallel: false,
            rows: 0,
            last_mismatch: None,
        }
    }

    pub fn with_warn_columns(mut self, warn: bool) -> Self {
        self.tracker = ColumnTracker::new(warn);
        self
    }

    pub fn with_parallel_unescape(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn delimiter(&self) -> char {
        self.splitter.delimiter()
    }

    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        self.splitter.set_delimiter(delimiter)
    }

    /// Decode a line into a new `Vec`.
    pub fn decode(&mut self, line: &str) -> Result<Vec<String>> {
        let mut row = Vec::new();
        self.decode_into(line, &mut row)?;
        Ok(row)
    }

    /// Decode a line, appending field values to `out`.
    ///
    /// An empty line decodes to a single empty value and does not take part
    /// in column tracking. A line holding only a terminator (`\r`, `\n` or
    /// `\r\n`) counts as empty. On malformed input nothing is appended.
    pub fn decode_into<C: Appendable<String>>(&mut self, line: &str, out: &mut C) -> Result<usize> {
        self.rows += 1;
        self.last_mismatch = None;

        if is_blank(line) {
            out.append(String::new());
            return Ok(1);
        }

        let raw = self
            .splitter
            .split(line)
            .map_err(|_| CsvError::MalformedInput {
                line: Some(self.rows),
            })?;
        let count = raw.len();
        for value in unescape_fields(&raw, self.parallel) {
            out.append(value);
        }

        self.last_mismatch = self.tracker.observe(self.rows, count);
        Ok(count)
    }

    /// Decode a header line. Its width becomes the column baseline.
    pub fn decode_header(&mut self, line: &str) -> Result<Vec<String>> {
        self.rows += 1;
        self.last_mismatch = None;
        let raw = self
            .splitter
            .split(line)
            .map_err(|_| CsvError::MalformedInput {
                line: Some(self.rows),
            })?;
        let header = unescape_fields(&raw, self.parallel);
        self.tracker.set_baseline(header.len());
        debug!(columns = header.len(), "header row captured");
        Ok(header)
    }

    /// Mismatch reported by the most recent decode, if any.
    pub fn last_mismatch(&self) -> Option<ColumnMismatch> {
        self.last_mismatch
    }

    pub fn mismatches(&self) -> u64 {
        self.tracker.mismatches()
    }

    pub fn expected_columns(&self) -> Option<usize> {
        self.tracker.expected()
    }

    /// Lines decoded so far, including empty and header lines.
    pub fn rows_decoded(&self) -> u64 {
        self.rows
    }
}

/// Stateful encoder: escape + join + column tracking.
#[derive(Debug, Clone)]
pub struct RowEncoder {
    delimiter: char,
    style: QuoteStyle,
    terminator: String,
    tracker: ColumnTracker,
    rows: u64,
    last_mismatch: Option<ColumnMismatch>,
}

impl RowEncoder {
    pub fn new(delimiter: char) -> Self {
        RowEncoder {
            delimiter,
            style: QuoteStyle::Necessary,
            terminator: "\r\n".to_string(),
            tracker: ColumnTracker::new(true),
            rows: 0,
            last_mismatch: None,
        }
    }

    pub fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    pub fn with_warn_columns(mut self, warn: bool) -> Self {
        self.tracker = ColumnTracker::new(warn);
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        validate_delimiter(delimiter)?;
        self.delimiter = delimiter;
        Ok(())
    }

    pub fn terminator(&self) -> &str {
        &self.terminator
    }

    /// Encode a row into a new line, terminator included.
    pub fn encode<I, S>(&mut self, values: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        self.encode_into(&mut out, values);
        out
    }

    /// Encode a row, appending to `out`. Returns the number of fields.
    pub fn encode_into<I, S>(&mut self, out: &mut String, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rows += 1;
        let count = encode_row_into(out, values, self.delimiter, &self.terminator, self.style);
        self.last_mismatch = self.tracker.observe(self.rows, count);
        count
    }

    /// Encode a header row; its width becomes the column baseline.
    pub fn encode_header_into<I, S>(&mut self, out: &mut String, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rows += 1;
        self.last_mismatch = None;
        let count = encode_row_into(out, values, self.delimiter, &self.terminator, self.style);
        self.tracker.set_baseline(count);
        count
    }

    pub fn last_mismatch(&self) -> Option<ColumnMismatch> {
        self.last_mismatch
    }

    pub fn mismatches(&self) -> u64 {
        self.tracker.mismatches()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[test]
    fn test_decode_row() {
        assert_eq!(decode_row("\"a,b\",c", ',').unwrap(), vec!["a,b", "c"]);
        assert_eq!(decode_row("", ',').unwrap(), vec![""]);
        assert_eq!(
            decode_row("\"a\",\"b\",\"c\"", ',').unwrap(),
            vec!["a", "b", "c"]
        );
        assert_eq!(
            decode_row("\"a,\",\"b,\",\"c,\"", ',').unwrap(),
            vec!["a,", "b,", "c,"]
        );
    }

    #[test]
    fn test_decode_row_malformed() {
        assert!(matches!(
            decode_row("a,\"b", ','),
            Err(CsvError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_decode_row_text_after_closing_quote() {
        assert_eq!(decode_row("\"a\"b,c", ',').unwrap(), vec!["ab", "c"]);
    }

    #[test]
    fn test_encode_row_minimal_quoting() {
        assert_eq!(
            encode_row(["x", "y,z", "w\"q"], ',', "\r\n"),
            "x,\"y,z\",\"w\"\"q\"\r\n"
        );
        assert_eq!(encode_row(["a", "", "b"], ',', "\n"), "a,,b\n");
    }

    #[test]
    fn test_encode_styles() {
        let mut out = String::new();
        encode_row_into(&mut out, ["a", ""], ';', "\n", QuoteStyle::Always);
        assert_eq!(out, "\"a\";\"\"\n");

        let mut out = String::new();
        encode_row_into(&mut out, ["a,b", "c"], ',', "\n", QuoteStyle::Never);
        assert_eq!(out, "a,b,c\n");
    }

    #[test]
    fn test_reencode_does_not_add_quotes() {
        let line = "plain,values,here";
        let row = decode_row(line, ',').unwrap();
        assert_eq!(encode_row(&row, ',', ""), line);
    }

    #[test]
    fn test_decode_encode_with_terminator() {
        let row = vec!["x", "multi\nline", "q\"", ""];
        let encoded = encode_row(&row, ',', "\r\n");
        assert_eq!(decode_row(&encoded, ',').unwrap(), row);
    }

    #[test]
    fn test_tracker_first_row_is_baseline() {
        let mut tracker = ColumnTracker::new(true);
        assert_eq!(tracker.observe(1, 3), None);
        assert_eq!(tracker.expected(), Some(3));
        assert_eq!(tracker.observe(2, 3), None);
        assert_eq!(
            tracker.observe(3, 2),
            Some(ColumnMismatch {
                row: 3,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(tracker.mismatches(), 1);
    }

    #[test]
    fn test_tracker_warnings_disabled() {
        let mut tracker = ColumnTracker::new(false);
        tracker.observe(1, 3);
        assert_eq!(tracker.observe(2, 5), None);
        assert_eq!(tracker.mismatches(), 0);
    }

    #[test]
    fn test_decoder_reports_mismatch_and_continues() {
        let mut decoder = RowDecoder::new(',');
        assert_eq!(decoder.decode("a,b,c").unwrap().len(), 3);
        assert_eq!(decoder.last_mismatch(), None);

        let row = decoder.decode("1,2").unwrap();
        assert_eq!(row, vec!["1", "2"]);
        assert_eq!(
            decoder.last_mismatch(),
            Some(ColumnMismatch {
                row: 2,
                expected: 3,
                found: 2
            })
        );

        decoder.decode("4,5,6").unwrap();
        assert_eq!(decoder.last_mismatch(), None);
        assert_eq!(decoder.mismatches(), 1);
    }

    #[test]
    fn test_decoder_empty_line_not_tracked() {
        let mut decoder = RowDecoder::new(',');
        assert_eq!(decoder.decode("").unwrap(), vec![""]);
        assert_eq!(decoder.expected_columns(), None);
        decoder.decode("a,b").unwrap();
        assert_eq!(decoder.decode("").unwrap(), vec![""]);
        assert_eq!(decoder.mismatches(), 0);
        assert_eq!(decoder.rows_decoded(), 3);
    }

    #[test]
    fn test_decoder_terminator_only_line_not_tracked() {
        let mut decoder = RowDecoder::new(',');
        decoder.decode("a,b").unwrap();
        for line in ["\r", "\n", "\r\n"] {
            assert_eq!(decoder.decode(line).unwrap(), vec![""]);
            assert_eq!(decoder.last_mismatch(), None);
        }
        assert_eq!(decoder.mismatches(), 0);
        // A quoted CR is data, not a blank line
        assert_eq!(decoder.decode("\"\r\"").unwrap(), vec!["\r"]);
        assert_eq!(decoder.mismatches(), 1);
    }

    #[test]
    fn test_decoder_malformed_has_row_number() {
        let mut decoder = RowDecoder::new(',');
        decoder.decode("a,b").unwrap();
        let mut out: Vec<String> = Vec::new();
        let err = decoder.decode_into("\"open,b", &mut out).unwrap_err();
        assert!(matches!(err, CsvError::MalformedInput { line: Some(2) }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_decoder_header_sets_baseline() {
        let mut decoder = RowDecoder::new(';');
        let header = decoder.decode_header("id;\"name\"").unwrap();
        assert_eq!(header, vec!["id", "name"]);
        assert_eq!(decoder.expected_columns(), Some(2));
        decoder.decode("1;2;3").unwrap();
        assert_eq!(decoder.mismatches(), 1);
    }

    #[test]
    fn test_decoder_into_deque() {
        let mut decoder = RowDecoder::new(',');
        let mut out: VecDeque<String> = VecDeque::new();
        decoder.decode_into("x,\"y\"\"\"", &mut out).unwrap();
        assert_eq!(out, VecDeque::from(vec!["x".to_string(), "y\"".to_string()]));
    }

    #[test]
    fn test_encoder_tracks_columns() {
        let mut encoder = RowEncoder::new(',').with_terminator("\n");
        assert_eq!(encoder.encode(["a", "b"]), "a,b\n");
        assert_eq!(encoder.encode(["c"]), "c\n");
        assert_eq!(
            encoder.last_mismatch(),
            Some(ColumnMismatch {
                row: 2,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_encoder_header_baseline() {
        let mut encoder = RowEncoder::new('\t').with_terminator("\n");
        let mut out = String::new();
        encoder.encode_header_into(&mut out, ["k", "v"]);
        encoder.encode_into(&mut out, ["1", "a\tb"]);
        assert_eq!(out, "k\tv\n1\t\"a\tb\"\n");
        assert_eq!(encoder.mismatches(), 0);
    }
}
