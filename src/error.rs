//! Error types for csvline.
//!
//! Scanning failures are returned as [`CsvError`] and abort the current
//! line. A column-count mismatch is not an error: it is reported as a
//! [`ColumnMismatch`] value so best-effort parsing can carry on.

use thiserror::Error;

/// Errors surfaced by the line reader, the field splitter and the codec.
#[derive(Error, Debug)]
pub enum CsvError {
    /// A quote was opened and never closed before the end of the line or
    /// the end of the stream. No partial row is returned.
    #[error("malformed input: unterminated quoted field{}", at_line(.line))]
    MalformedInput {
        /// 1-based logical line number, when the caller knows it.
        line: Option<u64>,
    },

    /// The logical line is not valid UTF-8.
    #[error("invalid UTF-8 in logical line {line}")]
    InvalidUtf8 { line: u64 },

    /// The underlying source or sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected configuration (e.g. a quote character used as delimiter).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn at_line(line: &Option<u64>) -> String {
    match line {
        Some(n) => format!(" at line {n}"),
        None => String::new(),
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = CsvError> = std::result::Result<T, E>;

/// A row whose field count differs from the established baseline.
///
/// `row` is the 1-based index of the row within the decoder or encoder that
/// observed it (the header row counts as row 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMismatch {
    pub row: u64,
    pub expected: usize,
    pub found: usize,
}

impl std::fmt::Display for ColumnMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "column mismatch at row {}: expected {} fields, found {}",
            self.row, self.expected, self.found
        )
    }
}
