//! Reader and writer configuration.
//!
//! [`CsvConfig`] derives serde so it can be embedded in an application's own
//! config file; every field has a default, so partial documents deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{CsvError, Result};

/// Default size of the line reader's refill buffer (8 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// How fields are quoted on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Quote only fields containing the delimiter, a quote, CR or LF.
    #[default]
    Necessary,
    /// Quote every field.
    Always,
    /// Write fields verbatim. Output is only readable back if no field
    /// needed quoting.
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    pub delimiter: char,
    pub quote_style: QuoteStyle,
    /// Appended after every written row.
    pub terminator: String,
    /// Log and record rows whose width differs from the first row.
    pub warn_columns: bool,
    /// Treat the first logical line as a header, not a data row.
    pub has_header: bool,
    /// Allow the rayon fan-out for very wide rows.
    pub parallel_unescape: bool,
    pub buffer_capacity: usize,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            delimiter: ',',
            quote_style: QuoteStyle::Necessary,
            terminator: "\r\n".to_string(),
            warn_columns: true,
            has_header: false,
            parallel_unescape: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl CsvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    /// Shorthand for `QuoteStyle::Always` (true) or `QuoteStyle::Necessary` (false).
    pub fn with_force_quote(self, force: bool) -> Self {
        self.with_quote_style(if force {
            QuoteStyle::Always
        } else {
            QuoteStyle::Necessary
        })
    }

    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    pub fn with_warn_columns(mut self, warn: bool) -> Self {
        self.warn_columns = warn;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_parallel_unescape(mut self, parallel: bool) -> Self {
        self.parallel_unescape = parallel;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Reject settings the scanner cannot honour.
    pub fn validate(&self) -> Result<()> {
        validate_delimiter(self.delimiter)?;
        if self.terminator.is_empty() {
            return Err(CsvError::InvalidConfig(
                "line terminator must not be empty".to_string(),
            ));
        }
        if self.buffer_capacity == 0 {
            return Err(CsvError::InvalidConfig(
                "buffer capacity must be at least 1 byte".to_string(),
            ));
        }
        Ok(())
    }
}

/// A delimiter may not be one of the characters the scanner gives meaning to.
pub fn validate_delimiter(delimiter: char) -> Result<()> {
    match delimiter {
        '"' | '\r' | '\n' => Err(CsvError::InvalidConfig(format!(
            "{delimiter:?} cannot be used as a delimiter"
        ))),
        _ => Ok(()),
    }
}
