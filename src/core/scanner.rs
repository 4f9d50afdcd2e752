// Scanner mode and character-level helpers shared by the splitter,
// the line reader and the escaper.

/// Whether the scanner is inside an open quoted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Outside quotes: delimiters and newlines are structural.
    #[default]
    Line,
    /// Inside quotes: delimiters and newlines are literal data.
    Quote,
}

impl ScanMode {
    /// Flip on a quote character.
    #[inline]
    pub fn toggle(self) -> Self {
        match self {
            ScanMode::Line => ScanMode::Quote,
            ScanMode::Quote => ScanMode::Line,
        }
    }

    #[inline]
    pub fn in_quotes(self) -> bool {
        self == ScanMode::Quote
    }
}

pub const QUOTE: char = '"';

/// Check if a field must be wrapped in quotes to survive a round trip.
#[inline]
pub fn needs_quoting(field: &str, delimiter: char) -> bool {
    field
        .chars()
        .any(|c| c == QUOTE || c == '\r' || c == '\n' || c == delimiter)
}
