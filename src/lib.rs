// csvline - Streaming, quote-aware CSV tokenizing
//
// Layers:
// core:   scanner mode, RFC 4180 escape/unescape, field splitter
// stream: logical line reader over any CharSource, line writer over any CharSink
// codec:  row decode (split + unescape) and encode (escape + join), column tracking
//
// Data flow when reading:
//   source -> LineReader -> logical line -> FieldSplitter -> raw fields -> unescape -> row
// and when writing:
//   row -> escape -> join + terminator -> LineWriter -> sink

pub mod codec;
pub mod config;
pub mod container;
pub mod core;
pub mod error;
pub mod parallel;
pub mod stream;

pub use codec::{decode_row, encode_row, ColumnTracker, RowDecoder, RowEncoder};
pub use config::{CsvConfig, QuoteStyle};
pub use container::Appendable;
pub use crate::core::{escape, split_line, unescape, FieldSplitter, ScanMode};
pub use error::{ColumnMismatch, CsvError, Result};
pub use stream::{CharSink, CharSource, CsvReader, CsvWriter, LineReader, LineWriter};
