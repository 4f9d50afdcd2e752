// Streaming layer: sources and sinks, logical lines, and row readers/writers

pub mod line_reader;
pub mod line_writer;
pub mod reader;
pub mod source;
pub mod writer;

pub use line_reader::LineReader;
pub use line_writer::LineWriter;
pub use reader::CsvReader;
pub use source::{CharSink, CharSource};
pub use writer::CsvWriter;
