// Core primitives: scanner mode, field escaping and line splitting

pub mod field;
pub mod scanner;
pub mod splitter;

pub use field::*;
pub use scanner::*;
pub use splitter::*;
