// Per-field parallel unescaping using rayon
//
// Fields of one row unescape independently, so a very wide row can be
// fanned out over the rayon pool. The pool is shared and bounded, and the
// fan-out is gated on row size: for ordinary rows the scheduling overhead
// outweighs the work. Output order always matches input order.

use crate::core::unescape_lenient;

/// Minimum number of fields before the parallel path is considered.
pub const PARALLEL_MIN_FIELDS: usize = 64;

/// Minimum raw row size in bytes before the parallel path is considered.
pub const PARALLEL_MIN_BYTES: usize = 16 * 1024;

/// Whether a row is large enough to be worth fanning out.
pub fn should_parallelize(raw: &[&str]) -> bool {
    raw.len() >= PARALLEL_MIN_FIELDS
        && raw.iter().map(|f| f.len()).sum::<usize>() >= PARALLEL_MIN_BYTES
}

/// Unescape every field serially.
pub fn unescape_fields_serial(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|f| unescape_lenient(f).into_owned()).collect()
}

/// Unescape every field on the rayon pool, preserving order.
#[cfg(feature = "parallel")]
pub fn unescape_fields_parallel(raw: &[&str]) -> Vec<String> {
    use rayon::prelude::*;
    raw.par_iter().map(|f| unescape_lenient(f).into_owned()).collect()
}

/// Without the `parallel` feature the fan-out degrades to the serial path.
#[cfg(not(feature = "parallel"))]
pub fn unescape_fields_parallel(raw: &[&str]) -> Vec<String> {
    unescape_fields_serial(raw)
}

/// Unescape a row, taking the parallel path only when `allow` is set and the
/// row passes the size gate.
pub fn unescape_fields(raw: &[&str], allow: bool) -> Vec<String> {
    if allow && should_parallelize(raw) {
        tracing::debug!(fields = raw.len(), "parallel unescape");
        unescape_fields_parallel(raw)
    } else {
        unescape_fields_serial(raw)
    }
}
