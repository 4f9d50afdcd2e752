// Field escaping and unescaping (RFC 4180 quoting)
//
// Both directions return Cow::Borrowed when the input passes through
// untouched, and only allocate when quotes have to be added or collapsed.

use super::scanner::{needs_quoting, QUOTE};
use std::borrow::Cow;

/// Escape a field for output.
///
/// The field is wrapped in quotes when it contains a quote, CR, LF or the
/// delimiter, or when `force` is set. Inside a quoted field every `"` is
/// doubled. An empty field stays empty unless forced, in which case it
/// becomes `""`.
#[inline]
pub fn escape(field: &str, delimiter: char, force: bool) -> Cow<'_, str> {
    if !force && !needs_quoting(field, delimiter) {
        return Cow::Borrowed(field);
    }
    let mut out = String::with_capacity(field.len() + 2);
    write_quoted_field(&mut out, field);
    Cow::Owned(out)
}

/// Append the escaped form of `field` to `out` without an intermediate allocation.
#[inline]
pub fn escape_into(out: &mut String, field: &str, delimiter: char, force: bool) {
    if force || needs_quoting(field, delimiter) {
        write_quoted_field(out, field);
    } else {
        out.push_str(field);
    }
}

/// Write a field that needs quoting: quote + field_with_doubled_quotes + quote
#[inline]
pub fn write_quoted_field(out: &mut String, field: &str) {
    out.push(QUOTE);
    for c in field.chars() {
        out.push(c);
        if c == QUOTE {
            out.push(QUOTE);
        }
    }
    out.push(QUOTE);
}

/// Unescape a raw field produced by the splitter.
///
/// A field starting with `"` is taken to be a balanced quoted field: the
/// surrounding quotes are stripped and each `""` collapses to one `"`.
/// A lone quote inside the body is dropped. Fields not starting with `"`
/// pass through unchanged.
///
/// # Panics
///
/// Panics if the field starts with `"` but is not closed by a final `"`.
/// Callers must only pass balanced quoted fields; the decode paths use
/// [`unescape_lenient`] on splitter output instead.
pub fn unescape(field: &str) -> Cow<'_, str> {
    let Some(rest) = field.strip_prefix(QUOTE) else {
        return Cow::Borrowed(field);
    };
    match rest.strip_suffix(QUOTE) {
        Some(inner) => collapse_quotes(inner),
        None => panic!("unescape called on unbalanced quoted field {field:?}"),
    }
}

/// Unescape a raw field from the splitter without the balance contract.
///
/// The splitter guarantees quotes are balanced but not that a quoted field
/// ends on its closing quote (`"a"b`). Such a field has only its opening
/// quote stripped; everything else matches [`unescape`].
pub fn unescape_lenient(field: &str) -> Cow<'_, str> {
    let Some(rest) = field.strip_prefix(QUOTE) else {
        return Cow::Borrowed(field);
    };
    collapse_quotes(rest.strip_suffix(QUOTE).unwrap_or(rest))
}

/// Collapse `""` to `"` and drop lone quotes.
fn collapse_quotes(inner: &str) -> Cow<'_, str> {
    // Fast path: no escaped quotes inside
    if !inner.contains(QUOTE) {
        return Cow::Borrowed(inner);
    }

    let mut result = String::with_capacity(inner.len());
    let mut quotes_seen = 0u8;
    for c in inner.chars() {
        if c == QUOTE {
            quotes_seen += 1;
            if quotes_seen == 2 {
                quotes_seen = 0;
                result.push(QUOTE);
            }
        } else {
            quotes_seen = 0;
            result.push(c);
        }
    }
    Cow::Owned(result)
}
