//! Selection expansion to word boundaries.
//!
//! Offsets here count `char`s, not bytes. Out-of-range offsets are clamped to
//! the text length and a reversed range is normalized, so every input yields
//! a valid range.

use crate::unicode::class::is_word_char;
use std::ops::Range;

/// Grow `range` outward so it neither starts nor ends inside a word.
///
/// The start walks left while the character before it is a word character;
/// the end walks right while the character at it is a word character. A
/// zero-width range touching a word grows to cover that word.
///
/// The result is a fixed point: expanding it again returns it unchanged.
#[must_use]
pub fn expand_to_word_boundary(text: &str, range: Range<usize>) -> Range<usize> {
    let bytes = clamp_char_range(text, range);
    let expanded = expand_bytes(text, bytes);
    char_offset(text, expanded.start)..char_offset(text, expanded.end)
}

/// Byte-offset form of [`expand_to_word_boundary`].
///
/// `range` must lie on char boundaries of `text`.
pub(crate) fn expand_bytes(text: &str, range: Range<usize>) -> Range<usize> {
    let mut start = range.start;
    while let Some(ch) = text[..start].chars().next_back() {
        if !is_word_char(ch) {
            break;
        }
        start -= ch.len_utf8();
    }

    let mut end = range.end;
    while let Some(ch) = text[end..].chars().next() {
        if !is_word_char(ch) {
            break;
        }
        end += ch.len_utf8();
    }

    start..end
}

/// Convert a clamped, normalized char range into a byte range.
pub(crate) fn clamp_char_range(text: &str, range: Range<usize>) -> Range<usize> {
    let (lo, hi) = if range.start <= range.end {
        (range.start, range.end)
    } else {
        (range.end, range.start)
    };
    byte_offset(text, lo)..byte_offset(text, hi)
}

/// Byte offset of the `chars`-th character, clamped to `text.len()`.
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Number of characters before byte offset `bytes`.
fn char_offset(text: &str, bytes: usize) -> usize {
    text[..bytes].chars().count()
}
