//! Grapheme-safe truncation.

use unicode_segmentation::UnicodeSegmentation;

/// Return the prefix of `s` holding at most `max` grapheme clusters.
///
/// Never splits a cluster, so combining marks and ZWJ emoji stay intact.
#[must_use]
pub fn truncate_graphemes(s: &str, max: usize) -> &str {
    match s.grapheme_indices(true).nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
