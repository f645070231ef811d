//! Title suggestion for newly saved documents.
//!
//! Suggestion is best effort. [`suggest_or_default`] never fails: it falls
//! back to the configured default title when the suggester errors or returns
//! only whitespace.

use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::marker::strip_markers;
use crate::unicode::truncate_graphemes;

/// Maps document text to a short title.
pub trait TitleSuggester {
    /// Suggest a title for `plain_text` (marker-free).
    fn suggest_title(&self, plain_text: &str) -> Result<String>;
}

impl<F> TitleSuggester for F
where
    F: Fn(&str) -> Result<String>,
{
    fn suggest_title(&self, plain_text: &str) -> Result<String> {
        self(plain_text)
    }
}

/// Local suggester: the first non-blank line, trimmed and shortened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeadingWords {
    /// Maximum title length in grapheme clusters.
    pub max_len: usize,
}

impl Default for LeadingWords {
    fn default() -> Self {
        Self { max_len: 10 }
    }
}

impl TitleSuggester for LeadingWords {
    fn suggest_title(&self, plain_text: &str) -> Result<String> {
        let first = plain_text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();
        Ok(truncate_graphemes(first, self.max_len).trim_end().to_string())
    }
}

/// The text a suggester sees: markers removed, at most `max_len` graphemes.
#[must_use]
pub fn title_sample(content: &str, max_len: usize) -> String {
    let plain = strip_markers(content);
    truncate_graphemes(&plain, max_len).to_string()
}

/// Ask `suggester` for a title for marker text `content`, falling back to
/// `default_title`.
pub fn suggest_or_default<T>(
    suggester: &T,
    content: &str,
    sample_len: usize,
    default_title: &str,
) -> String
where
    T: TitleSuggester + ?Sized,
{
    match suggester.suggest_title(&title_sample(content, sample_len)) {
        Ok(title) if !title.trim().is_empty() => title.trim().to_string(),
        Ok(_) => default_title.to_string(),
        Err(e) => {
            emit_log(LogLevel::Error, &format!("title suggestion failed: {e}"));
            default_title.to_string()
        }
    }
}
