//! Segments and lines.

use crate::doc::id::{LineId, SegmentId};
use crate::unicode::{is_word_run, runs};
use serde::Serialize;

/// A contiguous run of a line's text with a single hidden/visible state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Opaque identifier, unique within the process.
    pub id: SegmentId,
    /// Segment text. Empty only for the placeholder of an empty line.
    pub text: String,
    /// Whether the text is hidden. Only word runs may be hidden.
    pub hidden: bool,
}

impl Segment {
    /// Create a segment with a fresh id.
    #[must_use]
    pub fn new(text: impl Into<String>, hidden: bool) -> Self {
        Self {
            id: SegmentId::fresh(),
            text: text.into(),
            hidden,
        }
    }

    /// Create a visible segment.
    #[must_use]
    pub fn visible(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// The single empty segment standing in for an empty line.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(String::new(), false)
    }

    /// Length in characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether this segment's text is made only of word characters.
    #[must_use]
    pub fn is_word(&self) -> bool {
        is_word_run(&self.text)
    }
}

/// Partition `text` into word / non-word segments.
///
/// Word runs get `hidden = force_hidden`; non-word runs are always visible.
/// Empty input yields no segments.
#[must_use]
pub fn split_runs(text: &str, force_hidden: bool) -> Vec<Segment> {
    runs(text)
        .map(|(class, run)| Segment::new(run, class.is_word() && force_hidden))
        .collect()
}

/// One line of a document: an ordered, gap-free partition of its text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Line {
    pub id: LineId,
    pub segments: Vec<Segment>,
}

impl Line {
    /// Build a line from segments, inserting the placeholder if there are none.
    #[must_use]
    pub fn from_segments(mut segments: Vec<Segment>) -> Self {
        if segments.is_empty() {
            segments.push(Segment::placeholder());
        }
        Self {
            id: LineId::fresh(),
            segments,
        }
    }

    /// Segment plain text into a line with nothing hidden.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self::from_segments(split_runs(text, false))
    }

    /// An empty line holding only the placeholder segment.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_segments(Vec::new())
    }

    /// The line text: all segment texts concatenated in order.
    #[must_use]
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Length of the line text in characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.segments.iter().map(Segment::len_chars).sum()
    }

    /// Index of the segment with `id`.
    #[must_use]
    pub fn segment_index(&self, id: SegmentId) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    /// Segment with `id`.
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Mutable segment with `id`.
    pub fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| s.id == id)
    }

    /// Number of hidden segments.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.segments.iter().filter(|s| s.hidden).count()
    }

    /// `(text, hidden)` pairs in order, ignoring ids.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, bool)> {
        self.segments
            .iter()
            .map(|s| (s.text.as_str(), s.hidden))
            .collect()
    }
}
