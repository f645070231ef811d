//! The document: ordered lines plus timestamps.

use crate::doc::id::{DocumentId, LineId, SegmentId};
use crate::doc::segment::Line;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ops::Range;

/// A document of lines, each partitioned into hideable segments.
///
/// Every mutating method that changes the document bumps
/// [`updated_at`](Self::updated_at). Methods addressing a line or segment by
/// id return `false` and leave the document untouched when the id is stale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub lines: Vec<Line>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(vec![Line::empty()])
    }
}

impl Document {
    /// Create a document from lines.
    #[must_use]
    pub fn new(lines: Vec<Line>) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::fresh(),
            lines,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the document as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line with `id`.
    #[must_use]
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Mutable line with `id`.
    pub fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.iter_mut().find(|l| l.id == id)
    }

    /// Hide a selection inside one segment. See [`Line::hide_within_segment`].
    pub fn hide_selection(
        &mut self,
        line_id: LineId,
        segment_id: SegmentId,
        range: Range<usize>,
    ) -> bool {
        let changed = self
            .line_mut(line_id)
            .is_some_and(|line| line.hide_within_segment(segment_id, range));
        if changed {
            self.touch();
        }
        changed
    }

    /// Hide a selection spanning segments of one line.
    /// See [`Line::hide_across_segments`].
    pub fn hide_multi_segment_selection(
        &mut self,
        line_id: LineId,
        start_id: SegmentId,
        start_offset: usize,
        end_id: SegmentId,
        end_offset: usize,
    ) -> bool {
        let changed = self.line_mut(line_id).is_some_and(|line| {
            line.hide_across_segments(start_id, start_offset, end_id, end_offset)
        });
        if changed {
            self.touch();
        }
        changed
    }

    /// Flip the hidden flag of a word segment.
    ///
    /// Non-word and empty segments are never hidden, so toggling them is a
    /// no-op that returns `false`.
    pub fn toggle_segment(&mut self, line_id: LineId, segment_id: SegmentId) -> bool {
        let Some(segment) = self
            .line_mut(line_id)
            .and_then(|line| line.segment_mut(segment_id))
        else {
            return false;
        };
        if !segment.hidden && !segment.is_word() {
            return false;
        }
        segment.hidden = !segment.hidden;
        self.touch();
        true
    }

    /// Reveal every hidden segment; returns how many were revealed.
    pub fn reveal_all(&mut self) -> usize {
        let mut count = 0;
        for segment in self.lines.iter_mut().flat_map(|l| l.segments.iter_mut()) {
            if segment.hidden {
                segment.hidden = false;
                count += 1;
            }
        }
        if count > 0 {
            self.touch();
        }
        count
    }

    /// Number of hidden segments across all lines.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.lines.iter().map(Line::hidden_count).sum()
    }

    /// Document text without markers, lines joined with `\n`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
