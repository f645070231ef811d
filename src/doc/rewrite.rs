//! Hide rewrites of a line's segment list.
//!
//! Both rewrites expand the selection to word boundaries first, then replace
//! the touched segments with `before`/`after` remainders (which keep the old
//! hidden flag) around a re-split of the selection in which every word run is
//! hidden and every non-word run stays visible. Segment text is never gained
//! or lost, only re-partitioned.
//!
//! Unknown segment ids make a rewrite a no-op and offsets are clamped, since
//! a selection can go stale between the input event and its handling.

use crate::doc::segment::{Line, Segment, split_runs};
use crate::doc::SegmentId;
use crate::unicode::{byte_offset, clamp_char_range, expand_bytes};
use std::ops::Range;

/// Push `text` as a segment with `hidden` unless it is empty.
fn push_kept(out: &mut Vec<Segment>, text: &str, hidden: bool) {
    if !text.is_empty() {
        out.push(Segment::new(text, hidden));
    }
}

/// Replacement pieces for hiding the char range `range` within `segment`.
fn hide_pieces(segment: &Segment, range: Range<usize>) -> Vec<Segment> {
    let text = segment.text.as_str();
    let selected = expand_bytes(text, clamp_char_range(text, range));

    let mut pieces = Vec::new();
    push_kept(&mut pieces, &text[..selected.start], segment.hidden);
    pieces.extend(split_runs(&text[selected.clone()], true));
    push_kept(&mut pieces, &text[selected.end..], segment.hidden);
    pieces
}

impl Line {
    /// Hide the char range `range` of the segment `segment_id`.
    ///
    /// The range is expanded to word boundaries within the segment's own
    /// text. Returns `false` without touching the line when the segment does
    /// not exist or has no text.
    pub fn hide_within_segment(&mut self, segment_id: SegmentId, range: Range<usize>) -> bool {
        let Some(idx) = self.segment_index(segment_id) else {
            return false;
        };
        let pieces = hide_pieces(&self.segments[idx], range);
        if pieces.is_empty() {
            return false;
        }
        self.segments.splice(idx..=idx, pieces);
        true
    }

    /// Hide a selection running from `start_offset` in `start_id` to
    /// `end_offset` in `end_id`.
    ///
    /// The endpoints are ordered by segment position, so a selection dragged
    /// right-to-left behaves like the same selection dragged left-to-right.
    /// Segments strictly between the endpoints are re-split with every word
    /// run hidden, regardless of their previous flags.
    pub fn hide_across_segments(
        &mut self,
        start_id: SegmentId,
        start_offset: usize,
        end_id: SegmentId,
        end_offset: usize,
    ) -> bool {
        let (Some(start_idx), Some(end_idx)) =
            (self.segment_index(start_id), self.segment_index(end_id))
        else {
            return false;
        };

        let ((from, from_offset), (to, to_offset)) = if start_idx <= end_idx {
            ((start_idx, start_offset), (end_idx, end_offset))
        } else {
            ((end_idx, end_offset), (start_idx, start_offset))
        };

        if from == to {
            return self.hide_within_segment(start_id, from_offset..to_offset);
        }

        let old = std::mem::take(&mut self.segments);
        let mut rebuilt = Vec::with_capacity(old.len() + 4);

        for (i, segment) in old.into_iter().enumerate() {
            let text = segment.text.as_str();
            if i < from || i > to {
                rebuilt.push(segment);
            } else if i == from {
                let start = byte_offset(text, from_offset);
                let selected = expand_bytes(text, start..text.len());
                push_kept(&mut rebuilt, &text[..selected.start], segment.hidden);
                rebuilt.extend(split_runs(&text[selected], true));
            } else if i == to {
                let end = byte_offset(text, to_offset);
                let selected = expand_bytes(text, 0..end);
                rebuilt.extend(split_runs(&text[selected.clone()], true));
                push_kept(&mut rebuilt, &text[selected.end..], segment.hidden);
            } else {
                rebuilt.extend(split_runs(text, true));
            }
        }

        if rebuilt.is_empty() {
            rebuilt.push(Segment::placeholder());
        }
        self.segments = rebuilt;
        true
    }

    /// Hide the char range `range` measured from the start of the line.
    ///
    /// Resolves both ends to `(segment, local offset)` pairs and dispatches
    /// to [`hide_across_segments`](Self::hide_across_segments).
    pub fn hide_range(&mut self, range: Range<usize>) -> bool {
        let (lo, hi) = if range.start <= range.end {
            (range.start, range.end)
        } else {
            (range.end, range.start)
        };
        let (Some((start_id, start_offset)), Some((end_id, end_offset))) =
            (self.locate_start(lo), self.locate_end(hi))
        else {
            return false;
        };
        self.hide_across_segments(start_id, start_offset, end_id, end_offset)
    }

    /// Segment and local offset where a selection starting at line offset
    /// `offset` begins. Offsets on a boundary belong to the following segment.
    fn locate_start(&self, offset: usize) -> Option<(SegmentId, usize)> {
        let mut consumed = 0;
        for segment in &self.segments {
            let len = segment.len_chars();
            if offset < consumed + len {
                return Some((segment.id, offset - consumed));
            }
            consumed += len;
        }
        self.segments.last().map(|s| (s.id, s.len_chars()))
    }

    /// Segment and local offset where a selection ending at line offset
    /// `offset` ends. Offsets on a boundary belong to the preceding segment.
    fn locate_end(&self, offset: usize) -> Option<(SegmentId, usize)> {
        let mut consumed = 0;
        for segment in &self.segments {
            let len = segment.len_chars();
            if offset <= consumed + len {
                return Some((segment.id, offset - consumed));
            }
            consumed += len;
        }
        self.segments.last().map(|s| (s.id, s.len_chars()))
    }
}
