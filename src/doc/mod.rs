//! Document model: documents of lines of hideable segments.
//!
//! Key types:
//!
//! - [`Segment`]: a run of text with one hidden/visible state
//! - [`Line`]: an ordered, gap-free partition of one line's text
//! - [`Document`]: ordered lines plus creation/update timestamps
//!
//! # Examples
//!
//! ```
//! use veiltext::doc::{Document, Line};
//!
//! let mut doc = Document::new(vec![Line::plain("hello world")]);
//! let line = doc.lines[0].id;
//! let seg = doc.lines[0].segments[2].id;
//!
//! // Selecting "or" inside "world" hides the whole word.
//! assert!(doc.hide_selection(line, seg, 1..3));
//! assert_eq!(doc.lines[0].pairs(), vec![("hello", false), (" ", false), ("world", true)]);
//! ```

mod document;
mod id;
mod rewrite;
mod segment;

pub use document::Document;
pub use id::{DocumentId, LineId, SegmentId};
pub use segment::{Line, Segment, split_runs};
