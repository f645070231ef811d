//! Marker-text codec.
//!
//! A document is stored as a single string: lines separated by `\n`, hidden
//! runs wrapped in `{{` / `}}`. There is no escape for literal brace pairs;
//! a `{{` in plain text is read back as a marker on the next parse.
//!
//! Parsing is total. An unterminated `{{` hides everything up to the end of
//! its line.
//!
//! # Examples
//!
//! ```
//! use veiltext::marker;
//!
//! let doc = marker::parse("ab{{cd}}ef");
//! assert_eq!(
//!     doc.lines[0].pairs(),
//!     vec![("ab", false), ("cd", true), ("ef", false)]
//! );
//! assert_eq!(marker::serialize(&doc), "ab{{cd}}ef");
//! ```

use crate::doc::{Document, Line, split_runs};

/// Token opening a hidden run.
pub const OPEN: &str = "{{";
/// Token closing a hidden run.
pub const CLOSE: &str = "}}";

/// Parse marker text into a document.
#[must_use]
pub fn parse(text: &str) -> Document {
    Document::new(text.split('\n').map(parse_line).collect())
}

/// Parse one line of marker text. The input must not contain `\n`.
#[must_use]
pub fn parse_line(text: &str) -> Line {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(OPEN) {
        segments.extend(split_runs(&rest[..open], false));
        let inner = &rest[open + OPEN.len()..];
        match inner.find(CLOSE) {
            Some(close) => {
                segments.extend(split_runs(&inner[..close], true));
                rest = &inner[close + CLOSE.len()..];
            }
            None => {
                segments.extend(split_runs(inner, true));
                rest = "";
            }
        }
    }
    segments.extend(split_runs(rest, false));

    Line::from_segments(segments)
}

/// Build a document from plain text without interpreting markers.
///
/// This is the paste path: braces are ordinary punctuation here.
#[must_use]
pub fn parse_plain(text: &str) -> Document {
    Document::new(text.split('\n').map(Line::plain).collect())
}

/// Serialize a document to marker text.
///
/// Each hidden segment gets its own marker pair; adjacent hidden segments
/// are not merged.
#[must_use]
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    for (i, line) in doc.lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_line(&mut out, line);
    }
    out
}

/// Serialize a single line to marker text.
#[must_use]
pub fn serialize_line(line: &Line) -> String {
    let mut out = String::new();
    write_line(&mut out, line);
    out
}

fn write_line(out: &mut String, line: &Line) {
    for segment in &line.segments {
        if segment.hidden {
            out.push_str(OPEN);
            out.push_str(&segment.text);
            out.push_str(CLOSE);
        } else {
            out.push_str(&segment.text);
        }
    }
}

/// Remove markers from marker text, keeping the hidden text itself.
#[must_use]
pub fn strip_markers(text: &str) -> String {
    parse(text).plain_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Segment;

    #[test]
    fn test_parse_plain_words() {
        let doc = parse("hello world");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(
            doc.lines[0].pairs(),
            vec![("hello", false), (" ", false), ("world", false)]
        );
        assert_eq!(serialize(&doc), "hello world");
    }

    #[test]
    fn test_parse_marker() {
        let doc = parse("ab{{cd}}ef");
        assert_eq!(
            doc.lines[0].pairs(),
            vec![("ab", false), ("cd", true), ("ef", false)]
        );
        assert_eq!(serialize(&doc), "ab{{cd}}ef");
    }

    #[test]
    fn test_parse_unterminated_marker() {
        let doc = parse("see {{note");
        assert_eq!(
            doc.lines[0].pairs(),
            vec![("see", false), (" ", false), ("note", true)]
        );
    }

    #[test]
    fn test_unterminated_marker_stops_at_line_end() {
        let doc = parse("a {{b\nc}} d");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.lines[0].pairs(), vec![("a", false), (" ", false), ("b", true)]);
        assert_eq!(
            doc.lines[1].pairs(),
            vec![("c", false), ("}} ", false), ("d", false)]
        );
    }

    #[test]
    fn test_hidden_punctuation_stays_visible() {
        let doc = parse("{{a, b}}");
        assert_eq!(
            doc.lines[0].pairs(),
            vec![("a", true), (", ", false), ("b", true)]
        );
        // Not merged back into one marker pair.
        assert_eq!(serialize(&doc), "{{a}}, {{b}}");
    }

    #[test]
    fn test_empty_marker_and_empty_lines() {
        let doc = parse("x{{}}y\n\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.lines[0].pairs(), vec![("x", false), ("y", false)]);
        assert_eq!(doc.lines[1].pairs(), vec![("", false)]);
        assert_eq!(doc.lines[2].pairs(), vec![("", false)]);
        assert_eq!(serialize(&doc), "xy\n\n");
    }

    #[test]
    fn test_parse_empty_input() {
        let doc = parse("");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.lines[0].pairs(), vec![("", false)]);
        assert_eq!(serialize(&doc), "");
    }

    #[test]
    fn test_adjacent_hidden_segments_not_merged() {
        let doc = Document::new(vec![Line::from_segments(vec![
            Segment::new("ab", true),
            Segment::new("cd", true),
        ])]);
        assert_eq!(serialize(&doc), "{{ab}}{{cd}}");
    }

    #[test]
    fn test_parse_plain_ignores_markers() {
        let doc = parse_plain("a{{b}}");
        assert_eq!(doc.hidden_count(), 0);
        assert_eq!(serialize(&doc), "a{{b}}");
    }

    #[test]
    fn test_multiline_round_trip() {
        let text = "첫 줄입니다.\n  indented, line 2!\r\n\nend";
        assert_eq!(serialize(&parse(text)), text);
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("The {{capital}} of {{France"), "The capital of France");
        assert_eq!(strip_markers("a\n{{b}}"), "a\nb");
    }

    #[test]
    fn test_serialize_line() {
        let line = parse_line("x {{y}}");
        assert_eq!(serialize_line(&line), "x {{y}}");
    }
}
