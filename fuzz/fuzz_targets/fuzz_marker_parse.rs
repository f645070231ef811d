//! Fuzz target for the marker codec.
//!
//! Parsing must never panic, must keep one line per input line and must only
//! hide word runs. Brace-free input must serialize back unchanged.

#![no_main]

use libfuzzer_sys::fuzz_target;
use veiltext::marker::{parse, serialize};
use veiltext::unicode::is_word_run;

fuzz_target!(|data: &str| {
    let doc = parse(data);
    assert_eq!(doc.line_count(), data.split('\n').count());

    for line in &doc.lines {
        for segment in &line.segments {
            if segment.hidden {
                assert!(is_word_run(&segment.text), "hidden non-word run {segment:?}");
            }
        }
    }

    let text = serialize(&doc);
    if !data.contains(['{', '}']) {
        assert_eq!(text, data);
    }
});
