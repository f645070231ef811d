//! Fuzz target for range hiding.
//!
//! Arbitrary (possibly reversed or out of range) selections must never panic
//! and must leave the line text unchanged with only word runs hidden.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use veiltext::doc::Line;
use veiltext::unicode::is_word_run;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    start: u16,
    end: u16,
}

fuzz_target!(|input: Input| {
    let text: String = input.text.chars().filter(|&c| c != '\n').collect();
    let mut line = Line::plain(&text);
    line.hide_range(usize::from(input.start)..usize::from(input.end));

    assert_eq!(line.text(), text);
    for segment in &line.segments {
        if segment.hidden {
            assert!(is_word_run(&segment.text), "hidden non-word run {segment:?}");
        }
    }
});
