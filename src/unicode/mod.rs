//! Unicode utilities for word classification, runs and selection boundaries.
//!
//! [`is_word_char`] is the single classification predicate; [`runs`] and
//! [`expand_to_word_boundary`] are built on it and never re-derive it.

mod boundary;
mod class;
mod grapheme;
mod runs;

pub(crate) use boundary::{byte_offset, clamp_char_range, expand_bytes};

pub use boundary::expand_to_word_boundary;
pub use class::{CharClass, is_word_char, is_word_run};
pub use grapheme::truncate_graphemes;
pub use runs::{Runs, runs};
