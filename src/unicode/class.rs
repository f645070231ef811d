//! Word / non-word character classification.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Class of a single character for segmentation purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Letter or number in any script.
    Word,
    /// Whitespace, punctuation, symbols, controls and marks.
    NonWord,
}

impl CharClass {
    /// Classify a character.
    #[must_use]
    pub fn of(ch: char) -> Self {
        if is_word_char(ch) {
            Self::Word
        } else {
            Self::NonWord
        }
    }

    /// Whether this is the word class.
    #[must_use]
    pub fn is_word(self) -> bool {
        self == Self::Word
    }
}

/// Returns true iff `ch` is in a Unicode Letter (`L*`) or Number (`N*`)
/// general category.
///
/// Every boundary decision in the crate goes through this predicate.
#[inline]
#[must_use]
pub fn is_word_char(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Whether every character of `text` is a word character.
///
/// Empty text is not a word run.
#[must_use]
pub fn is_word_run(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_word_char)
}
