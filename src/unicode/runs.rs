//! Maximal same-class runs.

use crate::unicode::class::CharClass;

/// Iterator over maximal runs of same-class characters.
///
/// Yields `(class, run)` pairs left to right. The runs partition the input:
/// concatenating them reproduces it exactly.
#[derive(Clone, Debug)]
pub struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Runs<'a> {
    type Item = (CharClass, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let mut chars = self.rest.char_indices();
        let (_, first) = chars.next()?;
        let class = CharClass::of(first);
        let end = chars
            .find(|&(_, ch)| CharClass::of(ch) != class)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some((class, run))
    }
}

/// Iterate over the word / non-word runs of `text`.
///
/// Empty input yields no runs.
#[must_use]
pub fn runs(text: &str) -> Runs<'_> {
    Runs { rest: text }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<(bool, &str)> {
        runs(text).map(|(class, run)| (class.is_word(), run)).collect()
    }

    #[test]
    fn test_runs_basic() {
        assert_eq!(
            collect("hello, world!"),
            vec![
                (true, "hello"),
                (false, ", "),
                (true, "world"),
                (false, "!"),
            ]
        );
    }

    #[test]
    fn test_runs_empty() {
        assert!(runs("").next().is_none());
    }

    #[test]
    fn test_runs_single_class() {
        assert_eq!(collect("abc123"), vec![(true, "abc123")]);
        assert_eq!(collect("  ..  "), vec![(false, "  ..  ")]);
    }

    #[test]
    fn test_runs_mixed_scripts() {
        assert_eq!(
            collect("안녕 世界"),
            vec![(true, "안녕"), (false, " "), (true, "世界")]
        );
    }

    #[test]
    fn test_runs_multibyte_boundaries() {
        let text = "é😀é";
        assert_eq!(collect(text), vec![(true, "é"), (false, "😀"), (true, "é")]);
        let joined: String = runs(text).map(|(_, r)| r).collect();
        assert_eq!(joined, text);
    }
}
