//! Mapping class indexes to human-readable labels.

use crate::core::constants::{LETTERS, UNKNOWN_LABEL};

/// How the letter classifier lays out its output classes.
///
/// EMNIST "letters" models are commonly exported either with exactly 26
/// outputs (`A` at index 0) or with 27 outputs where index 0 is an unused
/// placeholder and `A` sits at index 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterIndexScheme {
    /// Index `i` is letter `i`, for `i` in `0..26`.
    ZeroBased,
    /// Index `i` is letter `i - 1`, for `i` in `1..=26`; index 0 is unused.
    OneBasedWithUnusedZero,
}

impl LetterIndexScheme {
    /// Picks the scheme from the width of the model output.
    pub fn from_num_classes(num_classes: usize) -> Self {
        if num_classes == LETTERS.len() {
            Self::ZeroBased
        } else {
            Self::OneBasedWithUnusedZero
        }
    }

    /// Maps a class index to a letter, or `?` when it maps to none.
    pub fn letter(self, index: usize) -> char {
        let slot = match self {
            Self::ZeroBased => Some(index),
            Self::OneBasedWithUnusedZero => index.checked_sub(1),
        };
        slot.and_then(|i| LETTERS.get(i).copied()).unwrap_or(UNKNOWN_LABEL)
    }
}

/// The label space of a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMapper {
    /// Classes are the digits `0..=9`; the label is the index itself.
    Digit,
    /// Classes are letters laid out by the given scheme.
    Letter(LetterIndexScheme),
}

impl LabelMapper {
    /// Builds the letter mapper for a classifier with `num_classes` outputs.
    pub fn letters(num_classes: usize) -> Self {
        Self::Letter(LetterIndexScheme::from_num_classes(num_classes))
    }

    /// Returns the letter for `index`, or `None` for the digit label space.
    pub fn letter(&self, index: usize) -> Option<char> {
        match self {
            Self::Digit => None,
            Self::Letter(scheme) => Some(scheme.letter(index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_based_scheme() {
        let scheme = LetterIndexScheme::from_num_classes(26);
        assert_eq!(scheme, LetterIndexScheme::ZeroBased);
        assert_eq!(scheme.letter(0), 'A');
        assert_eq!(scheme.letter(25), 'Z');
        assert_eq!(scheme.letter(26), '?');
    }

    #[test]
    fn test_one_based_scheme() {
        let scheme = LetterIndexScheme::from_num_classes(27);
        assert_eq!(scheme, LetterIndexScheme::OneBasedWithUnusedZero);
        assert_eq!(scheme.letter(0), '?');
        assert_eq!(scheme.letter(1), 'A');
        assert_eq!(scheme.letter(26), 'Z');
        assert_eq!(scheme.letter(27), '?');
    }

    #[test]
    fn test_other_widths_use_one_based() {
        assert_eq!(
            LetterIndexScheme::from_num_classes(37),
            LetterIndexScheme::OneBasedWithUnusedZero
        );
    }

    #[test]
    fn test_label_mapper() {
        assert_eq!(LabelMapper::Digit.letter(3), None);
        assert_eq!(LabelMapper::letters(26).letter(2), Some('C'));
        assert_eq!(LabelMapper::letters(27).letter(3), Some('C'));
    }
}
