use crate::text::{ReplacementRules, SEPARATOR, TextError};

/// One rendered row of guide text, after substitution.
pub type WrappedLine = Vec<char>;

/// Guide text split into rows no wider than the width it was wrapped at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WrappedGuide {
    lines: Vec<WrappedLine>,
}

impl WrappedGuide {
    /// The whole substituted text on one row. Positions in it are the same as
    /// in any successful wrap, so it serves for width-independent bookkeeping.
    pub fn single_line(text: &str, rules: &ReplacementRules) -> Self {
        let line = rules.apply(text);
        if line.is_empty() {
            Self::default()
        } else {
            Self { lines: vec![line] }
        }
    }

    pub fn lines(&self) -> &[WrappedLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of displayed characters.
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

struct Unit {
    chars: Vec<char>,
    /// Ends with the newline glue: closes its line and takes no separator.
    hard_break: bool,
}

fn split_units(text: &str, rules: &ReplacementRules) -> Vec<Unit> {
    let glue: Vec<char> = rules.newline_glue().chars().collect();
    let mut units = Vec::new();

    for word in text.split(SEPARATOR) {
        let mut pieces = word.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            let mut chars = rules.apply(piece);
            let hard_break = pieces.peek().is_some();
            if hard_break {
                chars.extend_from_slice(&glue);
            }
            units.push(Unit { chars, hard_break });
        }
    }

    units
}

/// Greedy word wrap of `text` into rows of at most `width` characters.
///
/// Every unit except the textually-last one reserves room for its trailing
/// separator, so a unit must fit in `width - 1` whenever the text has more
/// than one unit.
pub fn wrap(text: &str, width: usize, rules: &ReplacementRules) -> Result<WrappedGuide, TextError> {
    let units = split_units(text, rules);
    let count = units.len();
    let mut lines = Vec::new();
    let mut current: WrappedLine = Vec::new();

    for (i, unit) in units.iter().enumerate() {
        let len = unit.chars.len();
        let is_last = i + 1 == count;

        if len > width || (count > 1 && len + 1 > width) {
            return Err(TextError::LineTooLong {
                unit: unit.chars.iter().collect(),
                width,
            });
        }

        let needed = if is_last { len } else { len + 1 };
        if !current.is_empty() && current.len() + needed > width {
            lines.push(std::mem::take(&mut current));
        }

        current.extend_from_slice(&unit.chars);
        if unit.hard_break {
            lines.push(std::mem::take(&mut current));
        } else if !is_last {
            current.push(SEPARATOR);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    Ok(WrappedGuide { lines })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RET: char = '\u{23ce}';

    fn rows(guide: &WrappedGuide) -> Vec<String> {
        guide.lines().iter().map(|l| l.iter().collect()).collect()
    }

    fn wrap_default(text: &str, width: usize) -> Result<WrappedGuide, TextError> {
        wrap(text, width, &ReplacementRules::default())
    }

    #[test]
    fn test_wrap_greedy_fill() {
        let guide = wrap_default("the red fox jumps", 8).unwrap();
        assert_eq!(rows(&guide), vec!["the red ", "fox ", "jumps"]);
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        let guide = wrap_default("the red fox", 11).unwrap();
        assert_eq!(rows(&guide), vec!["the red fox"]);
    }

    #[test]
    fn test_last_word_needs_no_separator() {
        // "ab " takes 3, "cd" fits exactly without a trailing space.
        let guide = wrap_default("ab cd", 5).unwrap();
        assert_eq!(rows(&guide), vec!["ab cd"]);
        let guide = wrap_default("ab cd", 4).unwrap();
        assert_eq!(rows(&guide), vec!["ab ", "cd"]);
    }

    #[test]
    fn test_word_exactly_width_with_other_words_fails() {
        let err = wrap_default("abcd ef", 4).unwrap_err();
        assert_eq!(
            err,
            TextError::LineTooLong {
                unit: "abcd".to_string(),
                width: 4
            }
        );
    }

    #[test]
    fn test_lone_word_exactly_width_fits() {
        let guide = wrap_default("abcd", 4).unwrap();
        assert_eq!(rows(&guide), vec!["abcd"]);
    }

    #[test]
    fn test_unsplittable_word_is_line_too_long() {
        let err = wrap_default("averylongunsplittableword", 5).unwrap_err();
        assert!(matches!(err, TextError::LineTooLong { width: 5, .. }));
    }

    #[test]
    fn test_newline_breaks_line_without_artifact_space() {
        let guide = wrap_default("ab\ncd", 20).unwrap();
        assert_eq!(rows(&guide), vec![format!("ab{RET}"), "cd".to_string()]);
    }

    #[test]
    fn test_space_after_newline_is_kept_on_next_line() {
        let guide = wrap_default("ab\n cd", 20).unwrap();
        assert_eq!(rows(&guide), vec![format!("ab{RET}"), " cd".to_string()]);
    }

    #[test]
    fn test_trailing_and_consecutive_newlines() {
        let guide = wrap_default("a\n\nb\n", 20).unwrap();
        assert_eq!(
            rows(&guide),
            vec![format!("a{RET}"), format!("{RET}"), format!("b{RET}")]
        );
    }

    #[test]
    fn test_newline_glue_counts_toward_width() {
        // "ab⏎" is 3 wide and needs room for a separator when more units follow.
        assert!(wrap_default("ab\ncd", 3).is_err());
        assert_eq!(wrap_default("ab\ncd", 4).unwrap().len(), 2);
    }

    #[test]
    fn test_tab_is_substituted_inside_word() {
        let guide = wrap_default("\tx y", 20).unwrap();
        assert_eq!(rows(&guide), vec!["\u{21b9}\u{00b7}\u{00b7}\u{00b7}x y"]);
    }

    #[test]
    fn test_repeated_last_word_keeps_separators() {
        let guide = wrap_default("go go go", 20).unwrap();
        assert_eq!(rows(&guide), vec!["go go go"]);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        let guide = wrap_default("", 10).unwrap();
        assert!(guide.is_empty());
        assert_eq!(guide.char_count(), 0);
    }

    #[test]
    fn test_width_invariant() {
        let text = "Mr. Stubb, said I, turning to that worthy, who, buttoned up in his \
                    oil-jacket,\nwas now calmly smoking his pipe in the rain;\n\tI think";
        for width in 13..80 {
            let guide = wrap_default(text, width).unwrap();
            for line in guide.lines() {
                assert!(line.len() <= width, "width {width}: {line:?}");
            }
        }
    }

    #[test]
    fn test_round_trip_join() {
        let rules = ReplacementRules::default();
        let text = "one two  three\nfour\n five\tsix seven eight nine ten";
        let expected = rules.apply(text);
        for width in [12, 15, 20, 33, 100] {
            let guide = wrap(text, width, &rules).unwrap();
            let joined: Vec<char> = guide.lines().concat();
            assert_eq!(joined, expected, "width {width}");
            assert_eq!(guide.char_count(), expected.len());
        }
    }

    #[test]
    fn test_single_line_matches_substituted_text() {
        let rules = ReplacementRules::default();
        let guide = WrappedGuide::single_line("a\nb", &rules);
        assert_eq!(guide.len(), 1);
        assert_eq!(guide.lines()[0], vec!['a', RET, 'b']);
        assert!(WrappedGuide::single_line("", &rules).is_empty());
    }
}
