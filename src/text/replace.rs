use std::collections::BTreeMap;

use crate::text::{SEPARATOR, TextError};

pub const DEFAULT_RETURN_SYMBOL: &str = "\u{23ce}"; // ⏎
pub const DEFAULT_TAB_SYMBOL: &str = "\u{21b9}"; // ↹
pub const DEFAULT_TAB_FILL: char = '\u{00b7}'; // ·

/// Maps control characters in guide and typed text to visible glyphs.
///
/// A newline replacement (the "glue") is always present; the wrapper breaks
/// lines right after it. No replacement may contain the word separator,
/// otherwise word boundaries shift between raw and displayed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplacementRules {
    map: BTreeMap<char, String>,
}

impl ReplacementRules {
    pub fn new(newline_glue: &str) -> Result<Self, TextError> {
        Self {
            map: BTreeMap::new(),
        }
        .with('\n', newline_glue)
    }

    pub fn with(mut self, key: char, replacement: &str) -> Result<Self, TextError> {
        if key == SEPARATOR || replacement.is_empty() || replacement.contains(SEPARATOR) {
            return Err(TextError::InvalidReplacement {
                key,
                replacement: replacement.to_string(),
            });
        }
        self.map.insert(key, replacement.to_string());
        Ok(self)
    }

    /// Newline glyph plus a tab glyph padded with `fill` to four columns.
    pub fn from_symbols(return_symbol: &str, tab_symbol: &str, tab_fill: char) -> Result<Self, TextError> {
        let mut tab = tab_symbol.to_string();
        for _ in 1..4 {
            tab.push(tab_fill);
        }
        Self::new(return_symbol)?.with('\t', &tab)
    }

    pub fn newline_glue(&self) -> &str {
        // Always inserted by `new`.
        self.map.get(&'\n').map_or("\n", String::as_str)
    }

    pub fn get(&self, ch: char) -> Option<&str> {
        self.map.get(&ch).map(String::as_str)
    }

    /// Number of displayed characters produced by `ch`.
    pub fn display_len(&self, ch: char) -> usize {
        self.get(ch).map_or(1, |r| r.chars().count())
    }

    /// Append the displayed form of `ch` to `out`.
    pub fn push_substituted(&self, ch: char, out: &mut Vec<char>) {
        match self.get(ch) {
            Some(replacement) => out.extend(replacement.chars()),
            None => out.push(ch),
        }
    }

    /// Substitute every character independently and flatten the result.
    pub fn expand<I>(&self, chars: I) -> Vec<char>
    where
        I: IntoIterator<Item = char>,
    {
        let mut out = Vec::new();
        for ch in chars {
            self.push_substituted(ch, &mut out);
        }
        out
    }

    pub fn apply(&self, text: &str) -> Vec<char> {
        self.expand(text.chars())
    }
}

impl Default for ReplacementRules {
    fn default() -> Self {
        let mut tab = DEFAULT_TAB_SYMBOL.to_string();
        tab.extend([DEFAULT_TAB_FILL; 3]);
        let map = BTreeMap::from([
            ('\n', DEFAULT_RETURN_SYMBOL.to_string()),
            ('\t', tab),
        ]);
        Self { map }
    }
}
