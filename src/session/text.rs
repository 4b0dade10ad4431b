use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::text::{
    ClassifiedLine, EmitFilter, ReplacementRules, TextError, WrappedGuide, classify, wrap,
};

/// A typo the user backspaced over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypoError {
    pub expected: char,
    pub typed: char,
}

impl fmt::Display for TypoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "should be {:?} but is {:?}", self.expected, self.typed)
    }
}

/// Guide text of one section together with everything typed against it.
pub struct SessionText {
    raw: String,
    raw_len: usize,
    rules: ReplacementRules,
    typed: Vec<char>,
    corrected: Vec<TypoError>,
    cache: RefCell<Option<(usize, Rc<WrappedGuide>)>>,
}

impl SessionText {
    pub fn new(text: &str, rules: ReplacementRules) -> Self {
        Self {
            raw: text.to_string(),
            raw_len: text.chars().count(),
            rules,
            typed: Vec::new(),
            corrected: Vec::new(),
            cache: RefCell::new(None),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn corrected_errors(&self) -> &[TypoError] {
        &self.corrected
    }

    pub fn rules(&self) -> &ReplacementRules {
        &self.rules
    }

    pub fn type_char(&mut self, c: char) {
        self.typed.push(c);
    }

    /// Type a key given as a string; it has to be exactly one code point.
    pub fn type_str(&mut self, input: &str) -> Result<(), TextError> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                self.type_char(c);
                Ok(())
            }
            _ => Err(TextError::InvalidCharacter {
                input: input.to_string(),
            }),
        }
    }

    /// Remove the last typed character, logging it when it was wrong.
    ///
    /// Returns the logged typo, if any.
    pub fn type_backspace(&mut self) -> Option<TypoError> {
        let last = *self.typed.last()?;

        let guide = self.flat_guide();
        let classified = classify(&guide, &self.typed, &self.rules, EmitFilter::ALL);
        let typed_line = classified.into_iter().next().unwrap_or_default();
        let expected_line = guide.lines().first().map(Vec::as_slice).unwrap_or_default();

        // Positions covered by the character being removed; those past the
        // end of the guide were never compared.
        let end = self.rules.expand(self.typed.iter().copied()).len();
        let start = end - self.rules.display_len(last);
        let typo = (start..typed_line.len()).find_map(|pos| {
            let typed = typed_line[pos]?;
            let expected = expected_line[pos];
            (typed != expected).then_some(TypoError { expected, typed })
        });

        if let Some(typo) = typo {
            tracing::debug!(%typo, "corrected typo");
            self.corrected.push(typo);
        }
        self.typed.pop();
        typo
    }

    /// Length check only: a section completes with wrong characters in it.
    pub fn is_complete(&self) -> bool {
        self.typed.len() == self.raw_len
    }

    /// Percentage of correctly typed positions, counting corrected typos
    /// against the total. An untouched section reads 100.
    pub fn accuracy(&self) -> f64 {
        let complete = self.flat_classified(EmitFilter::ALL);
        if complete.is_empty() {
            return 100.0;
        }
        let correct = self.flat_classified(EmitFilter::CORRECT);
        let matching = complete.iter().zip(&correct).filter(|(a, c)| a == c).count();
        matching as f64 / (complete.len() + self.corrected.len()) as f64 * 100.0
    }

    /// Guide wrapped at `width`, cached until the width changes.
    pub fn guide(&self, width: usize) -> Result<Rc<WrappedGuide>, TextError> {
        if let Some((cached_width, guide)) = &*self.cache.borrow() {
            if *cached_width == width {
                return Ok(Rc::clone(guide));
            }
        }
        let guide = Rc::new(wrap(&self.raw, width, &self.rules)?);
        tracing::trace!(width, lines = guide.len(), "rewrapped guide text");
        *self.cache.borrow_mut() = Some((width, Rc::clone(&guide)));
        Ok(guide)
    }

    pub fn typed_lines(&self, width: usize, filter: EmitFilter) -> Result<Vec<ClassifiedLine>, TextError> {
        let guide = self.guide(width)?;
        Ok(classify(&guide, &self.typed, &self.rules, filter))
    }

    /// Number of guide positions covered by typed input.
    pub fn completed_len(&self) -> usize {
        self.flat_classified(EmitFilter::ALL).len()
    }

    pub fn progress(&self) -> f64 {
        if self.raw_len == 0 {
            return 0.0;
        }
        (self.typed.len() as f64 / self.raw_len as f64).min(1.0)
    }

    fn flat_guide(&self) -> WrappedGuide {
        WrappedGuide::single_line(&self.raw, &self.rules)
    }

    fn flat_classified(&self, filter: EmitFilter) -> ClassifiedLine {
        classify(&self.flat_guide(), &self.typed, &self.rules, filter)
            .into_iter()
            .flatten()
            .collect()
    }
}
