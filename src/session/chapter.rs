use std::time::Instant;

use chrono::{DateTime, Local};

use crate::session::{SessionError, SessionFile, SessionText};
use crate::text::ReplacementRules;

pub const CHARACTERS_PER_WORD: f64 = 5.0;

/// Counts kept from a finished section.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SectionStats {
    typed_len: usize,
    accuracy: f64,
    corrected: usize,
}

/// One run through all sections of a session file.
pub struct Session {
    file: SessionFile,
    rules: ReplacementRules,
    section: usize,
    text: Option<SessionText>,
    finished_sections: Vec<SectionStats>,
    typed_carryover: usize,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub title: String,
    pub sections: usize,
    pub chars_typed: usize,
    pub corrected_errors: usize,
    pub wpm: f64,
    pub accuracy: f64,
    pub elapsed_secs: f64,
    pub finished_at: DateTime<Local>,
}

impl Session {
    /// Empty sections are dropped, since nothing typed could ever complete
    /// them; a file left without sections is `EmptySession`.
    pub fn new(mut file: SessionFile, rules: ReplacementRules) -> Result<Self, SessionError> {
        let before = file.sections.len();
        file.sections.retain(|section| !section.is_empty());
        if file.sections.len() < before {
            tracing::debug!(
                title = %file.title,
                skipped = before - file.sections.len(),
                "skipping empty sections"
            );
        }
        let first = file.sections.first().ok_or(SessionError::EmptySession)?;
        let text = SessionText::new(first, rules.clone());
        Ok(Self {
            file,
            rules,
            section: 0,
            text: Some(text),
            finished_sections: Vec::new(),
            typed_carryover: 0,
            started_at: None,
            finished_at: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.file.title
    }

    pub fn section_index(&self) -> usize {
        self.section
    }

    pub fn section_count(&self) -> usize {
        self.file.sections.len()
    }

    /// Text of the section being typed; `None` once all sections are done.
    pub fn text(&self) -> Option<&SessionText> {
        self.text.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.text.is_none()
    }

    pub fn type_char(&mut self, c: char) {
        let Some(text) = self.text.as_mut() else {
            return;
        };
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        text.type_char(c);
    }

    pub fn type_backspace(&mut self) {
        if let Some(text) = self.text.as_mut() {
            if let Some(typo) = text.type_backspace() {
                tracing::info!(%typo, section = self.section, "typo corrected");
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.text.as_ref().is_some_and(SessionText::is_complete)
    }

    /// Close the current section and move to the next one.
    ///
    /// Returns the new section index, or `None` when the section list is
    /// exhausted and the session is finished.
    pub fn next_section(&mut self) -> Option<usize> {
        let text = self.text.take()?;
        self.typed_carryover += text.typed().len();
        self.finished_sections.push(SectionStats {
            typed_len: text.completed_len(),
            accuracy: text.accuracy(),
            corrected: text.corrected_errors().len(),
        });

        let next = self.section + 1;
        match self.file.sections.get(next) {
            Some(section) => {
                self.section = next;
                self.text = Some(SessionText::new(section, self.rules.clone()));
                Some(next)
            }
            None => {
                self.finished_at = Some(Instant::now());
                None
            }
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start).as_secs_f64(),
            (Some(start), None) => start.elapsed().as_secs_f64(),
            _ => 0.0,
        }
    }

    pub fn chars_typed(&self) -> usize {
        self.typed_carryover + self.text.as_ref().map_or(0, |t| t.typed().len())
    }

    pub fn wpm(&self) -> f64 {
        let elapsed = self.elapsed_secs();
        if elapsed < 0.1 {
            return 0.0;
        }
        (self.chars_typed() as f64 / CHARACTERS_PER_WORD) / (elapsed / 60.0)
    }

    /// Accuracy over all sections, weighted by how much was typed in each.
    pub fn accuracy(&self) -> f64 {
        let mut total_len = 0.0;
        let mut weighted = 0.0;
        if let Some(text) = &self.text {
            let len = text.completed_len().max(1) as f64;
            total_len += len;
            weighted += text.accuracy() * len;
        }
        for stats in &self.finished_sections {
            total_len += stats.typed_len as f64;
            weighted += stats.accuracy * stats.typed_len as f64;
        }
        if total_len == 0.0 {
            return 100.0;
        }
        weighted / total_len
    }

    pub fn corrected_errors(&self) -> usize {
        let current = self.text.as_ref().map_or(0, |t| t.corrected_errors().len());
        current + self.finished_sections.iter().map(|s| s.corrected).sum::<usize>()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            title: self.file.title.clone(),
            sections: self.finished_sections.len(),
            chars_typed: self.chars_typed(),
            corrected_errors: self.corrected_errors(),
            wpm: self.wpm(),
            accuracy: self.accuracy(),
            elapsed_secs: self.elapsed_secs(),
            finished_at: Local::now(),
        }
    }
}
