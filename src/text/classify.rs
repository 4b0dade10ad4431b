use crate::text::{ReplacementRules, WrappedGuide};

/// Typed characters laid out like a guide line: `Some(c)` where the typed
/// character passed the filter, `None` where it was filtered out.
pub type ClassifiedLine = Vec<Option<char>>;

/// Which typed characters `classify` keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmitFilter {
    pub correct: bool,
    pub incorrect: bool,
}

impl EmitFilter {
    pub const ALL: Self = Self {
        correct: true,
        incorrect: true,
    };
    pub const CORRECT: Self = Self {
        correct: true,
        incorrect: false,
    };
    pub const INCORRECT: Self = Self {
        correct: false,
        incorrect: true,
    };

    fn emits(self, matched: bool) -> bool {
        if matched { self.correct } else { self.incorrect }
    }
}

/// Position right after the last typed character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

/// Map the typed buffer onto the guide lines position by position.
///
/// Typed characters go through the same substitution as the guide, so a
/// single tab can cover several guide positions. Lines past the end of the
/// typed stream come back empty.
pub fn classify(
    guide: &WrappedGuide,
    typed: &[char],
    rules: &ReplacementRules,
    filter: EmitFilter,
) -> Vec<ClassifiedLine> {
    let stream = rules.expand(typed.iter().copied());
    let mut rest = stream.as_slice();

    guide
        .lines()
        .iter()
        .map(|line| {
            let (consumed, tail) = rest.split_at(rest.len().min(line.len()));
            rest = tail;
            consumed
                .iter()
                .zip(line)
                .map(|(&got, &expected)| filter.emits(got == expected).then_some(got))
                .collect()
        })
        .collect()
}

/// Locate the cursor from an `EmitFilter::ALL` classification.
///
/// A completely typed line puts the cursor at the start of the following
/// line, if there is one.
pub fn cursor_position(guide: &WrappedGuide, classified: &[ClassifiedLine]) -> Cursor {
    let Some(line) = classified.iter().rposition(|l| !l.is_empty()) else {
        return Cursor::default();
    };
    let column = classified[line].len();
    let line_len = guide.lines().get(line).map_or(0, Vec::len);

    if column >= line_len && line + 1 < guide.len() {
        Cursor {
            line: line + 1,
            column: 0,
        }
    } else {
        Cursor { line, column }
    }
}
