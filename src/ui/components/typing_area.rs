use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::config::Spacing;
use crate::session::SessionText;
use crate::text::{
    ClassifiedLine, Cursor, EmitFilter, WrappedGuide, classify, cursor_position, fix_height,
    window_markers, window_start,
};
use crate::ui::layout::text_area;
use crate::ui::theme::Theme;

const MIN_MARKER_HEIGHT: usize = 3;

/// What a single cell of the viewport shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellKind {
    Pending(char),
    Correct(char),
    Incorrect(char),
    Cursor(char),
    Marker(char),
}

pub struct TypingArea<'a> {
    text: &'a SessionText,
    theme: &'a Theme,
    padding: Spacing,
    more_above: &'a str,
    more_below: &'a str,
}

impl<'a> TypingArea<'a> {
    pub fn new(text: &'a SessionText, theme: &'a Theme, padding: Spacing) -> Self {
        Self {
            text,
            theme,
            padding,
            more_above: "^^^",
            more_below: "vvv",
        }
    }

    pub fn markers(mut self, more_above: &'a str, more_below: &'a str) -> Self {
        self.more_above = more_above;
        self.more_below = more_below;
        self
    }
}

/// Lay out the visible rows: guide text with correct and incorrect input on
/// top, clipped to `height` rows around the cursor line.
fn build_rows(
    guide: &WrappedGuide,
    correct: &[ClassifiedLine],
    incorrect: &[ClassifiedLine],
    cursor: Cursor,
    height: usize,
    more_above: &str,
    more_below: &str,
) -> Vec<Vec<CellKind>> {
    let above: Vec<char> = more_above.chars().collect();
    let below: Vec<char> = more_below.chars().collect();
    let empty: ClassifiedLine = Vec::new();

    let len = guide.len();
    let start = window_start(len, cursor.line, height);
    // Below three rows a marker could cover the cursor line.
    let (clipped_top, clipped_bottom) = if height < MIN_MARKER_HEIGHT {
        (false, false)
    } else {
        window_markers(len, cursor.line, height)
    };
    let guide_rows = fix_height(
        guide.lines(),
        cursor.line,
        height,
        clipped_top.then_some(&above),
        clipped_bottom.then_some(&below),
    );
    let top = clipped_top.then_some(&empty);
    let bottom = clipped_bottom.then_some(&empty);
    let correct_rows = fix_height(correct, cursor.line, height, top, bottom);
    let incorrect_rows = fix_height(incorrect, cursor.line, height, top, bottom);

    guide_rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let is_marker = (i == 0 && clipped_top) || (i + 1 == guide_rows.len() && clipped_bottom);
            if is_marker {
                return row.iter().map(|&c| CellKind::Marker(c)).collect();
            }

            let line = start + i;
            let mut cells: Vec<CellKind> = row
                .iter()
                .enumerate()
                .map(|(col, &expected)| {
                    if cursor == (Cursor { line, column: col }) {
                        return CellKind::Cursor(expected);
                    }
                    let typed_ok = correct_rows.get(i).and_then(|r| r.get(col)).copied().flatten();
                    let typed_bad = incorrect_rows.get(i).and_then(|r| r.get(col)).copied().flatten();
                    match (typed_ok, typed_bad) {
                        (Some(c), _) => CellKind::Correct(c),
                        (None, Some(c)) => CellKind::Incorrect(c),
                        (None, None) => CellKind::Pending(expected),
                    }
                })
                .collect();
            if cursor.line == line && cursor.column == row.len() {
                cells.push(CellKind::Cursor(' '));
            }
            cells
        })
        .collect()
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        block.render(area, buf);

        let inner = text_area(area, self.padding);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = inner.width as usize;
        let height = inner.height as usize;

        let guide = match self.text.guide(width) {
            Ok(guide) => guide,
            Err(err) => {
                let notice = Paragraph::new(vec![
                    Line::from("Terminal too narrow for this text."),
                    Line::from(err.to_string()),
                ])
                .style(Style::default().fg(colors.error()))
                .wrap(Wrap { trim: true });
                notice.render(inner, buf);
                return;
            }
        };

        // All three views come from the same typed buffer.
        let typed = self.text.typed();
        let rules = self.text.rules();
        let all = classify(&guide, typed, rules, EmitFilter::ALL);
        let correct = classify(&guide, typed, rules, EmitFilter::CORRECT);
        let incorrect = classify(&guide, typed, rules, EmitFilter::INCORRECT);
        let cursor = cursor_position(&guide, &all);

        let rows = build_rows(
            &guide,
            &correct,
            &incorrect,
            cursor,
            height,
            self.more_above,
            self.more_below,
        );

        for (i, row) in rows.iter().enumerate() {
            let y = inner.y + i as u16;
            for (j, cell) in row.iter().enumerate().take(width) {
                let x = inner.x + j as u16;
                let (ch, style) = match *cell {
                    CellKind::Pending(c) => (c, Style::default().fg(colors.text_pending())),
                    CellKind::Correct(c) => (
                        c,
                        Style::default()
                            .fg(colors.text_correct())
                            .add_modifier(Modifier::ITALIC),
                    ),
                    CellKind::Incorrect(c) => (
                        c,
                        Style::default()
                            .fg(colors.text_incorrect())
                            .bg(colors.text_incorrect_bg())
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                    CellKind::Cursor(c) => (
                        c,
                        Style::default()
                            .fg(colors.text_cursor_fg())
                            .bg(colors.text_cursor_bg()),
                    ),
                    CellKind::Marker(c) => (c, Style::default().fg(colors.accent())),
                };
                buf[(x, y)].set_char(ch).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{ReplacementRules, wrap};

    fn rows_for(text: &str, typed: &str, width: usize, height: usize) -> Vec<Vec<CellKind>> {
        let rules = ReplacementRules::default();
        let guide = wrap(text, width, &rules).unwrap();
        let typed: Vec<char> = typed.chars().collect();
        let all = classify(&guide, &typed, &rules, EmitFilter::ALL);
        let correct = classify(&guide, &typed, &rules, EmitFilter::CORRECT);
        let incorrect = classify(&guide, &typed, &rules, EmitFilter::INCORRECT);
        let cursor = cursor_position(&guide, &all);
        build_rows(&guide, &correct, &incorrect, cursor, height, "^^^", "vvv")
    }

    #[test]
    fn test_rows_mark_typed_cells() {
        let rows = rows_for("abc", "ax", 10, 3);
        assert_eq!(
            rows,
            vec![vec![
                CellKind::Correct('a'),
                CellKind::Incorrect('x'),
                CellKind::Cursor('c'),
            ]]
        );
    }

    #[test]
    fn test_cursor_after_last_char_gets_extra_cell() {
        let rows = rows_for("ab", "ab", 10, 3);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0][2], CellKind::Cursor(' '));
    }

    #[test]
    fn test_clipped_rows_show_markers() {
        // Eight one-word lines, cursor on line 4 of a 5-row window.
        let text = "aa bb cc dd ee ff gg hh";
        let rows = rows_for(text, "aa bb cc dd ", 3, 5);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], vec![CellKind::Marker('^'); 3]);
        assert_eq!(rows[4], vec![CellKind::Marker('v'); 3]);
        assert_eq!(rows[2][0], CellKind::Cursor('e'));
        assert_eq!(rows[1][0], CellKind::Correct('d'));
    }

    #[test]
    fn test_centered_window_at_last_lines_marks_bottom_row() {
        // Cursor on line 5 of 8: the window reaches the last line but is
        // still centered, so the bottom row is a marker.
        let text = "aa bb cc dd ee ff gg hh";
        let rows = rows_for(text, "aa bb cc dd ee ", 3, 5);
        assert_eq!(rows[0], vec![CellKind::Marker('^'); 3]);
        assert_eq!(rows[2][0], CellKind::Cursor('f'));
        assert_eq!(rows[4], vec![CellKind::Marker('v'); 3]);
    }

    #[test]
    fn test_short_viewport_keeps_cursor_line_visible() {
        let text = "aa bb cc dd ee ff gg hh";
        let rows = rows_for(text, "aa bb cc d", 3, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], CellKind::Correct('d'));
        assert_eq!(rows[0][1], CellKind::Cursor('d'));
        assert_eq!(rows[1][0], CellKind::Pending('e'));
    }

    #[test]
    fn test_no_markers_when_everything_fits() {
        let rows = rows_for("aa bb", "", 3, 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], CellKind::Cursor('a'));
        assert_eq!(rows[1][0], CellKind::Pending('b'));
    }
}
