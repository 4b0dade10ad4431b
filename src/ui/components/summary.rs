use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::SessionSummary;
use crate::ui::theme::Theme;

pub struct Summary<'a> {
    pub summary: &'a SessionSummary,
    pub theme: &'a Theme,
}

impl<'a> Summary<'a> {
    pub fn new(summary: &'a SessionSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.summary.title))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let finished = self.summary.finished_at.format("%H:%M").to_string();
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Session Complete",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({} sections, {finished})", self.summary.sections),
                Style::default().fg(colors.text_pending()),
            ),
        ]))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let wpm_text = format!("{:.1} WPM", self.summary.wpm);
        Paragraph::new(Line::from(vec![
            Span::styled("  Speed:     ", Style::default().fg(colors.fg())),
            Span::styled(
                wpm_text,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[1], buf);

        let acc_color = if self.summary.accuracy >= 95.0 {
            colors.success()
        } else if self.summary.accuracy >= 85.0 {
            colors.warning()
        } else {
            colors.error()
        };
        Paragraph::new(Line::from(vec![
            Span::styled("  Accuracy:  ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.1}%", self.summary.accuracy),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[2], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  Time:      ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.1}s", self.summary.elapsed_secs),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                format!("  ({} chars)", self.summary.chars_typed),
                Style::default().fg(colors.text_pending()),
            ),
        ]))
        .render(layout[3], buf);

        let corrected = self.summary.corrected_errors;
        Paragraph::new(Line::from(vec![
            Span::styled("  Corrected: ", Style::default().fg(colors.fg())),
            Span::styled(
                corrected.to_string(),
                Style::default().fg(if corrected == 0 {
                    colors.success()
                } else {
                    colors.error()
                }),
            ),
        ]))
        .render(layout[4], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  [r/Enter] Again  ", Style::default().fg(colors.accent())),
            Span::styled("[q/Esc] Menu", Style::default().fg(colors.accent())),
        ]))
        .render(layout[6], buf);
    }
}
