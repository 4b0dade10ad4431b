use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Small bordered box holding one live number, e.g. WPM.
pub struct StatBox<'a> {
    pub label: String,
    pub value: String,
    pub theme: &'a Theme,
}

impl<'a> StatBox<'a> {
    pub fn new(label: &str, value: f64, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            value: format!("{value:.1}"),
            theme,
        }
    }
}

impl Widget for StatBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.label)
            .border_style(Style::default().fg(colors.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        Paragraph::new(self.value)
            .style(Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_formatted_with_one_decimal() {
        let theme = Theme::default();
        let stat = StatBox::new("wpm", 42.345, &theme);
        assert_eq!(stat.value, "42.3");
    }

    #[test]
    fn test_render_writes_value() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 9, 3);
        let mut buf = Buffer::empty(area);
        StatBox::new("acc", 97.5, &theme).render(area, &mut buf);
        let row: String = (0..9u16).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("97.5"), "{row:?}");
    }
}
