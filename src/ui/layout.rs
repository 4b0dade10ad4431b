use ratatui::layout::Rect;

use crate::config::Spacing;

pub const STAT_BOX_WIDTH: u16 = 9;
pub const STAT_BOX_HEIGHT: u16 = 3;

/// Screen regions of the typing screen.
pub struct SessionLayout {
    pub header: Rect,
    /// Bordered typing viewport, border included.
    pub typing: Rect,
    pub wpm: Rect,
    pub accuracy: Rect,
    pub footer: Rect,
}

impl SessionLayout {
    /// `max_width` caps the text columns inside border and padding; the
    /// viewport is centered horizontally when capped.
    pub fn new(area: Rect, margin: Spacing, padding: Spacing, max_width: u16) -> Self {
        let header = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let footer = Rect::new(
            area.x,
            area.y + area.height.saturating_sub(1),
            area.width,
            area.height.min(1),
        );

        let inset = shrink(area, margin);
        let chrome = padding.horizontal().saturating_add(2);
        let width = inset.width.min(max_width.saturating_add(chrome));
        let typing = Rect::new(
            inset.x + (inset.width - width) / 2,
            inset.y,
            width,
            inset.height,
        );

        let box_x = area.right().saturating_sub(STAT_BOX_WIDTH + 1).max(area.x);
        let box_w = STAT_BOX_WIDTH.min(area.width);
        let box_h = STAT_BOX_HEIGHT.min(area.height);
        let wpm = Rect::new(box_x, area.y + area.height.min(1), box_w, box_h);
        let accuracy = Rect::new(
            box_x,
            area.bottom().saturating_sub(STAT_BOX_HEIGHT + 1).max(area.y),
            box_w,
            box_h,
        );

        Self {
            header,
            typing,
            wpm,
            accuracy,
            footer,
        }
    }
}

/// Text area inside the viewport border and padding.
pub fn text_area(typing: Rect, padding: Spacing) -> Rect {
    let inner = shrink(typing, Spacing::new(1, 1, 1, 1));
    shrink(inner, padding)
}

/// `area` minus `spacing` on each side, never negative.
pub fn shrink(area: Rect, spacing: Spacing) -> Rect {
    let left = spacing.left.min(area.width);
    let top = spacing.top.min(area.height);
    let width = area.width.saturating_sub(spacing.horizontal());
    let height = area.height.saturating_sub(spacing.vertical());
    Rect::new(area.x + left, area.y + top, width, height)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 12;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARGIN: Spacing = Spacing::new(4, 4, 5, 6);
    const PADDING: Spacing = Spacing::new(3, 3, 1, 1);

    #[test]
    fn test_typing_area_respects_margins() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = SessionLayout::new(area, MARGIN, PADDING, 120);
        assert_eq!(layout.typing, Rect::new(4, 5, 92, 29));
        let text = text_area(layout.typing, PADDING);
        assert_eq!(text, Rect::new(8, 7, 84, 25));
    }

    #[test]
    fn test_typing_area_capped_and_centered() {
        let area = Rect::new(0, 0, 200, 40);
        let layout = SessionLayout::new(area, MARGIN, PADDING, 120);
        assert_eq!(layout.typing.width, 128);
        assert_eq!(layout.typing.x, 4 + (192 - 128) / 2);
        assert_eq!(text_area(layout.typing, PADDING).width, 120);
    }

    #[test]
    fn test_tiny_terminal_does_not_underflow() {
        let area = Rect::new(0, 0, 5, 3);
        let layout = SessionLayout::new(area, MARGIN, PADDING, 120);
        assert_eq!(layout.typing.width, 0);
        assert_eq!(layout.typing.height, 0);
        assert!(layout.wpm.width <= area.width);
        assert_eq!(text_area(layout.typing, PADDING), Rect::new(layout.typing.x, layout.typing.y, 0, 0));
    }

    #[test]
    fn test_stat_boxes_on_right_edge() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = SessionLayout::new(area, MARGIN, PADDING, 120);
        assert_eq!(layout.wpm, Rect::new(90, 1, 9, 3));
        assert_eq!(layout.accuracy, Rect::new(90, 36, 9, 3));
    }
}
