//! Position dots, one per slide, in the top-right corner.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::core::carousel::Frame;

use super::caption::put_faded;

const DOT: &str = "●";

pub struct IndicatorWidget<'a> {
    pub frame: &'a Frame,
}

impl Widget for IndicatorWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let count = self.frame.items.len() as u16;
        if count == 0 || area.height < 2 {
            return;
        }
        // "● ● ●" plus a two-column margin.
        let width = count * 2 - 1;
        let Some(x) = area.right().checked_sub(width + 2) else {
            return;
        };
        if x < area.x {
            return;
        }
        let y = area.y + 1;
        for item in &self.frame.items {
            let col = x + item.index as u16 * 2;
            put_faded(buf, col, y, area.right(), DOT, Style::default(), item.indicator_opacity);
        }
    }
}
