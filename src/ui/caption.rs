//! Bottom-left caption: title and description of the centred slide,
//! fading and drifting down as it moves away.

use ratatui::{buffer::Buffer, layout::Position, layout::Rect, style::Style, widgets::Widget};

use crate::core::carousel::Frame;
use crate::core::item::{Item, Rgba};

use super::theme::{fade_over, Theme};

/// Layout pixels per terminal row.
const PX_PER_ROW: f64 = 16.0;
const INSET: f64 = 0.10;
const WHITE: Rgba = Rgba::opaque(255, 255, 255);

pub struct CaptionWidget<'a> {
    pub frame: &'a Frame,
    pub items: &'a [Item],
}

impl Widget for CaptionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let left = area.x + (area.width as f64 * INSET) as u16;
        let max_width = (area.width as usize / 2).max(12);

        for item_frame in &self.frame.items {
            let caption = item_frame.caption;
            if !caption.is_visible() {
                continue;
            }
            let Some(item) = self.items.get(item_frame.index) else {
                continue;
            };

            let mut lines: Vec<(String, Style)> =
                vec![(item.title.clone(), Theme::caption_title_style())];
            lines.extend(
                wrap(&item.description, max_width)
                    .into_iter()
                    .map(|l| (l, Style::default())),
            );

            // Last line sits INSET above the bottom, pushed down by the drift.
            let drift = (caption.y_px / PX_PER_ROW).round() as i32;
            let bottom = area.bottom() as i32 - 1 - (area.height as f64 * INSET) as i32 + drift;
            let top = bottom - lines.len() as i32 + 1;

            for (n, (text, style)) in lines.iter().enumerate() {
                let y = top + n as i32;
                if y < area.y as i32 || y >= area.bottom() as i32 {
                    continue;
                }
                put_faded(buf, left, y as u16, area.right(), text, *style, caption.opacity);
            }
        }
    }
}

/// Write `text` starting at (`x`, `y`) with its colour faded over each
/// cell's existing background.
pub fn put_faded(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    right: u16,
    text: &str,
    style: Style,
    opacity: f64,
) {
    for (i, ch) in text.chars().enumerate() {
        let col = x + i as u16;
        if col >= right {
            break;
        }
        if let Some(cell) = buf.cell_mut(Position::new(col, y)) {
            let fg = fade_over(WHITE, cell.bg, opacity);
            cell.set_char(ch).set_style(style).set_fg(fg);
        }
    }
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if current.is_empty() {
            current = word;
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
