//! Controls overlay listing every action and its bindings.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};

use super::theme::Theme;

pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
}

impl<'a> Widget for ControlsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + blank + tuning line + blank + hint + 2 border + 1 leading blank
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Controls ")
            .title_style(Theme::popup_title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::popup_border_style());

        let inner = block.inner(popup);
        block.render(popup, buf);

        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = vec![Line::raw("")];

        for &action in Action::ALL {
            // Fixed-width columns: label left-aligned, keys right-aligned.
            let label_col = format!("   {:<22}", action.label());
            let keys_width = (inner.width as usize)
                .saturating_sub(label_col.len() + 1)
                .max(1);
            let keys_col = format!("{:>keys_width$}", self.config.display_bindings(action));
            lines.push(Line::from(vec![
                Span::styled(label_col, Style::default().fg(Color::White)),
                Span::styled(keys_col, Theme::key_style()),
            ]));
        }

        let spring = &self.config.carousel.spring;
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!(
                "   spring {}/{}/{}  loop ×{}  wheel {} rows",
                spring.stiffness,
                spring.damping,
                spring.mass,
                self.config.carousel.loop_factor,
                self.config.display.wheel_rows
            ),
            dim,
        )));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("   Any key: close", dim)));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn lists_every_action() {
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        ControlsPopup { config: &config }.render(area, &mut buf);
        let rendered = text(&buf);
        assert!(rendered.contains("Controls"));
        for action in Action::ALL {
            assert!(rendered.contains(action.label()), "{}", action.label());
        }
        assert!(rendered.contains("spring 120/25/1"));
    }

    #[test]
    fn popup_is_clamped_to_small_areas() {
        assert_eq!(centered_fixed(52, 19, Rect::new(0, 0, 30, 10)), Rect::new(0, 0, 30, 10));
        assert_eq!(centered_fixed(52, 19, Rect::new(0, 0, 100, 41)), Rect::new(24, 11, 52, 19));
    }
}
