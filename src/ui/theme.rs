//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::item::Rgba;

/// Stage colour underneath every background gradient.
pub const BASE_BG: Rgba = Rgba::opaque(0x17, 0x17, 0x17);

/// Headline colour: white at half opacity over the base.
pub const HEADLINE: Rgba = Rgba {
    r: 255,
    g: 255,
    b: 255,
    a: 128,
};

/// Central theme. Colours defined here apply everywhere.
pub struct Theme;

impl Theme {
    // ── stage text ─────────────────────────────────────────────
    pub fn caption_title_style() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn headline_style() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn status_accent_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn key_style() -> Style {
        Style::default().fg(Color::Yellow)
    }
}

/// Convert to a terminal truecolour, ignoring alpha.
pub fn rgb(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Simulate `fg` drawn at `opacity` over whatever the cell already shows.
///
/// Terminals have no text alpha, so the foreground is mixed toward the
/// background colour instead.  Non-RGB backgrounds count as [`BASE_BG`].
pub fn fade_over(fg: Rgba, bg: Color, opacity: f64) -> Color {
    let under = match bg {
        Color::Rgb(r, g, b) => Rgba::opaque(r, g, b),
        _ => BASE_BG,
    };
    let t = (opacity * fg.alpha()).clamp(0.0, 1.0);
    rgb(under.lerp(Rgba { a: 255, ..fg }, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_endpoints() {
        let white = Rgba::opaque(255, 255, 255);
        assert_eq!(fade_over(white, Color::Rgb(0, 0, 0), 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(fade_over(white, Color::Rgb(0, 0, 0), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(fade_over(white, Color::Reset, 0.0), rgb(BASE_BG));
    }

    #[test]
    fn headline_is_half_white_over_base() {
        let c = fade_over(HEADLINE, rgb(BASE_BG), 1.0);
        let Color::Rgb(r, g, b) = c else {
            panic!("expected rgb, got {c:?}");
        };
        assert_eq!((r, g, b), (0x8b, 0x8b, 0x8b));
    }
}
