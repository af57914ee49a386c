//! The hero stage: blended backgrounds, headline and the slide row.
//!
//! Everything is painted into a [`Canvas`] first and flushed to the buffer
//! once, then the headline is written into whichever cells no slide
//! covers, so it reads as sitting behind the artwork.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use ratatui::{buffer::Buffer, layout::Position, layout::Rect, widgets::Widget};

use crate::core::carousel::Frame;
use crate::core::idle::FloatBob;
use crate::core::item::{Item, Rgba};
use crate::core::transform::VisualState;

use super::canvas::Canvas;
use super::theme::{fade_over, rgb, Theme, BASE_BG, HEADLINE};

/// Layout pixels per canvas pixel (a 16px terminal row holds two).
pub const PX_PER_PIXEL: f64 = 8.0;
/// Height of an unscaled slide as a fraction of the stage.
const BASE_HEIGHT: f64 = 0.55;
/// Width / height of the placeholder figure.
const SILHOUETTE_ASPECT: f64 = 0.6;
/// Vertical centre of the headline as a fraction of the stage.
const HEADLINE_ROW: f64 = 0.38;

pub struct StageWidget<'a> {
    pub frame: &'a Frame,
    pub items: &'a [Item],
    /// Decoded artwork per item, `None` draws a silhouette.
    pub artwork: &'a [Option<&'a RgbaImage>],
    pub headline: &'a str,
    pub float: Option<FloatBob>,
    pub elapsed: f64,
}

impl Widget for StageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut canvas = Canvas::for_area(area, BASE_BG);

        for item_frame in &self.frame.items {
            let Some(item) = self.items.get(item_frame.index) else {
                continue;
            };
            canvas.wash(item_frame.background_opacity, |u, v| {
                item.gradient_at((u + v) / 2.0)
            });
        }

        for i in self.frame.draw_order() {
            let item_frame = &self.frame.items[i];
            let Some(item) = self.items.get(i) else {
                continue;
            };
            let art = self.artwork.get(i).copied().flatten();
            let bob = self
                .float
                .map_or(0.0, |f| f.offset_px(self.elapsed, i));
            draw_slide(&mut canvas, item, art, &item_frame.visual, bob);
        }

        canvas.render(area, buf);
        render_headline(self.headline, &canvas, area, buf);
    }
}

// ───────────────────────────────────────── slides ────────────

/// Where a slide lands on the canvas, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub left: i64,
    pub top: i64,
    pub width: u32,
    pub height: u32,
}

/// Bottom-anchored placement of a slide whose artwork has the given
/// width/height `aspect`.  `None` when it would be under a pixel.
pub fn place(
    canvas_w: u32,
    canvas_h: u32,
    visual: &VisualState,
    aspect: f64,
    bob_px: f64,
) -> Option<Placement> {
    let height = canvas_h as f64 * BASE_HEIGHT * visual.scale;
    let width = height * aspect;
    if !(height >= 1.0 && width >= 1.0) {
        return None;
    }
    let centre_x = canvas_w as f64 * (0.5 + visual.x_vw / 100.0);
    let bottom = canvas_h as f64 + (visual.y_px + bob_px) / PX_PER_PIXEL;
    Some(Placement {
        left: (centre_x - width / 2.0).round() as i64,
        top: (bottom - height).round() as i64,
        width: width.round() as u32,
        height: height.round() as u32,
    })
}

fn draw_slide(
    canvas: &mut Canvas,
    item: &Item,
    art: Option<&RgbaImage>,
    visual: &VisualState,
    bob_px: f64,
) {
    if visual.opacity <= 0.0 {
        return;
    }
    let aspect = match art {
        Some(img) if img.height() > 0 => img.width() as f64 / img.height() as f64,
        _ => SILHOUETTE_ASPECT,
    };
    let Some(at) = place(canvas.width(), canvas.height(), visual, aspect, bob_px) else {
        return;
    };

    let mut sprite = match art {
        Some(img) => imageops::resize(img, at.width, at.height, FilterType::Triangle),
        None => silhouette(
            at.width,
            at.height,
            item.gradient_start.lerp(Rgba::opaque(255, 255, 255), 0.35),
            item.gradient_end,
        ),
    };
    if visual.blur_px > 0.0 {
        sprite = imageops::blur(&sprite, (visual.blur_px / PX_PER_PIXEL) as f32);
    }
    canvas.draw_sprite(&sprite, at.left, at.top, visual.opacity);
}

/// A two-tone standing figure: round head over a flared body, shaded on
/// its right side.
pub fn silhouette(width: u32, height: u32, light: Rgba, shade: Rgba) -> RgbaImage {
    let h = height as f64;
    let half_w = width as f64 / 2.0;
    RgbaImage::from_fn(width, height, |x, y| {
        // Coordinates in units of figure height, origin at top centre.
        let px = (x as f64 + 0.5 - half_w) / h;
        let py = (y as f64 + 0.5) / h;

        let head = px * px + (py - 0.15).powi(2) <= 0.12 * 0.12;
        let body = py >= 0.3 && px.abs() <= (0.12 + (py - 0.3) * 0.5).min(0.3);
        if !(head || body) {
            return image::Rgba([0, 0, 0, 0]);
        }
        let c = if px > 0.03 { shade } else { light };
        image::Rgba([c.r, c.g, c.b, 255])
    })
}

// ───────────────────────────────────────── headline ──────────

/// Letter-spaced headline centred at [`HEADLINE_ROW`], skipping covered cells.
fn render_headline(text: &str, canvas: &Canvas, area: Rect, buf: &mut Buffer) {
    if text.is_empty() {
        return;
    }
    let spaced: Vec<char> = text
        .chars()
        .flat_map(|c| [c, ' '])
        .take(text.chars().count() * 2 - 1)
        .collect();
    let row = ((area.height as f64 * HEADLINE_ROW) as u16).min(area.height - 1);
    let start = area.width.saturating_sub(spaced.len() as u16) / 2;

    for (i, &ch) in spaced.iter().enumerate() {
        let col = start + i as u16;
        if ch == ' ' || col >= area.width || canvas.cell_covered(col, row) {
            continue;
        }
        let Some(under) = canvas.cell_background(col, row) else {
            continue;
        };
        if let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) {
            cell.set_char(ch)
                .set_style(Theme::headline_style())
                .set_fg(fade_over(HEADLINE, rgb(under), 1.0))
                .set_bg(rgb(under));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::carousel::{Carousel, CarouselConfig};
    use crate::core::item::default_items;

    fn frame_at(index: f64) -> Frame {
        let mut carousel = Carousel::new(CarouselConfig {
            smoothing: false,
            ..CarouselConfig::default()
        })
        .unwrap();
        carousel.apply(crate::core::carousel::CarouselEvent::Scroll {
            progress: index / 70.0,
        });
        carousel.frame()
    }

    #[test]
    fn centred_slide_placement() {
        let v = VisualState::from_distance(0.0);
        let at = place(100, 80, &v, SILHOUETTE_ASPECT, 0.0).unwrap();
        assert_eq!(at, Placement { left: 27, top: 3, width: 46, height: 77 });
    }

    #[test]
    fn neighbour_sits_left_and_lifted() {
        let v = VisualState::from_distance(-1.0);
        let at = place(100, 80, &v, SILHOUETTE_ASPECT, 0.0).unwrap();
        assert_eq!(at, Placement { left: 13, top: 43, width: 13, height: 22 });

        // The float bob raises the whole slide.
        let bobbed = place(100, 80, &v, SILHOUETTE_ASPECT, -16.0).unwrap();
        assert_eq!(bobbed.top, at.top - 2);
    }

    #[test]
    fn tiny_stage_places_nothing() {
        let v = VisualState::from_distance(3.0);
        assert!(place(4, 2, &v, SILHOUETTE_ASPECT, 0.0).is_none());
    }

    #[test]
    fn silhouette_is_two_tone_and_transparent_outside() {
        let light = Rgba::opaque(200, 200, 200);
        let shade = Rgba::opaque(50, 50, 50);
        let img = silhouette(30, 50, light, shade);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(12, 45).0, [200, 200, 200, 255]);
        assert_eq!(img.get_pixel(20, 45).0, [50, 50, 50, 255]);
    }

    #[test]
    fn headline_hides_behind_covered_cells() {
        let area = Rect::new(0, 0, 20, 10);
        let canvas = Canvas::for_area(area, BASE_BG);
        let mut buf = Buffer::empty(area);
        render_headline("AB", &canvas, area, &mut buf);
        // "A B" centred on row 3.
        assert_eq!(buf[(8, 3)].symbol(), "A");
        assert_eq!(buf[(10, 3)].symbol(), "B");

        let mut covered = Canvas::for_area(area, BASE_BG);
        covered.draw_sprite(&RgbaImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 255])), 8, 6, 1.0);
        let mut buf = Buffer::empty(area);
        render_headline("AB", &covered, area, &mut buf);
        assert_eq!(buf[(8, 3)].symbol(), " ");
        assert_eq!(buf[(10, 3)].symbol(), "B");
    }

    #[test]
    fn stage_draws_backgrounds_and_the_centred_slide() {
        let items = default_items();
        let frame = frame_at(0.0);
        let artwork = vec![None; items.len()];
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        StageWidget {
            frame: &frame,
            items: &items,
            artwork: &artwork,
            headline: "",
            float: None,
            elapsed: 0.0,
        }
        .render(area, &mut buf);

        let corner = &buf[(0, 0)];
        assert_eq!(corner.symbol(), "▀");
        assert_ne!(corner.fg, rgb(BASE_BG));

        // Lower body of the centred figure covers the bottom centre.
        let centre = &buf[(30, 19)];
        assert_eq!(centre.symbol(), "▀");
        assert_ne!(centre.fg, buf[(1, 19)].fg);
    }
}
