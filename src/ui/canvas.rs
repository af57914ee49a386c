//! Half-block pixel canvas.
//!
//! Each terminal cell shows two vertically stacked pixels through the `▀`
//! glyph (foreground = top pixel, background = bottom pixel), so a canvas
//! for an `area` is `area.width` × `2 * area.height` pixels.  Pixels are
//! roughly square on common terminal fonts.
//!
//! Alongside colour the canvas tracks which pixels are covered by a slide,
//! so text drawn "behind" the artwork can skip covered cells.

use image::RgbaImage;
use ratatui::{buffer::Buffer, layout::Position, layout::Rect};

use crate::core::item::Rgba;

use super::theme::rgb;

pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    covered: Vec<bool>,
}

impl Canvas {
    /// A canvas covering `area`, filled with `base`.
    pub fn for_area(area: Rect, base: Rgba) -> Self {
        let width = area.width as u32;
        let height = area.height as u32 * 2;
        let len = (width * height) as usize;
        Self {
            width,
            height,
            pixels: vec![Rgba { a: 255, ..base }; len],
            covered: vec![false; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[self.idx(x, y)])
    }

    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.covered[self.idx(x, y)]
    }

    /// Source-over blend of `color` at `color.alpha() * opacity`.
    pub fn blend(&mut self, x: u32, y: u32, color: Rgba, opacity: f64) {
        if x >= self.width || y >= self.height {
            return;
        }
        let t = color.alpha() * opacity;
        if t <= 0.0 {
            return;
        }
        let i = self.idx(x, y);
        self.pixels[i] = self.pixels[i].lerp(Rgba { a: 255, ..color }, t);
    }

    /// Blend `color(u, v)` over every pixel, with `u, v ∈ [0, 1]` the
    /// normalised pixel centre.
    pub fn wash(&mut self, opacity: f64, color: impl Fn(f64, f64) -> Rgba) {
        if opacity <= 0.0 {
            return;
        }
        for y in 0..self.height {
            let v = (y as f64 + 0.5) / self.height as f64;
            for x in 0..self.width {
                let u = (x as f64 + 0.5) / self.width as f64;
                self.blend(x, y, color(u, v), opacity);
            }
        }
    }

    /// Composite `sprite` with its top-left pixel at `(left, top)`.
    ///
    /// Pixels that land off-canvas are clipped; every pixel that receives
    /// any ink is marked covered.
    pub fn draw_sprite(&mut self, sprite: &RgbaImage, left: i64, top: i64, opacity: f64) {
        if opacity <= 0.0 {
            return;
        }
        for (sx, sy, p) in sprite.enumerate_pixels() {
            let x = left + sx as i64;
            let y = top + sy as i64;
            if x < 0 || y < 0 || p[3] == 0 {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            if x >= self.width || y >= self.height {
                continue;
            }
            self.blend(x, y, Rgba { r: p[0], g: p[1], b: p[2], a: p[3] }, opacity);
            let i = self.idx(x, y);
            self.covered[i] = true;
        }
    }

    /// Write the canvas into `buf` as half-block cells.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let rows = (self.height / 2).min(area.height as u32);
        let cols = self.width.min(area.width as u32);
        for row in 0..rows {
            for col in 0..cols {
                let top = self.pixels[self.idx(col, row * 2)];
                let bottom = self.pixels[self.idx(col, row * 2 + 1)];
                if let Some(cell) =
                    buf.cell_mut(Position::new(area.x + col as u16, area.y + row as u16))
                {
                    cell.set_char('▀').set_fg(rgb(top)).set_bg(rgb(bottom));
                }
            }
        }
    }

    /// True when either pixel of the cell at (`col`, `row`) is covered.
    pub fn cell_covered(&self, col: u16, row: u16) -> bool {
        let y = row as u32 * 2;
        self.is_covered(col as u32, y) || self.is_covered(col as u32, y + 1)
    }

    /// Colour of the bottom pixel of a cell, used as text background.
    pub fn cell_background(&self, col: u16, row: u16) -> Option<Rgba> {
        self.pixel(col as u32, row as u32 * 2 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    #[test]
    fn canvas_is_two_pixels_per_row() {
        let c = Canvas::for_area(Rect::new(0, 0, 10, 4), BLACK);
        assert_eq!((c.width(), c.height()), (10, 8));
    }

    #[test]
    fn half_opacity_blend() {
        let mut c = Canvas::for_area(Rect::new(0, 0, 1, 1), BLACK);
        c.blend(0, 0, Rgba::opaque(200, 100, 0), 0.5);
        assert_eq!(c.pixel(0, 0), Some(Rgba::opaque(100, 50, 0)));
        // Out of bounds is ignored.
        c.blend(5, 5, Rgba::opaque(255, 255, 255), 1.0);
    }

    #[test]
    fn sprite_is_clipped_and_marks_coverage() {
        let mut c = Canvas::for_area(Rect::new(0, 0, 4, 2), BLACK);
        let mut sprite = RgbaImage::from_pixel(3, 3, image::Rgba([255, 0, 0, 255]));
        sprite.put_pixel(2, 2, image::Rgba([0, 0, 0, 0]));
        c.draw_sprite(&sprite, -1, 2, 1.0);

        assert!(c.is_covered(0, 2));
        assert!(c.is_covered(1, 3));
        assert!(!c.is_covered(2, 2));
        assert!(!c.is_covered(1, 4)); // off-canvas row
        assert!(!c.is_covered(1, 1));
        assert_eq!(c.pixel(0, 2), Some(Rgba::opaque(255, 0, 0)));
        assert!(c.cell_covered(0, 1));
        assert!(!c.cell_covered(0, 0));
    }

    #[test]
    fn renders_half_blocks() {
        let mut c = Canvas::for_area(Rect::new(0, 0, 1, 1), BLACK);
        c.blend(0, 0, Rgba::opaque(255, 255, 255), 1.0);
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        c.render(area, &mut buf);
        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
    }
}
