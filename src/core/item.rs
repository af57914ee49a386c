//! Carousel items: the immutable slide records and their colours.

use std::fmt;

use super::error::CarouselError;

// ───────────────────────────────────────── colour ────────────

/// An sRGB colour with alpha, as written in a `#rrggbbaa` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Result<Self, CarouselError> {
        let bad = || CarouselError::Color(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| bad())
        };
        match hex.len() {
            3 => Ok(Self::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(bad()),
        }
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha(self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Component-wise linear interpolation (alpha included).
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

// ───────────────────────────────────────── item ──────────────

/// One slide: a character image over a diagonal colour gradient, plus caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: u32,
    /// Image file name, resolved against the assets directory at render time.
    pub image: String,
    pub gradient_start: Rgba,
    pub gradient_end: Rgba,
    pub title: String,
    pub description: String,
}

impl Item {
    pub fn new(
        id: u32,
        image: &str,
        gradient_start: &str,
        gradient_end: &str,
        title: &str,
        description: &str,
    ) -> Result<Self, CarouselError> {
        Ok(Self {
            id,
            image: image.to_string(),
            gradient_start: Rgba::parse_hex(gradient_start)?,
            gradient_end: Rgba::parse_hex(gradient_end)?,
            title: title.to_string(),
            description: description.to_string(),
        })
    }

    /// Parse a config line of the form
    /// `id | image | #start | #end | TITLE | description`.
    pub fn parse_line(line: &str) -> Result<Self, CarouselError> {
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        let [id, image, start, end, title, description] = fields[..] else {
            return Err(CarouselError::ItemLine(line.to_string()));
        };
        let id = id
            .parse::<u32>()
            .map_err(|_| CarouselError::ItemLine(line.to_string()))?;
        Self::new(id, image, start, end, title, description)
    }

    /// Inverse of [`Item::parse_line`].
    pub fn to_line(&self) -> String {
        format!(
            "{} | {} | {} | {} | {} | {}",
            self.id,
            self.image,
            self.gradient_start,
            self.gradient_end,
            self.title,
            self.description
        )
    }

    /// Gradient colour at `t ∈ [0, 1]` along the top-left → bottom-right diagonal.
    pub fn gradient_at(&self, t: f64) -> Rgba {
        self.gradient_start.lerp(self.gradient_end, t)
    }
}

/// The seven slides the hero ships with.
pub fn default_items() -> Vec<Item> {
    const SLIDES: &[(u32, &str, Rgba, Rgba, &str, &str)] = &[
        (1, "img2.webp", Rgba::opaque(0x7A, 0xBF, 0x9A), Rgba::opaque(0x5E, 0x9F, 0x7D), "NATURE", "organic flow."),
        (2, "img1.webp", Rgba::opaque(0xD1, 0xB1, 0x7E), Rgba::opaque(0xB9, 0x97, 0x64), "EARTH", "solid ground."),
        (3, "img3.webp", Rgba::opaque(0xA7, 0x7B, 0xC8), Rgba::opaque(0x8E, 0x63, 0xAF), "MAGIC", "unknown power."),
        (4, "img4.webp", Rgba::opaque(0xB9, 0xDC, 0xF3), Rgba::opaque(0xAE, 0xBB, 0xB2), "HAPPINESS", "joyful times."),
        (5, "img5.webp", Rgba::opaque(0xF1, 0xE6, 0xBB), Rgba::opaque(0xC3, 0xEE, 0xAB), "STRONG", "powerful times."),
        (6, "img6.webp", Rgba::opaque(0xE1, 0xCB, 0xB2), Rgba::opaque(0x9E, 0x7E, 0x5A), "BEAUTY", "lovely times."),
        (7, "img7.webp", Rgba::opaque(0xF7, 0xF6, 0xF2), Rgba::opaque(0xB5, 0xC0, 0xB3), "HEALTH", "strong body."),
    ];
    SLIDES
        .iter()
        .map(|&(id, image, gradient_start, gradient_end, title, description)| Item {
            id,
            image: image.to_string(),
            gradient_start,
            gradient_end,
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}
