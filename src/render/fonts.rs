//! Font selection for the summary card.
//!
//! Fonts are loaded from disk per render. When either preferred face cannot be
//! read or parsed, every role falls back to the embedded 8x8 bitmap font, so
//! text drawing never depends on the host having fonts installed.

use crate::core::config::FontConfig;
use ab_glyph::{FontArc, PxScale};
use anyhow::{Context, Result};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;
use tracing::{debug, warn};

const GLYPH_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Subtitle,
    Item,
    Small,
}

impl TextRole {
    pub fn pixel_size(self) -> f32 {
        match self {
            TextRole::Title => 48.0,
            TextRole::Subtitle => 32.0,
            TextRole::Item => 24.0,
            TextRole::Small => 20.0,
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, TextRole::Title)
    }

    /// Integer upscaling applied to 8x8 glyphs so bitmap text roughly tracks the role size.
    fn bitmap_scale(self) -> u32 {
        ((self.pixel_size() / 12.0).round() as u32).max(1)
    }
}

#[derive(Clone)]
pub enum CardFont {
    Vector { font: FontArc, scale: PxScale },
    Bitmap { scale: u32 },
}

impl CardFont {
    pub fn is_bitmap(&self) -> bool {
        matches!(self, CardFont::Bitmap { .. })
    }

    /// Rendered width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> u32 {
        match self {
            CardFont::Vector { font, scale } => text_size(*scale, font, text).0,
            CardFont::Bitmap { scale } => text.chars().count() as u32 * GLYPH_SIZE * scale,
        }
    }

    pub fn draw(&self, image: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            CardFont::Vector { font, scale } => {
                draw_text_mut(image, color, x, y, *scale, font, text);
            }
            CardFont::Bitmap { scale } => draw_bitmap_text(image, color, x, y, *scale, text),
        }
    }
}

fn draw_bitmap_text(image: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32, text: &str) {
    let advance = (GLYPH_SIZE * scale) as i32;
    let (width, height) = image.dimensions();

    for (index, c) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(c).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let origin_x = x + index as i32 * advance;
        for (row, bits) in glyph.iter().copied().enumerate() {
            for col in 0..GLYPH_SIZE {
                if bits & (1u8 << col) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = origin_x + (col * scale + dx) as i32;
                        let py = y + (row as u32 * scale + dy) as i32;
                        if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                            image.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
    }
}

/// One font per text role.
#[derive(Clone)]
pub struct FontSet {
    title: CardFont,
    subtitle: CardFont,
    item: CardFont,
    small: CardFont,
}

impl FontSet {
    /// Bitmap fallback for every role.
    pub fn builtin() -> Self {
        let bitmap = |role: TextRole| CardFont::Bitmap {
            scale: role.bitmap_scale(),
        };
        FontSet {
            title: bitmap(TextRole::Title),
            subtitle: bitmap(TextRole::Subtitle),
            item: bitmap(TextRole::Item),
            small: bitmap(TextRole::Small),
        }
    }

    pub fn get(&self, role: TextRole) -> &CardFont {
        match role {
            TextRole::Title => &self.title,
            TextRole::Subtitle => &self.subtitle,
            TextRole::Item => &self.item,
            TextRole::Small => &self.small,
        }
    }
}

fn read_font(path: &Path) -> Result<FontArc> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read font: {}", path.display()))?;
    FontArc::try_from_vec(data).with_context(|| format!("Invalid font file: {}", path.display()))
}

/// Loads the configured faces, falling back to [`FontSet::builtin`] on any failure.
pub fn load_fonts(config: &FontConfig) -> FontSet {
    match (read_font(&config.bold), read_font(&config.regular)) {
        (Ok(bold), Ok(regular)) => {
            debug!("Loaded card fonts");
            let vector = |role: TextRole| CardFont::Vector {
                font: if role.is_bold() {
                    bold.clone()
                } else {
                    regular.clone()
                },
                scale: PxScale::from(role.pixel_size()),
            };
            FontSet {
                title: vector(TextRole::Title),
                subtitle: vector(TextRole::Subtitle),
                item: vector(TextRole::Item),
                small: vector(TextRole::Small),
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Falling back to built-in bitmap font");
            FontSet::builtin()
        }
    }
}
