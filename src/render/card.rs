//! PNG summary card for a wallet group.

use super::fonts::{FontSet, TextRole};
use super::format_usd;
use crate::core::Holding;
use anyhow::{Context, Result, anyhow};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use std::io::Cursor;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

pub const CARD_WIDTH: u32 = 800;
pub const BASE_HEIGHT: u32 = 400;
pub const ROW_HEIGHT: u32 = 60;

const MARGIN: u32 = 20;
const ROW_TEXT_X: u32 = 60;
const HOLDINGS_Y: u32 = 220;

const GRADIENT_TOP: [f32; 3] = [26.0, 26.0, 46.0];
const GRADIENT_SPAN: [f32; 3] = [20.0, 30.0, 40.0];

const PANEL_FILL: Rgb<u8> = Rgb([0x16, 0x21, 0x3e]);
const PANEL_OUTLINE: Rgb<u8> = Rgb([0x0f, 0x34, 0x60]);
const TEXT_PRIMARY: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const TEXT_ROW: Rgb<u8> = Rgb([0xe2, 0xe8, 0xf0]);
const TEXT_MUTED: Rgb<u8> = Rgb([0x94, 0xa3, 0xb8]);
const TEXT_FOOTER: Rgb<u8> = Rgb([0x64, 0x74, 0x8b]);
const TEXT_VALUE: Rgb<u8> = Rgb([0x4a, 0xde, 0x80]);

/// Canvas height for a card listing `rows` holdings.
pub fn card_height(rows: usize) -> Option<u32> {
    u32::try_from(rows)
        .ok()?
        .checked_mul(ROW_HEIGHT)?
        .checked_add(BASE_HEIGHT)
}

/// Renders the card as PNG bytes. Drawing failures are logged and yield `None`.
pub fn render_card(
    group_name: &str,
    total_usd: f64,
    holdings: &[Holding],
    fonts: &FontSet,
) -> Option<Vec<u8>> {
    guarded(group_name, || draw_card(group_name, total_usd, holdings, fonts))
}

/// Runs `draw`, mapping both errors and panics to `None`.
fn guarded<F>(group_name: &str, draw: F) -> Option<Vec<u8>>
where
    F: FnOnce() -> Result<Vec<u8>>,
{
    match panic::catch_unwind(AssertUnwindSafe(draw)) {
        Ok(Ok(png)) => {
            debug!(group = group_name, bytes = png.len(), "Rendered card");
            Some(png)
        }
        Ok(Err(e)) => {
            warn!(group = group_name, error = %e, "Failed to render card");
            None
        }
        Err(_) => {
            warn!(group = group_name, "Card rendering panicked");
            None
        }
    }
}

fn gradient_pixel(y: u32, height: u32) -> Rgb<u8> {
    let t = y as f32 / height as f32;
    let channel = |i: usize| (GRADIENT_TOP[i] + t * GRADIENT_SPAN[i]) as u8;
    Rgb([channel(0), channel(1), channel(2)])
}

fn draw_panel(image: &mut RgbImage, rect: Rect, border: u32) {
    draw_filled_rect_mut(image, rect, PANEL_FILL);
    for inset in 0..border {
        let width = rect.width().saturating_sub(2 * inset);
        let height = rect.height().saturating_sub(2 * inset);
        if width == 0 || height == 0 {
            break;
        }
        let outline = Rect::at(rect.left() + inset as i32, rect.top() + inset as i32)
            .of_size(width, height);
        draw_hollow_rect_mut(image, outline, PANEL_OUTLINE);
    }
}

fn draw_card(
    group_name: &str,
    total_usd: f64,
    holdings: &[Holding],
    fonts: &FontSet,
) -> Result<Vec<u8>> {
    let width = CARD_WIDTH;
    let height = card_height(holdings.len())
        .ok_or_else(|| anyhow!("Too many holdings to render: {}", holdings.len()))?;

    let mut image: RgbImage = ImageBuffer::from_fn(width, height, |_, y| gradient_pixel(y, height));

    // Header
    draw_panel(
        &mut image,
        Rect::at(MARGIN as i32, MARGIN as i32).of_size(width - 2 * MARGIN, 160),
        3,
    );
    fonts
        .get(TextRole::Title)
        .draw(&mut image, TEXT_PRIMARY, 40, 40, group_name);
    fonts
        .get(TextRole::Small)
        .draw(&mut image, TEXT_MUTED, 40, 100, "Total Value");
    fonts
        .get(TextRole::Subtitle)
        .draw(&mut image, TEXT_VALUE, 40, 125, &format_usd(total_usd));

    // Holdings
    let mut y = HOLDINGS_Y as i32;
    if holdings.is_empty() {
        fonts
            .get(TextRole::Item)
            .draw(&mut image, TEXT_MUTED, 40, y, "No holdings data");
    } else {
        fonts
            .get(TextRole::Small)
            .draw(&mut image, TEXT_MUTED, 40, y, "Holdings");
        y += 40;

        let item_font = fonts.get(TextRole::Item);
        let small_font = fonts.get(TextRole::Small);
        for holding in holdings {
            draw_panel(&mut image, Rect::at(40, y).of_size(width - 80, 50), 2);

            item_font.draw(
                &mut image,
                TEXT_ROW,
                ROW_TEXT_X as i32,
                y + 5,
                &holding.network_display,
            );
            let amount = format!("{:.6} {}", holding.native_amount, holding.token_symbol);
            small_font.draw(&mut image, TEXT_MUTED, ROW_TEXT_X as i32, y + 30, &amount);

            let usd = format_usd(holding.usd_value);
            let usd_x = width
                .saturating_sub(ROW_TEXT_X)
                .saturating_sub(item_font.text_width(&usd))
                .max(ROW_TEXT_X);
            item_font.draw(&mut image, TEXT_VALUE, usd_x as i32, y + 15, &usd);

            y += ROW_HEIGHT as i32;
        }
    }

    fonts.get(TextRole::Small).draw(
        &mut image,
        TEXT_FOOTER,
        40,
        height as i32 - 40,
        "CryptoAlert Monitor",
    );

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("Failed to encode card as PNG")?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn holding(network: &str, amount: f64, symbol: &str, usd: f64) -> Holding {
        Holding {
            network_display: network.to_string(),
            native_amount: amount,
            token_symbol: symbol.to_string(),
            usd_value: usd,
        }
    }

    fn decode(png: &[u8]) -> DynamicImage {
        image::load_from_memory_with_format(png, ImageFormat::Png).unwrap()
    }

    #[test]
    fn test_empty_card_has_base_height() {
        let png = render_card("Trust Wallet", 0.0, &[], &FontSet::builtin()).unwrap();
        let card = decode(&png);

        assert_eq!(card.dimensions(), (CARD_WIDTH, BASE_HEIGHT));
    }

    #[test]
    fn test_height_grows_per_holding() {
        let holdings = vec![
            holding("Ethereum", 1.25, "ETH", 4000.0),
            holding("TRON", 1500.0, "TRX", 375.5),
            holding("Solana", 0.0, "?", 0.0),
        ];

        let png = render_card("Trust Wallet", 4375.5, &holdings, &FontSet::builtin()).unwrap();
        let card = decode(&png);

        assert_eq!(card.dimensions(), (CARD_WIDTH, BASE_HEIGHT + 3 * ROW_HEIGHT));
    }

    #[test]
    fn test_card_height() {
        assert_eq!(card_height(0), Some(BASE_HEIGHT));
        assert_eq!(card_height(5), Some(BASE_HEIGHT + 5 * ROW_HEIGHT));
        assert_eq!(card_height(usize::MAX), None);
    }

    #[test]
    fn test_background_gradient() {
        let png = render_card("Main", 0.0, &[], &FontSet::builtin()).unwrap();
        let card = decode(&png).to_rgb8();

        // Left edge outside the header panel.
        assert_eq!(*card.get_pixel(5, 0), Rgb([26, 26, 46]));
        let bottom = *card.get_pixel(5, BASE_HEIGHT - 1);
        assert!(bottom[0] > 26 && bottom[1] > 26 && bottom[2] > 46);
    }

    #[test]
    fn test_drawing_panic_yields_no_image() {
        let result = guarded("Broken", || -> Result<Vec<u8>> {
            panic!("glyph outside canvas");
        });
        assert!(result.is_none());
    }

    #[test]
    fn test_drawing_error_yields_no_image() {
        let result = guarded("Broken", || Err(anyhow!("encoder unavailable")));
        assert!(result.is_none());

        let result = guarded("Fine", || Ok(vec![1, 2, 3]));
        assert_eq!(result, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_wide_values_stay_on_canvas() {
        let holdings = vec![holding("Ethereum", 1e12, "ETH", 1e15)];
        assert!(render_card("Whale", 1e15, &holdings, &FontSet::builtin()).is_some());
    }
}
