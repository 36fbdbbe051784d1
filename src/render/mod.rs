//! Card and text renderings of a group summary

pub mod card;
pub mod fonts;
pub mod report;

pub use card::render_card;
pub use fonts::{FontSet, load_fonts};
pub use report::{render_caption, render_text};

/// Formats a USD amount as `$1,234.56`.
pub fn format_usd(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}
