//! Prints bot replies to the terminal.

use super::ui;
use crate::bot::Reply;
use anyhow::{Context, Result};
use comfy_table::Cell;
use std::path::{Path, PathBuf};

/// Prints each reply; photos are written into `out_dir` and their path printed.
pub fn print_replies(replies: &[Reply], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (i, reply) in replies.iter().enumerate() {
        if i > 0 {
            ui::print_separator();
        }
        match reply {
            Reply::Message { text, buttons } => {
                println!("{text}");
                if !buttons.is_empty() {
                    let mut table = ui::new_styled_table();
                    table.set_header(vec![ui::header_cell("Action"), ui::header_cell("Callback")]);
                    for button in buttons {
                        table.add_row(vec![
                            Cell::new(&button.text),
                            Cell::new(&button.callback_data),
                        ]);
                    }
                    println!("\n{table}");
                }
            }
            Reply::Notice(text) => println!("{}", ui::style_text(text, ui::StyleType::Subtle)),
            Reply::Alert(text) => println!("{}", ui::style_text(text, ui::StyleType::Alert)),
            Reply::Photo {
                png,
                file_name,
                caption,
            } => {
                std::fs::create_dir_all(out_dir)
                    .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;
                let path = out_dir.join(file_name);
                std::fs::write(&path, png)
                    .with_context(|| format!("Failed to write card to {}", path.display()))?;
                println!("{caption}");
                println!(
                    "{}",
                    ui::style_text(&format!("Card saved to {}", path.display()), ui::StyleType::Title)
                );
                written.push(path);
            }
        }
    }
    Ok(written)
}
