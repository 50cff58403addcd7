//! Half-block image preview.
//!
//! Each terminal cell shows two vertically stacked pixels: `▀` painted with
//! the top pixel as foreground and the bottom pixel as background.

use crossterm::queue;
use crossterm::style::{
    Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor,
};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::io::{self, Write};

const UPPER_HALF_BLOCK: &str = "▀";

/// Size of the preview in cells for `image` at `columns` wide.
///
/// Rows are half the scaled pixel height, rounded up so an odd last pixel row
/// still shows.
pub fn preview_size(image: &RgbaImage, columns: u16) -> (u32, u32) {
    let columns = u32::from(columns.max(1));
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return (0, 0);
    }
    let pixel_rows = ((u64::from(h) * u64::from(columns)) / u64::from(w)).max(1) as u32;
    (columns, pixel_rows)
}

fn term_rgb(pixel: &Rgba<u8>) -> TermColor {
    TermColor::Rgb {
        r: pixel[0],
        g: pixel[1],
        b: pixel[2],
    }
}

/// Print `image` scaled to `columns` cells wide.
pub fn write_preview<W: Write>(out: &mut W, image: &RgbaImage, columns: u16) -> io::Result<()> {
    let (width, pixel_rows) = preview_size(image, columns);
    if width == 0 {
        return Ok(());
    }
    let scaled = imageops::resize(image, width, pixel_rows, FilterType::Triangle);

    for y in (0..pixel_rows).step_by(2) {
        for x in 0..width {
            let top = scaled.get_pixel(x, y);
            queue!(out, SetForegroundColor(term_rgb(top)))?;
            if y + 1 < pixel_rows {
                let bottom = scaled.get_pixel(x, y + 1);
                queue!(out, SetBackgroundColor(term_rgb(bottom)))?;
            } else {
                queue!(out, SetBackgroundColor(TermColor::Reset))?;
            }
            queue!(out, Print(UPPER_HALF_BLOCK))?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }
    out.flush()
}
