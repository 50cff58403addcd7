//! Quote image rendering.
//!
//! A canvas is composed in layers, bottom to top:
//! 1. photo (darkened) or gradient with a dot grid
//! 2. radial vignette
//! 3. blurred drop shadow of all text
//! 4. quote lines and the author line
//!
//! Text placement comes from [`crate::layout::QuoteLayout`], measured with the
//! actual quote font through [`GlyphMeasure`].

pub mod background;
pub mod save;
pub mod text;

pub use save::{save_png, save_path, timestamp_filename};
pub use text::{FontSet, GlyphMeasure};

use crate::layout::{FontSizing, QuoteLayout};
use crate::model::Resolution;
use image::{DynamicImage, Rgba, RgbaImage};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::path::PathBuf;
use text::TextLine;
use thiserror::Error;

const QUOTE_COLOR: [u8; 3] = [0xff, 0xff, 0xff];
const AUTHOR_COLOR: [u8; 3] = [0xf0, 0xf0, 0xf0];

/// Errors while preparing fonts or writing an image.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Neither the configured path nor any system location held a font.
    #[error("No usable font found ({searched} locations searched); set font_path in the config")]
    FontNotFound {
        /// How many paths were tried.
        searched: usize,
    },

    /// File exists but could not be parsed as TrueType/OpenType.
    #[error("Not a usable font file {path}: {reason}")]
    InvalidFont {
        /// The offending file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Reading a font or creating the output directory failed.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// Path being read or created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding or writing failed.
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Source-over blend of an opaque `color` at `alpha` onto `pixel`.
pub(crate) fn blend(pixel: &mut Rgba<u8>, color: [u8; 3], alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    for (channel, target) in pixel.0.iter_mut().zip(color) {
        let mixed = f32::from(*channel) * (1.0 - alpha) + f32::from(target) * alpha;
        *channel = mixed.round() as u8;
    }
}

/// Render `quote` by `author` onto a `resolution`-sized canvas.
///
/// With no `background` photo a random gradient is used.
pub fn generate_quote_image<R: Rng + ?Sized>(
    quote: &str,
    author: &str,
    resolution: Resolution,
    fonts: &FontSet,
    background: Option<&DynamicImage>,
    rng: &mut R,
) -> RgbaImage {
    let mut canvas = match background {
        Some(photo) => background::photo_background(photo, resolution),
        None => {
            let gradient = background::GRADIENTS
                .choose(rng)
                .unwrap_or(&background::GRADIENTS[0]);
            background::gradient_background(resolution, gradient)
        }
    };
    background::apply_vignette(&mut canvas);

    let sizing = FontSizing::for_canvas_width(resolution.width);
    let layout = QuoteLayout::compute(
        quote,
        resolution,
        &GlyphMeasure::new(&fonts.quote, sizing.base),
    );

    let mut lines: Vec<TextLine<'_>> = layout
        .positioned_lines()
        .map(|(text, baseline)| TextLine {
            measure: GlyphMeasure::new(&fonts.quote, layout.sizing.base),
            text: text.to_string(),
            baseline,
            color: QUOTE_COLOR,
        })
        .collect();
    lines.push(TextLine {
        measure: GlyphMeasure::new(&fonts.author, layout.sizing.author),
        text: format!("— {author}"),
        baseline: layout.block.author_baseline(),
        color: AUTHOR_COLOR,
    });

    text::draw_shadowed_lines(&mut canvas, &lines);
    canvas
}
