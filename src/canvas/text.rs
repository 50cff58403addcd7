//! Font loading, glyph measurement and shadowed text drawing.

use super::{blend, CanvasError};
use crate::layout::Measure;
use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use image::imageops;
use image::{GrayImage, Luma, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SHADOW_OFFSET: i32 = 2;
const SHADOW_SIGMA: f32 = 5.0;
const SHADOW_ALPHA: f32 = 0.8;

/// Bold sans-serif faces tried for quote text.
const QUOTE_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Italic faces tried for the author line.
const AUTHOR_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Italic.ttf",
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// Quote and author faces.
pub struct FontSet {
    /// Face for the quote lines.
    pub quote: FontVec,
    /// Face for the author line.
    pub author: FontVec,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet").finish_non_exhaustive()
    }
}

impl FontSet {
    /// Load fonts, preferring configured paths over the system search list.
    ///
    /// A configured path that does not exist is skipped with a warning.
    /// Without an italic face the author line reuses the quote font.
    ///
    /// # Errors
    ///
    /// `CanvasError::FontNotFound` if no quote font can be found, or
    /// `CanvasError::InvalidFont` if a configured file is not a font.
    pub fn load(
        quote_path: Option<&Path>,
        author_path: Option<&Path>,
    ) -> Result<Self, CanvasError> {
        let (quote, quote_from) = load_first(quote_path, QUOTE_FONT_CANDIDATES)?;
        debug!(path = %quote_from.display(), "Loaded quote font");

        let author = match load_first(author_path, AUTHOR_FONT_CANDIDATES) {
            Ok((font, from)) => {
                debug!(path = %from.display(), "Loaded author font");
                font
            }
            Err(e @ CanvasError::FontNotFound { .. }) => {
                warn!(error = %e, "No italic font, using the quote font for the author");
                load_font(&quote_from)?
            }
            Err(e) => return Err(e),
        };

        Ok(Self { quote, author })
    }
}

/// The configured font if it exists, otherwise the first usable system font.
///
/// A configured file that is not a font is an error, not a skip.
fn load_first(
    configured: Option<&Path>,
    defaults: &[&str],
) -> Result<(FontVec, PathBuf), CanvasError> {
    if let Some(path) = configured {
        if path.is_file() {
            return Ok((load_font(path)?, path.to_path_buf()));
        }
        warn!(path = %path.display(), "Configured font not found, searching system fonts");
    }

    let paths: Vec<PathBuf> = defaults.iter().map(PathBuf::from).collect();
    for path in paths.iter().filter(|p| p.is_file()) {
        match load_font(path) {
            Ok(font) => return Ok((font, path.clone())),
            Err(e) => warn!(error = %e, "Skipping unusable font"),
        }
    }
    Err(CanvasError::FontNotFound {
        searched: paths.len() + usize::from(configured.is_some()),
    })
}

fn load_font(path: &Path) -> Result<FontVec, CanvasError> {
    let bytes = std::fs::read(path).map_err(|source| CanvasError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(bytes).map_err(|e| CanvasError::InvalidFont {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Scale at which one em is `px` pixels, like a CSS `font-size`.
pub fn em_scale<F: Font>(font: &F, px: f32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(px * font.height_unscaled() / units_per_em)
}

/// Advance width of text set in one font at one size.
pub struct GlyphMeasure<'a> {
    font: &'a FontVec,
    scale: PxScale,
}

impl<'a> GlyphMeasure<'a> {
    /// Measure `font` at a font size of `px` pixels.
    pub fn new(font: &'a FontVec, px: f32) -> Self {
        Self {
            font,
            scale: em_scale(font, px),
        }
    }

    /// Glyphs of `text` with the first glyph origin at `(x, baseline)`.
    fn glyphs(&self, text: &str, x: f32, baseline: f32) -> Vec<Glyph> {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = x;
        let mut previous = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, baseline)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
        glyphs
    }
}

impl Measure for GlyphMeasure<'_> {
    fn width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }
}

/// A line of text horizontally centered on the canvas.
pub struct TextLine<'a> {
    /// Font and size the line is set in.
    pub measure: GlyphMeasure<'a>,
    /// Text to draw.
    pub text: String,
    /// Baseline y in pixels.
    pub baseline: f32,
    /// Fill color.
    pub color: [u8; 3],
}

impl TextLine<'_> {
    /// Call `plot(x, y, coverage)` for every covered pixel, shifted by `offset`.
    fn rasterize(&self, canvas_width: u32, offset: i32, mut plot: impl FnMut(i32, i32, f32)) {
        let width = self.measure.width(&self.text);
        let left = (canvas_width as f32 - width) / 2.0;

        for glyph in self.measure.glyphs(&self.text, left, self.baseline) {
            let Some(outlined) = self.measure.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (min_x, min_y) = (bounds.min.x as i32 + offset, bounds.min.y as i32 + offset);
            outlined.draw(|x, y, coverage| {
                plot(min_x + x as i32, min_y + y as i32, coverage);
            });
        }
    }
}

fn in_bounds(canvas: &RgbaImage, x: i32, y: i32) -> Option<(u32, u32)> {
    let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
    (x < canvas.width() && y < canvas.height()).then_some((x, y))
}

/// Draw `lines` with a soft drop shadow beneath them.
///
/// All shadows are composited before any text so one line's shadow never
/// darkens another line's glyphs.
pub fn draw_shadowed_lines(canvas: &mut RgbaImage, lines: &[TextLine<'_>]) {
    let (width, height) = canvas.dimensions();

    let mut mask = GrayImage::new(width, height);
    for line in lines {
        line.rasterize(width, SHADOW_OFFSET, |x, y, coverage| {
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                let pixel = mask.get_pixel_mut(x as u32, y as u32);
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                *pixel = Luma([pixel[0].max(value)]);
            }
        });
    }
    let shadow = imageops::blur(&mask, SHADOW_SIGMA);
    for (pixel, shade) in canvas.pixels_mut().zip(shadow.pixels()) {
        if shade[0] > 0 {
            blend(pixel, [0; 3], SHADOW_ALPHA * f32::from(shade[0]) / 255.0);
        }
    }

    for line in lines {
        line.rasterize(width, 0, |x, y, coverage| {
            if let Some((x, y)) = in_bounds(canvas, x, y) {
                blend(canvas.get_pixel_mut(x, y), line.color, coverage.clamp(0.0, 1.0));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// System fonts are optional on build machines; these tests only run
    /// when one is installed.
    fn system_fonts() -> Option<FontSet> {
        FontSet::load(None, None).ok()
    }

    #[test]
    fn missing_configured_font_falls_through_to_search_list() {
        let missing = Path::new("/nonexistent/quoteme-font.ttf");
        let configured = FontSet::load(Some(missing), Some(missing));
        let searched = FontSet::load(None, None);
        assert_eq!(configured.is_ok(), searched.is_ok());
    }

    #[test]
    fn empty_search_list_reports_font_not_found() {
        let result = load_first(None, &["/nonexistent/a.ttf"]);
        assert!(matches!(result, Err(CanvasError::FontNotFound { searched: 1 })));

        let configured = Path::new("/nonexistent/b.ttf");
        let result = load_first(Some(configured), &["/nonexistent/a.ttf"]);
        assert!(matches!(result, Err(CanvasError::FontNotFound { searched: 2 })));
    }

    #[test]
    fn broken_configured_font_is_reported_not_replaced() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").expect("write");

        let quote = FontSet::load(Some(path.as_path()), None);
        assert!(matches!(quote, Err(CanvasError::InvalidFont { .. })));

        let author = load_first(Some(path.as_path()), AUTHOR_FONT_CANDIDATES);
        assert!(matches!(author, Err(CanvasError::InvalidFont { .. })));
    }

    #[test]
    fn garbage_font_file_is_invalid() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("bad.ttf");
        std::fs::write(&path, b"not a font").expect("write");

        assert!(matches!(load_font(&path), Err(CanvasError::InvalidFont { .. })));
    }

    #[test]
    fn glyph_width_grows_with_text_and_size() {
        let Some(fonts) = system_fonts() else { return };
        let small = GlyphMeasure::new(&fonts.quote, 20.0);
        let large = GlyphMeasure::new(&fonts.quote, 40.0);

        assert!(small.width("ab") > small.width("a"));
        assert!(large.width("quote") > small.width("quote"));
        assert_eq!(small.width(""), 0.0);
    }

    #[test]
    fn drawn_text_changes_pixels_near_center() {
        let Some(fonts) = system_fonts() else { return };
        let mut canvas = RgbaImage::from_pixel(200, 100, image::Rgba([0, 0, 0, 255]));
        let line = TextLine {
            measure: GlyphMeasure::new(&fonts.quote, 30.0),
            text: "HI".to_string(),
            baseline: 60.0,
            color: [255, 255, 255],
        };
        draw_shadowed_lines(&mut canvas, &[line]);

        let lit = canvas.pixels().filter(|p| p[0] > 128).count();
        assert!(lit > 0);
        assert_eq!(canvas.get_pixel(2, 2)[0], 0);
    }
}
