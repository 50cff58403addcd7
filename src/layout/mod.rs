//! Text layout engine.
//!
//! Greedy word wrapping against a caller-supplied width measure, plus the
//! vertical placement of a wrapped quote block and its author line on a
//! canvas. Everything here is pure: no I/O, no hidden state.

use crate::model::Resolution;

/// Extra leading added to the base font size to get the line pitch.
pub const LINE_LEADING_PX: f32 = 12.0;

/// Largest quote font size, reached on canvases 1200px wide or wider.
pub const MAX_BASE_FONT_PX: f32 = 48.0;

/// Horizontal space kept free around the quote block (both sides combined).
pub const HORIZONTAL_INSET_PX: f32 = 200.0;

/// Rendered width of a text fragment under some fixed font.
///
/// Implemented by the glyph measurer used for images, by terminal cell
/// width for the text box, and by any `Fn(&str) -> f32` (handy in tests).
pub trait Measure {
    /// Width of `text`, in the measurer's units.
    fn width(&self, text: &str) -> f32;
}

impl<F> Measure for F
where
    F: Fn(&str) -> f32,
{
    fn width(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Greedily partition `text` into lines narrower than `max_width`.
///
/// Words are whitespace-separated and never split. A word that is wider than
/// `max_width` on its own still gets its own line. A candidate line is
/// accepted only if it measures strictly less than `max_width`.
///
/// Returns an empty vector when `text` has no words.
pub fn wrap_text<M>(text: &str, max_width: f32, measure: &M) -> Vec<String>
where
    M: Measure + ?Sized,
{
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();

    for word in words {
        let candidate = format!("{current} {word}");
        if measure.width(&candidate) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    lines.push(current);
    lines
}

/// Font sizes derived from the canvas width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizing {
    /// Quote font size in px.
    pub base: f32,
    /// Author font size in px, `floor(base * 0.75)`.
    pub author: f32,
}

impl FontSizing {
    /// `base = min(48, width / 25)`, shrinking proportionally on narrow canvases.
    pub fn for_canvas_width(canvas_width: u32) -> Self {
        let base = MAX_BASE_FONT_PX.min(canvas_width as f32 / 25.0);
        Self {
            base,
            author: (base * 0.75).floor(),
        }
    }
}

/// Vertical offsets of a quote block centered on a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockLayout {
    /// Distance between successive quote baselines.
    pub line_pitch: f32,
    /// `line_count * line_pitch`.
    pub quote_block_height: f32,
    /// Gap between the last quote line and the author line.
    pub spacing_before_author: f32,
    /// `base_font_size * 0.8`.
    pub author_line_height: f32,
    /// Height of the whole block, author included.
    pub total_height: f32,
    /// Baseline of the first quote line.
    pub start_y: f32,
}

impl BlockLayout {
    /// Baseline of quote line `index` (0-based).
    pub fn line_baseline(&self, index: usize) -> f32 {
        self.start_y + index as f32 * self.line_pitch
    }

    /// Baseline of the author line.
    pub fn author_baseline(&self) -> f32 {
        self.start_y + self.quote_block_height + self.spacing_before_author
    }
}

/// Center `line_count` quote lines plus an author line vertically.
pub fn compute_layout(line_count: usize, canvas_height: u32, base_font_size: f32) -> BlockLayout {
    let line_pitch = base_font_size + LINE_LEADING_PX;
    let quote_block_height = line_count as f32 * line_pitch;
    let spacing_before_author = line_pitch;
    let author_line_height = base_font_size * 0.8;
    let total_height = quote_block_height + spacing_before_author + author_line_height;
    let start_y = (canvas_height as f32 - total_height) / 2.0 + line_pitch;

    BlockLayout {
        line_pitch,
        quote_block_height,
        spacing_before_author,
        author_line_height,
        total_height,
        start_y,
    }
}

/// Complete layout of a quote image: sizes, wrapped lines and offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLayout {
    /// Quote and author font sizes.
    pub sizing: FontSizing,
    /// Wrapped quote, including the surrounding double quotes.
    pub lines: Vec<String>,
    /// Vertical offsets of the block.
    pub block: BlockLayout,
}

impl QuoteLayout {
    /// Lay out `quote` for a canvas of `resolution`.
    ///
    /// `measure` must be bound to the quote font at `FontSizing::base`; callers
    /// get that size from [`FontSizing::for_canvas_width`] before building it.
    pub fn compute<M>(quote: &str, resolution: Resolution, measure: &M) -> Self
    where
        M: Measure + ?Sized,
    {
        let sizing = FontSizing::for_canvas_width(resolution.width);
        let max_width = resolution.width as f32 - HORIZONTAL_INSET_PX;
        let lines = wrap_text(&format!("\"{quote}\""), max_width, measure);
        let block = compute_layout(lines.len(), resolution.height, sizing.base);

        Self {
            sizing,
            lines,
            block,
        }
    }

    /// Quote lines paired with their baselines.
    pub fn positioned_lines(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.as_str(), self.block.line_baseline(i)))
    }
}
